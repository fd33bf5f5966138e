//! JSON REST API for the front desk.
//!
//! Exposes an axum [`Router`] backed by an [`IntakeEngine`] over any
//! [`hotel_core::store::GuestStore`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", hotel_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod guests;
pub mod intake;
pub mod notifications;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use hotel_core::{channel::ChannelValidator, store::GuestStore};
use hotel_intake::IntakeEngine;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, V>(engine: Arc<IntakeEngine<S, V>>) -> Router<()>
where
  S: GuestStore + 'static,
  V: ChannelValidator + 'static,
{
  Router::new()
    // Intake
    .route("/intake", post(intake::submit::<S, V>))
    // Guests
    .route("/guests", get(guests::list::<S, V>))
    .route("/guests/{id}", get(guests::get_one::<S, V>))
    // Notifications
    .route("/notifications", get(notifications::list::<S, V>))
    .route("/notifications/{id}/read", post(notifications::mark_read::<S, V>))
    .route("/stats", get(notifications::stats::<S, V>))
    .layer(TraceLayer::new_for_http())
    .with_state(engine)
}

// ─── Integration tests ────────────────────────────────────────────────────────
