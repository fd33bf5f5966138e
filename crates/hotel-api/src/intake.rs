//! Handler for `POST /intake`.
//!
//! Body: [`GuestIntakeRequest`]. Returns `201` with the persisted
//! [`GuestRecord`](hotel_core::guest::GuestRecord), `422` when the request
//! fails validation and `504` when the configured deadline elapses.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use hotel_core::{channel::ChannelValidator, store::GuestStore};
use hotel_intake::{GuestIntakeRequest, IntakeEngine};

use crate::error::ApiError;

/// `POST /intake`
pub async fn submit<S, V>(
  State(engine): State<Arc<IntakeEngine<S, V>>>,
  Json(request): Json<GuestIntakeRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GuestStore,
  V: ChannelValidator,
{
  let guest = engine.submit_intake(request).await?;
  Ok((StatusCode::CREATED, Json(guest)))
}
