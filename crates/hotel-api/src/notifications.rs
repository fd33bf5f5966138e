//! Handlers for `/notifications` and the dashboard counters.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/notifications` | Newest first; `?unread=true`, `?limit=` |
//! | `POST` | `/notifications/:id/read` | 204; 404 if not found |
//! | `GET`  | `/stats` | Guest count and unread notification count |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use hotel_core::{
  channel::ChannelValidator,
  notification::NotificationRecord,
  store::GuestStore,
};
use hotel_intake::IntakeEngine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  #[serde(default)]
  pub unread: bool,
  pub limit:  Option<usize>,
}

/// `GET /notifications[?unread=true][&limit=<n>]`
pub async fn list<S, V>(
  State(engine): State<Arc<IntakeEngine<S, V>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<NotificationRecord>>, ApiError>
where
  S: GuestStore,
  V: ChannelValidator,
{
  let notifications = engine
    .store()
    .list_notifications(params.unread, params.limit.unwrap_or(50))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(notifications))
}

/// `POST /notifications/:id/read`
pub async fn mark_read<S, V>(
  State(engine): State<Arc<IntakeEngine<S, V>>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: GuestStore,
  V: ChannelValidator,
{
  let found = engine
    .store()
    .mark_notification_read(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if found {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("notification {id} not found")))
  }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
  pub guests:               u64,
  pub unread_notifications: u64,
}

/// `GET /stats`
pub async fn stats<S, V>(
  State(engine): State<Arc<IntakeEngine<S, V>>>,
) -> Result<Json<Stats>, ApiError>
where
  S: GuestStore,
  V: ChannelValidator,
{
  let store = engine.store();
  let guests = store
    .count_guests()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let unread_notifications = store
    .count_unread_notifications()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(Stats { guests, unread_notifications }))
}
