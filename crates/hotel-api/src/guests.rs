//! Handlers for `/guests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/guests` | Newest first; optional `?limit=&offset=` |
//! | `GET`  | `/guests/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use hotel_core::{channel::ChannelValidator, guest::GuestRecord, store::GuestStore};
use hotel_intake::IntakeEngine;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

const DEFAULT_PAGE: usize = 50;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

/// `GET /guests[?limit=<n>][&offset=<n>]`
pub async fn list<S, V>(
  State(engine): State<Arc<IntakeEngine<S, V>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<GuestRecord>>, ApiError>
where
  S: GuestStore,
  V: ChannelValidator,
{
  let guests = engine
    .store()
    .list_guests(
      params.limit.unwrap_or(DEFAULT_PAGE),
      params.offset.unwrap_or(0),
    )
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(guests))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /guests/:id`
pub async fn get_one<S, V>(
  State(engine): State<Arc<IntakeEngine<S, V>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<GuestRecord>, ApiError>
where
  S: GuestStore,
  V: ChannelValidator,
{
  let guest = engine
    .store()
    .get_guest(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("guest {id} not found")))?;
  Ok(Json(guest))
}
