//! The `GuestStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `hotel-store-sqlite`).
//! The intake engine and the API depend on this abstraction, never on a
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  guest::{GuestRecord, NewGuest},
  notification::{NewNotification, NotificationRecord},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`GuestStore::find_guests`].
///
/// `channel_number` and `name_contains` are alternatives: a record matches
/// if it satisfies either one. With both unset every record matches.
#[derive(Debug, Clone, Default)]
pub struct GuestQuery {
  /// Exact match on the messaging-channel number.
  pub channel_number: Option<String>,
  /// Case-insensitive substring of the full name.
  pub name_contains:  Option<String>,
  /// Skip records that a later intake has already continued.
  pub heads_only:     bool,
  pub limit:          Option<usize>,
}

impl GuestQuery {
  /// Whether `guest` satisfies the channel/name alternatives. `heads_only`
  /// and `limit` depend on the whole store and are not checked here.
  pub fn matches(&self, guest: &GuestRecord) -> bool {
    if self.channel_number.is_none() && self.name_contains.is_none() {
      return true;
    }
    let by_channel = self
      .channel_number
      .as_deref()
      .is_some_and(|c| guest.channel_number == c);
    let by_name = self
      .name_contains
      .as_deref()
      .is_some_and(|n| guest.full_name.to_lowercase().contains(&n.to_lowercase()));
    by_channel || by_name
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A uniqueness rule the store refused to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
  /// Another record already carries this matricule.
  Matricule,
  /// Another record already continues the same previous visit.
  PreviousVisit,
}

/// Errors returned by a [`GuestStore`] must say whether they are a
/// uniqueness conflict, so callers can retry the insert.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn conflict(&self) -> Option<Conflict>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a guest registry backend.
///
/// Guest records are insert-only. Stores must enforce that matricules are
/// unique and that any record is named as `previous_visit` at most once;
/// violations surface as a [`StoreError`] whose [`StoreError::conflict`] is
/// set.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GuestStore: Send + Sync {
  type Error: StoreError;

  // ── Guests ────────────────────────────────────────────────────────────

  /// Persist a new guest record. `id` and `created_at` are set by the store.
  fn insert_guest(
    &self,
    guest: NewGuest,
  ) -> impl Future<Output = Result<GuestRecord, Self::Error>> + Send + '_;

  /// Records matching `query`, exact channel matches first, then newest
  /// first.
  fn find_guests<'a>(
    &'a self,
    query: &'a GuestQuery,
  ) -> impl Future<Output = Result<Vec<GuestRecord>, Self::Error>> + Send + 'a;

  /// Retrieve a guest record by id. Returns `None` if not found.
  fn get_guest(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<GuestRecord>, Self::Error>> + Send + '_;

  /// Page through all guest records, newest first.
  fn list_guests(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<GuestRecord>, Self::Error>> + Send + '_;

  fn count_guests(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  /// Persist a notification, unread, with a store-assigned timestamp.
  fn insert_notification(
    &self,
    notification: NewNotification,
  ) -> impl Future<Output = Result<NotificationRecord, Self::Error>> + Send + '_;

  /// Notifications, newest first.
  fn list_notifications(
    &self,
    unread_only: bool,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<NotificationRecord>, Self::Error>> + Send + '_;

  fn count_unread_notifications(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Mark a notification as read. Returns `false` if it does not exist.
  fn mark_notification_read(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
