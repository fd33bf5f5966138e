//! Front-desk notifications raised by intake outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a notification is about.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
  NewGuest,
  DuplicateDetected,
  DocumentCaptured,
}

/// A persisted notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
  pub id:         Uuid,
  pub title:      String,
  pub body:       String,
  pub guest_id:   Option<Uuid>,
  pub kind:       NotificationKind,
  /// Store-assigned.
  pub created_at: DateTime<Utc>,
  pub read:       bool,
}

/// Input to [`crate::store::GuestStore::insert_notification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
  pub title:    String,
  pub body:     String,
  pub guest_id: Option<Uuid>,
  pub kind:     NotificationKind,
}

impl NewNotification {
  /// Notifications are always created unread.
  pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> NotificationRecord {
    NotificationRecord {
      id,
      title: self.title,
      body: self.body,
      guest_id: self.guest_id,
      kind: self.kind,
      created_at,
      read: false,
    }
  }
}
