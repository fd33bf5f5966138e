//! Notifications raised after a guest record is committed.
//!
//! Delivery is best effort. Each notification is a separate insert; a failed
//! insert is logged and reported but never undoes the guest record or the
//! other notification.

use hotel_core::{
  guest::GuestRecord,
  notification::{NewNotification, NotificationKind, NotificationRecord},
  store::GuestStore,
};
use tokio::time::Instant;

use crate::{engine::bounded, error::IntakeError};

/// The notifications a committed guest record calls for: one describing the
/// outcome, plus one more when an identity document was captured.
pub fn plan(guest: &GuestRecord) -> Vec<NewNotification> {
  let name = &guest.full_name;
  let mut planned = Vec::with_capacity(2);

  planned.push(if guest.is_duplicate {
    NewNotification {
      title:    "Returning guest detected".into(),
      body:     format!(
        "{name} is a returning guest. Loyalty: {}%",
        guest.loyalty_score
      ),
      guest_id: Some(guest.id),
      kind:     NotificationKind::DuplicateDetected,
    }
  } else {
    NewNotification {
      title:    "New guest registered".into(),
      body:     format!("{name} was registered successfully"),
      guest_id: Some(guest.id),
      kind:     NotificationKind::NewGuest,
    }
  });

  if guest.has_document() {
    planned.push(NewNotification {
      title:    "Identity document captured".into(),
      body:     format!("Identity document captured for {name}"),
      guest_id: Some(guest.id),
      kind:     NotificationKind::DocumentCaptured,
    });
  }

  planned
}

/// A notification insert that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedNotification {
  pub kind:  NotificationKind,
  pub error: String,
}

/// What [`emit`] managed to write.
#[derive(Debug, Clone, Default)]
pub struct EmitReport {
  pub created: Vec<NotificationRecord>,
  pub failed:  Vec<FailedNotification>,
}

impl EmitReport {
  pub fn is_complete(&self) -> bool { self.failed.is_empty() }
}

/// Write the planned notifications for `guest`, one insert each.
///
/// Never fails: the guest is already committed. Insert failures are logged
/// and collected in the report. Once `deadline` passes, the pending insert
/// and every later one are reported as failed without being attempted.
pub async fn emit<S: GuestStore>(
  store: &S,
  guest: &GuestRecord,
  deadline: Option<Instant>,
) -> EmitReport {
  let mut report = EmitReport::default();
  let mut expired = false;

  for notification in plan(guest) {
    let kind = notification.kind;
    if expired {
      report.failed.push(FailedNotification {
        kind,
        error: IntakeError::Timeout.to_string(),
      });
      continue;
    }

    let error = match bounded(deadline, store.insert_notification(notification)).await {
      Ok(Ok(record)) => {
        report.created.push(record);
        continue;
      }
      Ok(Err(e)) => e.to_string(),
      Err(timeout) => {
        expired = true;
        timeout.to_string()
      }
    };

    tracing::warn!(
      guest_id = %guest.id,
      kind = kind.as_ref(),
      error = %error,
      "failed to record notification"
    );
    report.failed.push(FailedNotification { kind, error });
  }

  report
}
