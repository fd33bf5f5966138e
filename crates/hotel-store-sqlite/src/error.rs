//! Error type for `hotel-store-sqlite`.

use hotel_core::store::{Conflict, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] hotel_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl StoreError for Error {
  /// Map SQLite UNIQUE violations on the guarded `guests` columns.
  fn conflict(&self) -> Option<Conflict> {
    let Error::Database(tokio_rusqlite::Error::Rusqlite(
      rusqlite::Error::SqliteFailure(failure, Some(message)),
    )) = self
    else {
      return None;
    };
    if failure.code != rusqlite::ErrorCode::ConstraintViolation {
      return None;
    }
    if message.contains("guests.matricule") {
      Some(Conflict::Matricule)
    } else if message.contains("guests.previous_visit") {
      Some(Conflict::PreviousVisit)
    } else {
      None
    }
  }
}
