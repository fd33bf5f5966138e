//! Error types for `hotel-intake`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why an intake was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("messaging-channel number {number:?} is not valid for {country_code}")]
  InvalidChannel { number: String, country_code: String },

  #[error("stay length must be a positive number of nights, got {0}")]
  InvalidStayLength(f64),
}

/// An intake that did not produce a guest record.
///
/// Notification failures never appear here; they are logged and reported in
/// [`crate::notify::EmitReport`].
#[derive(Debug, Error)]
pub enum IntakeError {
  #[error("invalid intake: {0}")]
  Validation(#[from] ValidationError),

  #[error("duplicate lookup failed: {0}")]
  Query(#[source] BoxError),

  #[error("guest record was not persisted: {0}")]
  Persistence(#[source] BoxError),

  #[error("intake deadline elapsed")]
  Timeout,
}

impl IntakeError {
  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}
