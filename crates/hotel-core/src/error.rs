//! Error types for `hotel-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed matricule: {0:?}")]
  InvalidMatricule(String),

  #[error("unknown {kind} discriminant: {value:?}")]
  UnknownDiscriminant { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
