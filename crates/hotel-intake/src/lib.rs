//! Guest intake: recognise returning guests, score their loyalty, allocate a
//! matricule, persist the record and raise front-desk notifications.
//!
//! The entry point is [`IntakeEngine`]. It owns no storage of its own; every
//! read and write goes through the injected
//! [`GuestStore`](hotel_core::store::GuestStore).

pub mod engine;
pub mod error;
pub mod loyalty;
pub mod matcher;
pub mod notify;
pub mod request;

pub use engine::{IntakeConfig, IntakeEngine, IntakeOutcome};
pub use error::{IntakeError, ValidationError};
pub use request::GuestIntakeRequest;
