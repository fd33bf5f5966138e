//! Core types and trait definitions for the hotel front-desk guest registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The intake engine, the storage backends and the API all depend on it.

pub mod channel;
pub mod error;
pub mod guest;
pub mod matricule;
pub mod notification;
pub mod store;

pub use error::{Error, Result};
