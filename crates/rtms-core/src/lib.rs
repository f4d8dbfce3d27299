//! Domain layer of the RTMS client.
//!
//! Holds the models (identity, session, page), the error type and the traits
//! the infrastructure and interaction crates implement. Nothing in here does
//! I/O.

pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod notice;
pub mod page;
pub mod preferences;
pub mod realtime;
pub mod session;

// Re-export common error type
pub use error::{ErrorKind, RtmsError};
