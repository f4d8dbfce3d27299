//! Session domain module.
//!
//! This module contains the authenticated-session model, the events it emits
//! and the persistence interface.
//!
//! # Module Structure
//!
//! - `model`: Current credential + identity (`Session`)
//! - `event`: Typed lifecycle events (`SessionEvent`)
//! - `repository`: Repository trait for persisting the session locally
//!
//! # Usage
//!
//! ```ignore
//! use rtms_core::session::{Session, SessionEvent, SessionRepository};
//! ```

mod event;
mod model;
mod repository;

pub use event::SessionEvent;
pub use model::Session;
pub use repository::{PersistedSession, SessionRepository};
