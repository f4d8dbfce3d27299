//! Session application services.
//!
//! [`SessionStore`] owns the current credential and identity, talks to the
//! backend for login/logout/verification and publishes lifecycle events.

mod store;

pub use store::SessionStore;
