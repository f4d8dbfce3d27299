//! Application layer for RTMS.
//!
//! Coordinates the domain model, local storage and the backend client into
//! the session/navigation state machine that a front end drives.

pub mod app;
pub mod bootstrap;
pub mod navigation;
pub mod notice_board;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, Intent};
pub use bootstrap::build_app;
pub use navigation::{NavigationOutcome, NavigationRouter};
pub use notice_board::NoticeBoard;
pub use session::SessionStore;
pub use view::{View, ViewRegistry};
