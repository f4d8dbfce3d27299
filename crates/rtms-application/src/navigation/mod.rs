//! Navigation: which page is visible, and whether the session may see it.
//!
//! # Module Structure
//!
//! - `history`: Visited pages with a back/forward cursor (`History`)
//! - `router`: Gated page transitions (`NavigationRouter`, `NavigationOutcome`)

mod history;
mod router;

pub use history::History;
pub use router::{NavigationOutcome, NavigationRouter};
