//! Page domain module.
//!
//! # Module Structure
//!
//! - `model`: Page identifier and access rules (`PageId`, `Page`)
//! - `registry`: Fixed set of navigable pages (`PageRegistry`)

mod model;
mod registry;

pub use model::{Page, PageId};
pub use registry::{DEFAULT_PAGE_ID, PageRegistry};
