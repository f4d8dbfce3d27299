//! Page content: building and caching.
//!
//! # Module Structure
//!
//! - `model`: Built page content (`View`)
//! - `registry`: Lazy build-and-cache layer (`ViewRegistry`)
//! - `templates`: Static and identity-based page bodies

mod model;
mod registry;
mod templates;

pub use model::View;
pub use registry::ViewRegistry;
