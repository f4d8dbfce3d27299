//! Identity domain module.
//!
//! # Module Structure
//!
//! - `model`: Authenticated user profile (`Identity`) and access tier (`Role`)
//! - `credentials`: Login form payload (`LoginCredentials`)

mod credentials;
mod model;

pub use credentials::LoginCredentials;
pub use model::{Identity, Role};
