//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::identity::{Identity, Role};

/// The mutable holder of the current credential and identity.
///
/// Token and identity live in one `Option` so that one can never exist
/// without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    active: Option<(String, Identity)>,
}

impl Session {
    /// An anonymous session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated session.
    pub fn authenticated(token: impl Into<String>, identity: Identity) -> Self {
        Self {
            active: Some((token.into(), identity)),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.active.as_ref().map(|(_, identity)| identity)
    }

    pub fn token(&self) -> Option<&str> {
        self.active.as_ref().map(|(token, _)| token.as_str())
    }

    /// Role derived from the identity; anonymous when there is none.
    pub fn role(&self) -> Role {
        self.identity()
            .map(|identity| identity.role)
            .unwrap_or(Role::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        self.active.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == role
    }

    /// Drops token and identity together.
    pub fn clear(&mut self) {
        self.active = None;
    }
}
