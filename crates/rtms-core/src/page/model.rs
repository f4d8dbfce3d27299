//! Page domain model.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::identity::Role;

/// Stable string identifier of a navigable page (e.g. `"admin-dashboard"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A navigable view and the rules gating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    /// Title used in the page header and navigation.
    pub title: &'static str,
    /// Inaccessible to anonymous sessions.
    pub requires_auth: bool,
    /// Additional role constraint on top of authentication.
    pub requires_role: Option<Role>,
    /// Content is built from the session identity and must be rebuilt when it changes.
    pub personalized: bool,
}

impl Page {
    /// A page anyone may open.
    pub fn public(id: &str, title: &'static str) -> Self {
        Self {
            id: PageId::new(id),
            title,
            requires_auth: false,
            requires_role: None,
            personalized: false,
        }
    }

    /// A page that needs a logged-in session.
    pub fn authenticated(id: &str, title: &'static str) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(id, title)
        }
    }

    /// A page that needs a logged-in session holding `role`.
    pub fn restricted(id: &str, title: &'static str, role: Role) -> Self {
        Self {
            requires_role: Some(role),
            ..Self::authenticated(id, title)
        }
    }

    pub fn personalized(mut self) -> Self {
        self.personalized = true;
        self
    }

    /// Whether a session with `role` passes both gates of this page.
    pub fn is_accessible_to(&self, role: Role) -> bool {
        if self.requires_auth && role == Role::Anonymous {
            return false;
        }
        self.requires_role
            .map(|required| role.satisfies(required))
            .unwrap_or(true)
    }
}
