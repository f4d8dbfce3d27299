//! Identity and role domain models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Access tier of a session.
///
/// `Anonymous` is never stored on an [`Identity`]; it is what a session
/// without identity reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Anonymous,
    Student,
    Staff,
}

impl Role {
    /// Human readable label used in the identity badge.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Anonymous => "Guest",
            Role::Student => "Student",
            Role::Staff => "Staff",
        }
    }

    /// Whether a session holding `self` may open a page that requires `required`.
    ///
    /// Roles are not ordered: staff pages need staff, and the only other
    /// constraint in use is plain authentication.
    pub fn satisfies(&self, required: Role) -> bool {
        match required {
            Role::Anonymous => true,
            other => *self == other,
        }
    }
}

/// Authenticated user profile as returned by the backend.
///
/// Field names follow the backend's camelCase JSON so the same record can be
/// persisted locally and read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub role: Role,
    /// Avatar image URL, if the user has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Two-letter fallback shown when there is no avatar.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect::<String>()
            .to_uppercase()
    }
}
