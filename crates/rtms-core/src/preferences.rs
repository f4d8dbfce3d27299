//! UI preferences that survive restarts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

/// Visual theme of the site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Redesign,
    Accessible,
    HighGlow,
}

impl ThemeMode {
    /// Hover glow animations are disabled in the accessible theme.
    pub fn animates_cards(&self) -> bool {
        !matches!(self, ThemeMode::Accessible)
    }
}

/// Repository for locally stored preferences.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Returns the saved theme, if any.
    async fn theme(&self) -> Result<Option<ThemeMode>>;

    async fn set_theme(&self, theme: ThemeMode) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_string_form() {
        assert_eq!(ThemeMode::HighGlow.to_string(), "high-glow");
        assert_eq!("accessible".parse::<ThemeMode>().unwrap(), ThemeMode::Accessible);
        assert!(!ThemeMode::Accessible.animates_cards());
        assert!(ThemeMode::default().animates_cards());
    }
}
