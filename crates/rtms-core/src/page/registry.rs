//! The fixed registry of navigable pages.

use std::collections::BTreeMap;

use super::model::{Page, PageId};
use crate::error::{Result, RtmsError};
use crate::identity::Role;

/// Page shown at startup and after a logout from a gated page.
pub const DEFAULT_PAGE_ID: &str = "home";

/// Every navigable page, known at startup.
///
/// The registry is immutable once built: pages are never discovered at
/// runtime, so an id that is not here is simply not navigable.
#[derive(Debug, Clone)]
pub struct PageRegistry {
    pages: BTreeMap<PageId, Page>,
    default_page: PageId,
}

impl PageRegistry {
    /// Builds a registry from `pages` with `default_page` as the start page.
    ///
    /// # Errors
    ///
    /// Returns a config error if ids are duplicated, or if the default page is
    /// missing or not open to anonymous sessions.
    pub fn new(pages: Vec<Page>, default_page: &str) -> Result<Self> {
        let mut map = BTreeMap::new();
        for page in pages {
            let id = page.id.clone();
            if map.insert(id.clone(), page).is_some() {
                return Err(RtmsError::config(format!("Duplicate page id '{}'", id)));
            }
        }

        let default = map
            .get(default_page)
            .ok_or_else(|| RtmsError::config(format!("Unknown default page '{}'", default_page)))?;
        if !default.is_accessible_to(Role::Anonymous) {
            return Err(RtmsError::config(format!(
                "Default page '{}' must be reachable without login",
                default_page
            )));
        }

        Ok(Self {
            pages: map,
            default_page: PageId::new(default_page),
        })
    }

    /// The site's page set with [`DEFAULT_PAGE_ID`] as start page.
    pub fn standard() -> Self {
        Self::standard_with_default(DEFAULT_PAGE_ID)
            .unwrap_or_else(|_| unreachable!("standard page set contains the default page"))
    }

    /// The site's page set with a custom start page.
    pub fn standard_with_default(default_page: &str) -> Result<Self> {
        Self::new(standard_pages(), default_page)
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn default_page(&self) -> &Page {
        // Presence is checked in `new`.
        &self.pages[self.default_page.as_str()]
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Pages a session with `role` may open, in id order.
    pub fn accessible_to(&self, role: Role) -> Vec<&Page> {
        self.pages
            .values()
            .filter(|page| page.is_accessible_to(role))
            .collect()
    }
}

fn standard_pages() -> Vec<Page> {
    vec![
        Page::public("home", "Home"),
        Page::public("join", "Join the Club"),
        Page::public("challenges", "Challenges"),
        Page::public("showcase", "Showcase"),
        Page::public("sponsors", "Sponsors"),
        Page::public("chapters", "Chapters"),
        Page::public("merch", "Merch"),
        Page::public("calendar", "Calendar"),
        Page::public("policies", "Policies"),
        Page::public("styleguide", "Style Guide"),
        Page::authenticated("dashboard", "Dashboard").personalized(),
        Page::authenticated("submissions", "My Submissions").personalized(),
        Page::authenticated("profile", "Profile").personalized(),
        Page::restricted("admin-dashboard", "Admin Dashboard", Role::Staff).personalized(),
        Page::restricted("manage-students", "Manage Students", Role::Staff),
        Page::restricted("manage-challenges", "Manage Challenges", Role::Staff),
        Page::restricted("manage-chapters", "Manage Chapters", Role::Staff),
        Page::restricted("analytics", "Analytics", Role::Staff),
        Page::restricted("settings", "Settings", Role::Staff),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = PageRegistry::standard();
        assert_eq!(registry.default_page().id, "home");
        assert!(registry.contains("admin-dashboard"));
        assert!(!registry.contains("nope"));

        let dashboard = registry.get("dashboard").unwrap();
        assert!(dashboard.requires_auth);
        assert!(dashboard.requires_role.is_none());
        assert!(dashboard.personalized);

        let settings = registry.get("settings").unwrap();
        assert_eq!(settings.requires_role, Some(Role::Staff));
    }

    #[test]
    fn test_accessible_to() {
        let registry = PageRegistry::standard();
        let anonymous = registry.accessible_to(Role::Anonymous);
        assert_eq!(anonymous.len(), 10);
        assert!(anonymous.iter().all(|page| !page.requires_auth));

        let student = registry.accessible_to(Role::Student);
        assert_eq!(student.len(), 13);
        assert_eq!(registry.accessible_to(Role::Staff).len(), 19);
    }

    #[test]
    fn test_default_page_must_be_public() {
        let err = PageRegistry::standard_with_default("dashboard").unwrap_err();
        assert!(err.to_string().contains("without login"));

        let err = PageRegistry::standard_with_default("missing").unwrap_err();
        assert!(err.to_string().contains("Unknown default page"));

        let registry = PageRegistry::standard_with_default("challenges").unwrap();
        assert_eq!(registry.default_page().id, "challenges");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let pages = vec![Page::public("home", "Home"), Page::public("home", "Again")];
        assert!(PageRegistry::new(pages, "home").is_err());
    }
}
