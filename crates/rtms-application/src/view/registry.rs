use chrono::Utc;
use rtms_core::page::{Page, PageId};
use rtms_core::session::Session;
use std::collections::HashMap;
use std::sync::Arc;

use super::model::View;
use super::templates;

/// Lazily built, cached page content.
///
/// A page is built on its first visit and reused until invalidated.
/// Repeated `ensure` calls hand out the same `Arc`.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    cache: HashMap<PageId, Arc<View>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached view of `page`, building it first if needed.
    pub fn ensure(&mut self, page: &Page, session: &Session) -> Arc<View> {
        if let Some(view) = self.cache.get(&page.id) {
            tracing::debug!(page = %page.id, "View cache hit");
            return view.clone();
        }

        let (heading, lines) = templates::heading_and_lines(page, session);
        let view = Arc::new(View {
            page_id: page.id.clone(),
            heading,
            lines,
            personalized: page.personalized,
            built_at: Utc::now(),
        });
        tracing::debug!(page = %page.id, "View built");
        self.cache.insert(page.id.clone(), view.clone());
        view
    }

    pub fn get(&self, page_id: &str) -> Option<Arc<View>> {
        self.cache.get(page_id).cloned()
    }

    /// Drops the cached view of `page_id`. Returns whether one was cached.
    pub fn invalidate(&mut self, page_id: &str) -> bool {
        self.cache.remove(page_id).is_some()
    }

    /// Drops every view built from the session identity.
    pub fn invalidate_personalized(&mut self) {
        self.cache.retain(|_, view| !view.personalized);
    }

    pub fn is_cached(&self, page_id: &str) -> bool {
        self.cache.contains_key(page_id)
    }
}
