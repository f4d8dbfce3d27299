use chrono::{DateTime, Utc};
use rtms_core::page::PageId;

/// Built content of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub page_id: PageId,
    pub heading: String,
    pub lines: Vec<String>,
    /// Built from the session identity; dropped whenever the session changes.
    pub personalized: bool,
    pub built_at: DateTime<Utc>,
}

impl View {
    pub fn render(&self) -> String {
        let mut out = self.heading.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}
