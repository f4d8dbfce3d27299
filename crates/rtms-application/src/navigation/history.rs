use rtms_core::page::PageId;

/// Visited pages with a cursor, browser style.
///
/// Invariant: never empty, and `cursor < entries.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<PageId>,
    cursor: usize,
}

impl History {
    pub fn new(start: PageId) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    /// Appends `id` after the cursor, dropping any forward entries.
    pub fn push(&mut self, id: PageId) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(id);
        self.cursor = self.entries.len() - 1;
    }

    pub fn current(&self) -> &PageId {
        &self.entries[self.cursor]
    }

    pub fn peek_back(&self) -> Option<&PageId> {
        self.cursor.checked_sub(1).map(|i| &self.entries[i])
    }

    pub fn peek_forward(&self) -> Option<&PageId> {
        self.entries.get(self.cursor + 1)
    }

    pub fn step_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn step_forward(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    pub fn entries(&self) -> &[PageId] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
