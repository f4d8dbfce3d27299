//! Transient notices with automatic expiry.

use rtms_core::notice::Notice;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Notices currently on screen, each dropped once its TTL has passed.
#[derive(Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    entries: VecDeque<(Instant, Notice)>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: VecDeque::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn post(&mut self, notice: Notice) {
        self.entries.push_back((Instant::now(), notice));
    }

    /// Notices that have not expired yet, oldest first.
    pub fn active(&mut self) -> Vec<Notice> {
        let now = Instant::now();
        while let Some((posted, _)) = self.entries.front() {
            if now.duration_since(*posted) < self.ttl {
                break;
            }
            self.entries.pop_front();
        }
        self.entries
            .iter()
            .map(|(_, notice)| notice.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notices_expire_after_ttl() {
        let mut board = NoticeBoard::new(Duration::from_secs(5));
        board.post(Notice::success("Welcome back!"));
        tokio::time::advance(Duration::from_secs(3)).await;
        board.post(Notice::info("Submission received"));

        assert_eq!(board.active().len(), 2);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(board.active(), vec![Notice::info("Submission received")]);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(board.active().is_empty());
    }
}
