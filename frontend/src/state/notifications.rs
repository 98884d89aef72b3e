//! Transient user-facing notices.
//!
//! [`NoticeQueue`] is the plain data structure; [`Notifier`] wraps it in a
//! signal so any component or service can raise a notice, each of which
//! expires on its own after [`NOTICE_TTL_MS`].

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::config::{MAX_NOTICES, NOTICE_TTL_MS};

/// Notice severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Info => "notice notice-info",
            NoticeLevel::Error => "notice notice-error",
        }
    }

    /// Get icon prefix for display.
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "✅",
            NoticeLevel::Info => "ℹ️",
            NoticeLevel::Error => "❌",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// Bounded list of visible notices, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    /// Adds a notice and returns its id. The oldest notice is dropped when
    /// the queue is full.
    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            level,
            text: text.into(),
        });
        if self.notices.len() > MAX_NOTICES {
            let overflow = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Shared handle used to raise notices from anywhere.
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<NoticeQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: create_rw_signal(NoticeQueue::default()),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    /// Visible notices, tracked.
    pub fn notices(&self) -> Vec<Notice> {
        self.queue.with(|q| q.notices().to_vec())
    }

    fn push(&self, level: NoticeLevel, text: String) {
        let Some(id) = self.queue.try_update(|q| q.push(level, text)) else {
            return;
        };
        let queue = self.queue;
        Timeout::new(NOTICE_TTL_MS, move || {
            queue.update(|q| q.dismiss(id));
        })
        .forget();
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = NoticeQueue::default();
        let a = queue.push(NoticeLevel::Info, "first");
        let b = queue.push(NoticeLevel::Error, "second");
        assert!(b > a);
        assert_eq!(queue.notices().len(), 2);
        assert_eq!(queue.notices()[1].level, NoticeLevel::Error);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = NoticeQueue::default();
        for i in 0..(MAX_NOTICES + 3) {
            queue.push(NoticeLevel::Info, format!("notice {}", i));
        }
        assert_eq!(queue.notices().len(), MAX_NOTICES);
        assert_eq!(queue.notices()[0].text, "notice 3");
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let mut queue = NoticeQueue::default();
        let keep = queue.push(NoticeLevel::Success, "saved");
        let drop = queue.push(NoticeLevel::Error, "failed");
        queue.dismiss(drop);
        assert_eq!(queue.notices().len(), 1);
        assert_eq!(queue.notices()[0].id, keep);
        queue.dismiss(999);
        assert_eq!(queue.notices().len(), 1);
    }
}
