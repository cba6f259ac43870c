//! User-visible notices.
//!
//! Notices are fire-and-forget: emitting one never blocks and never changes
//! what a search returns. The host drains them from a [`NoticeBoard`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::warn;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn error(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            at,
        }
    }
}

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only logs.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => warn!(message = %notice.message, "Notice"),
        }
    }
}

/// Bounded queue of pending notices, oldest dropped first.
#[derive(Debug)]
pub struct NoticeBoard {
    capacity: usize,
    notices: Mutex<VecDeque<Notice>>,
}

impl NoticeBoard {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            notices: Mutex::new(VecDeque::new()),
        }
    }

    /// Remove and return all pending notices, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notice>> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        TracingNotifier.notify(notice.clone());
        let mut notices = self.lock();
        if notices.len() == self.capacity {
            notices.pop_front();
        }
        notices.push_back(notice);
    }
}
