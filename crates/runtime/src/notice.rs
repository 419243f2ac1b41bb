//! Transient user-facing notifications.

use std::time::Duration;

/// How long a notice stays visible in an interactive view.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A notification queued by an action for the view to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub level: NoticeLevel,
    /// Error text behind a failure, if any.
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(title: &'static str) -> Self {
        Self {
            title,
            level: NoticeLevel::Success,
            detail: None,
        }
    }

    pub fn error(title: &'static str, detail: impl Into<String>) -> Self {
        Self {
            title,
            level: NoticeLevel::Error,
            detail: Some(detail.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
