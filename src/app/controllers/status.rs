use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation that clears itself after the timeout.
    Status,
    /// Work in flight; stays until replaced.
    Progress,
    /// Stays until replaced or dismissed.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    posted_at: Instant,
}

/// Single-slot status line. Posting replaces whatever was shown, so a status
/// and an error are never visible together.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    timeout: Duration,
    current: Option<Notice>,
}

impl StatusBoard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current: None,
        }
    }

    pub fn post_status(&mut self, text: impl Into<String>, now: Instant) {
        self.post(NoticeKind::Status, text.into(), now);
    }

    pub fn post_progress(&mut self, text: impl Into<String>, now: Instant) {
        self.post(NoticeKind::Progress, text.into(), now);
    }

    pub fn post_error(&mut self, text: impl Into<String>, now: Instant) {
        self.post(NoticeKind::Error, text.into(), now);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop a transient status once its timeout has elapsed.
    pub fn expire(&mut self, now: Instant) {
        let expired = self.current.as_ref().is_some_and(|n| {
            n.kind == NoticeKind::Status && now.saturating_duration_since(n.posted_at) >= self.timeout
        });
        if expired {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| n.kind == NoticeKind::Error)
            .map(|n| n.text.as_str())
    }

    fn post(&mut self, kind: NoticeKind, text: String, now: Instant) {
        match kind {
            NoticeKind::Error => tracing::warn!(%text, "error notice"),
            _ => tracing::debug!(?kind, %text, "status notice"),
        }
        self.current = Some(Notice {
            kind,
            text,
            posted_at: now,
        });
    }
}
