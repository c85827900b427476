//! User-visible status notices.
//!
//! Every repository operation and every form validation failure reports its
//! outcome through a [`NotificationSink`]. Notices are part of the observable
//! behavior of the application; diagnostics go through `tracing` instead.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Receives notices. Fire-and-forget: implementations must not fail or panic.
pub trait NotificationSink {
    fn notice(&mut self, kind: NoticeKind, message: &str);

    fn success(&mut self, message: &str) {
        self.notice(NoticeKind::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notice(NoticeKind::Error, message);
    }
}

/// A sink that keeps every notice in arrival order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.kind == NoticeKind::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl NotificationSink for NoticeLog {
    fn notice(&mut self, kind: NoticeKind, message: &str) {
        self.notices.push(Notice {
            kind,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_order_and_kinds() {
        let mut log = NoticeLog::new();
        log.success("saved");
        log.error("boom");
        assert_eq!(
            log.notices(),
            &[Notice::success("saved"), Notice::error("boom")]
        );
        assert!(log.has_errors());
    }

    #[test]
    fn drain_empties_the_log() {
        let mut log = NoticeLog::new();
        log.success("one");
        assert_eq!(log.drain().len(), 1);
        assert!(log.notices().is_empty());
        assert!(!log.has_errors());
    }
}
