//! Transient user-visible notices.
//! Operations send notices via mpsc; the rendering layer drains them.

use std::sync::mpsc::{channel, Receiver, Sender};

/// Severity of a notice; drives the toast styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Clonable sending side handed to every component that reports to the
/// user. Sending never blocks; a dropped receiver is ignored because
/// notices are best-effort.
#[derive(Debug, Clone)]
pub struct NoticeSink {
    tx: Sender<Notice>,
}

impl NoticeSink {
    /// Create a sink together with the receiver the UI drains.
    pub fn channel() -> (Self, Receiver<Notice>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Error, message.into());
    }

    fn send(&self, level: NoticeLevel, message: String) {
        let _ = self.tx.send(Notice { level, message });
    }
}
