//! Transient toast notifications. Pages queue them, the renderer drains
//! them; nothing is retained after a drain.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Toast>,
}

impl Notifier {
    pub fn success(&mut self, message: impl Into<String>) {
        self.queue.push_back(Toast {
            level: ToastLevel::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "error toast");
        self.queue.push_back(Toast {
            level: ToastLevel::Error,
            message,
        });
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
