//! User-facing alerts.

use parking_lot::Mutex;

/// The blocking alert the user has to acknowledge.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Keeps every alert in order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    messages: Mutex<Vec<String>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Notifier for NoticeLog {
    fn alert(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}
