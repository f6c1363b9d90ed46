//! Helpers shared by the integration tests.

#![allow(dead_code)]

use magicguard::{Notification, NotificationSink};
use std::sync::{Arc, Mutex};

/// Keeps every notification it is handed. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, notification: &Notification) -> magicguard::Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
