use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

pub struct LatestSlot<T> {
    slot: Mutex<Option<T>>,
    notify_any: Arc<Notify>,
}

impl<T> LatestSlot<T> {
    pub fn new(notify_any: Arc<Notify>) -> Self {
        Self {
            slot: Mutex::new(None),
            notify_any,
        }
    }

    /// Stores `value`, returning true if an unread value was overwritten.
    pub fn set(&self, value: T) -> bool {
        let replaced = self
            .slot
            .lock()
            .expect("LatestSlot poisoned")
            .replace(value)
            .is_some();
        self.notify_any.notify_one();
        replaced
    }

    pub fn take(&self) -> Option<T> {
        self.slot.lock().expect("LatestSlot poisoned").take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_newest() {
        let slot = LatestSlot::new(Arc::new(Notify::new()));
        assert!(!slot.set(1));
        assert!(slot.set(2));
        assert_eq!(slot.take(), Some(2));
        assert_eq!(slot.take(), None);
    }
}
