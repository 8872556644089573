use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use tokio::sync::Notify;

/// Cloning shares the buffer; the bus keeps one handle, the worker the other.
pub struct DropOldestQueue<T> {
    inner: Arc<DropOldestInner<T>>,
}

struct DropOldestInner<T> {
    buf: Mutex<VecDeque<T>>,
    capacity: usize,
    notify_any: Arc<Notify>,
}

impl<T> Clone for DropOldestQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> DropOldestQueue<T> {
    pub fn new(capacity: usize, notify_any: Arc<Notify>) -> Self {
        assert!(capacity > 0);

        Self {
            inner: Arc::new(DropOldestInner {
                buf: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
                notify_any,
            }),
        }
    }

    /// Appends `value`, returning true if the oldest value had to go.
    pub fn push(&self, value: T) -> bool {
        let mut buf = self.inner.buf.lock().expect("DropOldestQueue poisoned");
        let evicted = if buf.len() >= self.inner.capacity {
            buf.pop_front().is_some()
        } else {
            false
        };
        buf.push_back(value);
        drop(buf);
        self.inner.notify_any.notify_one();
        evicted
    }

    pub fn try_recv(&self) -> Option<T> {
        self.inner
            .buf
            .lock()
            .expect("DropOldestQueue poisoned")
            .pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_when_full() {
        let queue = DropOldestQueue::new(2, Arc::new(Notify::new()));
        assert!(!queue.push(1));
        assert!(!queue.push(2));
        assert!(queue.push(3));

        let reader = queue.clone();
        assert_eq!(reader.try_recv(), Some(2));
        assert_eq!(reader.try_recv(), Some(3));
        assert_eq!(reader.try_recv(), None);
    }
}
