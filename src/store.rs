//! Observable state holder
//!
//! [`Store`] wraps a `tokio::sync::watch` channel: `get`/`set`/`update`
//! change the value, and [`Store::subscribe`] hands out a receiver that
//! sees the current value and wakes on every change. Receivers always
//! observe the latest value; intermediate values may be skipped. Dropping
//! a receiver unsubscribes it. Clones share the same value and receivers.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared observable value
pub struct Store<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default + Clone> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Store<T> {
    /// Create a store holding `value`
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Read the current value without cloning it
    ///
    /// `f` must not write to the same store.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Replace the value and wake receivers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modify the value in place and wake receivers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Receiver of the current value and every later change
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live receivers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &*self.tx.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_get_set_update() {
        let store = Store::new(1);
        assert_eq!(store.get(), 1);

        store.set(5);
        assert_eq!(store.get(), 5);

        store.update(|v| *v += 1);
        assert_eq!(store.get(), 6);
        assert_eq!(store.read(|v| v * 2), 12);
    }

    #[tokio::test]
    async fn test_subscribe_sees_current_and_changes() {
        let store = Store::new(String::from("a"));
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow_and_update(), "a");
        assert!(!rx.has_changed().unwrap());

        store.set("b".to_string());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "b");

        store.update(|v| v.push('c'));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "bc");
    }

    #[tokio::test]
    async fn test_changed_wakes_waiting_receiver() {
        let store = Store::new(0);
        let mut rx = store.subscribe();

        let waiter = tokio::spawn(async move {
            rx.changed().await.unwrap();
            *rx.borrow()
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        store.set(9);
        assert_eq!(waiter.await.unwrap(), 9);
    }

    #[test]
    fn test_dropping_receiver_unsubscribes() {
        let store = Store::new(0);

        {
            let _rx = store.subscribe();
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);

        // Writes without receivers still land
        store.set(3);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn test_clones_share_state_and_receivers() {
        let a = Store::new(vec![1]);
        let b = a.clone();
        let rx = a.subscribe();

        b.update(|v| v.push(2));
        assert_eq!(a.get(), vec![1, 2]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(b.subscriber_count(), 1);
    }

    #[test]
    fn test_concurrent_updates_leave_receivers_on_latest() {
        let store = Store::new(0u64);
        let rx = store.subscribe();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        store.update(|v| *v += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(), 8000);
        assert_eq!(*rx.borrow(), 8000);
    }
}
