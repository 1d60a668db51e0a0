//! In-process change notification.
//!
//! A subscription watches one key (in the default collection or in a
//! named one) and remembers the last value it saw.  After every write
//! the store hands the freshly written document to `ChangeTracker::notify`,
//! which compares each watched value with its snapshot and calls the
//! callback when they differ.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;

use super::document::Document;

/// Callback invoked as `callback(new_value, old_value)`.
///
/// `None` means the key is absent.
pub type ChangeCallback = dyn FnMut(Option<&Value>, Option<&Value>) + Send;

struct Entry {
    id: u64,
    collection: Option<String>,
    key: String,
    last: Option<Value>,
    callback: Arc<Mutex<Box<ChangeCallback>>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Observer list owned by a single `Store`.
#[derive(Default)]
pub struct ChangeTracker {
    registry: Arc<Mutex<Registry>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for `(collection, key)` with `current` as the
    /// initial snapshot.
    pub fn subscribe<F>(
        &self,
        collection: Option<&str>,
        key: &str,
        current: Option<Value>,
        callback: F,
    ) -> Subscription
    where
        F: FnMut(Option<&Value>, Option<&Value>) + Send + 'static,
    {
        let callback: Box<ChangeCallback> = Box::new(callback);
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            collection: collection.map(str::to_string),
            key: key.to_string(),
            last: current,
            callback: Arc::new(Mutex::new(callback)),
        });

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Compare every subscription against `doc` and fire the ones whose
    /// value changed, in registration order.
    ///
    /// Snapshots are updated under the lock; callbacks run after it is
    /// released so they may unsubscribe themselves or others.
    pub fn notify(&self, doc: &Document) {
        let fired: Vec<_> = {
            let mut registry = lock(&self.registry);
            registry
                .entries
                .iter_mut()
                .filter_map(|entry| {
                    let current = doc.get(entry.collection.as_deref(), &entry.key).cloned();
                    if current == entry.last {
                        return None;
                    }
                    let old = std::mem::replace(&mut entry.last, current.clone());
                    Some((Arc::clone(&entry.callback), current, old))
                })
                .collect()
        };

        for (callback, new, old) in fired {
            let mut guard = lock(&callback);
            (*guard)(new.as_ref(), old.as_ref());
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by `Store::on_did_change`.
///
/// Dropping the handle keeps the subscription alive; call
/// `unsubscribe` to stop notifications.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stop notifications for this subscription.  Calling it again, or
    /// after the store is gone, does nothing.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).entries.retain(|e| e.id != self.id);
        }
    }
}

// A panicking callback must not disable notifications for the rest of
// the store's lifetime.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with(key: &str, value: Value) -> Document {
        let mut doc = Document::default();
        doc.set(None, key, value).unwrap();
        doc
    }

    #[test]
    fn fires_only_on_change() {
        let tracker = ChangeTracker::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let _sub = tracker.subscribe(
            None,
            "k",
            Some(json!(1)),
            move |new, old| sink.lock().unwrap().push((new.cloned(), old.cloned())),
        );

        tracker.notify(&doc_with("k", json!(1)));
        tracker.notify(&doc_with("k", json!(2)));
        tracker.notify(&doc_with("k", json!(2)));

        assert_eq!(*seen.lock().unwrap(), vec![(Some(json!(2)), Some(json!(1)))]);
    }

    #[test]
    fn reports_removal_as_none() {
        let tracker = ChangeTracker::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let _sub = tracker.subscribe(
            None,
            "k",
            Some(json!("x")),
            move |new, old| sink.lock().unwrap().push((new.cloned(), old.cloned())),
        );
        tracker.notify(&Document::default());

        assert_eq!(*seen.lock().unwrap(), vec![(None, Some(json!("x")))]);
    }

    #[test]
    fn unsubscribe_twice_is_noop() {
        let tracker = ChangeTracker::new();
        let sub = tracker.subscribe(None, "k", None, |_, _| {});
        assert_eq!(tracker.len(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(tracker.is_empty());
    }

    #[test]
    fn unsubscribe_after_tracker_dropped() {
        let tracker = ChangeTracker::new();
        let sub = tracker.subscribe(None, "k", None, |_, _| {});
        drop(tracker);
        sub.unsubscribe();
    }
}
