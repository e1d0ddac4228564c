//! Observer lists - synchronous callback registries.
//!
//! Architecture:
//! - `ObserverList<T>` is a cloneable handle; clones share one registry
//! - `add()` returns an `ObserverId`, `remove(id)` unregisters exactly that callback
//! - `subscribe()` returns a `Subscription` that unregisters on drop
//! - `notify()` snapshots callbacks and invokes them with the lock released,
//!   so callbacks may add/remove observers (including themselves) safely
//!
//! Callback order: FIFO (first-registered, first-called).
//! Observers removed during a notify pass still receive that pass.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

/// Identifier handed out by `ObserverList::add`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// Type-erased callback
type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    observers: Vec<(ObserverId, Callback<T>)>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            observers: Vec::new(),
        }
    }
}

/// Ordered list of callbacks receiving `&T`.
pub struct ObserverList<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for ObserverList<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: 'static> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.len())
            .finish()
    }
}

impl<T: 'static> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Register a callback. Returns the id used to remove it later.
    pub fn add<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.add_arc(Arc::new(callback))
    }

    /// Register an already shared callback.
    pub fn add_arc(&self, callback: Arc<dyn Fn(&T) + Send + Sync>) -> ObserverId {
        let mut reg = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        let id = ObserverId(reg.next_id);
        reg.next_id += 1;
        reg.observers.push((id, callback));
        id
    }

    /// Register a callback bound to the returned guard's lifetime.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.add(callback);
        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                ObserverList { registry }.remove(id);
            }
        })
    }

    /// Remove the callback registered under `id`. Returns false if unknown.
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut reg = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        match reg.observers.iter().position(|(oid, _)| *oid == id) {
            Some(idx) => {
                reg.observers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Invoke every callback in registration order.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = {
            let reg = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            reg.observers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for cb in snapshot {
            cb(value);
        }
    }

    pub fn clear(&self) {
        self.registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .observers
            .clear();
    }

    pub fn contains(&self, id: ObserverId) -> bool {
        self.registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .observers
            .iter()
            .any(|(oid, _)| *oid == id)
    }
}

impl<T> ObserverList<T> {
    pub fn len(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .observers
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// RAII guard: unregisters its observer when dropped.
#[must_use = "dropping a Subscription unregisters the observer immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unregister now instead of waiting for drop.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    /// Keep the observer registered for the lifetime of the list.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Change notifier without payload.
///
/// Cloneable handle around an `ObserverList<()>`; app objects, entities and
/// repos all expose one of these for "something changed" signals.
#[derive(Clone, Default, Debug)]
pub struct ObservableEntity {
    observers: ObserverList<()>,
}

impl ObservableEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.add(move |_| observer())
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.subscribe(move |_| observer())
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn notify(&self) {
        self.observers.notify(&());
    }

    pub fn clear(&self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Closure that notifies this observable; handed to memoized values.
    pub fn notifier(&self) -> impl Fn() + Send + Sync + 'static {
        let observers = self.observers.clone();
        move || observers.notify(&())
    }
}
