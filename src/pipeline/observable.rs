//! Single-threaded observable cells.
//!
//! `Observable<T>` holds a value and an ordered list of subscriber callbacks.
//! Writing a value stores it, then invokes every subscriber synchronously in
//! registration order. Subscribing hands back a [`Subscription`] that removes
//! the callback when unsubscribed or dropped.
//!
//! Writes are crate-internal: port values, display state and editable values
//! are only ever changed by the pipeline, everything else observes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Inner<T> {
    value: T,
    version: u64,
    next_subscriber: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Shared, observable value. Clones share the same cell.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_subscriber: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current value (cloned).
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of writes so far.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Register `f` to run after every write. The current value is not replayed.
    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_subscriber;
            inner.next_subscriber += 1;
            let listener: Listener<T> = Rc::new(RefCell::new(f));
            inner.listeners.push((id, listener));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Store `value`, then notify subscribers in registration order.
    pub(crate) fn set(&self, value: T) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
            let listeners: Vec<Listener<T>> =
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (inner.value.clone(), listeners)
        };

        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(&snapshot),
                Err(_) => tracing::warn!("Skipping re-entrant subscriber notification"),
            }
        }
    }
}

impl<T: Clone + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

/// Capability to remove a subscriber. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel_now();
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
