//! Observable attribute store with change notification.
//!
//! [`AttributeStore`] maps string keys to [`Value`]s in shared,
//! reference-counted storage (`Rc<RefCell<..>>`). When an attribute
//! changes (determined by `PartialEq`), key subscribers are notified in
//! registration order, then wildcard subscribers.
//!
//! # Re-entrancy
//!
//! Notification iterates over a snapshot of the subscriber list taken at
//! notification time, and no internal borrow is held while handlers run.
//! A handler may therefore call [`set`](AttributeStore::set),
//! [`get`](AttributeStore::get) or [`emit`](AttributeStore::emit)
//! re-entrantly; a re-entrant `set` triggers a new, separately-ordered
//! notification pass, and the equality gate is what keeps mutual updates
//! from looping. Subscribing or dropping a [`Subscription`] during
//! notification affects only subsequent passes. Handlers must release
//! any borrows of their own state before calling back into the store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::trace;

use super::value::Value;

type ChangeHandler = dyn Fn(&AttributeStore, &Value, &Value);
type AnyHandler = dyn Fn(&AttributeStore, &str, &Value, &Value);
type EventHandler = dyn Fn(&AttributeStore);

/// Subscribers are stored as weak references. Dead entries are pruned
/// lazily during notification.
struct StoreInner {
    attributes: HashMap<String, Value>,
    change_subs: HashMap<String, Vec<Weak<ChangeHandler>>>,
    any_subs: Vec<Weak<AnyHandler>>,
    event_subs: HashMap<String, Vec<Weak<EventHandler>>>,
}

/// A shared observable record of named attributes.
///
/// Cloning an `AttributeStore` creates a new handle to the **same**
/// inner state; both handles see the same attributes and share
/// subscribers.
pub struct AttributeStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl Clone for AttributeStore {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("AttributeStore")
            .field("attributes", &inner.attributes.len())
            .finish_non_exhaustive()
    }
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                attributes: HashMap::new(),
                change_subs: HashMap::new(),
                any_subs: Vec::new(),
                event_subs: HashMap::new(),
            })),
        }
    }

    /// Get a clone of the current value. A missing key reads as `Null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        self.inner
            .borrow()
            .attributes
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of all attributes, for configuration flattening.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Set an attribute. If the new value differs from the stored one
    /// (`PartialEq`, with a missing key reading as `Null`), key
    /// subscribers are notified with `(store, new, old)` in registration
    /// order, then wildcard subscribers with `(store, key, new, old)`.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let old = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.attributes.get(key).cloned().unwrap_or_default();
            if old == value {
                return;
            }
            inner.attributes.insert(key.to_string(), value.clone());
            old
        };
        trace!("set {}: {:?} -> {:?}", key, old, value);
        self.notify(key, &value, &old);
    }

    /// Raw write with no notification. Used where the original state
    /// machine mutates attributes directly to set up a later `set`.
    pub fn set_silent(&self, key: &str, value: impl Into<Value>) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(key.to_string(), value.into());
    }

    /// Re-announce the current value to subscribers with
    /// `new == old == current`, without writing anything.
    pub fn retrigger(&self, key: &str) {
        let current = self.get(key);
        self.notify(key, &current, &current);
    }

    /// Subscribe to changes of one attribute. Dropping the returned
    /// guard unsubscribes.
    pub fn on_change(
        &self,
        key: &str,
        handler: impl Fn(&AttributeStore, &Value, &Value) + 'static,
    ) -> Subscription {
        let strong: Rc<ChangeHandler> = Rc::new(handler);
        self.inner
            .borrow_mut()
            .change_subs
            .entry(key.to_string())
            .or_default()
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Subscribe to changes of one attribute AND invoke the handler
    /// immediately with the current value (`new == old == current`), so
    /// consumers need not special-case initial sync.
    pub fn change(
        &self,
        key: &str,
        handler: impl Fn(&AttributeStore, &Value, &Value) + 'static,
    ) -> Subscription {
        let strong: Rc<ChangeHandler> = Rc::new(handler);
        self.inner
            .borrow_mut()
            .change_subs
            .entry(key.to_string())
            .or_default()
            .push(Rc::downgrade(&strong));
        let current = self.get(key);
        strong(self, &current, &current);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Subscribe to changes of every attribute.
    pub fn on_any(
        &self,
        handler: impl Fn(&AttributeStore, &str, &Value, &Value) + 'static,
    ) -> Subscription {
        let strong: Rc<AnyHandler> = Rc::new(handler);
        self.inner
            .borrow_mut()
            .any_subs
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Subscribe to a named event that carries no attribute payload.
    pub fn on_event(&self, name: &str, handler: impl Fn(&AttributeStore) + 'static) -> Subscription {
        let strong: Rc<EventHandler> = Rc::new(handler);
        self.inner
            .borrow_mut()
            .event_subs
            .entry(name.to_string())
            .or_default()
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Fire a named event to its subscribers in registration order.
    pub fn emit(&self, name: &str) {
        let handlers: Vec<Rc<EventHandler>> = {
            let mut inner = self.inner.borrow_mut();
            match inner.event_subs.get_mut(name) {
                Some(subs) => {
                    subs.retain(|w| w.strong_count() > 0);
                    subs.iter().filter_map(Weak::upgrade).collect()
                }
                None => Vec::new(),
            }
        };
        trace!("emit {}", name);
        for handler in &handlers {
            handler(self);
        }
    }

    fn notify(&self, key: &str, new: &Value, old: &Value) {
        // Snapshot each subscriber list before dispatch so handlers can
        // call back into the store without hitting a held borrow.
        let key_handlers: Vec<Rc<ChangeHandler>> = {
            let mut inner = self.inner.borrow_mut();
            match inner.change_subs.get_mut(key) {
                Some(subs) => {
                    subs.retain(|w| w.strong_count() > 0);
                    subs.iter().filter_map(Weak::upgrade).collect()
                }
                None => Vec::new(),
            }
        };
        for handler in &key_handlers {
            handler(self, new, old);
        }

        let any_handlers: Vec<Rc<AnyHandler>> = {
            let mut inner = self.inner.borrow_mut();
            inner.any_subs.retain(|w| w.strong_count() > 0);
            inner.any_subs.iter().filter_map(Weak::upgrade).collect()
        };
        for handler in &any_handlers {
            handler(self, key, new, old);
        }
    }
}

/// RAII guard for a subscriber. Dropping it releases the strong
/// reference to the handler, so the weak entry in the store's subscriber
/// list fails to upgrade and is pruned on the next notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
