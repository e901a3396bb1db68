#![forbid(unsafe_code)]

//! Shared selection registry keyed by group id.
//!
//! Tab groups that share a group id read their initial selection from the
//! registry and write every user selection back to it. The registry is owned
//! by the page session and injected into each group, so there is no global
//! state; two sessions never observe each other.
//!
//! # Invariants
//!
//! 1. An entry is created the first time a group id is written or subscribed
//!    to. Reading an unknown group id leaves the registry unchanged.
//! 2. [`SelectionStore::set`] notifies every live subscriber of that group
//!    before it returns, in subscription order.
//! 3. Writing the value already stored is a no-op.
//! 4. [`SelectionStore::clear`] forgets every stored value but keeps existing
//!    subscriptions attached.

use std::cell::RefCell;
use std::fmt;

use ahash::AHashMap;

use crate::reactive::{Observable, Subscription};

/// Key-value store synchronizing selections across tab groups.
///
/// Implementations are single-threaded and use interior mutability; all
/// methods take `&self` so the store can be shared through `Rc`.
pub trait SelectionStore {
    /// Last value selected for `group`.
    fn get(&self, group: &str) -> Option<String>;

    /// Record a selection for `group` and notify its subscribers.
    fn set(&self, group: &str, value: &str);

    /// Observe every future selection recorded for `group`.
    fn subscribe(&self, group: &str, callback: Box<dyn Fn(&str)>) -> Subscription;

    /// Forget all recorded selections.
    fn clear(&self);
}

/// In-memory [`SelectionStore`] with one [`Observable`] per group id.
#[derive(Default)]
pub struct SharedSelections {
    groups: RefCell<AHashMap<String, Observable<Option<String>>>>,
}

impl fmt::Debug for SharedSelections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.groups.borrow();
        let mut map = f.debug_map();
        for (group, slot) in groups.iter() {
            map.entry(group, &slot.get());
        }
        map.finish()
    }
}

impl SharedSelections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the slot for `group`, creating it if needed.
    ///
    /// The map borrow is released before the handle is returned, so callers
    /// can notify subscribers that re-enter the registry.
    fn slot(&self, group: &str) -> Observable<Option<String>> {
        let mut groups = self.groups.borrow_mut();
        if let Some(slot) = groups.get(group) {
            return slot.clone();
        }
        let slot = Observable::new(None);
        groups.insert(group.to_owned(), slot.clone());
        slot
    }

    /// Number of group ids written or subscribed to so far.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.borrow().len()
    }

    /// Live subscribers watching `group`.
    #[must_use]
    pub fn subscriber_count(&self, group: &str) -> usize {
        self.groups
            .borrow()
            .get(group)
            .map_or(0, Observable::subscriber_count)
    }
}

impl SelectionStore for SharedSelections {
    fn get(&self, group: &str) -> Option<String> {
        self.groups.borrow().get(group).and_then(Observable::get)
    }

    fn set(&self, group: &str, value: &str) {
        let slot = self.slot(group);
        let changed = slot.set(Some(value.to_owned()));
        tracing::debug!(message = "selection.set", group, value, changed);
    }

    fn subscribe(&self, group: &str, callback: Box<dyn Fn(&str)>) -> Subscription {
        self.slot(group).subscribe(move |value| {
            if let Some(value) = value {
                callback(value);
            }
        })
    }

    fn clear(&self) {
        let slots: Vec<Observable<Option<String>>> =
            self.groups.borrow().values().cloned().collect();
        for slot in &slots {
            slot.set(None);
        }
        tracing::debug!(message = "selection.clear", groups = slots.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[test]
    fn entries_are_created_on_write_or_subscribe() {
        let store = SharedSelections::new();
        assert_eq!(store.get("engine"), None);
        assert_eq!(store.get("runtime"), None);
        assert_eq!(store.group_count(), 0);

        store.set("engine", "Revit");
        let _sub = store.subscribe("runtime", Box::new(|_| {}));
        assert_eq!(store.group_count(), 2);
        assert_eq!(store.get("engine").as_deref(), Some("Revit"));
        assert_eq!(store.get("runtime"), None);
        assert_eq!(store.group_count(), 2);
    }

    #[test]
    fn set_notifies_subscribers_synchronously() {
        let store = SharedSelections::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = store.subscribe(
            "engine",
            Box::new(move |v| s.borrow_mut().push(v.to_owned())),
        );

        store.set("engine", "Revit");
        assert_eq!(*seen.borrow(), vec!["Revit".to_owned()]);
        assert_eq!(store.get("engine").as_deref(), Some("Revit"));
    }

    #[test]
    fn groups_are_isolated() {
        let store = SharedSelections::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let _sub = store.subscribe("a", Box::new(move |_| *h.borrow_mut() += 1));
        store.set("b", "x");
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn repeated_value_does_not_renotify() {
        let store = SharedSelections::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let _sub = store.subscribe("g", Box::new(move |_| *h.borrow_mut() += 1));
        store.set("g", "b");
        store.set("g", "b");
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn clear_keeps_subscriptions_and_skips_none() {
        let store = SharedSelections::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = store.subscribe("g", Box::new(move |v| s.borrow_mut().push(v.to_owned())));
        store.set("g", "a");
        store.clear();
        assert_eq!(store.get("g"), None);
        store.set("g", "a");
        assert_eq!(*seen.borrow(), vec!["a".to_owned(), "a".to_owned()]);
        assert_eq!(store.subscriber_count("g"), 1);
    }

    #[test]
    fn subscriber_may_reenter_store() {
        let store = Rc::new(SharedSelections::new());
        let mirror = Rc::clone(&store);
        let _sub = store.subscribe(
            "primary",
            Box::new(move |v| mirror.set("mirror", v)),
        );
        store.set("primary", "x");
        assert_eq!(store.get("mirror").as_deref(), Some("x"));
    }

    #[test]
    #[traced_test]
    fn set_and_clear_emit_debug_events() {
        let store = SharedSelections::new();
        store.set("engine", "Inventor");
        store.clear();
        assert!(logs_contain("selection.set"));
        assert!(logs_contain("Inventor"));
        assert!(logs_contain("selection.clear"));
    }
}
