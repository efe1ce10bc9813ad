//! Editing coordinator - the single edit slot
//!
//! Arbitrarily many cell controllers agree on which one of them is editing
//! through one shared observable slot. Controllers never talk to each other:
//! they subscribe here and react when the slot changes hands.
//!
//! `set_active` always wins. Opening cell B while cell A holds the slot
//! evicts A without running A's commit or cancel logic. `clear` is keyed so
//! a stale controller cannot release a session it no longer owns.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::model::EditKey;

/// The one active edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingSession {
    pub key: EditKey,
    /// String snapshot of the cell value when the session opened
    pub value: String,
}

type Listener = Rc<dyn Fn(Option<&EditingSession>)>;

#[derive(Default)]
struct Slot {
    session: Option<EditingSession>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// Handle to a single-slot store
///
/// Cloning yields another handle to the same slot.
#[derive(Clone, Default)]
pub struct EditingCoordinator {
    slot: Rc<RefCell<Slot>>,
    /// Listener ids whose subscription dropped while the slot was borrowed
    orphans: Rc<RefCell<Vec<u64>>>,
}

thread_local! {
    static GLOBAL: EditingCoordinator = EditingCoordinator::new();
}

impl EditingCoordinator {
    /// A fresh, independent slot
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide slot shared by every grid on this thread
    pub fn global() -> Self {
        GLOBAL.with(Clone::clone)
    }

    pub fn active_key(&self) -> Option<EditKey> {
        self.slot.borrow().session.as_ref().map(|s| s.key.clone())
    }

    pub fn session(&self) -> Option<EditingSession> {
        self.slot.borrow().session.clone()
    }

    pub fn is_active(&self, key: &EditKey) -> bool {
        self.slot
            .borrow()
            .session
            .as_ref()
            .is_some_and(|s| &s.key == key)
    }

    /// Give the slot to `key`, replacing whoever held it
    pub fn set_active(&self, key: EditKey, value: impl Into<String>) {
        let previous = self.slot.borrow_mut().session.replace(EditingSession {
            key: key.clone(),
            value: value.into(),
        });
        match previous {
            Some(prev) if prev.key != key => {
                tracing::debug!("Edit slot moved from {} to {} (eviction)", prev.key, key)
            }
            _ => tracing::debug!("Edit slot granted to {}", key),
        }
        self.notify();
    }

    /// Replace the snapshot value, only if `key` owns the slot
    pub fn update_value(&self, key: &EditKey, value: impl Into<String>) -> bool {
        {
            let mut slot = self.slot.borrow_mut();
            match slot.session.as_mut() {
                Some(session) if &session.key == key => session.value = value.into(),
                _ => return false,
            }
        }
        self.notify();
        true
    }

    /// Release the slot
    ///
    /// With `Some(key)` this is a no-op unless `key` owns the slot. `None`
    /// releases unconditionally. Clearing an empty slot notifies nobody.
    pub fn clear(&self, key: Option<&EditKey>) -> bool {
        let released = {
            let mut slot = self.slot.borrow_mut();
            let owns = match (&slot.session, key) {
                (None, _) => false,
                (Some(session), Some(key)) => &session.key == key,
                (Some(_), None) => true,
            };
            if owns {
                slot.session.take()
            } else {
                None
            }
        };
        match released {
            Some(session) => {
                tracing::debug!("Edit slot released by {}", session.key);
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Register a listener called synchronously after every mutation
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&EditingSession>) + 'static,
    {
        self.purge_orphans();
        let mut slot = self.slot.borrow_mut();
        let id = slot.next_listener_id;
        slot.next_listener_id += 1;
        slot.listeners.push((id, Rc::new(listener)));
        Subscription {
            slot: Rc::downgrade(&self.slot),
            orphans: Rc::downgrade(&self.orphans),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.purge_orphans();
        self.slot.borrow().listeners.len()
    }

    fn purge_orphans(&self) {
        let orphans = std::mem::take(&mut *self.orphans.borrow_mut());
        if !orphans.is_empty() {
            self.slot
                .borrow_mut()
                .listeners
                .retain(|(id, _)| !orphans.contains(id));
        }
    }

    fn notify(&self) {
        self.purge_orphans();
        // Listeners may mutate the slot or (un)subscribe while being called
        let (session, listeners): (Option<EditingSession>, Vec<Listener>) = {
            let slot = self.slot.borrow();
            (
                slot.session.clone(),
                slot.listeners.iter().map(|(_, l)| Rc::clone(l)).collect(),
            )
        };
        for listener in listeners {
            listener(session.as_ref());
        }
    }
}

impl fmt::Debug for EditingCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("EditingCoordinator")
            .field("session", &slot.session)
            .field("listeners", &slot.listeners.len())
            .finish()
    }
}

/// Registration of a coordinator listener; unsubscribes on drop
pub struct Subscription {
    slot: Weak<RefCell<Slot>>,
    orphans: Weak<RefCell<Vec<u64>>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        if let Ok(mut slot) = slot.try_borrow_mut() {
            slot.listeners.retain(|(id, _)| *id != self.id);
            return;
        }
        // Slot is busy; the coordinator drops the listener on its next access
        tracing::warn!("Listener {} dropped while the edit slot was busy", self.id);
        if let Some(orphans) = self.orphans.upgrade() {
            orphans.borrow_mut().push(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellAddress;
    use std::cell::Cell;

    fn key(row: usize) -> EditKey {
        CellAddress::new("t", "c", row).edit_key()
    }

    #[test]
    fn test_set_active_replaces_session() {
        let c = EditingCoordinator::new();
        c.set_active(key(0), "a");
        c.set_active(key(1), "b");
        assert_eq!(c.active_key(), Some(key(1)));
        assert_eq!(c.session().map(|s| s.value), Some("b".to_string()));
    }

    #[test]
    fn test_clear_with_other_key_is_noop() {
        let c = EditingCoordinator::new();
        c.set_active(key(0), "a");
        assert!(!c.clear(Some(&key(1))));
        assert_eq!(c.active_key(), Some(key(0)));
        assert!(c.clear(Some(&key(0))));
        assert_eq!(c.active_key(), None);
    }

    #[test]
    fn test_clear_none_is_unconditional() {
        let c = EditingCoordinator::new();
        c.set_active(key(3), "");
        assert!(c.clear(None));
        assert!(!c.clear(None));
    }

    #[test]
    fn test_update_value_requires_ownership() {
        let c = EditingCoordinator::new();
        c.set_active(key(0), "a");
        assert!(!c.update_value(&key(1), "x"));
        assert!(c.update_value(&key(0), "y"));
        assert_eq!(c.session().map(|s| s.value), Some("y".to_string()));
    }

    #[test]
    fn test_subscribers_notified_synchronously() {
        let c = EditingCoordinator::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let _sub = c.subscribe(move |_| seen.set(seen.get() + 1));

        c.set_active(key(0), "a");
        assert_eq!(calls.get(), 1);
        c.update_value(&key(0), "b");
        assert_eq!(calls.get(), 2);
        c.clear(Some(&key(9)));
        assert_eq!(calls.get(), 2);
        c.clear(Some(&key(0)));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_drop_subscription_unsubscribes() {
        let c = EditingCoordinator::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let sub = c.subscribe(move |_| seen.set(seen.get() + 1));
        assert_eq!(c.listener_count(), 1);

        drop(sub);
        assert_eq!(c.listener_count(), 0);
        c.set_active(key(0), "a");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_drop_while_slot_busy_unsubscribes_later() {
        let c = EditingCoordinator::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let sub = c.subscribe(move |_| seen.set(seen.get() + 1));

        {
            let _busy = c.slot.borrow();
            drop(sub);
        }
        c.set_active(key(0), "a");
        assert_eq!(calls.get(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_reenter() {
        let c = EditingCoordinator::new();
        let inner = c.clone();
        let _sub = c.subscribe(move |session| {
            if session.is_some_and(|s| s.key == key(0)) {
                inner.set_active(key(1), "forwarded");
            }
        });
        c.set_active(key(0), "a");
        assert_eq!(c.active_key(), Some(key(1)));
    }

    #[test]
    fn test_global_is_shared() {
        let a = EditingCoordinator::global();
        let b = EditingCoordinator::global();
        a.set_active(key(42), "");
        assert!(b.is_active(&key(42)));
        b.clear(None);
    }
}
