// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-threaded event emission with scoped subscriptions.
//!
//! [`Emitter::subscribe`] returns a [`Subscription`] handle. The listener stays
//! registered exactly as long as the handle is alive: dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the listener. Controls collect their
//! handles in a [`SubscriptionSet`] and clear it on dispose, so no listener
//! outlives the control that registered it.
//!
//! Handles are type-erased through the [`Detach`] trait, which lets backends
//! hand out the same [`Subscription`] type for platform listeners (e.g. DOM
//! `mousemove` handlers).

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Something a [`Subscription`] can remove itself from.
pub trait Detach {
    /// Removes the listener registered under `id`.
    ///
    /// Unknown ids are ignored.
    fn detach(&self, id: u64);
}

/// A live listener registration.
///
/// Dropping the handle unregisters the listener.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
pub struct Subscription {
    source: Weak<dyn Detach>,
    id: u64,
}

impl Subscription {
    /// Creates a handle that detaches `id` from `source` on drop.
    ///
    /// Backends use this to wrap their own listener tables.
    pub fn new(source: Weak<dyn Detach>, id: u64) -> Self {
        Self { source, id }
    }

    /// Returns the listener id within its source.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` while the source that issued this handle is alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.source.strong_count() > 0
    }

    /// Unregisters the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Owns the subscriptions of one control.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subs: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { subs: Vec::new() }
    }

    /// Takes ownership of a subscription.
    pub fn push(&mut self, sub: Subscription) {
        self.subs.push(sub);
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// Returns `true` if no subscriptions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Unregisters every held subscription.
    pub fn clear(&mut self) {
        self.subs.clear();
    }
}

type Callback<E> = Rc<dyn Fn(E)>;

struct Slot<E> {
    id: u64,
    kind: E,
    once: bool,
    callback: Callback<E>,
}

struct Registry<E> {
    next_id: u64,
    slots: Vec<Slot<E>>,
}

impl<E> Detach for RefCell<Registry<E>> {
    fn detach(&self, id: u64) {
        // A listener may unsubscribe itself during dispatch; the registry is
        // never borrowed while callbacks run, so this cannot conflict.
        if let Ok(mut reg) = self.try_borrow_mut() {
            reg.slots.retain(|slot| slot.id != id);
        }
    }
}

/// A single-threaded event source.
///
/// `E` is the event type; listeners are keyed by equality with the emitted
/// value, so payload-free enums work best.
pub struct Emitter<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.inner.try_borrow().map(|reg| reg.slots.len()).ok();
        f.debug_struct("Emitter")
            .field("listeners", &listeners)
            .finish()
    }
}

impl<E: Copy + PartialEq + 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + PartialEq + 'static> Emitter<E> {
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    fn register(&self, kind: E, once: bool, callback: Callback<E>) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.slots.push(Slot {
                id,
                kind,
                once,
                callback,
            });
            id
        };
        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription::new(weak, id)
    }

    /// Registers `callback` for every emission of `kind`.
    pub fn subscribe(&self, kind: E, callback: impl Fn(E) + 'static) -> Subscription {
        self.register(kind, false, Rc::new(callback))
    }

    /// Registers `callback` for the next emission of `kind` only.
    pub fn one(&self, kind: E, callback: impl Fn(E) + 'static) -> Subscription {
        self.register(kind, true, Rc::new(callback))
    }

    /// Delivers `event` to every matching listener and returns how many ran.
    ///
    /// The listener list is snapshotted first, so callbacks may subscribe or
    /// unsubscribe freely. Listeners added during dispatch see the next
    /// emission, not this one.
    pub fn emit(&self, event: E) -> usize {
        let callbacks: Vec<Callback<E>> = {
            let mut reg = self.inner.borrow_mut();
            let matching = reg
                .slots
                .iter()
                .filter(|slot| slot.kind == event)
                .map(|slot| Rc::clone(&slot.callback))
                .collect();
            reg.slots.retain(|slot| !(slot.once && slot.kind == event));
            matching
        };
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Number of listeners currently registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: E) -> usize {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.kind == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Ev {
        A,
        B,
    }

    #[test]
    fn subscribe_and_emit() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = emitter.subscribe(Ev::A, move |_| h.set(h.get() + 1));

        assert_eq!(emitter.emit(Ev::A), 1);
        assert_eq!(emitter.emit(Ev::B), 0);
        assert_eq!(emitter.emit(Ev::A), 1);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn dropping_handle_unregisters() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = emitter.subscribe(Ev::A, move |_| h.set(h.get() + 1));
        assert_eq!(emitter.listener_count(Ev::A), 1);

        drop(sub);
        assert_eq!(emitter.listener_count(Ev::A), 0);
        emitter.emit(Ev::A);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn one_fires_once() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = emitter.one(Ev::B, move |_| h.set(h.get() + 1));

        emitter.emit(Ev::B);
        emitter.emit(Ev::B);
        assert_eq!(hits.get(), 1);
        assert_eq!(emitter.listener_count(Ev::B), 0);
    }

    #[test]
    fn set_clear_releases_everything() {
        let emitter = Emitter::new();
        let mut set = SubscriptionSet::new();
        set.push(emitter.subscribe(Ev::A, |_| {}));
        set.push(emitter.subscribe(Ev::B, |_| {}));
        assert_eq!(set.len(), 2);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(emitter.listener_count(Ev::A), 0);
        assert_eq!(emitter.listener_count(Ev::B), 0);
    }

    #[test]
    fn handle_outliving_emitter_is_harmless() {
        let emitter = Emitter::new();
        let sub = emitter.subscribe(Ev::A, |_| {});
        assert!(sub.is_attached());
        drop(emitter);
        assert!(!sub.is_attached());
        sub.unsubscribe();
    }

    #[test]
    fn listener_may_subscribe_during_dispatch() {
        let emitter = Rc::new(Emitter::new());
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let (e, l) = (Rc::clone(&emitter), Rc::clone(&late));
        let _sub = emitter.subscribe(Ev::A, move |_| {
            l.borrow_mut().push(e.subscribe(Ev::A, |_| {}));
        });

        assert_eq!(emitter.emit(Ev::A), 1);
        assert_eq!(emitter.listener_count(Ev::A), 2);
    }
}
