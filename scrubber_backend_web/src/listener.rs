// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event listeners with drop-to-unregister handles.
//!
//! [`DomListeners`] owns the JS closures it registers. Each registration
//! returns a [`Subscription`]; dropping it removes the listener from its
//! target. Dropping the table removes everything still registered.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use scrubber_core::event::{Detach, Subscription};
use scrubber_core::position::PointerSample;
use scrubber_core::render::RenderError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, MouseEvent};

use crate::target::page_box;

type EventClosure = Closure<dyn FnMut(Event)>;

struct Entry {
    id: u64,
    target: EventTarget,
    kind: &'static str,
    closure: EventClosure,
}

impl Entry {
    fn unregister(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
struct ListenerTable {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry>>,
    /// Closures detached while possibly running; dropped on the next
    /// registration.
    retired: RefCell<Vec<EventClosure>>,
}

impl Detach for ListenerTable {
    fn detach(&self, id: u64) {
        let Ok(mut entries) = self.entries.try_borrow_mut() else {
            return;
        };
        if let Some(pos) = entries.iter().position(|e| e.id == id) {
            let entry = entries.swap_remove(pos);
            entry.unregister();
            if let Ok(mut retired) = self.retired.try_borrow_mut() {
                retired.push(entry.closure);
            }
        }
    }
}

/// Builds a [`PointerSample`] from a mouse event and the track it moved
/// over.
///
/// Uses `pageX` and the track's page box, so both are in document
/// coordinates.
#[must_use]
pub fn pointer_sample(event: &MouseEvent, track: &Element) -> PointerSample {
    PointerSample {
        x: f64::from(event.page_x()),
        track: page_box(track),
    }
}

/// A table of DOM event listeners.
pub struct DomListeners {
    inner: Rc<ListenerTable>,
}

impl core::fmt::Debug for DomListeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomListeners")
            .field("registered", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for DomListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl DomListeners {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ListenerTable::default()),
        }
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers `handler` for `kind` events on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Platform`] if the browser rejects the
    /// registration.
    pub fn listen(
        &self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Subscription, RenderError> {
        self.inner.retired.borrow_mut().clear();

        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|err| RenderError::Platform(alloc::format!("{err:?}")))?;

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.entries.borrow_mut().push(Entry {
            id,
            target: target.clone(),
            kind,
            closure,
        });
        let weak: Weak<ListenerTable> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(weak, id))
    }

    /// Registers `handler` for `kind` mouse events on `target`, converted to
    /// [`PointerSample`]s against `track`.
    ///
    /// Non-mouse events of the same name are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Platform`] if the browser rejects the
    /// registration.
    pub fn listen_pointer(
        &self,
        target: &EventTarget,
        kind: &'static str,
        track: Element,
        mut handler: impl FnMut(PointerSample) + 'static,
    ) -> Result<Subscription, RenderError> {
        self.listen(target, kind, move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                handler(pointer_sample(mouse, &track));
            }
        })
    }
}

impl Drop for DomListeners {
    fn drop(&mut self) {
        // Subscriptions hold weak references only.
        for entry in self.inner.entries.borrow_mut().drain(..) {
            entry.unregister();
        }
    }
}
