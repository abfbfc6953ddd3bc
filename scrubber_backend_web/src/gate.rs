// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-timed pointer throttle.
//!
//! [`PointerGate`] wraps a core [`Throttle`] with the browser clock. Samples
//! offered inside the interval are held; a `setTimeout` releases the newest
//! one when the interval ends.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use scrubber_core::position::PointerSample;
use scrubber_core::throttle::{Throttle, ThrottleConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::{clear_timeout, now, set_timeout};

type FlushClosure = Closure<dyn FnMut()>;

struct GateInner {
    throttle: RefCell<Throttle<PointerSample>>,
    handler: RefCell<Box<dyn FnMut(PointerSample)>>,
    /// Pending `setTimeout` id for the trailing edge.
    timer: Cell<Option<i32>>,
    /// Registered with `setTimeout`; holds only a weak reference back.
    flush: RefCell<Option<FlushClosure>>,
}

impl GateInner {
    fn flush(&self) {
        self.timer.set(None);
        let released = self.throttle.borrow_mut().poll(now());
        if let Some(sample) = released {
            self.handler.borrow_mut()(sample);
        }
    }
}

impl Drop for GateInner {
    fn drop(&mut self) {
        if let Some(id) = self.timer.take() {
            clear_timeout(id);
        }
    }
}

/// Throttles pointer samples on the browser clock before they reach
/// `handler`.
///
/// Cloning yields another entry point into the same gate.
#[derive(Clone)]
pub struct PointerGate {
    inner: Rc<GateInner>,
}

impl core::fmt::Debug for PointerGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerGate")
            .field("config", &self.inner.throttle.borrow().config())
            .field("timer", &self.inner.timer.get())
            .finish_non_exhaustive()
    }
}

impl PointerGate {
    /// Creates a gate that forwards released samples to `handler`.
    pub fn new(config: ThrottleConfig, handler: impl FnMut(PointerSample) + 'static) -> Self {
        let inner = Rc::new(GateInner {
            throttle: RefCell::new(Throttle::new(config)),
            handler: RefCell::new(Box::new(handler)),
            timer: Cell::new(None),
            flush: RefCell::new(None),
        });
        let weak: Weak<GateInner> = Rc::downgrade(&inner);
        let flush = Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.flush();
            }
        }) as Box<dyn FnMut()>);
        *inner.flush.borrow_mut() = Some(flush);
        Self { inner }
    }

    /// Offers a sample. It reaches the handler now, or at the end of the
    /// current interval if a newer one does not replace it first.
    pub fn offer(&self, sample: PointerSample) {
        let inner = &self.inner;
        let passed = inner.throttle.borrow_mut().offer(now(), sample);
        match passed {
            Some(sample) => inner.handler.borrow_mut()(sample),
            None => self.schedule_flush(),
        }
    }

    /// Drops any held sample and cancels the trailing timer.
    pub fn cancel(&self) {
        self.inner.throttle.borrow_mut().cancel();
        if let Some(id) = self.inner.timer.take() {
            clear_timeout(id);
        }
    }

    fn schedule_flush(&self) {
        let inner = &self.inner;
        if inner.timer.get().is_some() || !inner.throttle.borrow().has_pending() {
            return;
        }
        let interval = inner.throttle.borrow().config().interval;
        let millis = i32::try_from(interval.micros().div_ceil(1000)).unwrap_or(i32::MAX);
        if let Some(ref flush) = *inner.flush.borrow() {
            let id = set_timeout(flush.as_ref().unchecked_ref(), millis);
            inner.timer.set(Some(id));
        }
    }
}
