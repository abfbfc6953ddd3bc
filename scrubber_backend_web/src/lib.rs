// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for scrubber.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomTarget`]: [`RenderTarget`] over live DOM elements
//! - [`DomListeners`]: DOM event listeners released through
//!   [`Subscription`](scrubber_core::event::Subscription) handles
//! - [`PointerGate`]: 25 ms pointer throttle with a `setTimeout` trailing edge
//! - [`now`]: `performance.now()` host clock

#![no_std]

extern crate alloc;

mod gate;
mod listener;
mod target;

pub use gate::PointerGate;
pub use listener::{DomListeners, pointer_sample};
pub use scrubber_core::render::RenderTarget;
pub use target::DomTarget;

use scrubber_core::time::HostTime;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods, so hot paths
// never fetch (and unwrap) the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(performance_now())
}
