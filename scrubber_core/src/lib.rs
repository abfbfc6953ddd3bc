// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer mapping and leaf controls for media-player overlays.
//!
//! `scrubber_core` turns pointer positions over a horizontal track (a seek
//! bar, a volume bar) into the value under the pointer and the pixel offsets
//! of an indicator and a tooltip. Around that pure mapping it provides the
//! leaf controls that display it, their lifecycle, and the event plumbing
//! that binds them to a player. It is `no_std` compatible (with `alloc`) and
//! never touches platform globals: every document operation goes through a
//! [`RenderTarget`](render::RenderTarget).
//!
//! # Architecture
//!
//! ```text
//!   Host (pointer events)
//!       │
//!       ▼
//!   Throttle::offer() ──► PointerSample
//!                             │
//!                             ▼
//!   Control::handle_mouse_move() ──► PositionMapper::map() ──► PointerMapping
//!                                                                  │
//!                 ┌────────────────────────────────────────────────┘
//!                 ▼
//!   Value::label() + offsets ──► RenderTarget (DOM / headless)
//!
//!   Player events ──► DirtyHandle::mark ──► Control::sync(target)
//! ```
//!
//! **[`position`]** — Pure mapping: pointer X → [`Fraction`](position::Fraction)
//! → [`Value`](position::Value) (time or percentage) plus
//! [`ClampedOffset`](position::ClampedOffset)s for the indicator and tooltip.
//! Tooltip clamping is a per-control [`TooltipClamp`](position::TooltipClamp)
//! choice.
//!
//! **[`format`]** — Timestamp and percentage labels.
//!
//! **[`throttle`]** — Caller-owned leading/trailing interval gate for
//! pointer notifications.
//!
//! **[`event`]** — Single-threaded [`Emitter`](event::Emitter) whose
//! [`Subscription`](event::Subscription) handles unregister on drop.
//!
//! **[`render`]** — The [`RenderTarget`](render::RenderTarget) port with
//! generational [`ElementId`](render::ElementId)s, and the in-memory
//! [`HeadlessTarget`](render::HeadlessTarget).
//!
//! **[`player`]** — The minimal [`Player`](player::Player) model controls bind
//! to.
//!
//! **[`component`]** — Capability traits ([`Renderable`](component::Renderable),
//! [`EventBound`](component::EventBound),
//! [`PointerInput`](component::PointerInput),
//! [`Disposable`](component::Disposable)) and the
//! [`ControlRegistry`](component::ControlRegistry).
//!
//! **[`widget`]** — The built-in controls.
//!
//! **[`config`]** — Player and control options.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! control instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! **[`time`]** — Microsecond host timestamps.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod component;
pub mod config;
pub mod event;
pub mod format;
pub mod player;
pub mod position;
pub mod render;
pub mod throttle;
pub mod time;
pub mod trace;
pub mod widget;
