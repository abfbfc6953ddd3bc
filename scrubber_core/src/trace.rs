// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the control layer.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! widgets call while they map pointer samples and move through their
//! lifecycle. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::position::{MapError, PointerMapping, Value};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a pointer sample did not produce an update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkipReason {
    /// The sampled track had no positive width.
    InvalidTrack {
        /// The offending width.
        width: f64,
    },
    /// The control has not created its elements yet, or was disposed.
    NotCreated,
}

impl From<MapError> for SkipReason {
    fn from(err: MapError) -> Self {
        match err {
            MapError::InvalidTrack { width } => Self::InvalidTrack { width },
        }
    }
}

/// A step in a control's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Elements were created.
    Create,
    /// Player subscriptions were registered.
    Bind,
    /// Pending player notifications were applied.
    Sync,
    /// Elements were removed and subscriptions released.
    Dispose,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a control receives a pointer sample.
#[derive(Clone, Copy, Debug)]
pub struct PointerSampleEvent {
    /// Name of the receiving control.
    pub control: &'static str,
    /// Pointer X in document coordinates.
    pub x: f64,
    /// Left edge of the sampled track.
    pub track_left: f64,
    /// Width of the sampled track.
    pub track_width: f64,
}

/// Emitted when a pointer sample is dropped.
#[derive(Clone, Copy, Debug)]
pub struct SampleSkippedEvent {
    /// Name of the receiving control.
    pub control: &'static str,
    /// Why the sample was dropped.
    pub reason: SkipReason,
}

/// Emitted after a control has written new indicator and tooltip positions.
#[derive(Clone, Copy, Debug)]
pub struct TooltipUpdateEvent {
    /// Name of the updating control.
    pub control: &'static str,
    /// Pointer fraction along the track.
    pub fraction: f64,
    /// The value shown in the tooltip.
    pub value: Value,
    /// Indicator `left` in pixels.
    pub indicator_px: f64,
    /// Tooltip offset in pixels.
    pub tooltip_px: f64,
}

impl TooltipUpdateEvent {
    /// Builds the event from a completed mapping.
    #[must_use]
    pub fn new(control: &'static str, mapping: &PointerMapping) -> Self {
        Self {
            control,
            fraction: mapping.fraction.get(),
            value: mapping.value,
            indicator_px: mapping.indicator.px(),
            tooltip_px: mapping.tooltip.px(),
        }
    }
}

/// Emitted at each lifecycle step of a control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LifecycleEvent {
    /// Name of the control.
    pub control: &'static str,
    /// Which step ran.
    pub phase: LifecyclePhase,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controls.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a control receives a pointer sample.
    fn on_pointer_sample(&mut self, e: &PointerSampleEvent) {
        _ = e;
    }

    /// Called when a pointer sample is dropped.
    fn on_sample_skipped(&mut self, e: &SampleSkippedEvent) {
        _ = e;
    }

    /// Called after the indicator and tooltip have been repositioned.
    fn on_tooltip_update(&mut self, e: &TooltipUpdateEvent) {
        _ = e;
    }

    /// Called at each lifecycle step.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PointerSampleEvent`].
    #[inline]
    pub fn pointer_sample(&mut self, e: &PointerSampleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pointer_sample(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SampleSkippedEvent`].
    #[inline]
    pub fn sample_skipped(&mut self, e: &SampleSkippedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sample_skipped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TooltipUpdateEvent`].
    #[inline]
    pub fn tooltip_update(&mut self, e: &TooltipUpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tooltip_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, control: &'static str, phase: LifecyclePhase) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(&LifecycleEvent { control, phase });
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (control, phase);
        }
    }
}
