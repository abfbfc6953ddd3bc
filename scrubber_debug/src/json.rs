// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace output.
//!
//! [`JsonLinesSink`] writes each event as a single-line JSON object with an
//! `"event"` tag, so a session can be filtered with standard tools.

use std::io::Write;

use scrubber_core::position::Value as TooltipValue;
use scrubber_core::trace::{
    LifecycleEvent, LifecyclePhase, PointerSampleEvent, SampleSkippedEvent, SkipReason,
    TooltipUpdateEvent, TraceSink,
};
use serde_json::{Value, json};

/// Writes one JSON object per event to a [`Write`](std::io::Write) destination.
pub struct JsonLinesSink<W: Write = Box<dyn Write>> {
    writer: W,
    lines: u64,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl JsonLinesSink {
    /// Creates a sink that writes to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Number of lines written so far.
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, value: &Value) {
        if serde_json::to_writer(&mut self.writer, value).is_ok()
            && self.writer.write_all(b"\n").is_ok()
        {
            self.lines += 1;
        }
    }
}

fn value_json(value: TooltipValue) -> Value {
    match value {
        TooltipValue::Time(seconds) => json!({ "time": seconds }),
        TooltipValue::Percent(percent) => json!({ "percent": percent }),
    }
}

fn phase_name(phase: LifecyclePhase) -> &'static str {
    match phase {
        LifecyclePhase::Create => "create",
        LifecyclePhase::Bind => "bind",
        LifecyclePhase::Sync => "sync",
        LifecyclePhase::Dispose => "dispose",
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_pointer_sample(&mut self, e: &PointerSampleEvent) {
        self.emit(&json!({
            "event": "sample",
            "control": e.control,
            "x": e.x,
            "track_left": e.track_left,
            "track_width": e.track_width,
        }));
    }

    fn on_sample_skipped(&mut self, e: &SampleSkippedEvent) {
        let reason = match e.reason {
            SkipReason::InvalidTrack { width } => json!({ "invalid_track": width }),
            SkipReason::NotCreated => json!("not_created"),
        };
        self.emit(&json!({
            "event": "skip",
            "control": e.control,
            "reason": reason,
        }));
    }

    fn on_tooltip_update(&mut self, e: &TooltipUpdateEvent) {
        self.emit(&json!({
            "event": "tooltip",
            "control": e.control,
            "fraction": e.fraction,
            "value": value_json(e.value),
            "indicator_px": e.indicator_px,
            "tooltip_px": e.tooltip_px,
        }));
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.emit(&json!({
            "event": "lifecycle",
            "control": e.control,
            "phase": phase_name(e.phase),
        }));
    }
}
