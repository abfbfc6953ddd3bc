// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use scrubber_core::position::Value;
use scrubber_core::trace::{
    LifecycleEvent, LifecyclePhase, PointerSampleEvent, SampleSkippedEvent, SkipReason,
    TooltipUpdateEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    samples: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("samples", &self.samples)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Raw pointer samples are not printed; see
    /// [`with_samples`](Self::with_samples).
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            samples: false,
        }
    }

    /// Also prints every raw pointer sample.
    #[must_use]
    pub fn with_samples(mut self, samples: bool) -> Self {
        self.samples = samples;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
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

fn value_text(value: Value) -> String {
    match value {
        Value::Time(s) => format!("{s:.2}s"),
        Value::Percent(p) => format!("{p:.1}%"),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pointer_sample(&mut self, e: &PointerSampleEvent) {
        if !self.samples {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[sample] {} x={:.1} track={:.1}+{:.1}",
            e.control, e.x, e.track_left, e.track_width,
        );
    }

    fn on_sample_skipped(&mut self, e: &SampleSkippedEvent) {
        let reason = match e.reason {
            SkipReason::InvalidTrack { width } => format!("invalid track width {width}"),
            SkipReason::NotCreated => String::from("control not created"),
        };
        let _ = writeln!(self.writer, "[skip] {} {reason}", e.control);
    }

    fn on_tooltip_update(&mut self, e: &TooltipUpdateEvent) {
        let _ = writeln!(
            self.writer,
            "[tooltip] {} fraction={:.3} value={} indicator={:.1}px tooltip={:.1}px",
            e.control,
            e.fraction,
            value_text(e.value),
            e.indicator_px,
            e.tooltip_px,
        );
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let _ = writeln!(self.writer, "[{}] {}", phase_name(e.phase), e.control);
    }
}
