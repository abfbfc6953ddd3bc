// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON-lines export for scrubber diagnostics.
//!
//! This crate provides [`TraceSink`](scrubber_core::trace::TraceSink)
//! implementations for development:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`] — one JSON object per event, for piping into
//!   other tools.

pub mod json;
pub mod pretty;
