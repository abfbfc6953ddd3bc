// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval gate for high-frequency pointer notifications.
//!
//! Pointer-move events can arrive far faster than the overlay needs to
//! redraw. [`Throttle`] lets at most one item through per interval:
//!
//! - **Leading edge** — an item offered after a quiet period passes
//!   immediately.
//! - **Trailing edge** — items offered inside the interval are coalesced;
//!   only the newest is kept and released by [`Throttle::poll`] once the
//!   interval has elapsed.
//!
//! The gate owns no timer. The caller supplies `now` on every call and decides
//! when to poll (e.g. on the next animation frame).

use crate::time::{Duration, HostTime};

/// Configuration for a [`Throttle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThrottleConfig {
    /// Minimum spacing between emitted items.
    pub interval: Duration,
    /// Whether coalesced items are released on the trailing edge.
    pub trailing: bool,
}

impl ThrottleConfig {
    /// The pointer-move spacing used by the built-in controls (25 ms,
    /// trailing edge on).
    #[must_use]
    pub const fn pointer() -> Self {
        Self {
            interval: Duration::from_millis(25),
            trailing: true,
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::pointer()
    }
}

/// A leading/trailing interval gate.
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    config: ThrottleConfig,
    last_emit: Option<HostTime>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Creates a gate with the given configuration.
    #[must_use]
    pub const fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            last_emit: None,
            pending: None,
        }
    }

    /// Returns the gate's configuration.
    #[must_use]
    pub const fn config(&self) -> ThrottleConfig {
        self.config
    }

    fn is_open(&self, now: HostTime) -> bool {
        match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.config.interval,
        }
    }

    /// Offers an item at time `now`.
    ///
    /// Returns the item if the gate is open. Otherwise the item replaces any
    /// pending one (when trailing is enabled) and `None` is returned.
    pub fn offer(&mut self, now: HostTime, item: T) -> Option<T> {
        if self.is_open(now) {
            self.last_emit = Some(now);
            self.pending = None;
            Some(item)
        } else {
            if self.config.trailing {
                self.pending = Some(item);
            }
            None
        }
    }

    /// Releases the pending item if the interval has elapsed.
    pub fn poll(&mut self, now: HostTime) -> Option<T> {
        if self.pending.is_some() && self.is_open(now) {
            self.last_emit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Returns `true` if an item is waiting for the trailing edge.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending item without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Forgets the last emission time and drops any pending item.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_emit = None;
    }
}

impl<T> Default for Throttle<T> {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}
