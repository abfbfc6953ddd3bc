// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The minimal player model the controls are bound to.
//!
//! A [`Player`] owns media state (duration, volume, fullscreen, readiness),
//! the element handles of the surrounding player chrome, and an
//! [`Emitter`] for [`PlayerEvent`]s. Controls hold a [`PlayerHandle`] and
//! subscribe to the events they care about.
//!
//! The model does not talk to the platform. Fullscreen requests only flip the
//! flag and notify listeners; the host listens for
//! [`PlayerEvent::FullscreenChange`] and applies it, and reports changes made
//! outside the player (e.g. the user pressing Escape) through
//! [`Player::set_fullscreen`].

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::config::PlayerOptions;
use crate::event::{Emitter, Subscription};
use crate::render::ElementId;

/// Shared handle to a [`Player`].
pub type PlayerHandle = Rc<Player>;

/// Notifications emitted by a [`Player`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// The player finished setting up. Emitted once.
    Ready,
    /// The fullscreen flag changed.
    FullscreenChange,
    /// The media duration changed.
    DurationChange,
    /// The volume changed.
    VolumeChange,
    /// A control showed a tooltip.
    TooltipShown,
}

/// Element handles of the player chrome that controls attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerElements {
    /// The player's root element.
    pub root: ElementId,
    /// The progress control holding the seek bar.
    pub progress_control: ElementId,
    /// The seek bar track.
    pub seek_bar: ElementId,
    /// The volume bar track, if the player has one.
    pub volume_bar: Option<ElementId>,
}

/// Media state plus an event source.
pub struct Player {
    options: PlayerOptions,
    elements: PlayerElements,
    duration: Cell<Option<f64>>,
    volume: Cell<f64>,
    fullscreen: Cell<bool>,
    ready: Cell<bool>,
    events: Emitter<PlayerEvent>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("options", &self.options)
            .field("elements", &self.elements)
            .field("duration", &self.duration.get())
            .field("volume", &self.volume.get())
            .field("fullscreen", &self.fullscreen.get())
            .field("ready", &self.ready.get())
            .finish_non_exhaustive()
    }
}

impl Player {
    /// Creates a player with unknown duration, full volume, windowed and not
    /// yet ready.
    #[must_use]
    pub fn new(options: PlayerOptions, elements: PlayerElements) -> PlayerHandle {
        Rc::new(Self {
            options,
            elements,
            duration: Cell::new(None),
            volume: Cell::new(1.0),
            fullscreen: Cell::new(false),
            ready: Cell::new(false),
            events: Emitter::new(),
        })
    }

    /// Returns the options the player was built with.
    #[must_use]
    pub const fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Returns the chrome element handles.
    #[must_use]
    pub const fn elements(&self) -> PlayerElements {
        self.elements
    }

    /// Returns the media duration in seconds, if known.
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.duration.get()
    }

    /// Returns the duration for pointer mapping: the known duration, or NaN
    /// (which selects the percentage fallback).
    #[must_use]
    pub fn mapping_duration(&self) -> f64 {
        self.duration.get().unwrap_or(f64::NAN)
    }

    /// Sets the media duration and emits [`PlayerEvent::DurationChange`] if it
    /// changed.
    pub fn set_duration(&self, duration: Option<f64>) {
        if self.duration.replace(duration) != duration {
            self.events.emit(PlayerEvent::DurationChange);
        }
    }

    /// Returns the volume in `[0, 1]`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume.get()
    }

    /// Sets the volume (clamped to `[0, 1]`, NaN ignored) and emits
    /// [`PlayerEvent::VolumeChange`] if it changed.
    pub fn set_volume(&self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.max(0.0).min(1.0);
        if self.volume.replace(volume) != volume {
            self.events.emit(PlayerEvent::VolumeChange);
        }
    }

    /// Returns `true` while the player is fullscreen.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    /// Requests fullscreen.
    pub fn request_fullscreen(&self) {
        self.set_fullscreen(true);
    }

    /// Leaves fullscreen.
    pub fn exit_fullscreen(&self) {
        self.set_fullscreen(false);
    }

    /// Records the fullscreen state and emits
    /// [`PlayerEvent::FullscreenChange`] if it changed.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        if self.fullscreen.replace(fullscreen) != fullscreen {
            self.events.emit(PlayerEvent::FullscreenChange);
        }
    }

    /// Returns `true` once [`trigger_ready`](Self::trigger_ready) has run.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Marks the player ready and emits [`PlayerEvent::Ready`].
    ///
    /// Only the first call emits.
    pub fn trigger_ready(&self) {
        if !self.ready.replace(true) {
            self.events.emit(PlayerEvent::Ready);
        }
    }

    /// Runs `callback` once the player is ready.
    ///
    /// If the player is already ready the callback runs immediately and
    /// `None` is returned. Otherwise the returned subscription keeps the
    /// pending callback alive.
    pub fn when_ready(&self, callback: impl Fn() + 'static) -> Option<Subscription> {
        if self.is_ready() {
            callback();
            None
        } else {
            Some(self.events.one(PlayerEvent::Ready, move |_| callback()))
        }
    }

    /// Registers `callback` for every emission of `kind`.
    pub fn on(&self, kind: PlayerEvent, callback: impl Fn(PlayerEvent) + 'static) -> Subscription {
        self.events.subscribe(kind, callback)
    }

    /// Registers `callback` for the next emission of `kind`.
    pub fn one(&self, kind: PlayerEvent, callback: impl Fn(PlayerEvent) + 'static) -> Subscription {
        self.events.one(kind, callback)
    }

    /// Emits `event` to its listeners and returns how many ran.
    pub fn trigger(&self, event: PlayerEvent) -> usize {
        self.events.emit(event)
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: PlayerEvent) -> usize {
        self.events.listener_count(kind)
    }
}
