// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Player and control options.
//!
//! Options are plain `Copy` structs. [`PlayerOptions::new`] gives the stock
//! configuration; fields can be overridden directly before the player is
//! built.

use crate::position::TooltipClamp;
use crate::throttle::ThrottleConfig;

/// Options for the progress control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProgressControlOptions {
    /// Keep the time tooltip inside the player's edges instead of inside
    /// the progress control.
    pub keep_tooltips_inside: bool,
    /// Reference box for the time tooltip when it is not kept inside.
    /// [`TooltipClamp::Outer`] uses the player root.
    pub tooltip_clamp: TooltipClamp,
}

/// Options for the volume control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VolumeControlOptions {
    /// Reference box for the volume tooltip. [`TooltipClamp::Outer`] uses the
    /// volume bar.
    pub tooltip_clamp: TooltipClamp,
}

impl VolumeControlOptions {
    /// Stock volume control options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tooltip_clamp: TooltipClamp::Outer,
        }
    }
}

impl Default for VolumeControlOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for the control bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlBarOptions {
    /// Progress control options.
    pub progress_control: ProgressControlOptions,
    /// Volume control options.
    pub volume_control: VolumeControlOptions,
    /// Gate applied by hosts to pointer notifications before they reach the
    /// controls.
    pub pointer_throttle: ThrottleConfig,
}

impl ControlBarOptions {
    /// Stock control bar options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            progress_control: ProgressControlOptions {
                keep_tooltips_inside: false,
                tooltip_clamp: TooltipClamp::Parent,
            },
            volume_control: VolumeControlOptions::new(),
            pointer_throttle: ThrottleConfig::pointer(),
        }
    }
}

impl Default for ControlBarOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level player options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerOptions {
    /// Control bar options.
    pub control_bar: ControlBarOptions,
}

impl PlayerOptions {
    /// Stock player options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            control_bar: ControlBarOptions::new(),
        }
    }

    /// Returns a copy with `keep_tooltips_inside` set.
    #[must_use]
    pub const fn with_tooltips_inside(mut self, keep: bool) -> Self {
        self.control_bar.progress_control.keep_tooltips_inside = keep;
        self
    }

    /// Returns a copy with the time tooltip's clamp strategy set.
    #[must_use]
    pub const fn with_time_tooltip_clamp(mut self, clamp: TooltipClamp) -> Self {
        self.control_bar.progress_control.tooltip_clamp = clamp;
        self
    }

    /// Returns a copy with the volume tooltip's clamp strategy set.
    #[must_use]
    pub const fn with_volume_tooltip_clamp(mut self, clamp: TooltipClamp) -> Self {
        self.control_bar.volume_control.tooltip_clamp = clamp;
        self
    }

    /// Shorthand for the progress control's `keep_tooltips_inside`.
    #[must_use]
    pub const fn keep_tooltips_inside(&self) -> bool {
        self.control_bar.progress_control.keep_tooltips_inside
    }
}

/// Options for [`MouseTimeDisplay`](crate::widget::MouseTimeDisplay).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseTimeDisplayOptions {
    /// Anchor the tooltip to the player edges (see
    /// [`keep_inside_position`](crate::position::keep_inside_position)).
    pub keep_tooltips_inside: bool,
    /// How the tooltip offset is clamped when not kept inside the player.
    /// [`TooltipClamp::Outer`] keeps the tooltip's centre over the player
    /// root.
    pub clamp: TooltipClamp,
}

impl MouseTimeDisplayOptions {
    /// Derives the display's options from the player's.
    #[must_use]
    pub const fn from_player(options: &PlayerOptions) -> Self {
        Self {
            keep_tooltips_inside: options.keep_tooltips_inside(),
            clamp: options.control_bar.progress_control.tooltip_clamp,
        }
    }
}

impl Default for MouseTimeDisplayOptions {
    fn default() -> Self {
        Self::from_player(&PlayerOptions::new())
    }
}

/// Options for [`VolumeDisplay`](crate::widget::VolumeDisplay).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VolumeDisplayOptions {
    /// How the tooltip offset is clamped. The stock setting keeps the
    /// tooltip's centre over the volume bar.
    pub clamp: TooltipClamp,
}

impl VolumeDisplayOptions {
    /// Stock volume display options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clamp: TooltipClamp::Outer,
        }
    }

    /// Derives the display's options from the player's.
    #[must_use]
    pub const fn from_player(options: &PlayerOptions) -> Self {
        Self {
            clamp: options.control_bar.volume_control.tooltip_clamp,
        }
    }
}

impl Default for VolumeDisplayOptions {
    fn default() -> Self {
        Self::new()
    }
}
