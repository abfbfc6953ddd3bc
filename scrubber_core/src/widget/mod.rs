// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in leaf controls.
//!
//! - [`MouseTimeDisplay`]: time under the pointer on the seek bar.
//! - [`VolumeDisplay`]: volume under the pointer on the volume bar.
//! - [`FullscreenToggle`]: fullscreen button.

mod fullscreen_toggle;
mod mouse_time_display;
mod volume_display;

pub use fullscreen_toggle::FullscreenToggle;
pub use mouse_time_display::MouseTimeDisplay;
pub use volume_display::VolumeDisplay;

use alloc::boxed::Box;

use kurbo::Rect;

use crate::component::{Control, ControlFactory};
use crate::config::PlayerOptions;
use crate::render::{ElementId, RenderError, RenderTarget};

fn fullscreen_toggle(options: &PlayerOptions) -> Box<dyn Control> {
    Box::new(FullscreenToggle::new(options))
}

fn mouse_time_display(options: &PlayerOptions) -> Box<dyn Control> {
    Box::new(MouseTimeDisplay::new(options))
}

fn volume_display(options: &PlayerOptions) -> Box<dyn Control> {
    Box::new(VolumeDisplay::new(options))
}

pub(crate) const BUILTINS: &[(&str, ControlFactory)] = &[
    (FullscreenToggle::NAME, fullscreen_toggle),
    (MouseTimeDisplay::NAME, mouse_time_display),
    (VolumeDisplay::NAME, volume_display),
];

/// The box a tooltip is positioned in: its parent's, or `fallback` while the
/// tooltip is detached.
fn tooltip_container(
    target: &dyn RenderTarget,
    tooltip: ElementId,
    fallback: Rect,
) -> Result<Rect, RenderError> {
    match target.parent(tooltip)? {
        Some(parent) => target.bounding_box(parent),
        None => Ok(fallback),
    }
}

/// Detaches a tooltip from wherever it was moved and destroys it.
fn release_tooltip(
    target: &mut dyn RenderTarget,
    tooltip: Option<ElementId>,
) -> Result<(), RenderError> {
    match tooltip {
        Some(tooltip) => target.destroy(tooltip),
        None => Ok(()),
    }
}
