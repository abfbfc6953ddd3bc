// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Volume percentage preview shown while hovering the volume bar.

use crate::component::{
    Control, ControlBase, DirtyFlags, Disposable, EventBound, PointerInput, Renderable,
};
use crate::config::{PlayerOptions, VolumeDisplayOptions};
use crate::player::{PlayerEvent, PlayerHandle};
use crate::position::{PointerMapping, PointerSample, PositionMapper, TrackGeometry};
use crate::render::{ElementId, RenderError, RenderTarget, px};
use crate::trace::{
    PointerSampleEvent, SampleSkippedEvent, SkipReason, TooltipUpdateEvent, Tracer,
};

use super::{release_tooltip, tooltip_container};

const CLASS: &str = "vjs-volume-display";
const TOOLTIP_CLASS: &str = "vjs-volume-display-tooltip";
const TOOLTIP_ACTIVE_CLASS: &str = "vjs-volume-display-tooltip-active";

/// Shows the volume under the pointer while it moves over the volume bar.
///
/// The label is always a percentage. The tooltip lives in the progress
/// control once the player is ready, but its centre is clamped to the span of
/// the volume bar.
#[derive(Debug)]
pub struct VolumeDisplay {
    base: ControlBase,
    mapper: PositionMapper,
    tooltip: Option<ElementId>,
    last: Option<PointerMapping>,
}

impl VolumeDisplay {
    /// Registry name.
    pub const NAME: &'static str = "VolumeDisplay";

    /// Creates the control with options derived from the player's.
    #[must_use]
    pub fn new(options: &PlayerOptions) -> Self {
        Self::with_options(VolumeDisplayOptions::from_player(options))
    }

    /// Creates the control with explicit options.
    #[must_use]
    pub fn with_options(options: VolumeDisplayOptions) -> Self {
        Self {
            base: ControlBase::new(),
            mapper: PositionMapper::new(options.clamp),
            tooltip: None,
            last: None,
        }
    }

    /// Returns the tooltip element once created.
    #[must_use]
    pub const fn tooltip(&self) -> Option<ElementId> {
        self.tooltip
    }

    /// Returns the mapping behind the current display.
    #[must_use]
    pub const fn last_mapping(&self) -> Option<PointerMapping> {
        self.last
    }

    fn update(
        &self,
        target: &mut dyn RenderTarget,
        percent: f64,
        position: f64,
        tooltip_position: f64,
    ) -> Result<(), RenderError> {
        let (Some(el), Some(tooltip)) = (self.base.el(), self.tooltip) else {
            return Ok(());
        };
        target.set_style(el, "left", &px(position))?;
        target.set_style(tooltip, "left", &px(tooltip_position))?;
        target.set_text(tooltip, &crate::format::format_percent(percent))
    }
}

impl Renderable for VolumeDisplay {
    fn create_el(&mut self, target: &mut dyn RenderTarget) -> Result<ElementId, RenderError> {
        let tooltip = target.create_element("div", TOOLTIP_CLASS)?;
        let el = target.create_element("div", CLASS)?;
        self.tooltip = Some(tooltip);
        self.base.set_el(el);
        self.update(target, 0.0, 0.0, 0.0)?;
        Ok(el)
    }

    fn el(&self) -> Option<ElementId> {
        self.base.el()
    }
}

impl EventBound for VolumeDisplay {
    fn bind(&mut self, player: &PlayerHandle) {
        self.base.set_player(player);
        let dirty = self.base.dirty_handle();
        if let Some(sub) = player.when_ready(move || dirty.mark(DirtyFlags::READY)) {
            self.base.adopt(sub);
        }
    }

    fn sync(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        let dirty = self.base.take_dirty();
        if dirty.contains(DirtyFlags::READY)
            && let (Some(player), Some(tooltip)) = (self.base.player(), self.tooltip)
        {
            target.append_child(player.elements().progress_control, tooltip)?;
        }
        Ok(())
    }
}

impl PointerInput for VolumeDisplay {
    fn handle_mouse_move(
        &mut self,
        target: &mut dyn RenderTarget,
        sample: &PointerSample,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), RenderError> {
        tracer.pointer_sample(&PointerSampleEvent {
            control: Self::NAME,
            x: sample.x,
            track_left: sample.track.x0,
            track_width: sample.track.width(),
        });
        let (Some(el), Some(tooltip)) = (self.base.el(), self.tooltip) else {
            tracer.sample_skipped(&SampleSkippedEvent {
                control: Self::NAME,
                reason: SkipReason::NotCreated,
            });
            return Ok(());
        };

        let geometry = TrackGeometry {
            indicator_width: target.offset_width(el)?,
            tooltip_width: target.offset_width(tooltip)?,
            tooltip_container: tooltip_container(target, tooltip, sample.track)?,
            outer: Some(sample.track),
        };
        // NaN duration forces the percentage mode.
        let mapping = match self.mapper.map(sample, &geometry, f64::NAN) {
            Ok(mapping) => mapping,
            Err(err) => {
                tracer.sample_skipped(&SampleSkippedEvent {
                    control: Self::NAME,
                    reason: err.into(),
                });
                return Ok(());
            }
        };

        self.update(
            target,
            mapping.value.amount(),
            mapping.indicator.px(),
            mapping.tooltip.px(),
        )?;
        self.last = Some(mapping);
        tracer.tooltip_update(&TooltipUpdateEvent::new(Self::NAME, &mapping));
        Ok(())
    }

    fn handle_hover(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        let Some(tooltip) = self.tooltip else {
            return Ok(());
        };
        if let Some(player) = self.base.player() {
            player.trigger(PlayerEvent::TooltipShown);
        }
        target.add_class(tooltip, TOOLTIP_ACTIVE_CLASS)
    }

    fn handle_leave(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        match self.tooltip {
            Some(tooltip) => target.remove_class(tooltip, TOOLTIP_ACTIVE_CLASS),
            None => Ok(()),
        }
    }
}

impl Disposable for VolumeDisplay {
    fn dispose(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        if self.base.is_disposed() {
            return Ok(());
        }
        let tooltip = self.tooltip.take();
        self.last = None;
        let released = release_tooltip(target, tooltip);
        self.base.dispose(target)?;
        released
    }

    fn is_disposed(&self) -> bool {
        self.base.is_disposed()
    }
}

impl Control for VolumeDisplay {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::player::tests::chrome;
    use crate::render::HeadlessTarget;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::Rect;

    fn mounted() -> (HeadlessTarget, PlayerHandle, VolumeDisplay) {
        mounted_with(PlayerOptions::new())
    }

    fn mounted_with(options: PlayerOptions) -> (HeadlessTarget, PlayerHandle, VolumeDisplay) {
        let mut target = HeadlessTarget::new();
        let elements = chrome(&mut target);
        let player = Player::new(options, elements);
        let mut display = VolumeDisplay::new(player.options());
        let el = display.create_el(&mut target).unwrap();
        let volume_bar = elements.volume_bar.unwrap();
        target.append_child(volume_bar, el).unwrap();
        display.bind(&player);
        player.trigger_ready();
        display.sync(&mut target).unwrap();

        target.set_layout(el, Rect::new(0.0, 0.0, 4.0, 10.0)).unwrap();
        target
            .set_layout(display.tooltip().unwrap(), Rect::new(0.0, 0.0, 30.0, 20.0))
            .unwrap();
        (target, player, display)
    }

    fn volume_sample(target: &HeadlessTarget, player: &PlayerHandle, x: f64) -> PointerSample {
        let volume_bar = player.elements().volume_bar.unwrap();
        PointerSample {
            x,
            track: target.bounding_box(volume_bar).unwrap(),
        }
    }

    #[test]
    fn create_shows_zero_percent() {
        let mut target = HeadlessTarget::new();
        let mut display = VolumeDisplay::new(&PlayerOptions::new());
        let el = display.create_el(&mut target).unwrap();
        let tooltip = display.tooltip().unwrap();
        assert_eq!(target.has_class(el, CLASS), Ok(true));
        assert_eq!(target.has_class(tooltip, TOOLTIP_CLASS), Ok(true));
        assert_eq!(target.text(tooltip), Some("0%"));
        assert_eq!(target.style(tooltip, "left"), Some("0px"));
    }

    #[test]
    fn tooltip_moves_to_progress_control_on_ready() {
        let (target, player, display) = mounted();
        assert_eq!(
            target.parent(display.tooltip().unwrap()),
            Ok(Some(player.elements().progress_control))
        );
    }

    #[test]
    fn value_is_always_percent() {
        let (mut target, player, mut display) = mounted();
        player.set_duration(Some(300.0));
        // Volume bar spans x 250..350.
        let sample = volume_sample(&target, &player, 275.0);
        display
            .handle_mouse_move(&mut target, &sample, &mut Tracer::none())
            .unwrap();
        let tooltip = display.tooltip().unwrap();
        assert_eq!(target.text(tooltip), Some("25%"));
        assert!(display.last_mapping().unwrap().value.is_percent());
        assert_eq!(target.style(display.el().unwrap(), "left"), Some("25px"));
    }

    #[test]
    fn tooltip_centre_stays_over_volume_bar() {
        let (mut target, player, mut display) = mounted();
        let tooltip = display.tooltip().unwrap();

        // Container (progress control) starts at 20; tooltip is 30 wide.
        // min = 250 - 20 - 15 = 215, max = 315.
        let sample = volume_sample(&target, &player, 300.0);
        display
            .handle_mouse_move(&mut target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(target.style(tooltip, "left"), Some("265px"));

        let sample = volume_sample(&target, &player, 900.0);
        display
            .handle_mouse_move(&mut target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(target.style(tooltip, "left"), Some("315px"));
        assert_eq!(target.text(tooltip), Some("100%"));

        let sample = volume_sample(&target, &player, 0.0);
        display
            .handle_mouse_move(&mut target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(target.style(tooltip, "left"), Some("215px"));
    }

    #[test]
    fn parent_clamp_from_player_options() {
        use crate::position::TooltipClamp;

        let options = PlayerOptions::new().with_volume_tooltip_clamp(TooltipClamp::Parent);
        let (mut target, player, mut display) = mounted_with(options);
        let tooltip = display.tooltip().unwrap();

        // Kept inside the 360px progress control: max = 360 - 30.
        let sample = volume_sample(&target, &player, 900.0);
        display
            .handle_mouse_move(&mut target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(target.style(tooltip, "left"), Some("330px"));
    }

    #[test]
    fn hover_activates_and_announces() {
        let (mut target, player, mut display) = mounted();
        let shown = Rc::new(Cell::new(0));
        let s = Rc::clone(&shown);
        let _sub = player.on(PlayerEvent::TooltipShown, move |_| s.set(s.get() + 1));
        let tooltip = display.tooltip().unwrap();

        display.handle_hover(&mut target).unwrap();
        assert_eq!(shown.get(), 1);
        assert_eq!(target.has_class(tooltip, TOOLTIP_ACTIVE_CLASS), Ok(true));

        display.handle_leave(&mut target).unwrap();
        assert_eq!(target.has_class(tooltip, TOOLTIP_ACTIVE_CLASS), Ok(false));
    }

    #[test]
    fn dispose_removes_moved_tooltip() {
        let (mut target, player, mut display) = mounted();
        let tooltip = display.tooltip().unwrap();
        let el = display.el().unwrap();

        display.dispose(&mut target).unwrap();
        assert!(!target.contains(tooltip));
        assert!(!target.contains(el));
        assert_eq!(
            target.children(player.elements().progress_control),
            [player.elements().seek_bar]
        );

        // Hover after dispose does nothing and announces nothing.
        display.handle_hover(&mut target).unwrap();
        assert_eq!(player.listener_count(PlayerEvent::Ready), 0);
    }
}
