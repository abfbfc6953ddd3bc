// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seek-time preview shown while hovering the progress bar.

use crate::component::{
    Control, ControlBase, DirtyFlags, Disposable, EventBound, PointerInput, Renderable,
};
use crate::config::{MouseTimeDisplayOptions, PlayerOptions};
use crate::player::{PlayerEvent, PlayerHandle};
use crate::position::{
    PointerMapping, PointerSample, PositionMapper, TooltipClamp, TrackGeometry, Value,
    keep_inside_position, keep_inside_right, to_value,
};
use crate::render::{ElementId, RenderError, RenderTarget, px};
use crate::trace::{
    PointerSampleEvent, SampleSkippedEvent, SkipReason, TooltipUpdateEvent, Tracer,
};

use super::{release_tooltip, tooltip_container};

/// Shows the time under the pointer while it moves over the seek bar.
///
/// The control owns two elements: an indicator (`vjs-mouse-display`) that
/// follows the pointer along the seek bar, and a tooltip holding the label.
/// Once the player is ready the tooltip is moved into the progress control so
/// it can overflow the seek bar. A duration change relabels the last sample.
///
/// With `keep_tooltips_inside` the tooltip gets the `vjs-time-tooltip` class,
/// the indicator gets `vjs-keep-tooltips-inside`, and the tooltip is anchored
/// from its right edge so it never crosses the player's edges.
#[derive(Debug)]
pub struct MouseTimeDisplay {
    base: ControlBase,
    options: MouseTimeDisplayOptions,
    mapper: PositionMapper,
    tooltip: Option<ElementId>,
    last: Option<PointerMapping>,
}

impl MouseTimeDisplay {
    /// Registry name.
    pub const NAME: &'static str = "MouseTimeDisplay";

    /// Creates the control with options derived from the player's.
    #[must_use]
    pub fn new(options: &PlayerOptions) -> Self {
        Self::with_options(MouseTimeDisplayOptions::from_player(options))
    }

    /// Creates the control with explicit options.
    #[must_use]
    pub fn with_options(options: MouseTimeDisplayOptions) -> Self {
        Self {
            base: ControlBase::new(),
            options,
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

    /// Returns the mapping behind the current display, if any sample has
    /// been applied.
    #[must_use]
    pub const fn last_mapping(&self) -> Option<PointerMapping> {
        self.last
    }

    /// Number of player subscriptions currently held.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.base.subscription_count()
    }

    fn update(
        &self,
        target: &mut dyn RenderTarget,
        value: Value,
        position: f64,
        tooltip_position: f64,
    ) -> Result<(), RenderError> {
        let (Some(el), Some(tooltip)) = (self.base.el(), self.tooltip) else {
            return Ok(());
        };
        let player = self.base.player();
        let guide = player.and_then(|p| p.duration()).unwrap_or(0.0);

        target.set_style(el, "left", &px(position))?;
        target.set_text(tooltip, &value.label(guide))?;

        if self.options.keep_tooltips_inside {
            let player_width = match player {
                Some(p) => target.computed_width(p.elements().root)?,
                None => f64::INFINITY,
            };
            let tooltip_width = target.computed_width(tooltip)?;
            let clamped = keep_inside_position(position, tooltip_width, player_width);
            let right = keep_inside_right(position, clamped, tooltip_width);
            target.set_style(tooltip, "left", "auto")?;
            target.set_style(tooltip, "right", &px(right))?;
        } else {
            target.set_style(tooltip, "right", "auto")?;
            target.set_style(tooltip, "left", &px(tooltip_position))?;
        }
        Ok(())
    }
}

impl Renderable for MouseTimeDisplay {
    fn create_el(&mut self, target: &mut dyn RenderTarget) -> Result<ElementId, RenderError> {
        let el = target.create_element("div", "vjs-mouse-display")?;
        let tooltip = if self.options.keep_tooltips_inside {
            let tooltip = target.create_element("div", "vjs-time-tooltip")?;
            target.append_child(el, tooltip)?;
            target.add_class(el, "vjs-keep-tooltips-inside")?;
            tooltip
        } else {
            target.create_element("div", "vjs-mouse-display-tooltip")?
        };
        self.base.set_el(el);
        self.tooltip = Some(tooltip);
        self.update(target, Value::Time(0.0), 0.0, 0.0)?;
        Ok(el)
    }

    fn el(&self) -> Option<ElementId> {
        self.base.el()
    }
}

impl EventBound for MouseTimeDisplay {
    fn bind(&mut self, player: &PlayerHandle) {
        self.base.set_player(player);
        let dirty = self.base.dirty_handle();
        if let Some(sub) = player.when_ready(move || dirty.mark(DirtyFlags::READY)) {
            self.base.adopt(sub);
        }
        let dirty = self.base.dirty_handle();
        self.base.adopt(player.on(PlayerEvent::DurationChange, move |_| {
            dirty.mark(DirtyFlags::VALUE);
        }));
    }

    fn sync(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        let dirty = self.base.take_dirty();
        if dirty.contains(DirtyFlags::READY)
            && let (Some(player), Some(tooltip)) = (self.base.player(), self.tooltip)
        {
            target.append_child(player.elements().progress_control, tooltip)?;
        }
        if dirty.contains(DirtyFlags::VALUE)
            && let (Some(player), Some(last)) = (self.base.player(), self.last)
        {
            let value = to_value(last.fraction, player.mapping_duration());
            self.update(target, value, last.indicator.px(), last.tooltip.px())?;
            self.last = Some(PointerMapping { value, ..last });
        }
        Ok(())
    }
}

impl PointerInput for MouseTimeDisplay {
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
        let (Some(el), Some(tooltip), Some(player)) =
            (self.base.el(), self.tooltip, self.base.player())
        else {
            tracer.sample_skipped(&SampleSkippedEvent {
                control: Self::NAME,
                reason: SkipReason::NotCreated,
            });
            return Ok(());
        };

        let outer = match self.mapper.clamp() {
            TooltipClamp::Outer => Some(target.bounding_box(player.elements().root)?),
            TooltipClamp::Parent => None,
        };
        let geometry = TrackGeometry {
            indicator_width: target.offset_width(el)?,
            tooltip_width: target.offset_width(tooltip)?,
            tooltip_container: tooltip_container(target, tooltip, sample.track)?,
            outer,
        };
        let mapping = match self
            .mapper
            .map(sample, &geometry, player.mapping_duration())
        {
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
            mapping.value,
            mapping.indicator.px(),
            mapping.tooltip.px(),
        )?;
        self.last = Some(mapping);
        tracer.tooltip_update(&TooltipUpdateEvent::new(Self::NAME, &mapping));
        Ok(())
    }
}

impl Disposable for MouseTimeDisplay {
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

impl Control for MouseTimeDisplay {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::tests::chrome;
    use crate::player::{Player, PlayerEvent};
    use crate::render::HeadlessTarget;
    use kurbo::Rect;

    struct Fixture {
        target: HeadlessTarget,
        player: PlayerHandle,
        display: MouseTimeDisplay,
    }

    fn fixture(options: PlayerOptions) -> Fixture {
        let mut target = HeadlessTarget::new();
        let elements = chrome(&mut target);
        let player = Player::new(options, elements);
        let mut display = MouseTimeDisplay::new(&options);
        let el = display.create_el(&mut target).unwrap();
        target.append_child(elements.seek_bar, el).unwrap();
        display.bind(&player);
        player.trigger_ready();
        display.sync(&mut target).unwrap();

        // Indicator 2px wide, tooltip 40px wide.
        target.set_layout(el, Rect::new(0.0, 0.0, 2.0, 6.0)).unwrap();
        let tooltip = display.tooltip().unwrap();
        target
            .set_layout(tooltip, Rect::new(0.0, 0.0, 40.0, 20.0))
            .unwrap();
        Fixture {
            target,
            player,
            display,
        }
    }

    fn seek_sample(f: &Fixture, x: f64) -> PointerSample {
        let seek_bar = f.player.elements().seek_bar;
        PointerSample {
            x,
            track: f.target.bounding_box(seek_bar).unwrap(),
        }
    }

    #[test]
    fn create_builds_detached_tooltip() {
        let mut target = HeadlessTarget::new();
        let mut display = MouseTimeDisplay::new(&PlayerOptions::new());
        let el = display.create_el(&mut target).unwrap();
        let tooltip = display.tooltip().unwrap();

        assert_eq!(target.has_class(el, "vjs-mouse-display"), Ok(true));
        assert_eq!(
            target.has_class(tooltip, "vjs-mouse-display-tooltip"),
            Ok(true)
        );
        assert_eq!(target.parent(tooltip), Ok(None));
        assert_eq!(target.text(tooltip), Some("0:00"));
        assert_eq!(target.style(el, "left"), Some("0px"));
        assert_eq!(target.style(tooltip, "right"), Some("auto"));
    }

    #[test]
    fn ready_moves_tooltip_into_progress_control() {
        let f = fixture(PlayerOptions::new());
        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(
            f.target.parent(tooltip),
            Ok(Some(f.player.elements().progress_control))
        );
    }

    #[test]
    fn ready_before_bind_still_moves_tooltip() {
        let mut target = HeadlessTarget::new();
        let elements = chrome(&mut target);
        let player = Player::new(PlayerOptions::new(), elements);
        player.trigger_ready();

        let mut display = MouseTimeDisplay::new(player.options());
        display.create_el(&mut target).unwrap();
        display.bind(&player);
        assert_eq!(player.listener_count(PlayerEvent::Ready), 0);
        display.sync(&mut target).unwrap();
        assert_eq!(
            target.parent(display.tooltip().unwrap()),
            Ok(Some(elements.progress_control))
        );
    }

    #[test]
    fn unknown_duration_shows_percent() {
        let mut f = fixture(PlayerOptions::new());
        // Seek bar spans x 20..380 (360px); pointer at the middle.
        let sample = seek_sample(&f, 200.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();

        let el = f.display.el().unwrap();
        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(f.target.text(tooltip), Some("50%"));
        assert_eq!(f.target.style(el, "left"), Some("180px"));
        // 200 - 20 - 40/2 inside the 360px progress control.
        assert_eq!(f.target.style(tooltip, "left"), Some("160px"));
        assert_eq!(f.target.style(tooltip, "right"), Some("auto"));
    }

    #[test]
    fn known_duration_shows_time() {
        let mut f = fixture(PlayerOptions::new());
        f.player.set_duration(Some(120.0));
        let sample = seek_sample(&f, 110.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();

        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(f.target.text(tooltip), Some("0:30"));
        let mapping = f.display.last_mapping().unwrap();
        assert_eq!(mapping.value, Value::Time(30.0));
    }

    #[test]
    fn duration_change_relabels_last_sample() {
        let mut f = fixture(PlayerOptions::new());
        let sample = seek_sample(&f, 200.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();
        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(f.target.text(tooltip), Some("50%"));

        f.player.set_duration(Some(120.0));
        // Nothing changes until the host syncs.
        assert_eq!(f.target.text(tooltip), Some("50%"));
        f.display.sync(&mut f.target).unwrap();
        assert_eq!(f.target.text(tooltip), Some("1:00"));
        assert_eq!(f.display.last_mapping().unwrap().value, Value::Time(60.0));
        assert_eq!(f.target.style(tooltip, "left"), Some("160px"));
    }

    #[test]
    fn offsets_clamp_at_track_edges() {
        let mut f = fixture(PlayerOptions::new());
        let sample = seek_sample(&f, 1000.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();

        let el = f.display.el().unwrap();
        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(f.target.text(tooltip), Some("100%"));
        assert_eq!(f.target.style(el, "left"), Some("358px"));
        assert_eq!(f.target.style(tooltip, "left"), Some("320px"));
    }

    #[test]
    fn outer_clamp_uses_player_box() {
        let options = PlayerOptions::new().with_time_tooltip_clamp(TooltipClamp::Outer);
        let mut f = fixture(options);
        let tooltip = f.display.tooltip().unwrap();

        // Centre may travel the player's 0..400: min = 0 - 20 - 20, max = min + 400.
        let sample = seek_sample(&f, 1000.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(f.target.style(tooltip, "left"), Some("360px"));

        let sample = seek_sample(&f, 0.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(f.target.style(tooltip, "left"), Some("-40px"));

        // Parent clamp on the same samples stays within 0..320.
        let mut parent = fixture(PlayerOptions::new());
        let tooltip = parent.display.tooltip().unwrap();
        let sample = seek_sample(&parent, 0.0);
        parent
            .display
            .handle_mouse_move(&mut parent.target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(parent.target.style(tooltip, "left"), Some("0px"));
    }

    #[test]
    fn empty_track_keeps_previous_state() {
        let mut f = fixture(PlayerOptions::new());
        let sample = seek_sample(&f, 200.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();

        let collapsed = PointerSample {
            x: 300.0,
            track: Rect::new(20.0, 0.0, 20.0, 6.0),
        };
        f.display
            .handle_mouse_move(&mut f.target, &collapsed, &mut Tracer::none())
            .unwrap();
        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(f.target.text(tooltip), Some("50%"));
    }

    #[test]
    fn keep_inside_anchors_from_the_right() {
        let options = PlayerOptions::new().with_tooltips_inside(true);
        let mut f = fixture(options);
        let el = f.display.el().unwrap();
        let tooltip = f.display.tooltip().unwrap();
        assert_eq!(f.target.has_class(el, "vjs-keep-tooltips-inside"), Ok(true));
        assert_eq!(f.target.has_class(tooltip, "vjs-time-tooltip"), Ok(true));

        // Indicator at 5px: a 40px tooltip pulls it to 20px.
        let sample = seek_sample(&f, 25.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(f.target.style(el, "left"), Some("5px"));
        assert_eq!(f.target.style(tooltip, "left"), Some("auto"));
        // (5 - 20 + 1) - 20
        assert_eq!(f.target.style(tooltip, "right"), Some("-34px"));

        // Indicator at 100px: no clamping, right = 1 - 20.
        let sample = seek_sample(&f, 120.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();
        assert_eq!(f.target.style(tooltip, "right"), Some("-19px"));
    }

    #[test]
    fn dispose_removes_elements_and_listeners() {
        let mut f = fixture(PlayerOptions::new());
        let before = f.target.live_count();
        let el = f.display.el().unwrap();
        let tooltip = f.display.tooltip().unwrap();

        f.display.dispose(&mut f.target).unwrap();
        assert!(f.display.is_disposed());
        assert!(!f.target.contains(el));
        assert!(!f.target.contains(tooltip));
        assert_eq!(f.target.live_count(), before - 2);
        assert_eq!(f.target.children(f.player.elements().progress_control).len(), 1);
        assert_eq!(f.player.listener_count(PlayerEvent::Ready), 0);
        assert_eq!(f.player.listener_count(PlayerEvent::DurationChange), 0);

        // Samples after dispose are ignored.
        let sample = seek_sample(&f, 200.0);
        f.display
            .handle_mouse_move(&mut f.target, &sample, &mut Tracer::none())
            .unwrap();
        f.display.dispose(&mut f.target).unwrap();
    }

    #[test]
    fn dispose_before_ready_drops_pending_subscription() {
        let mut target = HeadlessTarget::new();
        let player = Player::new(PlayerOptions::new(), chrome(&mut target));
        let mut display = MouseTimeDisplay::new(player.options());
        display.create_el(&mut target).unwrap();
        display.bind(&player);
        assert_eq!(player.listener_count(PlayerEvent::Ready), 1);
        assert_eq!(display.subscription_count(), 2);

        display.dispose(&mut target).unwrap();
        assert_eq!(player.listener_count(PlayerEvent::Ready), 0);
        assert_eq!(display.subscription_count(), 0);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traces_updates_and_skips() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Counts {
            samples: usize,
            updates: usize,
            skipped: usize,
        }

        impl TraceSink for Counts {
            fn on_pointer_sample(&mut self, _e: &PointerSampleEvent) {
                self.samples += 1;
            }
            fn on_tooltip_update(&mut self, _e: &TooltipUpdateEvent) {
                self.updates += 1;
            }
            fn on_sample_skipped(&mut self, _e: &SampleSkippedEvent) {
                self.skipped += 1;
            }
        }

        let mut f = fixture(PlayerOptions::new());
        let mut sink = Counts::default();
        let good = seek_sample(&f, 100.0);
        let bad = PointerSample {
            x: 100.0,
            track: Rect::ZERO,
        };
        {
            let mut tracer = Tracer::new(&mut sink);
            f.display
                .handle_mouse_move(&mut f.target, &good, &mut tracer)
                .unwrap();
            f.display
                .handle_mouse_move(&mut f.target, &bad, &mut tracer)
                .unwrap();
        }
        assert_eq!(sink.samples, 2);
        assert_eq!(sink.updates, 1);
        assert_eq!(sink.skipped, 1);
    }
}
