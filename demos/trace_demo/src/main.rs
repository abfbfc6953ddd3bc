// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated pointer session that exercises the controls and the tracing
//! pipeline.
//!
//! Mounts the built-in controls on a [`HeadlessTarget`], sweeps the pointer
//! across the progress and volume bars through a [`Throttle`], clicks the
//! fullscreen toggle and unmounts everything. Events go to both a
//! [`PrettyPrintSink`] on stdout and a [`JsonLinesSink`] written to
//! `scrubber-trace.jsonl`.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Rect;
use scrubber_core::component::{
    Control, ControlRegistry, EventBound as _, PointerInput as _, mount, unmount,
};
use scrubber_core::config::PlayerOptions;
use scrubber_core::player::{Player, PlayerElements};
use scrubber_core::position::PointerSample;
use scrubber_core::render::{HeadlessTarget, RenderError, RenderTarget as _};
use scrubber_core::throttle::{Throttle, ThrottleConfig};
use scrubber_core::time::HostTime;
use scrubber_core::trace::{
    LifecycleEvent, PointerSampleEvent, SampleSkippedEvent, TooltipUpdateEvent, TraceSink, Tracer,
};
use scrubber_core::widget::{MouseTimeDisplay, VolumeDisplay};

use scrubber_debug::json::JsonLinesSink;
use scrubber_debug::pretty::PrettyPrintSink;

const TRACE_PATH: &str = "scrubber-trace.jsonl";
const DURATION_S: f64 = 120.0;
/// Pointer events arrive every 8 ms (≈120 Hz mouse).
const SAMPLE_SPACING_MS: f64 = 8.0;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_pointer_sample(&mut self, e: &PointerSampleEvent) {
        self.a.on_pointer_sample(e);
        self.b.on_pointer_sample(e);
    }

    fn on_sample_skipped(&mut self, e: &SampleSkippedEvent) {
        self.a.on_sample_skipped(e);
        self.b.on_sample_skipped(e);
    }

    fn on_tooltip_update(&mut self, e: &TooltipUpdateEvent) {
        self.a.on_tooltip_update(e);
        self.b.on_tooltip_update(e);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.a.on_lifecycle(e);
        self.b.on_lifecycle(e);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut json = JsonLinesSink::with_writer(BufWriter::new(File::create(TRACE_PATH)?));
    let mut tee = Tee {
        a: &mut pretty,
        b: &mut json,
    };
    let mut tracer = Tracer::new(&mut tee);

    // -- player chrome -----------------------------------------------------
    let mut target = HeadlessTarget::new();
    let elements = build_chrome(&mut target)?;
    let options = PlayerOptions::new().with_tooltips_inside(true);
    let player = Player::new(options, elements);

    // -- controls ----------------------------------------------------------
    let registry = ControlRegistry::with_builtins();
    let mut time_display = MouseTimeDisplay::new(player.options());
    let mut volume_display = VolumeDisplay::new(player.options());
    let mut fullscreen = registry.create("FullscreenToggle", player.options())?;

    let time_el = mount(&mut time_display, &mut target, &player, &mut tracer)?;
    target.append_child(elements.seek_bar, time_el)?;
    let volume_el = mount(&mut volume_display, &mut target, &player, &mut tracer)?;
    if let Some(volume_bar) = elements.volume_bar {
        target.append_child(volume_bar, volume_el)?;
    }
    let button = mount(fullscreen.as_mut(), &mut target, &player, &mut tracer)?;
    target.append_child(elements.root, button)?;

    // Tooltips get a measurable width once their text is laid out.
    if let Some(tooltip) = time_display.tooltip() {
        target.set_layout(tooltip, Rect::new(0.0, 0.0, 58.0, 20.0))?;
    }
    if let Some(tooltip) = volume_display.tooltip() {
        target.set_layout(tooltip, Rect::new(0.0, 0.0, 30.0, 20.0))?;
    }

    player.set_duration(Some(DURATION_S));
    player.trigger_ready();
    for control in [
        &mut time_display as &mut dyn Control,
        &mut volume_display,
        fullscreen.as_mut(),
    ] {
        control.sync(&mut target)?;
    }

    // -- pointer sweeps ----------------------------------------------------
    let seek_box = target.bounding_box(elements.seek_bar)?;
    let mut now_ms = 1_000.0;
    now_ms = sweep(
        &mut time_display,
        &mut target,
        &mut tracer,
        seek_box,
        now_ms,
    )?;

    if let Some(volume_bar) = elements.volume_bar {
        let volume_box = target.bounding_box(volume_bar)?;
        volume_display.handle_hover(&mut target)?;
        now_ms = sweep(
            &mut volume_display,
            &mut target,
            &mut tracer,
            volume_box,
            now_ms,
        )?;
        volume_display.handle_leave(&mut target)?;
    }

    // A collapsed track is reported and skipped.
    let collapsed = PointerSample {
        x: seek_box.x0,
        track: Rect::new(seek_box.x0, seek_box.y0, seek_box.x0, seek_box.y1),
    };
    time_display.handle_mouse_move(&mut target, &collapsed, &mut tracer)?;

    fullscreen.handle_click(&mut target)?;
    fullscreen.handle_click(&mut target)?;
    println!(
        "t={now_ms:.0}ms fullscreen={} volume={:.2}",
        player.is_fullscreen(),
        player.volume()
    );

    // -- teardown ----------------------------------------------------------
    unmount(fullscreen.as_mut(), &mut target, &mut tracer)?;
    unmount(&mut volume_display, &mut target, &mut tracer)?;
    unmount(&mut time_display, &mut target, &mut tracer)?;

    println!(
        "{} live elements, {} trace lines -> {TRACE_PATH}",
        target.live_count(),
        json.lines()
    );
    Ok(())
}

/// Moves the pointer left to right across `track`, throttled to the pointer
/// interval. Returns the simulated clock after the trailing flush.
fn sweep(
    control: &mut dyn Control,
    target: &mut HeadlessTarget,
    tracer: &mut Tracer<'_>,
    track: Rect,
    mut now_ms: f64,
) -> Result<f64, RenderError> {
    let config = ThrottleConfig::pointer();
    let mut throttle = Throttle::new(config);
    let steps = 48_u32;
    for step in 0..=steps {
        let x = track.x0 + track.width() * f64::from(step) / f64::from(steps);
        let sample = PointerSample { x, track };
        if let Some(sample) = throttle.offer(HostTime::from_millis_f64(now_ms), sample) {
            control.handle_mouse_move(target, &sample, tracer)?;
        }
        now_ms += SAMPLE_SPACING_MS;
    }
    let interval_ms = config.interval.micros() as f64 / 1000.0;
    now_ms += interval_ms;
    if let Some(sample) = throttle.poll(HostTime::from_millis_f64(now_ms)) {
        control.handle_mouse_move(target, &sample, tracer)?;
    }
    Ok(now_ms)
}

fn build_chrome(target: &mut HeadlessTarget) -> Result<PlayerElements, RenderError> {
    let root = target.create_element("div", "video-js")?;
    let progress_control = target.create_element("div", "vjs-progress-control vjs-control")?;
    let seek_bar = target.create_element("div", "vjs-progress-holder")?;
    let volume_bar = target.create_element("div", "vjs-volume-bar")?;
    target.append_child(root, progress_control)?;
    target.append_child(progress_control, seek_bar)?;
    target.append_child(root, volume_bar)?;

    target.set_layout(root, Rect::new(0.0, 0.0, 640.0, 360.0))?;
    target.set_layout(progress_control, Rect::new(10.0, 320.0, 630.0, 332.0))?;
    target.set_layout(seek_bar, Rect::new(10.0, 323.0, 630.0, 329.0))?;
    target.set_layout(volume_bar, Rect::new(520.0, 340.0, 600.0, 350.0))?;

    Ok(PlayerElements {
        root,
        progress_control,
        seek_bar,
        volume_bar: Some(volume_bar),
    })
}
