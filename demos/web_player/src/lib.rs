// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web player demo: a `<video>` with code-driven chrome.
//!
//! Builds the player root, a progress control with a seek bar, a volume bar
//! and a fullscreen button, then mounts the built-in controls on a
//! [`DomTarget`]. Pointer moves are throttled through [`PointerGate`]s before
//! they reach the hover tooltips.
//!
//! Build with: `wasm-pack build --target web demos/web_player`
//! Then serve `demos/web_player/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use scrubber_backend_web::{DomListeners, DomTarget, PointerGate};
use scrubber_core::component::{
    Control, ControlRegistry, EventBound as _, PointerInput as _, Renderable as _, mount,
};
use scrubber_core::config::PlayerOptions;
use scrubber_core::event::Subscription;
use scrubber_core::player::{Player, PlayerElements, PlayerHandle};
use scrubber_core::position::PointerSample;
use scrubber_core::render::{RenderError, RenderTarget as _};
use scrubber_core::trace::Tracer;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, HtmlVideoElement};

const VIDEO_W: u32 = 848;
const VIDEO_H: u32 = 480;
const VIDEO_URL: &str = "https://github.com/vidanov/video/raw/master/test_files/1080p50.mp4";

const STYLES: &str = "
.video-js { position: relative; width: 848px; font: 12px/1.4 system-ui, sans-serif; color: #fff; background: #000; }
.vjs-control-bar { position: absolute; left: 0; right: 0; bottom: 0; height: 40px; display: flex; align-items: center; gap: 12px; padding: 0 12px; background: rgba(20,24,32,0.7); }
.vjs-progress-control { position: relative; flex: 1; height: 100%; display: flex; align-items: center; cursor: pointer; }
.vjs-progress-holder { position: relative; flex: 1; height: 6px; background: rgba(255,255,255,0.3); border-radius: 3px; }
.vjs-volume-bar { position: relative; width: 80px; height: 6px; background: rgba(255,255,255,0.3); border-radius: 3px; cursor: pointer; }
.vjs-mouse-display, .vjs-volume-display { position: absolute; top: 0; bottom: 0; width: 1px; background: #fff; pointer-events: none; }
.vjs-time-tooltip, .vjs-mouse-display-tooltip, .vjs-volume-display-tooltip { position: absolute; bottom: 24px; padding: 2px 6px; border-radius: 4px; background: rgba(255,255,255,0.9); color: #111; white-space: nowrap; pointer-events: none; }
.vjs-time-tooltip { right: 0; }
.vjs-volume-display-tooltip { visibility: hidden; }
.vjs-volume-display-tooltip-active { visibility: visible; }
.vjs-button { background: none; border: 0; color: inherit; cursor: pointer; }
";

struct App {
    target: DomTarget,
    player: PlayerHandle,
    video: HtmlVideoElement,
    time_display: Box<dyn Control>,
    volume_display: Box<dyn Control>,
    fullscreen: Box<dyn Control>,
}

impl App {
    fn sync_controls(&mut self) -> Result<(), RenderError> {
        for control in [
            self.time_display.as_mut(),
            self.volume_display.as_mut(),
            self.fullscreen.as_mut(),
        ] {
            control.sync(&mut self.target)?;
        }
        Ok(())
    }
}

/// Entry point for the web-player demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let styles = element(&document, "style")?;
    styles.set_text_content(Some(STYLES));
    body.append_child(&styles)?;

    // -- chrome ------------------------------------------------------------
    let root = element(&document, "div")?;
    root.set_class_name("video-js");
    let video: HtmlVideoElement = document.create_element("video")?.unchecked_into();
    video.set_src(VIDEO_URL);
    video.set_controls(false);
    video.set_loop(true);
    video.set_muted(true);
    video.set_preload("metadata");
    video.set_attribute("playsinline", "")?;
    video.set_width(VIDEO_W);
    video.set_height(VIDEO_H);
    root.append_child(&video)?;

    let bar = element(&document, "div")?;
    bar.set_class_name("vjs-control-bar");
    let progress_control = element(&document, "div")?;
    progress_control.set_class_name("vjs-progress-control vjs-control");
    let seek_bar = element(&document, "div")?;
    seek_bar.set_class_name("vjs-progress-holder");
    let volume_bar = element(&document, "div")?;
    volume_bar.set_class_name("vjs-volume-bar");
    progress_control.append_child(&seek_bar)?;
    bar.append_child(&progress_control)?;
    bar.append_child(&volume_bar)?;
    root.append_child(&bar)?;
    body.append_child(&root)?;

    let mut target = DomTarget::new(document.clone());
    let elements = PlayerElements {
        root: target.adopt(root.clone()).map_err(js_err)?,
        progress_control: target.adopt(progress_control.clone()).map_err(js_err)?,
        seek_bar: target.adopt(seek_bar.clone()).map_err(js_err)?,
        volume_bar: Some(target.adopt(volume_bar.clone()).map_err(js_err)?),
    };
    let bar_id = target.adopt(bar).map_err(js_err)?;

    let options = PlayerOptions::new().with_tooltips_inside(true);
    let player = Player::new(options, elements);
    player.set_volume(video.volume());

    // -- controls ----------------------------------------------------------
    let registry = ControlRegistry::with_builtins();
    let create = |name: &str| registry.create(name, player.options()).map_err(js_err);
    let mut time_display = create("MouseTimeDisplay")?;
    let mut volume_display = create("VolumeDisplay")?;
    let mut fullscreen = create("FullscreenToggle")?;

    let mut tracer = Tracer::none();
    let el = mount(time_display.as_mut(), &mut target, &player, &mut tracer).map_err(js_err)?;
    target.append_child(elements.seek_bar, el).map_err(js_err)?;
    let el = mount(volume_display.as_mut(), &mut target, &player, &mut tracer).map_err(js_err)?;
    if let Some(volume_bar) = elements.volume_bar {
        target.append_child(volume_bar, el).map_err(js_err)?;
    }
    let el = mount(fullscreen.as_mut(), &mut target, &player, &mut tracer).map_err(js_err)?;
    target.append_child(bar_id, el).map_err(js_err)?;

    let app = Rc::new(RefCell::new(App {
        target,
        player: Rc::clone(&player),
        video: video.clone(),
        time_display,
        volume_display,
        fullscreen,
    }));

    let listeners = DomListeners::new();
    let mut subs = Vec::new();
    bind_pointer(
        &app,
        &listeners,
        &mut subs,
        &progress_control,
        &seek_bar,
        &volume_bar,
    )?;
    bind_media(&app, &listeners, &mut subs, &document, &root)?;

    // The page owns the player for its whole lifetime.
    core::mem::forget(subs);
    core::mem::forget(listeners);
    Ok(())
}

fn bind_pointer(
    app: &Rc<RefCell<App>>,
    listeners: &DomListeners,
    subs: &mut Vec<Subscription>,
    progress_control: &HtmlElement,
    seek_bar: &HtmlElement,
    volume_bar: &HtmlElement,
) -> Result<(), JsValue> {
    let throttle = app.borrow().player.options().control_bar.pointer_throttle;

    let seek_app = Rc::clone(app);
    let seek_gate = PointerGate::new(throttle, move |sample: PointerSample| {
        let mut a = seek_app.borrow_mut();
        let a = &mut *a;
        let _ = a
            .time_display
            .handle_mouse_move(&mut a.target, &sample, &mut Tracer::none());
    });
    subs.push(
        listeners
            .listen_pointer(
                progress_control,
                "mousemove",
                seek_bar.clone().into(),
                move |sample| seek_gate.offer(sample),
            )
            .map_err(js_err)?,
    );

    let volume_app = Rc::clone(app);
    let volume_gate = PointerGate::new(throttle, move |sample: PointerSample| {
        let mut a = volume_app.borrow_mut();
        let a = &mut *a;
        let _ = a
            .volume_display
            .handle_mouse_move(&mut a.target, &sample, &mut Tracer::none());
    });
    let leave_gate = volume_gate.clone();
    subs.push(
        listeners
            .listen_pointer(volume_bar, "mousemove", volume_bar.clone().into(), move |sample| {
                volume_gate.offer(sample);
            })
            .map_err(js_err)?,
    );

    let hover_app = Rc::clone(app);
    subs.push(
        listeners
            .listen(volume_bar, "mouseenter", move |_event: Event| {
                let mut a = hover_app.borrow_mut();
                let a = &mut *a;
                let _ = a.volume_display.handle_hover(&mut a.target);
            })
            .map_err(js_err)?,
    );

    let leave_app = Rc::clone(app);
    subs.push(
        listeners
            .listen(volume_bar, "mouseleave", move |_event: Event| {
                leave_gate.cancel();
                let mut a = leave_app.borrow_mut();
                let a = &mut *a;
                let _ = a.volume_display.handle_leave(&mut a.target);
            })
            .map_err(js_err)?,
    );

    let click_app = Rc::clone(app);
    subs.push(
        listeners
            .listen_pointer(volume_bar, "click", volume_bar.clone().into(), move |sample| {
                let a = click_app.borrow();
                if let Ok(fraction) = sample.fraction() {
                    a.video.set_volume(fraction.get());
                    a.video.set_muted(false);
                }
            })
            .map_err(js_err)?,
    );

    Ok(())
}

fn bind_media(
    app: &Rc<RefCell<App>>,
    listeners: &DomListeners,
    subs: &mut Vec<Subscription>,
    document: &Document,
    root: &HtmlElement,
) -> Result<(), JsValue> {
    let video = app.borrow().video.clone();

    let ready_app = Rc::clone(app);
    subs.push(
        listeners
            .listen(&video, "loadedmetadata", move |_event: Event| {
                let mut a = ready_app.borrow_mut();
                a.player.set_duration(finite_duration(a.video.duration()));
                a.player.trigger_ready();
                let _ = a.sync_controls();
            })
            .map_err(js_err)?,
    );

    let duration_app = Rc::clone(app);
    subs.push(
        listeners
            .listen(&video, "durationchange", move |_event: Event| {
                let mut a = duration_app.borrow_mut();
                a.player.set_duration(finite_duration(a.video.duration()));
                let _ = a.sync_controls();
            })
            .map_err(js_err)?,
    );

    let volume_app = Rc::clone(app);
    subs.push(
        listeners
            .listen(&video, "volumechange", move |_event: Event| {
                let a = volume_app.borrow();
                let volume = if a.video.muted() { 0.0 } else { a.video.volume() };
                a.player.set_volume(volume);
            })
            .map_err(js_err)?,
    );

    let play_video = video.clone();
    subs.push(
        listeners
            .listen(&video, "click", move |_event: Event| {
                if play_video.paused() {
                    let _ = play_video.play();
                } else {
                    let _ = play_video.pause();
                }
            })
            .map_err(js_err)?,
    );

    // The button updates the player model; the document is then asked to
    // follow it.
    let click_app = Rc::clone(app);
    let click_root = root.clone();
    let click_doc = document.clone();
    let button = app
        .borrow()
        .fullscreen
        .el()
        .and_then(|id| app.borrow().target.element(id).cloned())
        .ok_or_else(|| JsValue::from_str("fullscreen button not mounted"))?;
    subs.push(
        listeners
            .listen(&button, "click", move |_event: Event| {
                let mut a = click_app.borrow_mut();
                let a = &mut *a;
                let _ = a.fullscreen.handle_click(&mut a.target);
                if a.player.is_fullscreen() {
                    if click_root.request_fullscreen().is_err() {
                        a.player.set_fullscreen(false);
                        let _ = a.sync_controls();
                    }
                } else if click_doc.fullscreen_element().is_some() {
                    click_doc.exit_fullscreen();
                }
            })
            .map_err(js_err)?,
    );

    // A request the browser refuses later is reported here.
    let error_app = Rc::clone(app);
    subs.push(
        listeners
            .listen(document, "fullscreenerror", move |_event: Event| {
                let mut a = error_app.borrow_mut();
                a.player.set_fullscreen(false);
                let _ = a.sync_controls();
            })
            .map_err(js_err)?,
    );

    // Leaving fullscreen with Escape only shows up here.
    let change_app = Rc::clone(app);
    let change_doc = document.clone();
    subs.push(
        listeners
            .listen(document, "fullscreenchange", move |_event: Event| {
                let mut a = change_app.borrow_mut();
                a.player
                    .set_fullscreen(change_doc.fullscreen_element().is_some());
                let _ = a.sync_controls();
            })
            .map_err(js_err)?,
    );

    Ok(())
}

fn finite_duration(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}

fn js_err(err: impl core::fmt::Display) -> JsValue {
    JsValue::from_str(&alloc::format!("{err}"))
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}
