// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fullscreen button.

use alloc::rc::Rc;

use crate::component::{
    Control, ControlBase, DirtyFlags, Disposable, EventBound, PointerInput, Renderable,
};
use crate::config::PlayerOptions;
use crate::player::{PlayerEvent, PlayerHandle};
use crate::render::{ElementId, RenderError, RenderTarget};

const CLASS: &str = "vjs-fullscreen-control vjs-control vjs-button";
const ENTER_TEXT: &str = "Fullscreen";
const EXIT_TEXT: &str = "Exit fullscreen";

/// Toggles the player in and out of fullscreen.
///
/// The button's control text (a `vjs-control-text` span plus the `title`
/// attribute) tracks the player state: `Fullscreen` while windowed,
/// `Exit fullscreen` while fullscreen. Changes made elsewhere are picked up
/// through [`PlayerEvent::FullscreenChange`] and applied on the next
/// [`sync`](EventBound::sync).
#[derive(Debug, Default)]
pub struct FullscreenToggle {
    base: ControlBase,
    text_el: Option<ElementId>,
}

impl FullscreenToggle {
    /// Registry name.
    pub const NAME: &'static str = "FullscreenToggle";

    /// Creates the control. The player's options carry nothing it uses.
    #[must_use]
    pub fn new(options: &PlayerOptions) -> Self {
        _ = options;
        Self::default()
    }

    /// Returns the current hint text for the player state.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self.base.player() {
            Some(player) if player.is_fullscreen() => EXIT_TEXT,
            _ => ENTER_TEXT,
        }
    }

    fn control_text(&self, target: &mut dyn RenderTarget, text: &str) -> Result<(), RenderError> {
        let (Some(el), Some(text_el)) = (self.base.el(), self.text_el) else {
            return Ok(());
        };
        target.set_text(text_el, text)?;
        target.set_attribute(el, "title", text)
    }

    /// Rewrites the control text from the player state.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target.
    pub fn update_hint(&self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        self.control_text(target, self.hint())
    }
}

impl Renderable for FullscreenToggle {
    fn create_el(&mut self, target: &mut dyn RenderTarget) -> Result<ElementId, RenderError> {
        let el = target.create_element("button", CLASS)?;
        target.set_attribute(el, "type", "button")?;
        target.set_attribute(el, "role", "button")?;
        target.set_attribute(el, "aria-live", "polite")?;
        let text_el = target.create_element("span", "vjs-control-text")?;
        target.append_child(el, text_el)?;
        self.base.set_el(el);
        self.text_el = Some(text_el);
        self.control_text(target, ENTER_TEXT)?;
        Ok(el)
    }

    fn el(&self) -> Option<ElementId> {
        self.base.el()
    }
}

impl EventBound for FullscreenToggle {
    fn bind(&mut self, player: &PlayerHandle) {
        self.base.set_player(player);
        let dirty = self.base.dirty_handle();
        let weak = Rc::downgrade(player);
        // Changes before the player is ready are not reflected.
        self.base
            .adopt(player.on(PlayerEvent::FullscreenChange, move |_| {
                if weak.upgrade().is_some_and(|p| p.is_ready()) {
                    dirty.mark(DirtyFlags::HINT);
                }
            }));
    }

    fn sync(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        if self.base.take_dirty().contains(DirtyFlags::HINT) {
            self.update_hint(target)?;
        }
        Ok(())
    }
}

impl PointerInput for FullscreenToggle {
    fn handle_click(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        let Some(player) = self.base.player() else {
            return Ok(());
        };
        if player.is_fullscreen() {
            player.exit_fullscreen();
        } else {
            player.request_fullscreen();
        }
        // The change notification marked the hint dirty; it is applied here.
        self.base.take_dirty();
        self.update_hint(target)
    }
}

impl Disposable for FullscreenToggle {
    fn dispose(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        let text_released = match self.text_el.take() {
            Some(text_el) if !self.base.is_disposed() => target.destroy(text_el),
            _ => Ok(()),
        };
        self.base.dispose(target)?;
        text_released
    }

    fn is_disposed(&self) -> bool {
        self.base.is_disposed()
    }
}

impl Control for FullscreenToggle {
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
    use alloc::string::String;

    fn mounted() -> (HeadlessTarget, PlayerHandle, FullscreenToggle) {
        let mut target = HeadlessTarget::new();
        let player = Player::new(PlayerOptions::new(), chrome(&mut target));
        let mut toggle = FullscreenToggle::new(player.options());
        toggle.create_el(&mut target).unwrap();
        toggle.bind(&player);
        player.trigger_ready();
        toggle.sync(&mut target).unwrap();
        (target, player, toggle)
    }

    fn text(target: &HeadlessTarget, toggle: &FullscreenToggle) -> (String, String) {
        let el = toggle.el().unwrap();
        let span = target.children(el)[0];
        (
            target.text(span).unwrap().into(),
            target.attribute(el, "title").unwrap().into(),
        )
    }

    #[test]
    fn create_builds_button() {
        let (target, _player, toggle) = mounted();
        let el = toggle.el().unwrap();
        assert_eq!(target.tag(el), Some("button"));
        for class in ["vjs-fullscreen-control", "vjs-control", "vjs-button"] {
            assert_eq!(target.has_class(el, class), Ok(true), "missing {class}");
        }
        assert_eq!(target.attribute(el, "role"), Some("button"));
        assert_eq!(
            text(&target, &toggle),
            ("Fullscreen".into(), "Fullscreen".into())
        );
    }

    #[test]
    fn click_toggles_and_updates_hint() {
        let (mut target, player, mut toggle) = mounted();

        toggle.handle_click(&mut target).unwrap();
        assert!(player.is_fullscreen());
        assert_eq!(text(&target, &toggle).0, "Exit fullscreen");

        toggle.handle_click(&mut target).unwrap();
        assert!(!player.is_fullscreen());
        assert_eq!(text(&target, &toggle).1, "Fullscreen");
    }

    #[test]
    fn external_change_applies_on_sync() {
        let (mut target, player, mut toggle) = mounted();

        player.request_fullscreen();
        assert_eq!(text(&target, &toggle).0, "Fullscreen");
        toggle.sync(&mut target).unwrap();
        assert_eq!(text(&target, &toggle).0, "Exit fullscreen");

        player.set_fullscreen(false);
        toggle.sync(&mut target).unwrap();
        assert_eq!(text(&target, &toggle).0, "Fullscreen");
    }

    #[test]
    fn changes_before_ready_are_ignored() {
        let mut target = HeadlessTarget::new();
        let player = Player::new(PlayerOptions::new(), chrome(&mut target));
        let mut toggle = FullscreenToggle::new(player.options());
        toggle.create_el(&mut target).unwrap();
        toggle.bind(&player);

        player.request_fullscreen();
        toggle.sync(&mut target).unwrap();
        assert_eq!(text(&target, &toggle).0, "Fullscreen");

        player.trigger_ready();
        player.exit_fullscreen();
        player.request_fullscreen();
        toggle.sync(&mut target).unwrap();
        assert_eq!(text(&target, &toggle).0, "Exit fullscreen");
    }

    #[test]
    fn dispose_unsubscribes_and_removes_button() {
        let (mut target, player, mut toggle) = mounted();
        let live = target.live_count();
        assert_eq!(player.listener_count(PlayerEvent::FullscreenChange), 1);

        toggle.dispose(&mut target).unwrap();
        assert_eq!(player.listener_count(PlayerEvent::FullscreenChange), 0);
        assert_eq!(target.live_count(), live - 2);

        // A click after dispose no longer reaches the player.
        toggle.handle_click(&mut target).unwrap();
        assert!(!player.is_fullscreen());
        toggle.dispose(&mut target).unwrap();
    }
}
