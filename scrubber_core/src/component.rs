// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits, shared control state, and the control registry.
//!
//! A control is assembled from small capabilities instead of a base class:
//!
//! | Trait | Step |
//! |-------|------|
//! | [`Renderable`] | build the control's elements |
//! | [`EventBound`] | subscribe to player events, apply what they changed |
//! | [`PointerInput`] | react to pointer notifications |
//! | [`Disposable`] | remove elements and release subscriptions |
//!
//! [`Control`] groups them for storage behind `Box<dyn Control>`.
//!
//! Player callbacks never touch the render target. They only set
//! [`DirtyFlags`] through a [`DirtyHandle`]; the host later calls
//! [`EventBound::sync`] with the target, which applies the pending work.
//!
//! ```text
//!   player event ──► callback ──► DirtyHandle::mark
//!                                        │
//!   host ──► sync(target) ──► take_dirty ┘──► element updates
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use core::cell::Cell;
use core::fmt;

use crate::config::PlayerOptions;
use crate::event::{Subscription, SubscriptionSet};
use crate::player::PlayerHandle;
use crate::position::PointerSample;
use crate::render::{ElementId, RenderError, RenderTarget};
use crate::trace::{LifecyclePhase, Tracer};

/// Builds the control's element tree.
pub trait Renderable {
    /// Creates the control's elements and returns its root element.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target.
    fn create_el(&mut self, target: &mut dyn RenderTarget) -> Result<ElementId, RenderError>;

    /// Returns the root element once created.
    fn el(&self) -> Option<ElementId>;
}

/// Tears the control down.
pub trait Disposable {
    /// Removes every element the control created (including ones it moved
    /// elsewhere in the tree) and releases all subscriptions.
    ///
    /// Disposing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target. Subscriptions are
    /// released even when removing elements fails.
    fn dispose(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError>;

    /// Returns `true` after [`dispose`](Self::dispose).
    fn is_disposed(&self) -> bool;
}

/// Player event wiring.
pub trait EventBound {
    /// Registers the control's player subscriptions.
    fn bind(&mut self, player: &PlayerHandle);

    /// Applies work recorded by player callbacks since the last call.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target.
    fn sync(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError>;
}

/// Pointer notifications. Every method defaults to doing nothing.
pub trait PointerInput {
    /// The pointer moved over the control's track.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target. Unusable samples are not
    /// errors; they are reported to `tracer` and skipped.
    fn handle_mouse_move(
        &mut self,
        target: &mut dyn RenderTarget,
        sample: &PointerSample,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), RenderError> {
        _ = (target, sample, tracer);
        Ok(())
    }

    /// The pointer entered the control.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target.
    fn handle_hover(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        _ = target;
        Ok(())
    }

    /// The pointer left the control.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target.
    fn handle_leave(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        _ = target;
        Ok(())
    }

    /// The control was clicked.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`]s from the target.
    fn handle_click(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        _ = target;
        Ok(())
    }
}

/// A complete control.
pub trait Control: Renderable + Disposable + EventBound + PointerInput {
    /// The registry name of the control, also used in trace events.
    fn name(&self) -> &'static str;
}

/// Work a control owes its elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirtyFlags(u8);

impl DirtyFlags {
    /// Nothing pending.
    pub const NONE: Self = Self(0);
    /// The player became ready.
    pub const READY: Self = Self(1 << 0);
    /// A control hint (button text, title) is out of date.
    pub const HINT: Self = Self(1 << 1);
    /// A displayed value is out of date.
    pub const VALUE: Self = Self(1 << 2);

    /// Returns `true` if every flag in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both flag sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no flag is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A shared, cloneable writer for a control's [`DirtyFlags`].
///
/// Player callbacks capture a clone of the handle.
#[derive(Clone, Debug, Default)]
pub struct DirtyHandle(Rc<Cell<DirtyFlags>>);

impl DirtyHandle {
    /// Adds `flags` to the pending set.
    pub fn mark(&self, flags: DirtyFlags) {
        self.0.set(self.0.get().union(flags));
    }

    /// Returns the pending set without clearing it.
    #[must_use]
    pub fn get(&self) -> DirtyFlags {
        self.0.get()
    }

    /// Returns and clears the pending set.
    pub fn take(&self) -> DirtyFlags {
        self.0.replace(DirtyFlags::NONE)
    }
}

/// State every control carries: its root element, its player, its
/// subscriptions and its pending work.
#[derive(Debug, Default)]
pub struct ControlBase {
    el: Option<ElementId>,
    player: Option<PlayerHandle>,
    subscriptions: SubscriptionSet,
    dirty: DirtyHandle,
    disposed: bool,
}

impl ControlBase {
    /// Creates empty control state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root element, if created.
    #[must_use]
    pub const fn el(&self) -> Option<ElementId> {
        self.el
    }

    /// Records the root element.
    pub fn set_el(&mut self, el: ElementId) {
        self.el = Some(el);
    }

    /// Returns the bound player.
    #[must_use]
    pub const fn player(&self) -> Option<&PlayerHandle> {
        self.player.as_ref()
    }

    /// Binds the control to `player`.
    pub fn set_player(&mut self, player: &PlayerHandle) {
        self.player = Some(Rc::clone(player));
    }

    /// Takes ownership of a subscription until dispose.
    pub fn adopt(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Number of subscriptions currently held.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns a writer for the pending work set.
    #[must_use]
    pub fn dirty_handle(&self) -> DirtyHandle {
        self.dirty.clone()
    }

    /// Returns and clears the pending work set.
    pub fn take_dirty(&self) -> DirtyFlags {
        self.dirty.take()
    }

    /// Returns `true` after [`dispose`](Self::dispose).
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases subscriptions, unbinds the player and destroys the root
    /// element.
    ///
    /// # Errors
    ///
    /// Propagates the error from destroying the root element. Everything else
    /// is released first.
    pub fn dispose(&mut self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        self.subscriptions.clear();
        self.player = None;
        self.dirty.take();
        match self.el.take() {
            Some(el) => target.destroy(el),
            None => Ok(()),
        }
    }
}

/// Creates, binds and syncs `control`, tracing each step.
///
/// # Errors
///
/// Propagates [`RenderError`]s from creating or syncing the control.
pub fn mount(
    control: &mut dyn Control,
    target: &mut dyn RenderTarget,
    player: &PlayerHandle,
    tracer: &mut Tracer<'_>,
) -> Result<ElementId, RenderError> {
    let name = control.name();
    let el = control.create_el(target)?;
    tracer.lifecycle(name, LifecyclePhase::Create);
    control.bind(player);
    tracer.lifecycle(name, LifecyclePhase::Bind);
    control.sync(target)?;
    tracer.lifecycle(name, LifecyclePhase::Sync);
    Ok(el)
}

/// Disposes `control`, tracing the step.
///
/// # Errors
///
/// Propagates [`RenderError`]s from the dispose.
pub fn unmount(
    control: &mut dyn Control,
    target: &mut dyn RenderTarget,
    tracer: &mut Tracer<'_>,
) -> Result<(), RenderError> {
    control.dispose(target)?;
    tracer.lifecycle(control.name(), LifecyclePhase::Dispose);
    Ok(())
}

/// Errors from [`ControlRegistry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory is already registered under this name.
    Duplicate(&'static str),
    /// No factory is registered under this name.
    Unknown(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(name) => write!(f, "control {name:?} is already registered"),
            Self::Unknown(name) => write!(f, "no control registered as {name:?}"),
        }
    }
}

impl core::error::Error for RegistryError {}

/// Builds a control from the player's options.
pub type ControlFactory = fn(&PlayerOptions) -> Box<dyn Control>;

/// Maps control names to factories.
#[derive(Default)]
pub struct ControlRegistry {
    factories: BTreeMap<&'static str, ControlFactory>,
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

impl ControlRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in controls.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, factory) in crate::widget::BUILTINS {
            registry.factories.insert(*name, *factory);
        }
        registry
    }

    /// Registers `factory` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the name is taken.
    pub fn register(
        &mut self,
        name: &'static str,
        factory: ControlFactory,
    ) -> Result<(), RegistryError> {
        if self.factories.contains_key(name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Iterates registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Builds the control registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] if nothing is registered under
    /// `name`.
    pub fn create(
        &self,
        name: &str,
        options: &PlayerOptions,
    ) -> Result<Box<dyn Control>, RegistryError> {
        self.factories
            .get(name)
            .map(|factory| factory(options))
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }
}
