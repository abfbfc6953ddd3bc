// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering port between controls and a platform element tree.
//!
//! Controls never touch platform globals. Everything they need from the
//! document (creating elements, writing styles and text, reading layout) goes
//! through a [`RenderTarget`]. The web backend implements it over `web-sys`;
//! [`HeadlessTarget`] implements it in memory for tests and non-browser hosts.
//!
//! Elements are addressed by [`ElementId`] handles carrying a generation
//! counter, so a handle kept past [`RenderTarget::destroy`] is reported as
//! [`RenderError::StaleElement`] instead of silently hitting a reused slot.

mod headless;

pub use headless::HeadlessTarget;

use alloc::string::String;
use core::fmt;

use kurbo::Rect;

/// A handle to an element owned by a [`RenderTarget`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ElementId {
    /// Creates a handle from a slot index and generation.
    ///
    /// Only render targets should mint handles.
    #[inline]
    #[must_use]
    pub const fn new(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}

/// Errors from [`RenderTarget`] operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The handle refers to an element that was destroyed.
    StaleElement(ElementId),
    /// The element is not attached to a parent.
    Detached(ElementId),
    /// The platform rejected the operation.
    Platform(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleElement(id) => write!(f, "stale element handle {id:?}"),
            Self::Detached(id) => write!(f, "element {id:?} has no parent"),
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl core::error::Error for RenderError {}

/// An element tree controls can build into and measure.
///
/// All geometry is in CSS pixels; boxes are in document coordinates (i.e.
/// already offset by page scroll).
pub trait RenderTarget {
    /// Creates a detached element with the given tag and class list.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Platform`] if the element cannot be created.
    fn create_element(&mut self, tag: &str, class_name: &str) -> Result<ElementId, RenderError>;

    /// Removes `el` from the tree and releases its handle.
    ///
    /// Children of `el` stay alive but become detached.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn destroy(&mut self, el: ElementId) -> Result<(), RenderError>;

    /// Appends `child` to `parent`, moving it if it already has a parent.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] if either handle is dead.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), RenderError>;

    /// Detaches `el` from its parent.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Detached`] if `el` has no parent.
    fn remove_from_parent(&mut self, el: ElementId) -> Result<(), RenderError>;

    /// Returns the parent of `el`, if attached.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn parent(&self, el: ElementId) -> Result<Option<ElementId>, RenderError>;

    /// Sets an inline style property.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<(), RenderError>;

    /// Replaces the text content of `el`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn set_text(&mut self, el: ElementId, text: &str) -> Result<(), RenderError>;

    /// Sets an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<(), RenderError>;

    /// Adds a class name; no-op if present.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn add_class(&mut self, el: ElementId, class: &str) -> Result<(), RenderError>;

    /// Removes a class name; no-op if absent.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn remove_class(&mut self, el: ElementId, class: &str) -> Result<(), RenderError>;

    /// Returns whether `el` carries `class`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn has_class(&self, el: ElementId, class: &str) -> Result<bool, RenderError>;

    /// Returns the element's border box in document coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn bounding_box(&self, el: ElementId) -> Result<Rect, RenderError>;

    /// Returns the element's layout width (`offsetWidth`), rounded by the
    /// platform.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn offset_width(&self, el: ElementId) -> Result<f64, RenderError>;

    /// Returns the element's computed style width, unrounded.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    fn computed_width(&self, el: ElementId) -> Result<f64, RenderError>;
}

/// Formats a pixel length for a style property, e.g. `12.5px`.
#[must_use]
pub fn px(value: f64) -> String {
    alloc::format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formatting() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-3.0), "-3px");
    }

    #[test]
    fn error_messages() {
        let id = ElementId::new(3, 1);
        assert_eq!(
            alloc::format!("{}", RenderError::StaleElement(id)),
            "stale element handle ElementId(3@gen1)"
        );
    }
}
