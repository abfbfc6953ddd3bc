// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! [`DomTarget`] keeps a slot table of live `HtmlElement`s and hands out
//! generational [`ElementId`]s for them, so controls can drive the document
//! without holding `web-sys` types.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use scrubber_core::render::{ElementId, RenderError, RenderTarget};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlElement};

fn platform(err: JsValue) -> RenderError {
    RenderError::Platform(format!("{err:?}"))
}

/// Attribute holding an element's slot index in its [`DomTarget`].
const SLOT_ATTR: &str = "data-scrubber-slot";

/// Parses a [`SLOT_ATTR`] value.
pub(crate) fn parse_slot(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Parses a computed CSS length such as `"12.5px"`.
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse()
        .ok()
}

/// The element's border box in page coordinates (viewport box plus scroll).
pub(crate) fn page_box(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    let (sx, sy) = web_sys::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    Rect::new(r.left() + sx, r.top() + sy, r.right() + sx, r.bottom() + sy)
}

/// A [`RenderTarget`] backed by the browser DOM.
///
/// Elements created through the target, and existing elements registered
/// with [`adopt`](Self::adopt), are addressed by [`ElementId`]. Parents that
/// were never registered are reported as `None` by
/// [`parent`](RenderTarget::parent).
pub struct DomTarget {
    document: Document,
    elements: Vec<Option<HtmlElement>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl core::fmt::Debug for DomTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomTarget")
            .field("document", &"Document")
            .field("live", &self.elements.iter().filter(|e| e.is_some()).count())
            .finish_non_exhaustive()
    }
}

impl DomTarget {
    /// Creates a target that creates elements in `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            elements: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Creates a target for the current window's document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Platform`] outside a browser window.
    pub fn from_window() -> Result<Self, RenderError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RenderError::Platform(String::from("no window document")))?;
        Ok(Self::new(document))
    }

    /// Registers an existing element and returns its handle.
    ///
    /// Adopting the same element twice yields the existing handle.
    pub fn adopt(&mut self, el: HtmlElement) -> Result<ElementId, RenderError> {
        if let Some(id) = self.find(&el) {
            return Ok(id);
        }
        self.insert(el)
    }

    /// Returns the DOM element for `id`, if it is live.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        let idx = id.index() as usize;
        if self.generation.get(idx) != Some(&id.generation()) {
            return None;
        }
        self.elements.get(idx).and_then(|slot| slot.as_ref())
    }

    fn get(&self, id: ElementId) -> Result<&HtmlElement, RenderError> {
        self.element(id).ok_or(RenderError::StaleElement(id))
    }

    fn id_of(&self, idx: usize) -> Option<ElementId> {
        let idx32 = u32::try_from(idx).ok()?;
        Some(ElementId::new(idx32, *self.generation.get(idx)?))
    }

    /// Looks `el` up through its slot attribute. Elements from another
    /// target, or left over from a freed slot, are not found.
    fn find(&self, el: &Element) -> Option<ElementId> {
        let idx = parse_slot(&el.get_attribute(SLOT_ATTR)?)?;
        let slot = self.elements.get(idx)?.as_ref()?;
        if AsRef::<Element>::as_ref(slot) != el {
            return None;
        }
        self.id_of(idx)
    }

    fn insert(&mut self, el: HtmlElement) -> Result<ElementId, RenderError> {
        let next = self
            .free_list
            .last()
            .map_or(self.elements.len(), |&idx| idx as usize);
        el.set_attribute(SLOT_ATTR, &format!("{next}"))
            .map_err(platform)?;
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.elements[idx as usize] = Some(el);
            idx
        } else {
            let idx = u32::try_from(self.elements.len())
                .map_err(|_| RenderError::Platform(String::from("element table full")))?;
            self.elements.push(Some(el));
            self.generation.push(0);
            idx
        };
        Ok(ElementId::new(idx, self.generation[idx as usize]))
    }
}

impl RenderTarget for DomTarget {
    fn create_element(&mut self, tag: &str, class_name: &str) -> Result<ElementId, RenderError> {
        let el: HtmlElement = self
            .document
            .create_element(tag)
            .map_err(platform)?
            .dyn_into()
            .map_err(|_| RenderError::Platform(format!("<{tag}> is not an HTML element")))?;
        el.set_class_name(class_name);
        self.insert(el)
    }

    fn destroy(&mut self, el: ElementId) -> Result<(), RenderError> {
        self.get(el)?;
        if let Some(node) = self.elements[el.index() as usize].take() {
            node.remove();
        }
        self.free_list.push(el.index());
        Ok(())
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), RenderError> {
        let child = self.get(child)?;
        self.get(parent)?.append_child(child).map_err(platform)?;
        Ok(())
    }

    fn remove_from_parent(&mut self, el: ElementId) -> Result<(), RenderError> {
        let node = self.get(el)?;
        if node.parent_node().is_none() {
            return Err(RenderError::Detached(el));
        }
        node.remove();
        Ok(())
    }

    fn parent(&self, el: ElementId) -> Result<Option<ElementId>, RenderError> {
        Ok(self
            .get(el)?
            .parent_element()
            .and_then(|parent| self.find(&parent)))
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<(), RenderError> {
        self.get(el)?
            .style()
            .set_property(property, value)
            .map_err(platform)
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> Result<(), RenderError> {
        self.get(el)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<(), RenderError> {
        self.get(el)?.set_attribute(name, value).map_err(platform)
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> Result<(), RenderError> {
        self.get(el)?.class_list().add_1(class).map_err(platform)
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> Result<(), RenderError> {
        self.get(el)?.class_list().remove_1(class).map_err(platform)
    }

    fn has_class(&self, el: ElementId, class: &str) -> Result<bool, RenderError> {
        Ok(self.get(el)?.class_list().contains(class))
    }

    fn bounding_box(&self, el: ElementId) -> Result<Rect, RenderError> {
        Ok(page_box(self.get(el)?))
    }

    fn offset_width(&self, el: ElementId) -> Result<f64, RenderError> {
        Ok(f64::from(self.get(el)?.offset_width()))
    }

    fn computed_width(&self, el: ElementId) -> Result<f64, RenderError> {
        let node = self.get(el)?;
        let computed = web_sys::window()
            .and_then(|w| w.get_computed_style(node).ok().flatten())
            .and_then(|style| style.get_property_value("width").ok())
            .and_then(|width| parse_px(&width));
        Ok(computed.unwrap_or_else(|| node.get_bounding_client_rect().width()))
    }
}
