// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory render target.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

use super::{ElementId, RenderError, RenderTarget};

#[derive(Debug)]
struct Node {
    tag: String,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<u32>,
    children: Vec<u32>,
    layout: Rect,
    computed_width: Option<f64>,
}

/// A [`RenderTarget`] that keeps the element tree in memory.
///
/// Layout is whatever the host says it is: call
/// [`set_layout`](Self::set_layout) to give an element a box. Unset boxes are
/// empty, which mirrors a browser element that has not been laid out yet.
#[derive(Debug, Default)]
pub struct HeadlessTarget {
    nodes: Vec<Option<Node>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl HeadlessTarget {
    /// Creates an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, el: ElementId) -> Result<&Node, RenderError> {
        let idx = el.idx as usize;
        match (self.generation.get(idx), self.nodes.get(idx)) {
            (Some(&generation), Some(Some(node))) if generation == el.generation => Ok(node),
            _ => Err(RenderError::StaleElement(el)),
        }
    }

    fn node_mut(&mut self, el: ElementId) -> Result<&mut Node, RenderError> {
        let idx = el.idx as usize;
        match (self.generation.get(idx), self.nodes.get_mut(idx)) {
            (Some(&generation), Some(Some(node))) if generation == el.generation => Ok(node),
            _ => Err(RenderError::StaleElement(el)),
        }
    }

    fn id_of(&self, idx: u32) -> ElementId {
        ElementId::new(idx, self.generation[idx as usize])
    }

    fn unlink(&mut self, el: ElementId) -> Result<Option<u32>, RenderError> {
        let parent = self.node_mut(el)?.parent.take();
        if let Some(p) = parent
            && let Some(Some(parent_node)) = self.nodes.get_mut(p as usize)
        {
            parent_node.children.retain(|&c| c != el.idx);
        }
        Ok(parent)
    }

    /// Sets the document-space box of `el`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    pub fn set_layout(&mut self, el: ElementId, layout: Rect) -> Result<(), RenderError> {
        self.node_mut(el)?.layout = layout;
        Ok(())
    }

    /// Overrides the computed style width of `el` (defaults to the layout
    /// width).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StaleElement`] for dead handles.
    pub fn set_computed_width(&mut self, el: ElementId, width: f64) -> Result<(), RenderError> {
        self.node_mut(el)?.computed_width = Some(width);
        Ok(())
    }

    /// Returns an inline style value, if set.
    #[must_use]
    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.node(el).ok()?.style.get(property).map(String::as_str)
    }

    /// Returns an attribute value, if set.
    #[must_use]
    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.node(el).ok()?.attributes.get(name).map(String::as_str)
    }

    /// Returns the text content of `el`, or `None` for dead handles.
    #[must_use]
    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.node(el).ok().map(|n| n.text.as_str())
    }

    /// Returns the tag name of `el`, or `None` for dead handles.
    #[must_use]
    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.node(el).ok().map(|n| n.tag.as_str())
    }

    /// Returns the children of `el` in order.
    #[must_use]
    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el)
            .map(|n| n.children.iter().map(|&c| self.id_of(c)).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the handle refers to a live element.
    #[must_use]
    pub fn contains(&self, el: ElementId) -> bool {
        self.node(el).is_ok()
    }

    /// Number of live elements.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }
}

impl RenderTarget for HeadlessTarget {
    fn create_element(&mut self, tag: &str, class_name: &str) -> Result<ElementId, RenderError> {
        let node = Node {
            tag: tag.to_string(),
            classes: class_name.split_whitespace().map(String::from).collect(),
            style: BTreeMap::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            layout: Rect::ZERO,
            computed_width: None,
        };
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.nodes[idx as usize] = Some(node);
            idx
        } else {
            let idx = u32::try_from(self.nodes.len())
                .map_err(|_| RenderError::Platform(String::from("element table full")))?;
            self.nodes.push(Some(node));
            self.generation.push(0);
            idx
        };
        Ok(self.id_of(idx))
    }

    fn destroy(&mut self, el: ElementId) -> Result<(), RenderError> {
        self.unlink(el)?;
        let children = core::mem::take(&mut self.node_mut(el)?.children);
        for c in children {
            if let Some(Some(child)) = self.nodes.get_mut(c as usize) {
                child.parent = None;
            }
        }
        self.nodes[el.idx as usize] = None;
        self.free_list.push(el.idx);
        Ok(())
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), RenderError> {
        self.node(parent)?;
        self.unlink(child)?;
        self.node_mut(child)?.parent = Some(parent.idx);
        self.node_mut(parent)?.children.push(child.idx);
        Ok(())
    }

    fn remove_from_parent(&mut self, el: ElementId) -> Result<(), RenderError> {
        match self.unlink(el)? {
            Some(_) => Ok(()),
            None => Err(RenderError::Detached(el)),
        }
    }

    fn parent(&self, el: ElementId) -> Result<Option<ElementId>, RenderError> {
        Ok(self.node(el)?.parent.map(|p| self.id_of(p)))
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<(), RenderError> {
        self.node_mut(el)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> Result<(), RenderError> {
        self.node_mut(el)?.text = text.to_string();
        Ok(())
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<(), RenderError> {
        self.node_mut(el)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> Result<(), RenderError> {
        let node = self.node_mut(el)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> Result<(), RenderError> {
        self.node_mut(el)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, el: ElementId, class: &str) -> Result<bool, RenderError> {
        Ok(self.node(el)?.classes.iter().any(|c| c == class))
    }

    fn bounding_box(&self, el: ElementId) -> Result<Rect, RenderError> {
        Ok(self.node(el)?.layout)
    }

    fn offset_width(&self, el: ElementId) -> Result<f64, RenderError> {
        Ok(self.node(el)?.layout.width().round())
    }

    fn computed_width(&self, el: ElementId) -> Result<f64, RenderError> {
        let node = self.node(el)?;
        Ok(node.computed_width.unwrap_or_else(|| node.layout.width()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_append_and_destroy() {
        let mut t = HeadlessTarget::new();
        let root = t.create_element("div", "root").unwrap();
        let child = t.create_element("span", "a b").unwrap();
        t.append_child(root, child).unwrap();

        assert_eq!(t.children(root), [child]);
        assert_eq!(t.parent(child), Ok(Some(root)));
        assert_eq!(t.has_class(child, "b"), Ok(true));

        t.destroy(child).unwrap();
        assert!(t.children(root).is_empty());
        assert_eq!(t.parent(child), Err(RenderError::StaleElement(child)));
    }

    #[test]
    fn recycled_slot_rejects_old_handle() {
        let mut t = HeadlessTarget::new();
        let a = t.create_element("div", "").unwrap();
        t.destroy(a).unwrap();
        let b = t.create_element("div", "").unwrap();
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(t.set_text(a, "x").is_err());
        assert!(t.set_text(b, "x").is_ok());
    }

    #[test]
    fn append_moves_between_parents() {
        let mut t = HeadlessTarget::new();
        let p1 = t.create_element("div", "").unwrap();
        let p2 = t.create_element("div", "").unwrap();
        let c = t.create_element("div", "").unwrap();
        t.append_child(p1, c).unwrap();
        t.append_child(p2, c).unwrap();
        assert!(t.children(p1).is_empty());
        assert_eq!(t.children(p2), [c]);
    }

    #[test]
    fn remove_from_parent_requires_parent() {
        let mut t = HeadlessTarget::new();
        let c = t.create_element("div", "").unwrap();
        assert_eq!(t.remove_from_parent(c), Err(RenderError::Detached(c)));
    }

    #[test]
    fn destroying_parent_orphans_children() {
        let mut t = HeadlessTarget::new();
        let p = t.create_element("div", "").unwrap();
        let c = t.create_element("div", "").unwrap();
        t.append_child(p, c).unwrap();
        t.destroy(p).unwrap();
        assert_eq!(t.parent(c), Ok(None));
        assert_eq!(t.live_count(), 1);
    }

    #[test]
    fn layout_and_widths() {
        let mut t = HeadlessTarget::new();
        let el = t.create_element("div", "").unwrap();
        assert_eq!(t.offset_width(el), Ok(0.0));

        t.set_layout(el, Rect::new(10.0, 0.0, 50.4, 8.0)).unwrap();
        assert_eq!(t.offset_width(el), Ok(40.0));
        assert!((t.computed_width(el).unwrap() - 40.4).abs() < 1e-9);

        t.set_computed_width(el, 41.5).unwrap();
        assert_eq!(t.computed_width(el), Ok(41.5));
    }

    #[test]
    fn classes_are_deduplicated() {
        let mut t = HeadlessTarget::new();
        let el = t.create_element("div", "x").unwrap();
        t.add_class(el, "x").unwrap();
        t.add_class(el, "y").unwrap();
        t.remove_class(el, "x").unwrap();
        assert_eq!(t.has_class(el, "x"), Ok(false));
        assert_eq!(t.has_class(el, "y"), Ok(true));
    }
}
