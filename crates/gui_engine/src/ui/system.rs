//! UI System
//!
//! Owns every element in a slot-map arena together with the top-level lists,
//! the window the roots are laid out against, and the pointer state. All tree
//! mutation goes through here so layout, eligibility and hover state are
//! brought up to date before a call returns.
//!
//! The implementation is split across files by concern:
//! - `system.rs`: construction, queries, structure, update and render
//! - `layout.rs`: geometry setters and top-down relayout
//! - `eligibility.rs`: active / non-passive list maintenance
//! - `input/`: pointer routing and input broadcast

use log::{debug, warn};
use slotmap::SlotMap;

use crate::core::config::{ButtonStyle, UIConfig};
use crate::events::{Event, EventArg, EventSystem, EventType};
use crate::foundation::math::{affine, Mat4, Vec2, Vec4};

use super::backend::{ElementTransform, Material, RenderError, UIRenderBackend};
use super::element::{ChildLists, Container, UIElement};
use super::error::{UIError, UIResult};
use super::input::MouseButtons;
use super::rendering::Mesh;
use super::widgets::{
    button::ButtonResponse, FixedAdvanceLayout, GeneratedText, ResponseType, TextLayouter, TextStyle, UIButton,
    UIImage, Widget,
};
use super::ElementId;

fn outline_color(hovered: bool) -> Vec4 {
    if hovered {
        Vec4::new(1.0, 0.0, 0.0, 1.0)
    } else {
        Vec4::new(0.5, 0.5, 0.5, 1.0)
    }
}

/// Root of the UI tree
pub struct UISystem {
    pub(crate) elements: SlotMap<ElementId, UIElement>,
    pub(crate) roots: ChildLists,
    pub(crate) window_size: Vec2,
    world_to_screen: Mat4,
    pub(crate) pointer: Option<Vec2>,
    pub(crate) held_buttons: MouseButtons,
    pub(crate) events: EventSystem,
    pub(crate) layouter: Box<dyn TextLayouter>,
    button_style: ButtonStyle,
    debug_wireframe: bool,
    time: f64,
}

impl UISystem {
    /// Create an empty UI for a window of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: SlotMap::with_key(),
            roots: ChildLists::default(),
            window_size: Vec2::new(width, height),
            world_to_screen: affine::world_to_screen(width, height),
            pointer: None,
            held_buttons: MouseButtons::empty(),
            events: EventSystem::new(),
            layouter: Box::new(FixedAdvanceLayout::default()),
            button_style: ButtonStyle::default(),
            debug_wireframe: false,
            time: 0.0,
        }
    }

    /// Create an empty UI from configuration
    pub fn from_config(config: &UIConfig) -> Self {
        let mut system = Self::new(config.window.width as f32, config.window.height as f32);
        system.button_style = config.button.clone();
        system.debug_wireframe = config.debug_wireframe;
        system
    }

    /// Use a different text layouter for text created afterwards (builder)
    pub fn with_layouter(mut self, layouter: impl TextLayouter + 'static) -> Self {
        self.layouter = Box::new(layouter);
        self
    }

    /// Window size in pixels
    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    /// Window pixels to clip space
    pub fn world_to_screen(&self) -> &Mat4 {
        &self.world_to_screen
    }

    /// Style applied to buttons made by [`create_button`](Self::create_button)
    pub fn button_style(&self) -> &ButtonStyle {
        &self.button_style
    }

    /// Toggle the outline overlay drawn by [`render`](Self::render)
    pub fn set_debug_wireframe(&mut self, enabled: bool) {
        self.debug_wireframe = enabled;
    }

    /// Seconds accumulated through [`update`](Self::update)
    pub fn time(&self) -> f64 {
        self.time
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Look up an element
    pub fn get(&self, id: ElementId) -> Option<&UIElement> {
        self.elements.get(id)
    }

    pub(crate) fn node(&self, id: ElementId) -> UIResult<&UIElement> {
        self.elements.get(id).ok_or(UIError::UnknownElement(id))
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> UIResult<&mut UIElement> {
        self.elements.get_mut(id).ok_or(UIError::UnknownElement(id))
    }

    /// True if `id` refers to a live element
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Total number of live elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the tree is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Top-level lists
    pub fn roots(&self) -> &ChildLists {
        &self.roots
    }

    /// Root element at `index`
    pub fn element(&self, index: usize) -> UIResult<ElementId> {
        let len = self.roots.children.len();
        self.roots.children.get(index).copied().ok_or(UIError::IndexOutOfRange { index, len })
    }

    /// Number of root elements
    pub fn element_count(&self) -> usize {
        self.roots.children.len()
    }

    /// Index of a root element
    pub fn element_index(&self, id: ElementId) -> Option<usize> {
        self.roots.children.iter().position(|root| *root == id)
    }

    /// Child of `parent` at `index`
    pub fn child(&self, parent: ElementId, index: usize) -> UIResult<ElementId> {
        let children = &self.node(parent)?.lists.children;
        children
            .get(index)
            .copied()
            .ok_or(UIError::IndexOutOfRange { index, len: children.len() })
    }

    /// Number of children of `parent`
    pub fn child_count(&self, parent: ElementId) -> UIResult<usize> {
        Ok(self.node(parent)?.lists.children.len())
    }

    /// Index of `child` among `parent`'s children
    pub fn child_index(&self, parent: ElementId, child: ElementId) -> UIResult<Option<usize>> {
        Ok(self.node(parent)?.lists.children.iter().position(|c| *c == child))
    }

    /// Parent of `id`, `None` for roots
    pub fn parent(&self, id: ElementId) -> UIResult<Option<ElementId>> {
        Ok(self.node(id)?.parent)
    }

    /// Root element currently under the pointer
    pub fn mouse_over_element(&self) -> Option<ElementId> {
        self.roots.mouse_over()
    }

    /// Hovered elements from the root down to the deepest one
    pub fn hovered_path(&self) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = self.roots.mouse_over();
        while let Some(id) = current {
            path.push(id);
            current = self.elements.get(id).and_then(|node| node.lists.mouse_over());
        }
        path
    }

    pub(crate) fn lists(&self, container: Container) -> Option<&ChildLists> {
        match container {
            Container::Root => Some(&self.roots),
            Container::Element(id) => self.elements.get(id).map(|node| &node.lists),
        }
    }

    pub(crate) fn lists_mut(&mut self, container: Container) -> Option<&mut ChildLists> {
        match container {
            Container::Root => Some(&mut self.roots),
            Container::Element(id) => self.elements.get_mut(id).map(|node| &mut node.lists),
        }
    }

    /// Depth-first pre-order walk following the list `pick` selects
    pub(crate) fn preorder(&self, pick: fn(&ChildLists) -> &[ElementId]) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack: Vec<ElementId> = pick(&self.roots).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.elements.get(id) {
                order.push(id);
                stack.extend(pick(&node.lists).iter().rev().copied());
            }
        }
        order
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// Event queue filled by input routing
    pub fn events(&self) -> &EventSystem {
        &self.events
    }

    /// Mutable event queue, for registering handlers
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    /// Deliver queued events to registered handlers
    pub fn dispatch_events(&mut self) -> usize {
        self.events.dispatch()
    }

    pub(crate) fn emit(&mut self, event_type: EventType, id: ElementId) {
        self.events.send(Event::for_element(event_type, self.time, id));
    }

    // ---------------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------------

    /// Create an element and attach it under `parent`, or as a root
    pub fn create_element(&mut self, widget: impl Into<Widget>, parent: Option<ElementId>) -> UIResult<ElementId> {
        if let Some(parent) = parent {
            self.check_accepts_children(parent)?;
        }
        let widget = widget.into();
        let kind = widget.kind();
        let id = self.elements.insert(UIElement::new(widget));
        debug!("Created {} element {:?} under {:?}", kind, id, parent);

        self.attach(id, parent);
        self.replay_pointer();
        Ok(id)
    }

    /// Create a button with a full-size image child that shows its state
    pub fn create_button(&mut self, parent: Option<ElementId>) -> UIResult<ElementId> {
        let button = UIButton::from_style(&self.button_style);
        let color = button.color();
        let id = self.create_element(button, parent)?;

        let image = self.create_element(UIImage::new().with_color(color), Some(id))?;
        self.set_anchors(image, Vec2::zeros(), Vec2::new(1.0, 1.0))?;
        self.set_offsets(image, Vec2::zeros(), Vec2::zeros())?;
        self.set_button_target(id, Some(image))?;
        Ok(id)
    }

    /// Make `id` a root element, detaching it from its parent
    pub fn add_element(&mut self, id: ElementId) -> UIResult<()> {
        self.set_parent(id, None)
    }

    /// Move `id` under `parent` (or to the roots), keeping its subtree
    pub fn set_parent(&mut self, id: ElementId, parent: Option<ElementId>) -> UIResult<()> {
        let current = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node(parent)?;
            if self.is_ancestor_or_self(id, parent) {
                warn!("Rejected parenting {:?} under its own descendant {:?}", id, parent);
                return Err(UIError::CyclicParent { child: id, parent });
            }
        }
        if current == parent {
            return Err(UIError::AlreadyAttached(id));
        }
        if let Some(parent) = parent {
            self.check_accepts_children(parent)?;
        }

        debug!("Reparenting {:?} from {:?} to {:?}", id, current, parent);
        self.detach(id);
        self.attach(id, parent);
        self.replay_pointer();
        Ok(())
    }

    /// Remove and destroy the child of `parent` at `index`
    pub fn remove_child(&mut self, parent: ElementId, index: usize) -> UIResult<()> {
        let child = self.child(parent, index)?;
        self.destroy(child)
    }

    /// Remove and destroy the root element at `index`
    pub fn remove_element(&mut self, index: usize) -> UIResult<()> {
        let root = self.element(index)?;
        self.destroy(root)
    }

    /// Detach `id` and destroy it with its whole subtree
    pub fn destroy(&mut self, id: ElementId) -> UIResult<()> {
        self.node(id)?;
        self.detach(id);

        let mut doomed = vec![id];
        let mut count = 0usize;
        while let Some(current) = doomed.pop() {
            if let Some(node) = self.elements.remove(current) {
                doomed.extend(node.lists.children);
                count += 1;
            }
        }
        debug!("Destroyed {:?} ({} elements)", id, count);

        self.replay_pointer();
        Ok(())
    }

    /// Reorder `parent`'s children, moving the one at `from` to `to`
    /// (clamped to the last index)
    pub fn move_child(&mut self, parent: ElementId, from: usize, to: usize) -> UIResult<()> {
        self.node(parent)?;
        self.reorder(Container::Element(parent), from, to)
    }

    /// Reorder the root elements, moving the one at `from` to `to`
    pub fn move_element(&mut self, from: usize, to: usize) -> UIResult<()> {
        self.reorder(Container::Root, from, to)
    }

    fn reorder(&mut self, container: Container, from: usize, to: usize) -> UIResult<()> {
        let Some(lists) = self.lists_mut(container) else {
            return Ok(());
        };
        let len = lists.children.len();
        if from >= len {
            return Err(UIError::IndexOutOfRange { index: from, len });
        }
        let to = to.min(len - 1);
        let moved = lists.children.remove(from);
        lists.children.insert(to, moved);

        self.refresh_lists(container);
        self.replay_pointer();
        Ok(())
    }

    fn check_accepts_children(&self, parent: ElementId) -> UIResult<()> {
        if self.node(parent)?.widget.accepts_children() {
            Ok(())
        } else {
            Err(UIError::ChildrenNotAllowed(parent))
        }
    }

    /// True if `ancestor` is `id` or lies on `id`'s parent chain
    fn is_ancestor_or_self(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.elements.get(node_id).and_then(|node| node.parent);
        }
        false
    }

    fn attach(&mut self, id: ElementId, parent: Option<ElementId>) {
        let container = Container::from(parent);
        if let Some(node) = self.elements.get_mut(id) {
            node.parent = parent;
        }
        if let Some(lists) = self.lists_mut(container) {
            lists.children.push(id);
        }
        self.relayout_subtree(id);
        self.propagate_eligibility(container);
    }

    /// Remove `id` from its container. Hover leaving the subtree is reported
    /// before the container's eligibility changes.
    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.elements.get(id).map(|node| node.parent) else {
            return;
        };
        let container = Container::from(parent);
        if let Some(lists) = self.lists_mut(container) {
            lists.children.retain(|child| *child != id);
        }
        self.propagate_eligibility(container);
        if let Some(node) = self.elements.get_mut(id) {
            node.parent = None;
        }
    }

    // ---------------------------------------------------------------------
    // Window, frame update and render
    // ---------------------------------------------------------------------

    /// Resize the window; every root is laid out again
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        debug!("Window resized to {}x{}", width, height);
        self.window_size = Vec2::new(width, height);
        self.world_to_screen = affine::world_to_screen(width, height);

        for root in self.roots.children.clone() {
            self.relayout_subtree(root);
        }
        self.events.send(
            Event::new(EventType::WindowResized, self.time).with_arg("size", EventArg::Size(width, height)),
        );
        self.replay_pointer();
    }

    /// Advance time-based widget state such as button fades
    pub fn update(&mut self, delta_time: f32) {
        self.time += f64::from(delta_time);
        self.events.update_time(self.time);

        let buttons: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, node)| matches!(node.widget, Widget::Button(_)))
            .map(|(id, _)| id)
            .collect();
        for id in buttons {
            if let Some(Widget::Button(button)) = self.elements.get_mut(id).map(|node| &mut node.widget) {
                let response = button.update(delta_time);
                self.apply_button_response(id, response);
            }
        }
    }

    /// Draw every active element in tree order, then the debug overlay
    pub fn render(&self, backend: &mut dyn UIRenderBackend) -> Result<(), RenderError> {
        let order = self.preorder(ChildLists::active);

        for &id in &order {
            let Some(node) = self.elements.get(id) else { continue };
            if let Some((material, mesh)) = node.widget.render_payload() {
                backend.set_transform(&self.element_transform(node))?;
                backend.set_material(&material)?;
                backend.draw(mesh)?;
            }
        }

        if self.debug_wireframe {
            for &id in &order {
                let Some(node) = self.elements.get(id) else { continue };
                backend.set_transform(&self.element_transform(node))?;
                backend.set_material(&Material::solid(outline_color(node.has_mouse_over)))?;
                backend.draw(&Mesh::outline(node.layout.size.x, node.layout.size.y))?;
            }
        }
        Ok(())
    }

    fn element_transform(&self, node: &UIElement) -> ElementTransform {
        ElementTransform {
            local_to_world: node.local_to_world,
            world_to_screen: self.world_to_screen,
            pivot: node.geometry.pivot,
            size: node.layout.size,
        }
    }

    // ---------------------------------------------------------------------
    // Widget access
    // ---------------------------------------------------------------------

    /// Mutable image payload
    pub fn image_mut(&mut self, id: ElementId) -> UIResult<&mut UIImage> {
        match &mut self.node_mut(id)?.widget {
            Widget::Image(image) => Ok(image),
            _ => Err(UIError::WrongWidget { element: id, expected: "image" }),
        }
    }

    /// Mutable button payload
    pub fn button_mut(&mut self, id: ElementId) -> UIResult<&mut UIButton> {
        match &mut self.node_mut(id)?.widget {
            Widget::Button(button) => Ok(button),
            _ => Err(UIError::WrongWidget { element: id, expected: "button" }),
        }
    }

    /// Replace a text element's string
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> UIResult<()> {
        let layouter = &*self.layouter;
        match self.elements.get_mut(id).map(|node| &mut node.widget) {
            Some(Widget::Text(widget)) => {
                widget.set_text(text, layouter);
                Ok(())
            }
            Some(_) => Err(UIError::WrongWidget { element: id, expected: "text" }),
            None => Err(UIError::UnknownElement(id)),
        }
    }

    /// Replace a text element's style
    pub fn set_text_style(&mut self, id: ElementId, style: TextStyle) -> UIResult<()> {
        let layouter = &*self.layouter;
        match self.elements.get_mut(id).map(|node| &mut node.widget) {
            Some(Widget::Text(widget)) => {
                widget.set_style(style, layouter);
                Ok(())
            }
            Some(_) => Err(UIError::WrongWidget { element: id, expected: "text" }),
            None => Err(UIError::UnknownElement(id)),
        }
    }

    /// Install glyphs generated elsewhere on a text element
    pub fn set_generated_text(&mut self, id: ElementId, generated: GeneratedText, owned: bool) -> UIResult<()> {
        match &mut self.node_mut(id)?.widget {
            Widget::Text(widget) => widget.set_generated(generated, owned),
            _ => Err(UIError::WrongWidget { element: id, expected: "text" }),
        }
    }

    /// Enable or disable a button
    pub fn set_button_interactable(&mut self, id: ElementId, interactable: bool) -> UIResult<()> {
        let response = self.button_mut(id)?.set_interactable(interactable);
        self.apply_button_response(id, response);
        Ok(())
    }

    /// Choose the image element a button drives
    pub fn set_button_target(&mut self, id: ElementId, target: Option<ElementId>) -> UIResult<()> {
        if let Some(target) = target {
            if !matches!(self.node(target)?.widget, Widget::Image(_)) {
                return Err(UIError::WrongWidget { element: target, expected: "image" });
            }
        }
        self.button_mut(id)?.set_target(target);
        self.apply_button_visuals(id);
        Ok(())
    }

    pub(crate) fn apply_button_response(&mut self, id: ElementId, response: ButtonResponse) {
        if let Some(focus) = response.focus {
            if let Some(node) = self.elements.get_mut(id) {
                if node.has_focus != focus {
                    node.has_focus = focus;
                    self.events.send(
                        Event::for_element(EventType::FocusChanged, self.time, id)
                            .with_arg("focused", EventArg::Flag(focus)),
                    );
                }
            }
        }
        if let Some((from, to)) = response.changed {
            self.events.send(
                Event::for_element(EventType::ButtonStateChanged, self.time, id)
                    .with_arg("from", EventArg::State(from))
                    .with_arg("to", EventArg::State(to)),
            );
        }
        if response.repaint {
            self.apply_button_visuals(id);
        }
        if response.clicked {
            debug!("Button {:?} clicked", id);
            if let Some(Widget::Button(button)) = self.elements.get_mut(id).map(|node| &mut node.widget) {
                button.clicked.fire(&id);
            }
            self.emit(EventType::ButtonClicked, id);
        }
    }

    fn apply_button_visuals(&mut self, id: ElementId) {
        let Some(Widget::Button(button)) = self.elements.get(id).map(|node| &node.widget) else {
            return;
        };
        let (target, response, color, sprite) = (button.target(), button.response, button.color(), button.sprite());
        let Some(target) = target else { return };

        if let Some(Widget::Image(image)) = self.elements.get_mut(target).map(|node| &mut node.widget) {
            match response {
                ResponseType::ColorSwap => image.color = color,
                ResponseType::SpriteSwap => {
                    let filtering = image.filtering();
                    image.set_texture(sprite, filtering);
                }
            }
        }
    }
}

impl std::fmt::Debug for UISystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UISystem")
            .field("elements", &self.elements.len())
            .field("roots", &self.roots.children.len())
            .field("window_size", &self.window_size)
            .field("pointer", &self.pointer)
            .field("held_buttons", &self.held_buttons)
            .finish_non_exhaustive()
    }
}
