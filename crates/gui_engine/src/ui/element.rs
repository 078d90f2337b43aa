//! UI tree nodes
//!
//! A [`UIElement`] stores its author-set geometry, the layout derived from it,
//! and the bookkeeping lists that input routing walks. Elements live in the
//! [`UISystem`](super::UISystem) arena and are only mutated through it, so the
//! derived state can never drift from the inputs.

use crate::foundation::math::{Mat4, Vec2};

use super::geometry::{Anchors, Geometry, Placement, PlacementMode, ResolvedLayout};
use super::widgets::Widget;
use super::ElementId;

/// Ordered child lists kept for every container (element or system root)
///
/// `active` is the order-preserving subsequence of `children` whose elements
/// are active; `non_passive` is the order-preserving subsequence of `active`
/// whose elements are not passive. `mouse_over` indexes `non_passive`.
#[derive(Debug, Clone, Default)]
pub struct ChildLists {
    pub(crate) children: Vec<ElementId>,
    pub(crate) active: Vec<ElementId>,
    pub(crate) non_passive: Vec<ElementId>,
    pub(crate) mouse_over: Option<usize>,
}

impl ChildLists {
    /// All children in insertion order
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Children taking part in layout and rendering
    pub fn active(&self) -> &[ElementId] {
        &self.active
    }

    /// Active children that can receive input
    pub fn non_passive(&self) -> &[ElementId] {
        &self.non_passive
    }

    /// Index into [`non_passive`](Self::non_passive) of the hovered child
    pub fn mouse_over_index(&self) -> Option<usize> {
        self.mouse_over
    }

    /// Hovered child, if any
    pub fn mouse_over(&self) -> Option<ElementId> {
        self.mouse_over.and_then(|index| self.non_passive.get(index).copied())
    }
}

/// Where an element's siblings live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    /// The system's top-level lists
    Root,
    /// Another element's child lists
    Element(ElementId),
}

impl From<Option<ElementId>> for Container {
    fn from(parent: Option<ElementId>) -> Self {
        parent.map_or(Self::Root, Self::Element)
    }
}

/// One node of the UI tree
#[derive(Debug)]
pub struct UIElement {
    pub(crate) geometry: Geometry,
    pub(crate) layout: ResolvedLayout,

    pub(crate) local_to_parent: Mat4,
    pub(crate) parent_to_local: Mat4,
    pub(crate) local_to_world: Mat4,
    pub(crate) world_to_local: Mat4,

    pub(crate) parent: Option<ElementId>,
    pub(crate) lists: ChildLists,

    pub(crate) active: bool,
    pub(crate) passive: bool,
    pub(crate) has_focus: bool,
    pub(crate) has_mouse_over: bool,

    pub(crate) widget: Widget,
}

impl UIElement {
    pub(crate) fn new(widget: Widget) -> Self {
        let geometry = Geometry::default();
        let size = match geometry.placement {
            Placement::Fixed { size, .. } => size,
            Placement::Stretch { .. } => Vec2::zeros(),
        };
        Self {
            layout: ResolvedLayout {
                size,
                parent_relative_pivot: Vec2::zeros(),
                min_corner: Vec2::zeros(),
                max_corner: Vec2::zeros(),
                position: Vec2::zeros(),
                min_offset: Vec2::zeros(),
                max_offset: Vec2::zeros(),
            },
            geometry,
            local_to_parent: Mat4::identity(),
            parent_to_local: Mat4::identity(),
            local_to_world: Mat4::identity(),
            world_to_local: Mat4::identity(),
            parent: None,
            lists: ChildLists::default(),
            active: true,
            passive: widget.is_intrinsically_passive(),
            has_focus: false,
            has_mouse_over: false,
            widget,
        }
    }

    /// Author-set placement
    pub fn placement(&self) -> Placement {
        self.geometry.placement
    }

    /// Current placement mode
    pub fn placement_mode(&self) -> PlacementMode {
        self.geometry.placement.mode()
    }

    /// Anchor points
    pub fn anchors(&self) -> Anchors {
        self.geometry.anchors
    }

    /// Pivot as a fraction of the size
    pub fn pivot(&self) -> Vec2 {
        self.geometry.pivot
    }

    /// Scale about the pivot
    pub fn scale(&self) -> Vec2 {
        self.geometry.scale
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.geometry.rotation
    }

    /// Unscaled size (derived in stretch mode)
    pub fn size(&self) -> Vec2 {
        self.layout.size
    }

    /// Pivot offset from the min anchor point (derived in stretch mode)
    pub fn position(&self) -> Vec2 {
        self.layout.position
    }

    /// Edge offsets from the anchor points (derived in fixed mode)
    pub fn offsets(&self) -> (Vec2, Vec2) {
        (self.layout.min_offset, self.layout.max_offset)
    }

    /// Pivot location in the parent's local space
    pub fn parent_relative_pivot(&self) -> Vec2 {
        self.layout.parent_relative_pivot
    }

    /// Scaled, unrotated top-left corner in parent space
    pub fn min_corner(&self) -> Vec2 {
        self.layout.min_corner
    }

    /// Scaled, unrotated bottom-right corner in parent space
    pub fn max_corner(&self) -> Vec2 {
        self.layout.max_corner
    }

    /// Local space to parent space
    pub fn local_to_parent(&self) -> &Mat4 {
        &self.local_to_parent
    }

    /// Parent space to local space
    pub fn parent_to_local(&self) -> &Mat4 {
        &self.parent_to_local
    }

    /// Local space to window pixels
    pub fn local_to_world(&self) -> &Mat4 {
        &self.local_to_world
    }

    /// Window pixels to local space
    pub fn world_to_local(&self) -> &Mat4 {
        &self.world_to_local
    }

    /// Parent element, `None` for roots
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child bookkeeping lists
    pub fn lists(&self) -> &ChildLists {
        &self.lists
    }

    /// All children in insertion order
    pub fn children(&self) -> &[ElementId] {
        &self.lists.children
    }

    /// Whether the element takes part in layout, rendering and input
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when neither this element nor any active descendant wants input
    pub fn is_passive(&self) -> bool {
        self.passive
    }

    /// Whether the element holds keyboard focus
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether the pointer is over this element
    pub fn has_mouse_over(&self) -> bool {
        self.has_mouse_over
    }

    /// Widget payload
    pub fn widget(&self) -> &Widget {
        &self.widget
    }
}
