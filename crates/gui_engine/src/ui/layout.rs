//! Geometry setters and top-down relayout
//!
//! Every setter stores the new author-set value, re-derives the element and
//! its whole subtree from their own descriptions, then replays the pointer so
//! hover reflects the new geometry.

use log::trace;

use crate::foundation::math::{Mat4, Vec2};

use super::error::{UIError, UIResult};
use super::geometry::{Anchors, ParentFrame, Placement, PlacementMode};
use super::system::UISystem;
use super::ElementId;

impl UISystem {
    /// Move the pivot relative to the anchor point. Fixed placement only.
    pub fn set_position(&mut self, id: ElementId, position: Vec2) -> UIResult<()> {
        match &mut self.node_mut(id)?.geometry.placement {
            Placement::Fixed { position: current, .. } => *current = position,
            Placement::Stretch { .. } => return Err(mismatch("set_position", PlacementMode::Stretch)),
        }
        self.geometry_changed(id);
        Ok(())
    }

    /// Resize around the pivot. Fixed placement only.
    pub fn set_size(&mut self, id: ElementId, size: Vec2) -> UIResult<()> {
        match &mut self.node_mut(id)?.geometry.placement {
            Placement::Fixed { size: current, .. } => *current = size,
            Placement::Stretch { .. } => return Err(mismatch("set_size", PlacementMode::Stretch)),
        }
        self.geometry_changed(id);
        Ok(())
    }

    /// Set edge insets from the anchor points. Stretch placement only.
    pub fn set_offsets(&mut self, id: ElementId, min_offset: Vec2, max_offset: Vec2) -> UIResult<()> {
        match &mut self.node_mut(id)?.geometry.placement {
            Placement::Stretch { min_offset: min, max_offset: max } => {
                *min = min_offset;
                *max = max_offset;
            }
            Placement::Fixed { .. } => return Err(mismatch("set_offsets", PlacementMode::Fixed)),
        }
        self.geometry_changed(id);
        Ok(())
    }

    /// Change anchors. The element keeps its current rectangle; crossing
    /// between equal and distinct anchors switches the placement mode.
    pub fn set_anchors(&mut self, id: ElementId, min: Vec2, max: Vec2) -> UIResult<()> {
        let frame = self.parent_frame(id)?;
        let anchors = Anchors::new(min, max);
        let geometry = &mut self.node_mut(id)?.geometry;
        geometry.placement = geometry.reanchored(&frame, anchors);
        geometry.anchors = anchors;
        self.geometry_changed(id);
        Ok(())
    }

    /// Move the pivot inside the element without moving its rectangle
    pub fn set_pivot(&mut self, id: ElementId, pivot: Vec2) -> UIResult<()> {
        let frame = self.parent_frame(id)?;
        let geometry = &mut self.node_mut(id)?.geometry;
        geometry.placement = geometry.repivoted(&frame, pivot);
        geometry.pivot = pivot;
        self.geometry_changed(id);
        Ok(())
    }

    /// Scale about the pivot
    pub fn set_scale(&mut self, id: ElementId, scale: Vec2) -> UIResult<()> {
        self.node_mut(id)?.geometry.scale = scale;
        self.geometry_changed(id);
        Ok(())
    }

    /// Rotate about the pivot (radians). Corners stay axis aligned.
    pub fn set_rotation(&mut self, id: ElementId, angle: f32) -> UIResult<()> {
        self.node_mut(id)?.geometry.rotation = angle;
        self.geometry_changed(id);
        Ok(())
    }

    fn geometry_changed(&mut self, id: ElementId) {
        self.relayout_subtree(id);
        self.replay_pointer();
    }

    /// Frame `id` is laid out against
    fn parent_frame(&self, id: ElementId) -> UIResult<ParentFrame> {
        Ok(self.frame_and_world(self.node(id)?.parent).0)
    }

    fn frame_and_world(&self, parent: Option<ElementId>) -> (ParentFrame, Mat4, Mat4) {
        match parent.and_then(|p| self.elements.get(p)) {
            Some(parent) => (
                ParentFrame::element(parent.layout.size, parent.geometry.pivot),
                parent.local_to_world,
                parent.world_to_local,
            ),
            None => (ParentFrame::window(self.window_size), Mat4::identity(), Mat4::identity()),
        }
    }

    /// Re-derive `id` and every descendant, parents before children
    pub(crate) fn relayout_subtree(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(parent) = self.elements.get(current).map(|node| node.parent) else {
                continue;
            };
            let (frame, parent_to_world, world_to_parent) = self.frame_and_world(parent);

            let layouter = &*self.layouter;
            let Some(node) = self.elements.get_mut(current) else { continue };
            let layout = node.geometry.resolve(&frame);
            let (local_to_parent, parent_to_local) = node.geometry.matrices(&layout);

            node.layout = layout;
            node.local_to_parent = local_to_parent;
            node.parent_to_local = parent_to_local;
            node.local_to_world = parent_to_world * local_to_parent;
            node.world_to_local = parent_to_local * world_to_parent;
            node.widget.on_resize(layout.size, layouter);

            trace!("Laid out {:?}: size {:?} pivot at {:?}", current, layout.size, layout.parent_relative_pivot);
            stack.extend(node.lists.children.iter().copied());
        }
    }
}

fn mismatch(operation: &'static str, mode: PlacementMode) -> UIError {
    UIError::PlacementMismatch { operation, mode }
}
