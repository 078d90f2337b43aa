//! Element layout math
//!
//! Pure functions turning an element's author-set [`Geometry`] into its
//! derived rectangle inside a [`ParentFrame`]. Nothing here touches the tree;
//! the system feeds each element the frame of its parent (or the window).
//!
//! Coordinates are Y-down pixels. An element's local origin is its pivot,
//! so its unscaled local rectangle is `[-pivot * size, (1 - pivot) * size]`.

use crate::foundation::math::{affine, Mat4, Vec2};

/// Which author-set fields define an element's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Anchors coincide; position and size are explicit
    Fixed,
    /// Anchors differ; edges are offsets from the two anchor points
    Stretch,
}

/// Author-set rectangle description, one variant per placement mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Pivot offset from the anchor point plus an explicit size
    Fixed {
        /// Pivot position relative to the anchor point
        position: Vec2,
        /// Unscaled size
        size: Vec2,
    },
    /// Insets from the min and max anchor points
    Stretch {
        /// Offset of the top-left edge from the min anchor point
        min_offset: Vec2,
        /// Offset of the bottom-right edge from the max anchor point
        max_offset: Vec2,
    },
}

impl Placement {
    /// Mode of this placement
    pub fn mode(&self) -> PlacementMode {
        match self {
            Self::Fixed { .. } => PlacementMode::Fixed,
            Self::Stretch { .. } => PlacementMode::Stretch,
        }
    }
}

/// Fractional anchor points inside the parent frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    /// Top-left anchor
    pub min: Vec2,
    /// Bottom-right anchor
    pub max: Vec2,
}

impl Anchors {
    /// Create anchors from two points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Both anchors on the same point
    pub fn point(at: Vec2) -> Self {
        Self { min: at, max: at }
    }

    /// Anchors spanning the whole parent
    pub fn fill() -> Self {
        Self::new(Vec2::zeros(), Vec2::new(1.0, 1.0))
    }

    /// Placement mode these anchors select
    pub fn mode(&self) -> PlacementMode {
        if self.min == self.max {
            PlacementMode::Fixed
        } else {
            PlacementMode::Stretch
        }
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::point(Vec2::new(0.5, 0.5))
    }
}

/// The rectangle a child is laid out against, in the parent's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentFrame {
    /// Top-left corner of the frame
    pub origin: Vec2,
    /// Frame size
    pub size: Vec2,
}

impl ParentFrame {
    /// Frame for root elements: window pixels, origin top-left
    pub fn window(size: Vec2) -> Self {
        Self { origin: Vec2::zeros(), size }
    }

    /// Frame for children of an element with the given size and pivot
    pub fn element(size: Vec2, pivot: Vec2) -> Self {
        Self { origin: -pivot.component_mul(&size), size }
    }

    /// Point at fractional coordinates `anchor` inside the frame
    pub fn anchor_point(&self, anchor: Vec2) -> Vec2 {
        self.origin + self.size.component_mul(&anchor)
    }
}

/// Everything derived from [`Geometry`] for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLayout {
    /// Unscaled size
    pub size: Vec2,
    /// Pivot location in parent space
    pub parent_relative_pivot: Vec2,
    /// Scaled, unrotated top-left corner in parent space
    pub min_corner: Vec2,
    /// Scaled, unrotated bottom-right corner in parent space
    pub max_corner: Vec2,
    /// Pivot offset from the min anchor point
    pub position: Vec2,
    /// Unscaled top-left edge relative to the min anchor point
    pub min_offset: Vec2,
    /// Unscaled bottom-right edge relative to the max anchor point
    pub max_offset: Vec2,
}

/// Author-set geometry of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Rectangle description; its mode always matches `anchors.mode()`
    pub placement: Placement,
    /// Anchor points in the parent
    pub anchors: Anchors,
    /// Fractional rotation and scale origin inside the element
    pub pivot: Vec2,
    /// Scale about the pivot
    pub scale: Vec2,
    /// Rotation about the pivot in radians
    pub rotation: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            placement: Placement::Fixed {
                position: Vec2::zeros(),
                size: Vec2::new(10.0, 10.0),
            },
            anchors: Anchors::default(),
            pivot: Vec2::new(0.5, 0.5),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Geometry {
    /// Derive size, pivot location and corners inside `frame`
    pub fn resolve(&self, frame: &ParentFrame) -> ResolvedLayout {
        let min_anchor = frame.anchor_point(self.anchors.min);
        let max_anchor = frame.anchor_point(self.anchors.max);

        let (size, pivot_at) = match self.placement {
            Placement::Fixed { position, size } => (size, min_anchor + position),
            Placement::Stretch { min_offset, max_offset } => {
                let low = min_anchor + min_offset;
                let size = (max_anchor + max_offset) - low;
                (size, low + size.component_mul(&self.pivot))
            }
        };

        let rest = Vec2::new(1.0, 1.0) - self.pivot;
        let extent = size.component_mul(&self.scale);
        let rect_min = pivot_at - self.pivot.component_mul(&size);

        ResolvedLayout {
            size,
            parent_relative_pivot: pivot_at,
            min_corner: pivot_at - self.pivot.component_mul(&extent),
            max_corner: pivot_at + rest.component_mul(&extent),
            position: pivot_at - min_anchor,
            min_offset: rect_min - min_anchor,
            max_offset: rect_min + size - max_anchor,
        }
    }

    /// Placement that keeps the current unscaled rectangle when the anchors
    /// change to `anchors`. The result's mode matches `anchors.mode()`.
    pub fn reanchored(&self, frame: &ParentFrame, anchors: Anchors) -> Placement {
        let layout = self.resolve(frame);
        let rect_min = layout.parent_relative_pivot - self.pivot.component_mul(&layout.size);

        match anchors.mode() {
            PlacementMode::Fixed => Placement::Fixed {
                position: layout.parent_relative_pivot - frame.anchor_point(anchors.min),
                size: layout.size,
            },
            PlacementMode::Stretch => Placement::Stretch {
                min_offset: rect_min - frame.anchor_point(anchors.min),
                max_offset: rect_min + layout.size - frame.anchor_point(anchors.max),
            },
        }
    }

    /// Placement that keeps the current unscaled rectangle when the pivot
    /// moves to `pivot`. Stretch placements are pivot independent.
    pub fn repivoted(&self, frame: &ParentFrame, pivot: Vec2) -> Placement {
        match self.placement {
            Placement::Fixed { size, .. } => {
                let layout = self.resolve(frame);
                let rect_min = layout.parent_relative_pivot - self.pivot.component_mul(&size);
                Placement::Fixed {
                    position: rect_min + pivot.component_mul(&size) - frame.anchor_point(self.anchors.min),
                    size,
                }
            }
            stretch @ Placement::Stretch { .. } => stretch,
        }
    }

    /// Local-to-parent and parent-to-local matrices for a resolved layout
    pub fn matrices(&self, layout: &ResolvedLayout) -> (Mat4, Mat4) {
        let origin = layout.parent_relative_pivot;
        (
            affine::compose(origin, self.rotation, self.scale),
            affine::compose_inverse(origin, self.rotation, self.scale),
        )
    }

    /// True if `local` lies inside the unscaled local rectangle
    pub fn contains_local(&self, size: Vec2, local: Vec2) -> bool {
        let low = -self.pivot.component_mul(&size);
        let high = (Vec2::new(1.0, 1.0) - self.pivot).component_mul(&size);
        local.x >= low.x && local.x <= high.x && local.y >= low.y && local.y <= high.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec(actual: Vec2, expected: Vec2) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-4);
    }

    #[test]
    fn test_fixed_root_layout() {
        let geometry = Geometry {
            placement: Placement::Fixed { position: Vec2::new(10.0, 20.0), size: Vec2::new(30.0, 40.0) },
            ..Default::default()
        };
        let layout = geometry.resolve(&ParentFrame::window(Vec2::new(800.0, 600.0)));

        assert_vec(layout.parent_relative_pivot, Vec2::new(410.0, 320.0));
        assert_vec(layout.min_corner, Vec2::new(395.0, 300.0));
        assert_vec(layout.max_corner, Vec2::new(425.0, 340.0));
        assert_vec(layout.min_offset, Vec2::new(-5.0, 0.0));
        assert_vec(layout.max_offset, Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_child_frame_is_centered_on_parent_pivot() {
        let frame = ParentFrame::element(Vec2::new(100.0, 50.0), Vec2::new(0.5, 0.5));
        assert_vec(frame.anchor_point(Vec2::zeros()), Vec2::new(-50.0, -25.0));
        assert_vec(frame.anchor_point(Vec2::new(1.0, 1.0)), Vec2::new(50.0, 25.0));

        let geometry = Geometry {
            placement: Placement::Fixed { position: Vec2::new(5.0, 5.0), size: Vec2::new(10.0, 10.0) },
            anchors: Anchors::point(Vec2::zeros()),
            ..Default::default()
        };
        let layout = geometry.resolve(&frame);
        assert_vec(layout.parent_relative_pivot, Vec2::new(-45.0, -20.0));
    }

    #[test]
    fn test_stretch_tracks_frame_size() {
        let geometry = Geometry {
            placement: Placement::Stretch {
                min_offset: Vec2::new(10.0, 10.0),
                max_offset: Vec2::new(-10.0, -10.0),
            },
            anchors: Anchors::fill(),
            ..Default::default()
        };

        let large = geometry.resolve(&ParentFrame::window(Vec2::new(800.0, 600.0)));
        assert_vec(large.size, Vec2::new(780.0, 580.0));

        let small = geometry.resolve(&ParentFrame::window(Vec2::new(400.0, 300.0)));
        assert_vec(small.size, Vec2::new(380.0, 280.0));
        assert_vec(small.parent_relative_pivot, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_anchor_round_trip_restores_rectangle() {
        let frame = ParentFrame::element(Vec2::new(200.0, 120.0), Vec2::new(0.25, 0.75));
        let mut geometry = Geometry {
            placement: Placement::Fixed { position: Vec2::new(10.0, 20.0), size: Vec2::new(30.0, 40.0) },
            ..Default::default()
        };
        let original = geometry.resolve(&frame);

        let stretched = Anchors::fill();
        geometry.placement = geometry.reanchored(&frame, stretched);
        geometry.anchors = stretched;
        assert_eq!(geometry.placement.mode(), PlacementMode::Stretch);
        let mid = geometry.resolve(&frame);
        assert_vec(mid.min_corner, original.min_corner);
        assert_vec(mid.max_corner, original.max_corner);

        let fixed = Anchors::default();
        geometry.placement = geometry.reanchored(&frame, fixed);
        geometry.anchors = fixed;
        let back = geometry.resolve(&frame);

        match geometry.placement {
            Placement::Fixed { position, size } => {
                assert_vec(position, Vec2::new(10.0, 20.0));
                assert_vec(size, Vec2::new(30.0, 40.0));
            }
            Placement::Stretch { .. } => panic!("expected fixed placement"),
        }
        assert_vec(back.parent_relative_pivot, original.parent_relative_pivot);
        assert_vec(back.min_corner, original.min_corner);
        assert_vec(back.max_corner, original.max_corner);
    }

    #[test]
    fn test_repivot_keeps_rectangle() {
        let frame = ParentFrame::window(Vec2::new(800.0, 600.0));
        let mut geometry = Geometry::default();
        let before = geometry.resolve(&frame);

        let pivot = Vec2::new(0.0, 1.0);
        geometry.placement = geometry.repivoted(&frame, pivot);
        geometry.pivot = pivot;
        let after = geometry.resolve(&frame);

        assert_vec(after.size, before.size);
        assert_vec(after.min_corner, before.min_corner);
        assert_vec(after.max_corner, before.max_corner);
        assert_vec(after.parent_relative_pivot, Vec2::new(395.0, 305.0));
    }

    #[test]
    fn test_scale_grows_around_pivot() {
        let frame = ParentFrame::window(Vec2::new(100.0, 100.0));
        let geometry = Geometry { scale: Vec2::new(2.0, 3.0), ..Default::default() };
        let layout = geometry.resolve(&frame);

        assert_vec(layout.parent_relative_pivot, Vec2::new(50.0, 50.0));
        assert_vec(layout.min_corner, Vec2::new(40.0, 35.0));
        assert_vec(layout.max_corner, Vec2::new(60.0, 65.0));
        assert_vec(layout.size, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_rotated_hit_uses_inverse_transform() {
        let frame = ParentFrame::window(Vec2::new(100.0, 100.0));
        let geometry = Geometry {
            placement: Placement::Fixed { position: Vec2::zeros(), size: Vec2::new(40.0, 4.0) },
            rotation: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        let layout = geometry.resolve(&frame);
        let (_, to_local) = geometry.matrices(&layout);

        // A thin horizontal bar rotated a quarter turn becomes vertical.
        let above = affine::transform_point(&to_local, Vec2::new(50.0, 35.0));
        let beside = affine::transform_point(&to_local, Vec2::new(65.0, 50.0));
        assert!(geometry.contains_local(layout.size, above));
        assert!(!geometry.contains_local(layout.size, beside));
    }
}
