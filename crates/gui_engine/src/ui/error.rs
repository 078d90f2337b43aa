//! Errors returned by UI tree operations

use super::geometry::PlacementMode;
use super::ElementId;

/// UI operation errors
///
/// A failed operation never leaves the tree partially modified.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UIError {
    /// The id does not refer to a live element
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// The setter does not apply to the element's current placement mode
    #[error("{operation} is not available in {mode:?} placement")]
    PlacementMismatch {
        /// Setter that was called
        operation: &'static str,
        /// Mode the element is in
        mode: PlacementMode,
    },

    /// A child or root index is past the end of its list
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current list length
        len: usize,
    },

    /// Reparenting would make an element its own ancestor
    #[error("{child:?} cannot be parented to {parent:?}: would create a cycle")]
    CyclicParent {
        /// Element being moved
        child: ElementId,
        /// Requested parent
        parent: ElementId,
    },

    /// Reparenting to the container the element is already in
    #[error("{0:?} is already attached there")]
    AlreadyAttached(ElementId),

    /// The parent widget does not accept children
    #[error("{0:?} does not accept child elements")]
    ChildrenNotAllowed(ElementId),

    /// Operation targets a widget of a different kind
    #[error("{element:?} is not a {expected}")]
    WrongWidget {
        /// Element addressed
        element: ElementId,
        /// Widget kind the operation needs
        expected: &'static str,
    },

    /// Pregenerated text does not match the element's size
    #[error("text generated for {generated:?} does not fit element size {element:?}")]
    TextSizeMismatch {
        /// Size the text was generated for
        generated: (f32, f32),
        /// Current element size
        element: (f32, f32),
    },
}

/// Result alias for UI operations
pub type UIResult<T> = Result<T, UIError>;
