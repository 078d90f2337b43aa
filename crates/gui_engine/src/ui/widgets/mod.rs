//! UI widgets module
//!
//! Every element carries one [`Widget`]. The variant decides what the element
//! draws, whether it wants input by itself, and whether it may have children.

pub mod button;
pub mod image;
pub mod text;

pub use button::{ButtonState, ResponseType, StateColors, StateSprites, UIButton};
pub use image::{NineSlice, UIImage};
pub use text::{
    Align, FixedAdvanceLayout, GeneratedText, LineSpan, TextLayoutParams, TextLayouter, TextStyle, UIText,
};

use crate::foundation::math::Vec2;
use crate::ui::backend::Material;
use crate::ui::rendering::Mesh;

/// Element payload
#[derive(Debug, Default)]
pub enum Widget {
    /// Invisible grouping node
    #[default]
    Container,
    /// Colored or textured rectangle
    Image(UIImage),
    /// Laid-out text
    Text(UIText),
    /// Interactive button
    Button(UIButton),
}

impl Widget {
    /// Short kind name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Image(_) => "image",
            Self::Text(_) => "text",
            Self::Button(_) => "button",
        }
    }

    /// True unless the widget wants input regardless of its children
    pub fn is_intrinsically_passive(&self) -> bool {
        !matches!(self, Self::Button(_))
    }

    /// Whether elements may be parented to this widget
    pub fn accepts_children(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// Material and mesh to draw, if the widget draws anything
    pub fn render_payload(&self) -> Option<(Material, &Mesh)> {
        match self {
            Self::Image(image) => Some((image.material(), image.mesh())),
            Self::Text(text) if !text.generated().mesh.is_empty() => {
                Some((text.material(), &text.generated().mesh))
            }
            _ => None,
        }
    }

    pub(crate) fn on_resize(&mut self, size: Vec2, layouter: &dyn TextLayouter) {
        match self {
            Self::Image(image) => image.resize(size),
            Self::Text(text) => text.resize(size, layouter),
            Self::Container | Self::Button(_) => {}
        }
    }

    /// Image payload
    pub fn as_image(&self) -> Option<&UIImage> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Text payload
    pub fn as_text(&self) -> Option<&UIText> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Button payload
    pub fn as_button(&self) -> Option<&UIButton> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }
}

impl From<UIImage> for Widget {
    fn from(image: UIImage) -> Self {
        Self::Image(image)
    }
}

impl From<UIText> for Widget {
    fn from(text: UIText) -> Self {
        Self::Text(text)
    }
}

impl From<UIButton> for Widget {
    fn from(button: UIButton) -> Self {
        Self::Button(button)
    }
}
