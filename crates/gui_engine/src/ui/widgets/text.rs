//! Text widget
//!
//! Glyph layout is delegated to a [`TextLayouter`]; the widget only keeps the
//! generated mesh in sync with its size and content. [`FixedAdvanceLayout`]
//! is a monospace layouter for bitmap fonts laid out as a 16x16 ASCII grid.

use crate::foundation::math::{Vec2, Vec4};
use crate::ui::backend::{Filtering, Material, TextureHandle};
use crate::ui::error::{UIError, UIResult};
use crate::ui::rendering::{Mesh, Topology, UIVertex};

/// Alignment along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Left or top
    Start,
    /// Centered
    #[default]
    Center,
    /// Right or bottom
    End,
}

impl Align {
    /// Offset that aligns `content` inside `available`
    pub fn offset(self, available: f32, content: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => (available - content) * 0.5,
            Self::End => available - content,
        }
    }
}

/// Visual text settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Distance between baselines in pixels
    pub line_height: f32,
    /// Horizontal alignment of each line
    pub horizontal: Align,
    /// Vertical alignment of the block
    pub vertical: Align,
    /// Text color
    pub color: Vec4,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            line_height: 16.0,
            horizontal: Align::Center,
            vertical: Align::Center,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Input to a [`TextLayouter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayoutParams {
    /// Box width in pixels
    pub width: f32,
    /// Box height in pixels
    pub height: f32,
    /// Line height in pixels
    pub line_height: f32,
    /// Horizontal alignment
    pub horizontal: Align,
    /// Vertical alignment
    pub vertical: Align,
}

/// Range of glyphs `[first, last]` forming one laid-out line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// First glyph index
    pub first: usize,
    /// Last glyph index (inclusive)
    pub last: usize,
}

/// Glyph quads produced for a string and box size
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedText {
    /// One quad (4 vertices, 6 indices) per visible glyph
    pub mesh: Mesh,
    /// Glyph ranges per line; index range of line `l` is `first * 6 .. (last + 1) * 6`
    pub lines: Vec<LineSpan>,
    /// Box width the text was generated for
    pub width: f32,
    /// Box height the text was generated for
    pub height: f32,
}

impl GeneratedText {
    /// Number of glyph quads
    pub fn glyph_count(&self) -> usize {
        self.mesh.vertices.len() / 4
    }
}

/// Turns a string into glyph quads
pub trait TextLayouter {
    /// Lay out `text` inside the box described by `params`
    fn layout(&self, text: &str, params: &TextLayoutParams) -> GeneratedText;

    /// Glyph atlas texture sampled by the generated UVs
    fn atlas(&self) -> Option<TextureHandle> {
        None
    }
}

/// Monospace layouter with fixed glyph advance, wrapping at the box width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceLayout {
    /// Horizontal advance per glyph as a fraction of the line height
    pub advance_ratio: f32,
    /// Glyph atlas, 16x16 cells indexed by code point
    pub atlas: Option<TextureHandle>,
}

impl Default for FixedAdvanceLayout {
    fn default() -> Self {
        Self { advance_ratio: 0.5, atlas: None }
    }
}

impl FixedAdvanceLayout {
    fn cell_uv(c: char) -> ([f32; 2], [f32; 2]) {
        let code = u32::from(c).min(255);
        let (col, row) = ((code % 16) as f32, (code / 16) as f32);
        let cell = 1.0 / 16.0;
        ([col * cell, row * cell], [(col + 1.0) * cell, (row + 1.0) * cell])
    }

    /// Break `text` into lines of at most `per_line` glyphs
    fn break_lines(text: &str, per_line: usize) -> Vec<Vec<char>> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let glyphs: Vec<char> = paragraph.chars().filter(|c| !c.is_control()).collect();
            if glyphs.is_empty() {
                lines.push(Vec::new());
                continue;
            }
            lines.extend(glyphs.chunks(per_line.max(1)).map(<[char]>::to_vec));
        }
        lines
    }
}

impl TextLayouter for FixedAdvanceLayout {
    fn layout(&self, text: &str, params: &TextLayoutParams) -> GeneratedText {
        let mut generated = GeneratedText {
            mesh: Mesh::new(),
            lines: Vec::new(),
            width: params.width,
            height: params.height,
        };
        if text.is_empty() || params.line_height <= 0.0 {
            return generated;
        }

        let advance = params.line_height * self.advance_ratio;
        let per_line = if advance > 0.0 {
            ((params.width / advance).floor() as usize).max(1)
        } else {
            usize::MAX
        };
        let lines = Self::break_lines(text, per_line);

        let block_height = lines.len() as f32 * params.line_height;
        let top = params.vertical.offset(params.height, block_height);

        let mut glyph = 0usize;
        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_width = line.len() as f32 * advance;
            let left = params.horizontal.offset(params.width, line_width);
            let y = top + row as f32 * params.line_height;
            let first = glyph;

            for (column, &c) in line.iter().enumerate() {
                let x = left + column as f32 * advance;
                let (uv_min, uv_max) = Self::cell_uv(c);
                let base = u32::try_from(glyph * 4).unwrap_or(u32::MAX);
                let mesh = &mut generated.mesh;
                mesh.vertices.extend_from_slice(&[
                    UIVertex::new([x, y], uv_min),
                    UIVertex::new([x + advance, y], [uv_max[0], uv_min[1]]),
                    UIVertex::new([x, y + params.line_height], [uv_min[0], uv_max[1]]),
                    UIVertex::new([x + advance, y + params.line_height], uv_max),
                ]);
                mesh.indices.extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
                glyph += 1;
            }
            generated.lines.push(LineSpan { first, last: glyph - 1 });
        }
        generated.mesh.topology = Topology::TriangleList;
        generated
    }

    fn atlas(&self) -> Option<TextureHandle> {
        self.atlas
    }
}

/// Block of text laid out inside the element rectangle
#[derive(Debug, Clone)]
pub struct UIText {
    text: String,
    style: TextStyle,
    /// Rebuild glyphs whenever the element is resized
    pub regenerate_on_resize: bool,
    owns_generated: bool,
    size: Vec2,
    generated: GeneratedText,
    atlas: Option<TextureHandle>,
}

impl Default for UIText {
    fn default() -> Self {
        Self::new("")
    }
}

impl UIText {
    /// Text widget with default style; glyphs are generated once attached
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            regenerate_on_resize: true,
            owns_generated: true,
            size: Vec2::zeros(),
            generated: GeneratedText::default(),
            atlas: None,
        }
    }

    /// Set style (builder)
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Current string
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current style
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Generated glyphs
    pub fn generated(&self) -> &GeneratedText {
        &self.generated
    }

    /// Replace the string and rebuild glyphs
    pub fn set_text(&mut self, text: impl Into<String>, layouter: &dyn TextLayouter) {
        self.text = text.into();
        self.generate(layouter);
    }

    /// Replace the style and rebuild glyphs
    pub fn set_style(&mut self, style: TextStyle, layouter: &dyn TextLayouter) {
        self.style = style;
        self.generate(layouter);
    }

    /// Use glyphs generated elsewhere. They must have been generated for the
    /// element's current size. When `owned` is false, resizes leave them alone.
    pub fn set_generated(&mut self, generated: GeneratedText, owned: bool) -> UIResult<()> {
        if generated.width != self.size.x || generated.height != self.size.y {
            return Err(UIError::TextSizeMismatch {
                generated: (generated.width, generated.height),
                element: (self.size.x, self.size.y),
            });
        }
        self.generated = generated;
        self.owns_generated = owned;
        Ok(())
    }

    /// Material for drawing
    pub fn material(&self) -> Material {
        Material {
            color: self.style.color,
            texture: self.atlas,
            filtering: Filtering::Linear,
        }
    }

    pub(crate) fn resize(&mut self, size: Vec2, layouter: &dyn TextLayouter) {
        let changed = self.size != size;
        self.size = size;
        if changed && self.owns_generated && self.regenerate_on_resize {
            self.generate(layouter);
        }
    }

    fn generate(&mut self, layouter: &dyn TextLayouter) {
        let params = TextLayoutParams {
            width: self.size.x,
            height: self.size.y,
            line_height: self.style.line_height,
            horizontal: self.style.horizontal,
            vertical: self.style.vertical,
        };
        self.generated = layouter.layout(&self.text, &params);
        self.atlas = layouter.atlas();
        self.owns_generated = true;
    }
}
