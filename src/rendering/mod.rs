//! Glyph painting primitives.
//!
//! Composite fonts hand each resolved glyph outline to a [`GlyphPainter`]
//! together with the transform that places it on the page. The painter is
//! the rasterizer's business; with the `rendering` feature enabled,
//! [`SkiaPainter`] fills outlines into a `tiny-skia` pixmap and
//! [`SystemFontLoader`] finds installed fonts for CIDFonts that are
//! referenced by name instead of embedded.
//!
//! Coordinates follow PDF text space: y grows upwards.

use crate::error::Result;

#[cfg(feature = "rendering")]
mod skia_painter;
#[cfg(feature = "rendering")]
mod system_fonts;

#[cfg(feature = "rendering")]
pub use skia_painter::SkiaPainter;
#[cfg(feature = "rendering")]
pub use system_fonts::SystemFontLoader;

/// A point in text space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Non-premultiplied RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque black, the initial PDF fill colour.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Opaque colour from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Text state parameters that affect glyph placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextState {
    /// Font size (Tf operand)
    pub font_size: f32,
    /// Character spacing (Tc), in unscaled text space units
    pub char_spacing: f32,
    /// Word spacing (Tw), applied to code 32
    pub word_spacing: f32,
    /// Horizontal scaling as a factor (Tz / 100)
    pub horizontal_scaling: f32,
    /// Fill colour
    pub color: Color,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_size: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            color: Color::BLACK,
        }
    }
}

/// One segment of a glyph outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new contour
    MoveTo(Point),
    /// Straight line
    LineTo(Point),
    /// Quadratic Bézier (control, end)
    QuadTo(Point, Point),
    /// Cubic Bézier (control 1, control 2, end)
    CurveTo(Point, Point, Point),
    /// Close the current contour
    Close,
}

/// A glyph outline in font units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphPath {
    segments: Vec<PathSegment>,
}

impl GlyphPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments in drawing order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path has no segments (e.g. the space glyph).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }
}

impl ttf_parser::OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathSegment::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(PathSegment::LineTo(Point::new(x, y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push(PathSegment::QuadTo(Point::new(x1, y1), Point::new(x, y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push(PathSegment::CurveTo(
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x, y),
        ));
    }

    fn close(&mut self) {
        self.push(PathSegment::Close);
    }
}

/// Maps a glyph outline from font units to text space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    /// Horizontal scale (font size × horizontal scaling / units per em)
    pub scale_x: f32,
    /// Vertical scale (font size / units per em)
    pub scale_y: f32,
    /// Pen position: x
    pub translate_x: f32,
    /// Pen position: y
    pub translate_y: f32,
}

impl GlyphTransform {
    /// Transform for a glyph drawn at `pen`.
    pub fn new(pen: Point, units_per_em: u16, state: &TextState) -> Self {
        let em = f32::from(units_per_em.max(1));
        Self {
            scale_x: state.font_size * state.horizontal_scaling / em,
            scale_y: state.font_size / em,
            translate_x: pen.x,
            translate_y: pen.y,
        }
    }

    /// Map a point from font units to text space.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale_x + self.translate_x,
            p.y * self.scale_y + self.translate_y,
        )
    }
}

/// Rasterizer collaborator that paints glyph outlines.
pub trait GlyphPainter {
    /// Fill `path` (font units) placed by `transform`.
    fn fill_glyph(&mut self, path: &GlyphPath, transform: &GlyphTransform, color: Color)
        -> Result<()>;
}
