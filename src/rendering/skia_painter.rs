//! Glyph painter that fills outlines into a tiny-skia pixmap.

use super::{Color, GlyphPainter, GlyphPath, GlyphTransform, PathSegment};
use crate::error::Result;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Paints glyphs into a borrowed [`Pixmap`].
///
/// `base_transform` maps text space to device pixels (typically the CTM
/// combined with the text matrix and a y-flip for the page height).
pub struct SkiaPainter<'a> {
    pixmap: &'a mut Pixmap,
    base_transform: Transform,
}

impl<'a> SkiaPainter<'a> {
    /// Create a painter for `pixmap`.
    pub fn new(pixmap: &'a mut Pixmap, base_transform: Transform) -> Self {
        Self {
            pixmap,
            base_transform,
        }
    }
}

fn to_skia_path(path: &GlyphPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => builder.move_to(p.x, p.y),
            PathSegment::LineTo(p) => builder.line_to(p.x, p.y),
            PathSegment::QuadTo(c, p) => builder.quad_to(c.x, c.y, p.x, p.y),
            PathSegment::CurveTo(c1, c2, p) => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathSegment::Close => builder.close(),
        }
    }
    builder.finish()
}

impl GlyphPainter for SkiaPainter<'_> {
    fn fill_glyph(
        &mut self,
        path: &GlyphPath,
        transform: &GlyphTransform,
        color: Color,
    ) -> Result<()> {
        // Degenerate outlines have nothing to fill.
        let Some(skia_path) = to_skia_path(path) else {
            return Ok(());
        };

        let mut paint = Paint::default();
        paint.set_color(
            tiny_skia::Color::from_rgba(color.r, color.g, color.b, color.a)
                .unwrap_or(tiny_skia::Color::BLACK),
        );
        paint.anti_alias = true;

        let glyph_transform = Transform::from_row(
            transform.scale_x,
            0.0,
            0.0,
            transform.scale_y,
            transform.translate_x,
            transform.translate_y,
        );
        let transform = self.base_transform.pre_concat(glyph_transform);

        self.pixmap
            .fill_path(&skia_path, &paint, FillRule::Winding, transform, None);
        Ok(())
    }
}
