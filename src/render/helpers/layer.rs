//! Operation builder for printpdf 0.8 pages
//!
//! Layouts plan in millimetres from the top-left corner of the page, the way
//! a sheet of paper is read. `LayerBuilder` flips those coordinates into PDF
//! space (origin bottom-left) and collects the resulting `Op`s for one page.

use printpdf::{
    BuiltinFont, Color, LinePoint, Mm, Op, PaintMode, Point, Polygon, PolygonRing, Pt, TextItem,
    WindingOrder,
};

use super::encoding::to_winansi;
use super::text_metrics::get_builtin_measurer;

/// Horizontal anchor for a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Collects the drawing operations for a single page
pub struct LayerBuilder {
    page_height: f32,
    ops: Vec<Op>,
}

impl LayerBuilder {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            ops: Vec::new(),
        }
    }

    /// Get the collected operations
    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// Get a reference to the operations (for inspection)
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point {
            x: Mm(x).into(),
            y: Mm(self.page_height - y).into(),
        }
    }

    fn line_point(&self, x: f32, y: f32) -> LinePoint {
        LinePoint {
            p: self.point(x, y),
            bezier: false,
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.ops.push(Op::SetFillColor { col: color });
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.ops.push(Op::SetOutlineColor { col: color });
    }

    /// Set the outline thickness in points
    pub fn set_outline_thickness(&mut self, thickness: f32) {
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
    }

    /// Draw text with its baseline at `y`, anchored at `x` according to `align`
    pub fn use_text<S: AsRef<str>>(
        &mut self,
        text: S,
        font_size: f32,
        x: f32,
        y: f32,
        font: BuiltinFont,
        align: Align,
    ) {
        let text = to_winansi(text.as_ref());
        if text.is_empty() {
            return;
        }

        let width = get_builtin_measurer(font).measure_width_mm(&text, font_size);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: self.point(left, y),
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(font_size),
            font,
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text)],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    /// Draw text vertically centred in a band that starts at `top`
    pub fn use_text_in_band<S: AsRef<str>>(
        &mut self,
        text: S,
        font_size: f32,
        x: f32,
        top: f32,
        band_height: f32,
        font: BuiltinFont,
        align: Align,
    ) {
        let cap_height = get_builtin_measurer(font).cap_height_mm(font_size);
        let baseline = top + (band_height + cap_height) / 2.0;
        self.use_text(text, font_size, x, baseline, font, align);
    }

    /// Stroke a rectangle given its top-left corner and size
    pub fn add_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let points = vec![
            self.line_point(x, y),
            self.line_point(x + width, y),
            self.line_point(x + width, y + height),
            self.line_point(x, y + height),
        ];

        let polygon = Polygon {
            rings: vec![PolygonRing { points }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::NonZero,
        };

        self.ops.push(Op::DrawPolygon { polygon });
    }

    /// Draw a line from (x1, y1) to (x2, y2)
    pub fn add_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let points = vec![self.line_point(x1, y1), self.line_point(x2, y2)];

        let polygon = Polygon {
            rings: vec![PolygonRing { points }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::NonZero,
        };

        self.ops.push(Op::DrawPolygon { polygon });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_text_emits_a_text_section() {
        let mut layer = LayerBuilder::new(297.0);
        layer.use_text("A1: 1785", 12.0, 5.0, 10.0, BuiltinFont::Helvetica, Align::Left);

        let ops = layer.ops();
        assert_eq!(ops.len(), 5);
        assert!(matches!(ops[0], Op::StartTextSection));
        assert!(matches!(ops[4], Op::EndTextSection));
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut layer = LayerBuilder::new(297.0);
        layer.use_text("", 12.0, 5.0, 10.0, BuiltinFont::Helvetica, Align::Right);
        assert!(layer.ops().is_empty());
    }

    #[test]
    fn test_coordinates_are_flipped() {
        let layer = LayerBuilder::new(297.0);
        let top = layer.point(0.0, 0.0);
        let bottom = layer.point(0.0, 297.0);
        assert!(top.y.0 > bottom.y.0);
        assert!(bottom.y.0.abs() < 0.001);
    }

    #[test]
    fn test_right_alignment_moves_cursor_left() {
        let mut layer = LayerBuilder::new(297.0);
        layer.use_text("1 785 000", 14.0, 87.0, 50.0, BuiltinFont::Helvetica, Align::Right);

        match &layer.ops()[1] {
            Op::SetTextCursor { pos } => assert!(pos.x.0 < Pt::from(Mm(87.0)).0),
            other => panic!("expected a text cursor, got {:?}", other),
        }
    }
}
