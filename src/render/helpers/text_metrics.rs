//! Text measurement for the PDF builtin Helvetica faces
//!
//! Widths come from the Adobe AFM files for the Standard 14 fonts, so
//! alignment can be computed before any text is written.

use printpdf::BuiltinFont;

/// Points to millimetres
const PT_TO_MM: f32 = 0.3528;

/// Width used for Latin-1 letters outside the ASCII tables
const LATIN1_WIDTH: u16 = 556;

/// Measures text set in a builtin font
pub struct BuiltinFontMeasurer {
    font: BuiltinFont,
}

impl BuiltinFontMeasurer {
    pub fn new(font: BuiltinFont) -> Self {
        Self { font }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self.font,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }

    /// Character width in 1000 units per em
    fn char_width(&self, c: char) -> u16 {
        if !c.is_ascii() {
            return LATIN1_WIDTH;
        }

        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        table.get(c as usize).copied().unwrap_or(278)
    }

    pub fn measure_width_pt(&self, text: &str, font_size: f32) -> f32 {
        let total_width: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        (total_width as f32 / 1000.0) * font_size
    }

    pub fn measure_width_mm(&self, text: &str, font_size: f32) -> f32 {
        self.measure_width_pt(text, font_size) * PT_TO_MM
    }

    /// Cap height in mm at the given size
    pub fn cap_height_mm(&self, font_size: f32) -> f32 {
        (718.0 / 1000.0) * font_size * PT_TO_MM
    }
}

pub fn get_helvetica_measurer() -> &'static BuiltinFontMeasurer {
    use std::sync::OnceLock;
    static MEASURER: OnceLock<BuiltinFontMeasurer> = OnceLock::new();
    MEASURER.get_or_init(|| BuiltinFontMeasurer::new(BuiltinFont::Helvetica))
}

pub fn get_helvetica_bold_measurer() -> &'static BuiltinFontMeasurer {
    use std::sync::OnceLock;
    static MEASURER: OnceLock<BuiltinFontMeasurer> = OnceLock::new();
    MEASURER.get_or_init(|| BuiltinFontMeasurer::new(BuiltinFont::HelveticaBold))
}

/// Measurer for a builtin font; faces other than Helvetica fall back to its metrics
pub fn get_builtin_measurer(font: BuiltinFont) -> &'static BuiltinFontMeasurer {
    match font {
        BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
            get_helvetica_bold_measurer()
        }
        _ => get_helvetica_measurer(),
    }
}

// Adobe AFM widths, ASCII subset, 1000 units per em

/// Helvetica character widths
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
];

/// Helvetica-Bold character widths
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_digits() {
        let measurer = get_helvetica_measurer();
        // every Helvetica digit is 556 units wide
        let width = measurer.measure_width_pt("1785", 10.0);
        assert!((width - 4.0 * 5.56).abs() < 0.001);
    }

    #[test]
    fn test_width_scales_with_size() {
        let measurer = get_helvetica_measurer();
        let small = measurer.measure_width_mm("TOTAL:", 12.0);
        let large = measurer.measure_width_mm("TOTAL:", 24.0);
        assert!((large - small * 2.0).abs() < 0.01);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = get_builtin_measurer(BuiltinFont::Helvetica).measure_width_mm("Room", 12.0);
        let bold = get_builtin_measurer(BuiltinFont::HelveticaBold).measure_width_mm("Room", 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_cap_height_is_reasonable() {
        let cap = get_helvetica_measurer().cap_height_mm(12.0);
        assert!(cap > 2.5 && cap < 3.5);
    }
}
