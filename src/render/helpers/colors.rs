use printpdf::{Color, Rgb};

pub const BLACK: Rgb = Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    icc_profile: None,
};

/// Stroke color for cards and table cells
pub const BORDER: Rgb = Rgb {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    icc_profile: None,
};

pub fn black() -> Color {
    Color::Rgb(BLACK)
}

pub fn border() -> Color {
    Color::Rgb(BORDER)
}
