//! Text folding for the builtin PDF fonts
//!
//! The Standard 14 fonts only cover WinAnsi. Latin-1 letters pass through;
//! Vietnamese letters outside it lose their extra marks and fall back to the
//! nearest Latin-1 base letter, so "Trả phòng" prints as "Tra phòng".

const FOLDS: &[(&str, char)] = &[
    ("ảạăằắẳẵặầấẩẫậ", 'a'),
    ("ẢẠĂẰẮẲẴẶẦẤẨẪẬ", 'A'),
    ("ẻẽẹềếểễệ", 'e'),
    ("ẺẼẸỀẾỂỄỆ", 'E'),
    ("ỉĩị", 'i'),
    ("ỈĨỊ", 'I'),
    ("ỏọồốổỗộơờớởỡợ", 'o'),
    ("ỎỌỒỐỔỖỘƠỜỚỞỠỢ", 'O'),
    ("ủũụưừứửữự", 'u'),
    ("ỦŨỤƯỪỨỬỮỰ", 'U'),
    ("ỳỷỹỵ", 'y'),
    ("ỲỶỸỴ", 'Y'),
    ("đ", 'd'),
    ("Đ", 'D'),
];

fn fold_char(c: char) -> char {
    if (c as u32) < 0x100 {
        return c;
    }
    FOLDS
        .iter()
        .find(|(from, _)| from.contains(c))
        .map(|(_, to)| *to)
        .unwrap_or('?')
}

/// Map text onto characters the builtin fonts can draw
pub fn to_winansi(text: &str) -> String {
    text.chars().map(fold_char).collect()
}
