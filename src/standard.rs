//! The PDF standard fonts used when a report does not embed its own faces.
//!
//! Viewers ship these fonts, so nothing is embedded; text is written in WinAnsi encoding
//! and measured with the Adobe font metrics below.

use crate::units::Pt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
}

// advance widths of WinAnsi 32..=126 in 1/1000 em
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for WinAnsi characters outside the ASCII table
const FALLBACK_WIDTH: u16 = 556;
const BULLET_WIDTH: u16 = 350;

impl StandardFont {
    /// The PostScript name the PDF refers to
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
        }
    }

    /// Advance width of a single WinAnsi byte in 1/1000 em
    fn byte_width(&self, byte: u8) -> u16 {
        let table = match self {
            StandardFont::Courier => return 600,
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::HelveticaBold => &HELVETICA_BOLD,
        };
        match byte {
            32..=126 => table[(byte - 32) as usize],
            0x95 => BULLET_WIDTH,
            _ => FALLBACK_WIDTH,
        }
    }

    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text
            .chars()
            .map(|c| char_to_winansi(c).unwrap_or(b'?'))
            .filter(|&b| b >= 32)
            .map(|b| self.byte_width(b) as u32)
            .sum();
        Pt(size.0 * units as f32 / 1000.0)
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            StandardFont::Courier => size * 0.629,
            _ => size * 0.718,
        }
    }

    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            StandardFont::Courier => size * -0.157,
            _ => size * -0.207,
        }
    }
}

fn char_to_winansi(c: char) -> Option<u8> {
    match c as u32 {
        0x0020..=0x007E => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Encode text for a standard font. Characters WinAnsi cannot represent become `?` and
/// are added to `missing`.
pub(crate) fn to_winansi_bytes(text: &str, missing: &mut BTreeSet<char>) -> Vec<u8> {
    text.chars()
        .map(|c| {
            char_to_winansi(c).unwrap_or_else(|| {
                missing.insert(c);
                b'?'
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths() {
        // H=722 e=556 l=222 l=222 o=556
        let w = StandardFont::Helvetica.text_width("Hello", Pt(10.0));
        assert!((w.0 - 22.78).abs() < 1e-3);
        assert!(StandardFont::HelveticaBold.text_width("Hello", Pt(10.0)) > w);
    }

    #[test]
    fn courier_is_monospaced() {
        assert_eq!(StandardFont::Courier.text_width("iiii", Pt(10.0)), Pt(24.0));
        assert_eq!(StandardFont::Courier.text_width("MMMM", Pt(10.0)), Pt(24.0));
    }

    #[test]
    fn encodes_bullet_and_euro() {
        let mut missing = BTreeSet::new();
        assert_eq!(to_winansi_bytes("\u{2022} 5\u{20AC}", &mut missing), vec![0x95, b' ', b'5', 0x80]);
        assert!(missing.is_empty());
        assert_eq!(to_winansi_bytes("\u{4e2d}\u{4e2d}", &mut missing), vec![b'?', b'?']);
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec!['\u{4e2d}']);
    }
}
