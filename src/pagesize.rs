//! Paper sizes for [PageGeometry](crate::layout::PageGeometry), in portrait.

use crate::units::*;

/// (width, height)
pub type PageSize = (Pt, Pt);

const MM: f32 = 72.0 / 25.4;

pub const A4: PageSize = (Pt(210.0 * MM), Pt(297.0 * MM));
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_in_points() {
        assert!((A4.0 .0 - 595.28).abs() < 0.01);
        assert!((A4.1 .0 - 841.89).abs() < 0.01);
    }
}
