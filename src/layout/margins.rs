use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// The band kept clear around a report page. The cursor starts at `top` on every page and
/// no guarded block may end below `bottom`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Top, right, bottom, left: CSS order
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all(value: Pt) -> Margins {
        Margins::trbl(value, value, value, value)
    }

    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Top plus bottom
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite() && v.0 >= 0.0)
    }
}
