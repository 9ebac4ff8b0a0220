use crate::error::ReportError;
use crate::layout::Margins;
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// Fixed page geometry shared by every page of a report.
///
/// Report layout works top-down: a cursor value of `Pt(0.0)` is the top edge of the page
/// and grows towards the bottom. PDF page space grows upwards from the bottom edge, so
/// anything that is drawn goes through [PageGeometry::to_pdf_y].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: Pt,
    pub height: Pt,
    pub margins: Margins,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> PageGeometry {
        PageGeometry {
            width: size.0,
            height: size.1,
            margins,
        }
    }

    /// A4 portrait with 20 mm margins all around
    pub fn a4() -> PageGeometry {
        PageGeometry::new(pagesize::A4, Margins::all(Mm(20.0).into()))
    }

    /// Width available to content: page width minus the left and right margins
    pub fn content_width(&self) -> Pt {
        self.width - self.margins.horizontal()
    }

    /// The lowest cursor position content may reach
    pub fn bottom_limit(&self) -> Pt {
        self.height - self.margins.bottom
    }

    /// Height between the top margin and the bottom limit
    pub fn available_height(&self) -> Pt {
        self.height - self.margins.vertical()
    }

    /// Convert a top-down cursor position into a PDF y coordinate
    pub fn to_pdf_y(&self, cursor: Pt) -> Pt {
        self.height - cursor
    }

    /// The content area in PDF page space
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.bottom,
            x2: self.width - self.margins.right,
            y2: self.height - self.margins.top,
        }
    }

    pub fn media_box(&self) -> Rect {
        Rect::from_origin(Pt(0.0), Pt(0.0), self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let size_ok = [self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && v.0 >= 0.0);
        if !size_ok || !self.margins.is_well_formed() {
            return Err(ReportError::InvalidGeometry(
                "dimensions must be finite and non-negative".into(),
            ));
        }
        if self.content_width() <= Pt(0.0) {
            return Err(ReportError::InvalidGeometry(format!(
                "margins leave no content width on a {}pt wide page",
                self.width
            )));
        }
        if self.available_height() <= Pt(0.0) {
            return Err(ReportError::InvalidGeometry(format!(
                "margins leave no content height on a {}pt tall page",
                self.height
            )));
        }
        Ok(())
    }
}
