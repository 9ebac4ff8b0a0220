use crate::layout::PageGeometry;
use crate::units::Pt;

/// What [WriterState::ensure_space] did to satisfy a reservation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageBreak {
    /// A new page was started and the cursor moved to its top margin
    Added,
    /// The block fits on the current page
    NotNeeded,
}

/// Whether the current page can take more content
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Accepting,
    Full,
}

/// The vertical cursor and page counter of one report being written.
///
/// The state knows nothing about the document it lays out; it only answers "does this
/// block still fit?" and moves the cursor. The report writer allocates a real page every
/// time [WriterState::ensure_space] or [WriterState::new_page] starts one here.
///
/// After every operation the cursor is at most the bottom limit of the page, except for a
/// block taller than a whole page, which is allowed to overflow a fresh page.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterState {
    cursor: Pt,
    page_index: usize,
    top: Pt,
    limit: Pt,
}

impl WriterState {
    /// A state on the first page with the cursor at the top margin
    pub fn new(geometry: &PageGeometry) -> WriterState {
        WriterState {
            cursor: geometry.margins.top,
            page_index: 0,
            top: geometry.margins.top,
            limit: geometry.bottom_limit(),
        }
    }

    /// Current distance from the top edge of the page
    pub fn cursor(&self) -> Pt {
        self.cursor
    }

    /// Zero-based index of the page the cursor is on
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The cursor position no guarded block may cross
    pub fn limit(&self) -> Pt {
        self.limit
    }

    /// Height left between the cursor and the bottom limit
    pub fn remaining(&self) -> Pt {
        self.limit - self.cursor
    }

    pub fn fits(&self, required: Pt) -> bool {
        self.cursor + required <= self.limit
    }

    /// True when nothing has been placed on the current page yet
    pub fn at_page_top(&self) -> bool {
        self.cursor <= self.top
    }

    pub fn status(&self, threshold: Pt) -> PageStatus {
        if self.remaining() < threshold {
            PageStatus::Full
        } else {
            PageStatus::Accepting
        }
    }

    /// Reserve `required` height below the cursor, starting a new page when it would
    /// cross the bottom limit. Calling it again with the same height is a no-op.
    pub fn ensure_space(&mut self, required: Pt) -> PageBreak {
        if self.fits(required) {
            return PageBreak::NotNeeded;
        }
        if self.at_page_top() {
            // a fresh page is as good as it gets
            log::warn!(
                "block of {}pt is taller than the {}pt available on a page; it will overflow",
                required,
                self.limit - self.top
            );
            return PageBreak::NotNeeded;
        }
        self.new_page();
        PageBreak::Added
    }

    /// Unconditionally start a new page
    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.cursor = self.top;
        log::debug!("page break, now on page {}", self.page_index + 1);
    }

    /// Move the cursor down after drawing. The cursor never passes the bottom limit; a gap
    /// that would is cut short, and the next guarded block breaks the page anyway.
    pub fn advance(&mut self, by: Pt) {
        self.cursor = (self.cursor + by).min(self.limit.max(self.cursor));
    }
}
