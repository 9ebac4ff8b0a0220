//! Page geometry, cursor bookkeeping and text wrapping.
//!
//! Layout in this crate is top-down: a [WriterState] tracks how far down the current page
//! content has reached, and every block reserves its height with
//! [WriterState::ensure_space] before it is drawn. When the reservation would cross the
//! bottom margin, a new page is started and the cursor returns to the top margin.
//!
//! # Example
//!
//! ```
//! use pdf_report::layout::{Margins, PageBreak, PageGeometry, WriterState};
//! use pdf_report::Pt;
//!
//! let geometry = PageGeometry::new((Pt(200.0), Pt(300.0)), Margins::all(Pt(20.0)));
//! let mut state = WriterState::new(&geometry);
//!
//! state.advance(Pt(250.0));
//! assert_eq!(state.ensure_space(Pt(12.0)), PageBreak::Added);
//! assert_eq!(state.cursor(), Pt(20.0));
//! ```

mod cursor;
mod geometry;
mod margins;
mod wrap;

pub use cursor::*;
pub use geometry::*;
pub use margins::*;
pub use wrap::*;
