//! Lays out section-based report models onto fixed-geometry PDF pages.
//!
//! A [ReportModel] is an ordered list of [Section]s. [assemble] folds over it, drawing
//! every section with a [ReportWriter] primitive that first makes sure the block fits on
//! the current page and starts a new page when it does not. The finished [Document] is
//! serialised and handed to a [Sink] under a deterministic file name by [export].
//!
//! ```
//! use pdf_report::{export, MemorySink, ReportMeta, ReportModel, ReportStyle};
//! use chrono::NaiveDate;
//!
//! let model = ReportModel::new(ReportMeta::new(
//!     "Case Study",
//!     "Route optimisation",
//!     "ProcureData",
//!     NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
//! ))
//! .title("Summary")
//! .paragraph("Carriers shared telemetry through the marketplace.");
//!
//! let mut sink = MemorySink::default();
//! let saved = export(&model, &ReportStyle::default(), &mut sink).unwrap();
//! assert_eq!(saved.filename, "case-study-2024-05-17.pdf");
//! ```

mod colour;
pub use colour::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Page geometry, the writer's cursor and text wrapping
pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

/// Common page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod report;
pub use report::*;

mod sink;
pub use sink::*;

mod standard;
pub use standard::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
