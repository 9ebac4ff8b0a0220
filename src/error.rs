use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    /// An I/O error occurred while serialising the document
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a TrueType font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A report model or style could not be parsed as JSON
    Json(#[from] serde_json::Error),

    #[error("section {index} has no \"type\" tag")]
    MissingSectionTag { index: usize },

    #[error("section {index} has unrecognised type {tag:?}")]
    UnknownSection { index: usize, tag: String },

    #[error("section {index} of type {tag:?} is malformed: {source}")]
    MalformedSection {
        index: usize,
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("layout block in section {index} is invalid: {reason}")]
    InvalidBlock { index: usize, reason: String },

    #[error("font is not registered with the document")]
    /// Text refers to a font id from another document
    FontMissing,

    #[error("page is missing from the document")]
    /// The page order refers to a page that no longer exists
    PageMissing,

    #[error("cannot save report to {}", path.display())]
    /// The output sink could not accept the finished document
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
