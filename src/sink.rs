//! Where finished reports go.

use crate::document::Document;
use crate::error::ReportError;
use crate::report::{assemble, ReportMeta, ReportModel, ReportStyle};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The file name a report is saved under: `<doc-type-slug>-<YYYY-MM-DD>.pdf`.
///
/// ```
/// use chrono::NaiveDate;
/// let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
/// assert_eq!(pdf_report::report_filename("ROI Summary", date), "roi-summary-2024-05-17.pdf");
/// ```
pub fn report_filename(doc_type: &str, date: NaiveDate) -> String {
    let mut slug = slug::slugify(doc_type);
    if slug.is_empty() {
        slug = "report".into();
    }
    format!("{}-{}.pdf", slug, date.format("%Y-%m-%d"))
}

/// A report handed to a [Sink]
#[derive(Debug, Clone, PartialEq)]
pub struct SavedReport {
    pub filename: String,
    /// Where the file was written, for sinks backed by a file system
    pub path: Option<PathBuf>,
    /// Size of the PDF in bytes
    pub size: usize,
}

/// Accepts finished PDF files
pub trait Sink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SavedReport, ReportError>;
}

/// Writes reports into an existing directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> DirectorySink {
        DirectorySink {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SavedReport, ReportError> {
        if !self.dir.is_dir() {
            return Err(ReportError::SinkUnavailable {
                path: self.dir.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "output directory does not exist"),
            });
        }
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes).map_err(|source| ReportError::SinkUnavailable {
            path: path.clone(),
            source,
        })?;
        log::debug!("wrote {}", path.display());
        Ok(SavedReport {
            filename: filename.to_string(),
            path: Some(path),
            size: bytes.len(),
        })
    }
}

/// Keeps reports in memory, keyed by file name. Saving a name twice replaces the first
/// file.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files.get(filename).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Sink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SavedReport, ReportError> {
        self.files.insert(filename.to_string(), bytes.to_vec());
        Ok(SavedReport {
            filename: filename.to_string(),
            path: None,
            size: bytes.len(),
        })
    }
}

/// Lay out and serialise a report without saving it
pub fn render(model: &ReportModel, style: &ReportStyle) -> Result<Vec<u8>, ReportError> {
    assemble(model, style)?.to_bytes()
}

/// Serialise an assembled document and hand it to `sink` under the report's file name
pub fn save_document<S: Sink + ?Sized>(
    meta: &ReportMeta,
    document: Document,
    sink: &mut S,
) -> Result<SavedReport, ReportError> {
    let filename = report_filename(&meta.doc_type, meta.date);
    let pages = document.page_count();
    let bytes = document.to_bytes()?;
    let saved = sink.save(&filename, &bytes)?;
    log::info!("saved {} ({} pages, {} bytes)", filename, pages, saved.size);
    Ok(saved)
}

/// Validate, lay out, serialise and save a report in one go
pub fn export<S: Sink + ?Sized>(
    model: &ReportModel,
    style: &ReportStyle,
    sink: &mut S,
) -> Result<SavedReport, ReportError> {
    let t0 = Instant::now();

    let document = assemble(model, style)?;
    let pages = document.page_count();
    let t_layout = t0.elapsed();

    let bytes = document.to_bytes()?;
    let t_render = t0.elapsed();

    let filename = report_filename(&model.meta.doc_type, model.meta.date);
    let saved = sink.save(&filename, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, render={:.1}ms, save={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_render - t_layout).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        pages,
        bytes.len(),
    );

    Ok(saved)
}
