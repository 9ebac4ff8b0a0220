use crate::refs::{ObjectReferences, RefType};
use crate::report::ReportMeta;
use chrono::{Datelike, NaiveDate};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// The document information dictionary of a report
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    /// The issuing organisation
    pub author: Option<String>,
    /// The document type, e.g. "Case Study"
    pub subject: Option<String>,
    pub keywords: Option<String>,
    /// Left out of the PDF when [None]. There is no wall-clock fallback, so identical
    /// input gives identical bytes.
    pub creation_date: Option<NaiveDate>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    /// Metadata for a report: title, organisation as author, document type as subject,
    /// subtitle as keywords and the report date as the creation date
    pub fn for_report(meta: &ReportMeta) -> Info {
        Info {
            title: Some(meta.title.clone()),
            author: Some(meta.organisation.clone()),
            subject: Some(meta.doc_type.clone()),
            keywords: meta.subtitle.clone(),
            creation_date: Some(meta.date),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        if let Some(date) = self.creation_date {
            info.creation_date(pdf_date(date));
        }
    }
}

fn pdf_date(date: NaiveDate) -> PDate {
    PDate::new(date.year().clamp(0, 9999) as u16)
        .month(date.month() as u8)
        .day(date.day() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_meta_maps_onto_info() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let meta = ReportMeta::new("Case Study", "Cold chain", "ProcureData", date).with_subtitle("Pilot");
        let info = Info::for_report(&meta);
        assert_eq!(info.author.as_deref(), Some("ProcureData"));
        assert_eq!(info.subject.as_deref(), Some("Case Study"));
        assert_eq!(info.keywords.as_deref(), Some("Pilot"));

        let mut pdf = Pdf::new();
        info.write(&mut ObjectReferences::new(), &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Cold chain)"));
        assert!(text.contains("D:20240309"));
    }

    #[test]
    fn no_date_without_one() {
        let mut pdf = Pdf::new();
        Info::new().write(&mut ObjectReferences::new(), &mut pdf);
        let bytes = pdf.finish();
        assert!(!String::from_utf8_lossy(&bytes).contains("/CreationDate"));
    }
}
