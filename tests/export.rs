use chrono::NaiveDate;
use pdf_report::{
    assemble, export, render, report_filename, DirectorySink, KeyValueRow, MemorySink, ReportError,
    ReportMeta, ReportModel, ReportStyle,
};

fn model() -> ReportModel {
    ReportModel::new(
        ReportMeta::new(
            "ROI Summary",
            "Predictive maintenance pilot",
            "ProcureData",
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
        .with_subtitle("Rail freight consortium"),
    )
    .title("Investment")
    .paragraph(lipsum::lipsum(200))
    .table([
        KeyValueRow::new("Data licences", "EUR 18,000"),
        KeyValueRow::new("Integration", "EUR 9,500"),
        KeyValueRow::emphasised("Total", "EUR 27,500"),
    ])
    .title("Returns")
    .bullets(["Fewer unplanned stops", "Shorter repair windows"])
}

#[test]
fn exports_into_a_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = DirectorySink::new(dir.path());
    let saved = export(&model(), &ReportStyle::default(), &mut sink).expect("exported");

    assert_eq!(saved.filename, "roi-summary-2024-06-30.pdf");
    let bytes = std::fs::read(dir.path().join(&saved.filename)).expect("file written");
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(bytes.len(), saved.size);
}

#[test]
fn missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = DirectorySink::new(dir.path().join("nope"));
    let result = export(&model(), &ReportStyle::default(), &mut sink);
    assert!(matches!(result, Err(ReportError::SinkUnavailable { .. })));
}

#[test]
fn output_is_reproducible() {
    let style = ReportStyle::default();
    let model = model();
    assert_eq!(render(&model, &style).expect("renders"), render(&model, &style).expect("renders"));
    assert_eq!(
        report_filename(&model.meta.doc_type, model.meta.date),
        "roi-summary-2024-06-30.pdf"
    );
}

#[test]
fn uncompressed_output_carries_metadata_and_outline() {
    let mut style = ReportStyle::default();
    style.compress = false;
    style.cover_page = true;
    style.table_of_contents = true;

    let document = assemble(&model(), &style).expect("assembles");
    let page_count = document.page_count();
    let bytes = document.to_bytes().expect("renders");
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("(Predictive maintenance pilot)"));
    assert!(text.contains("(ProcureData)"));
    assert!(text.contains("D:20240630"));
    assert!(text.contains("/Outlines"));
    assert!(text.contains("(Investment)"));
    let pages = text.matches("/Type /Page").count() - text.matches("/Type /Pages").count();
    assert_eq!(pages, page_count);
}

#[test]
fn json_models_export_to_memory() {
    let json = r#"{
        "meta": {
            "doc_type": "Case Study",
            "title": "Cold chain visibility",
            "organisation": "ProcureData",
            "date": "2024-02-12"
        },
        "sections": [
            { "type": "title", "text": "Challenge" },
            { "type": "paragraph", "text": "Temperature excursions went unnoticed until delivery." },
            { "type": "subtitle", "text": "Approach" },
            { "type": "block", "height": 64, "items": [
                { "kind": "panel", "x": 0, "y": 0, "width": 160, "height": 64, "radius": 6, "fill": { "g": 0.95 } },
                { "kind": "text", "x": 12, "y": 30, "text": "-38%", "size": 20, "bold": true },
                { "kind": "text", "x": 12, "y": 50, "text": "spoilage" },
                { "kind": "rule", "from": [0, 64], "to": [160, 64] }
            ] }
        ]
    }"#;
    let model = ReportModel::from_json(json).expect("model parses");
    let mut sink = MemorySink::default();
    let saved = export(&model, &ReportStyle::default(), &mut sink).expect("exported");
    assert_eq!(saved.filename, "case-study-2024-02-12.pdf");
    assert!(sink.get(&saved.filename).expect("stored").starts_with(b"%PDF-"));
}
