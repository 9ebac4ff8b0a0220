use chrono::NaiveDate;
use pdf_report::layout::PageGeometry;
use pdf_report::pagesize;
use pdf_report::{
    assemble_into, export, save_document, BlockItem, Colour, DirectorySink, Document, Font,
    FontSet, KeyValueRow, LayoutBlock, Pt, ReportMeta, ReportModel, ReportStyle,
};

fn main() {
    env_logger::init();

    // a metric card: rounded panel with a big number and a caption underneath
    let card = |x: f32, figure: &str, caption: &str| {
        [
            BlockItem::Panel {
                x: Pt(x),
                y: Pt(0.0),
                width: Pt(150.0),
                height: Pt(70.0),
                radius: Pt(6.0),
                fill: Colour::from_hex("#eef4fb"),
                stroke: None,
            },
            BlockItem::Text {
                x: Pt(x + 12.0),
                y: Pt(34.0),
                text: figure.to_string(),
                size: Some(Pt(22.0)),
                bold: true,
                colour: Colour::from_hex("#1f6feb"),
            },
            BlockItem::Text {
                x: Pt(x + 12.0),
                y: Pt(54.0),
                text: caption.to_string(),
                size: Some(Pt(9.0)),
                bold: false,
                colour: None,
            },
        ]
    };
    let mut metrics = LayoutBlock::new(Pt(70.0));
    for item in card(0.0, "-23%", "empty kilometres")
        .into_iter()
        .chain(card(165.0, "4.1x", "return on data spend"))
        .chain(card(330.0, "11 wk", "time to integrate"))
    {
        metrics = metrics.item(item);
    }

    let model = ReportModel::new(
        ReportMeta::new(
            "Case Study",
            "Route optimisation with shared telemetry",
            "ProcureData",
            NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date"),
        )
        .with_subtitle("Northern Logistics Alliance"),
    )
    .title("Challenge")
    .paragraph(lipsum::lipsum(90))
    .bullets([
        "Carriers planned routes from their own fleet data only",
        "Return legs ran empty for a third of all kilometres",
        "No shared view of depot congestion",
    ])
    .title("Results")
    .block(metrics)
    .subtitle("Budget")
    .table([
        KeyValueRow::new("Data licences", "EUR 42,000"),
        KeyValueRow::new("Integration", "EUR 18,500"),
        KeyValueRow::new("Training", "EUR 6,000"),
        KeyValueRow::emphasised("Total", "EUR 66,500"),
    ])
    .title("Outlook")
    .paragraph(lipsum::lipsum(240));

    let mut style = ReportStyle::default();
    style.cover_page = true;
    style.table_of_contents = true;
    if std::env::var("REPORT_PAPER").as_deref() == Ok("letter") {
        style.geometry = PageGeometry::new(pagesize::LETTER, style.geometry.margins);
    }

    let mut sink = DirectorySink::new(".");

    // pass a regular and a bold .ttf to set the report in those instead of Helvetica
    let args: Vec<String> = std::env::args().skip(1).collect();
    let saved = if let [regular, bold] = args.as_slice() {
        let mut document = Document::default();
        let regular = Font::load(std::fs::read(regular).expect("can read font")).expect("can load font");
        let bold = Font::load(std::fs::read(bold).expect("can read font")).expect("can load font");
        let fonts = FontSet::register(&mut document, regular, bold);
        let document = assemble_into(&model, &style, document, fonts).expect("can lay out report");
        save_document(&model.meta, document, &mut sink).expect("can save report")
    } else {
        export(&model, &style, &mut sink).expect("can export report")
    };

    println!("wrote {} ({} bytes)", saved.filename, saved.size);
}
