use pdf_report::{export, DirectorySink, ReportModel, ReportStyle};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let model_path = args
        .next()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/sustainability.json").into());
    let style = match args.next() {
        Some(style_path) => ReportStyle::load(style_path).expect("can load style"),
        None => ReportStyle::default(),
    };

    let model = match ReportModel::load(&model_path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("{model_path}: {e}");
            std::process::exit(1);
        }
    };

    let mut sink = DirectorySink::new(".");
    let saved = export(&model, &style, &mut sink).expect("can export report");
    println!("wrote {}", saved.filename);
}
