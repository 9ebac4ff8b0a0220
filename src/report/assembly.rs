use super::model::{KeyValueRow, ReportModel};
use super::style::{FontSet, ReportStyle};
use super::writer::ReportWriter;
use crate::document::Document;
use crate::error::ReportError;
use crate::info::Info;
use crate::layout::WriterState;

/// Lay out `model` in the standard fonts named by the style
pub fn assemble(model: &ReportModel, style: &ReportStyle) -> Result<Document, ReportError> {
    let mut document = Document::default();
    let fonts = FontSet::standard(&mut document, style.fonts);
    assemble_into(model, style, document, fonts)
}

/// Lay out `model` into `document`, set in `fonts` (which must be registered with it).
///
/// Sections are drawn in order, after the header. When the style asks for them, a table
/// of contents goes in front of the content and a cover page in front of that. Every page
/// but the cover then gets a footer numbered over the whole document.
pub fn assemble_into(
    model: &ReportModel,
    style: &ReportStyle,
    mut document: Document,
    fonts: FontSet,
) -> Result<Document, ReportError> {
    style.validate()?;
    model.validate()?;

    document.compress = style.compress;
    document.set_info(Info::for_report(&model.meta));

    let mut writer = ReportWriter::new(document, fonts, style)?;
    writer.header(&model.meta);
    for section in model.sections.iter() {
        writer.section(section);
    }
    log::debug!(
        "laid out {} sections on {} pages",
        model.sections.len(),
        writer.pages().len()
    );

    if style.table_of_contents && !writer.toc_entries().is_empty() {
        write_table_of_contents(&mut writer, style)?;
    }

    let cover = if style.cover_page {
        Some(writer.cover(&model.meta))
    } else {
        None
    };

    let footer_text = format!("{} \u{b7} {}", model.meta.organisation, model.meta.doc_type);
    let order = writer.document().page_order.clone();
    let total = order.len();
    for (index, page) in order.into_iter().enumerate() {
        if Some(page) == cover {
            continue;
        }
        writer.footer(page, index + 1, total, &footer_text)?;
    }

    Ok(writer.finish())
}

/// Number of pages a table of contents with `entries` rows takes up. The table is laid
/// out by the same reservations on a scratch cursor, so the count is exact.
pub fn toc_page_count(style: &ReportStyle, entries: usize) -> usize {
    let mut state = WriterState::new(&style.geometry);
    state.ensure_space(style.subtitle.height);
    state.advance(style.subtitle.height);
    for _ in 0..entries {
        state.ensure_space(style.key_value.row_height);
        state.advance(style.key_value.row_height + style.key_value.row_gap);
    }
    state.page_index() + 1
}

/// Append the table of contents after the content, then move its pages to the front.
/// Page numbers account for the table itself and the cover.
fn write_table_of_contents(writer: &mut ReportWriter<'_>, style: &ReportStyle) -> Result<(), ReportError> {
    let entries = writer.toc_entries().to_vec();
    let toc_pages = toc_page_count(style, entries.len());
    let offset = toc_pages + usize::from(style.cover_page);

    let rows = entries
        .iter()
        .map(|entry| {
            let index = writer
                .document()
                .index_of_page(entry.page)
                .ok_or(ReportError::PageMissing)?;
            Ok(KeyValueRow::new(
                format!("{}  {}", entry.label, entry.title),
                index + offset + 1,
            ))
        })
        .collect::<Result<Vec<KeyValueRow>, ReportError>>()?;

    let before = writer.pages().len();
    writer.new_page();
    writer.subtitle(&style.toc_title);
    for row in rows.iter() {
        writer.key_value_row(row);
    }
    let written = writer.pages().len() - before;
    if written != toc_pages {
        log::warn!("table of contents took {written} pages, {toc_pages} were numbered for");
    }

    writer.document_mut().move_last_pages(written, 0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{LayoutBlock, ReportMeta};
    use crate::units::Pt;
    use chrono::NaiveDate;

    fn meta() -> ReportMeta {
        ReportMeta::new(
            "Sustainability Report",
            "Scope 3 emissions",
            "ProcureData",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn empty_model_is_one_page_with_header_and_footer() {
        let document = assemble(&ReportModel::new(meta()), &ReportStyle::default()).expect("assembles");
        assert_eq!(document.page_count(), 1);
        let page = document.pages_in_order().next().expect("one page");
        let text = page.text();
        assert_eq!(text[0], "Scope 3 emissions");
        assert!(text.contains(&"Page 1 of 1"));
        assert!(document.outline.is_empty());
    }

    #[test]
    fn empty_model_with_cover_and_toc_adds_only_the_cover() {
        let mut style = ReportStyle::default();
        style.cover_page = true;
        style.table_of_contents = true;
        let document = assemble(&ReportModel::new(meta()), &style).expect("assembles");
        assert_eq!(document.page_count(), 2);

        let pages: Vec<Vec<&str>> = document.pages_in_order().map(|p| p.text()).collect();
        assert!(pages[0].iter().all(|t| !t.starts_with("Page ")));
        assert!(pages[1].contains(&"Page 2 of 2"));
    }

    #[test]
    fn toc_numbers_match_where_titles_land() {
        let mut style = ReportStyle::default();
        style.cover_page = true;
        style.table_of_contents = true;

        let mut model = ReportModel::new(meta());
        for i in 0..12 {
            model = model
                .title(format!("Chapter {i}"))
                .paragraph(lipsum::lipsum(300));
        }
        let document = assemble(&model, &style).expect("assembles");
        let pages: Vec<Vec<&str>> = document.pages_in_order().map(|p| p.text()).collect();

        // the cover carries no footer
        assert!(!pages[0].iter().any(|t| t.starts_with("Page ")));
        assert!(pages[1].contains(&"Contents"));

        for i in 0..12 {
            let title = format!("Chapter {i}");
            let row = format!("{:02}  {}", i + 1, title);
            let toc_page = pages
                .iter()
                .position(|p| p.contains(&row.as_str()))
                .expect("title is listed");
            let number: usize = pages[toc_page]
                .iter()
                .skip_while(|t| **t != row)
                .nth(1)
                .and_then(|n| n.parse().ok())
                .expect("row has a page number");
            assert!(
                pages[number - 1].contains(&title.as_str()),
                "{title} is not on page {number}"
            );
        }
    }

    #[test]
    fn toc_page_count_counts_overflow() {
        let style = ReportStyle::default();
        assert_eq!(toc_page_count(&style, 0), 1);
        assert_eq!(toc_page_count(&style, 5), 1);
        // A4 with 20mm margins: 27 rows under the heading, then 28 per page
        assert_eq!(toc_page_count(&style, 100), 4);
    }

    #[test]
    fn fonts_from_another_document_are_rejected() {
        let mut elsewhere = Document::default();
        let fonts = FontSet::standard(&mut elsewhere, ReportStyle::default().fonts);
        let result = assemble_into(
            &ReportModel::new(meta()).paragraph("text"),
            &ReportStyle::default(),
            Document::default(),
            fonts,
        );
        assert!(matches!(result, Err(ReportError::FontMissing)));
    }

    #[test]
    fn invalid_blocks_abort_assembly() {
        let model = ReportModel::new(meta()).block(LayoutBlock::new(Pt(-5.0)));
        assert!(matches!(
            assemble(&model, &ReportStyle::default()),
            Err(ReportError::InvalidBlock { index: 0, .. })
        ));
    }
}
