use super::model::{BlockItem, KeyValueRow, LayoutBlock, ReportMeta, Section};
use super::style::{FontSet, ReportStyle, ValuePlacement};
use crate::colour::Colour;
use crate::document::Document;
use crate::error::ReportError;
use crate::font::{Font, TextMeasure};
use crate::layout::{wrap_text, PageBreak, PageGeometry, WriterState};
use crate::page::{Page, RuleLayout, ShapeLayout, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;

/// Where a primitive drew its content
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    /// Page the primitive started drawing on, counted in the order the writer created its
    /// pages
    pub page: usize,
    /// Cursor position the first line or box was drawn at
    pub top: Pt,
    /// How far the cursor moved, summed over every page the primitive touched
    pub height: Pt,
}

/// A section title as it appears in the table of contents
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// The zero-padded section number
    pub label: String,
    pub title: String,
    pub page: Id<Page>,
}

#[derive(Debug, Copy, Clone)]
struct Face {
    bold: bool,
    size: Pt,
    colour: Colour,
}

/// Draws report content top-down onto the pages of a [Document].
///
/// Each primitive estimates the height it needs, reserves it with
/// [WriterState::ensure_space] (allocating a new page when the state starts one), draws at
/// the cursor and then advances the cursor. Footers and the cover page are the exception:
/// they are drawn at fixed positions and never touch the cursor.
pub struct ReportWriter<'s> {
    document: Document,
    fonts: FontSet,
    style: &'s ReportStyle,
    geometry: PageGeometry,
    content_width: Pt,
    state: WriterState,
    page: Id<Page>,
    pages: Vec<Id<Page>>,
    sections: usize,
    toc: Vec<TocEntry>,
}

impl<'s> ReportWriter<'s> {
    /// Start writing into `document`, appending its first content page. Fails with
    /// [ReportError::FontMissing] unless both fonts are registered with `document`.
    pub fn new(
        mut document: Document,
        fonts: FontSet,
        style: &'s ReportStyle,
    ) -> Result<ReportWriter<'s>, ReportError> {
        if document.fonts.get(fonts.regular).is_none() || document.fonts.get(fonts.bold).is_none() {
            return Err(ReportError::FontMissing);
        }
        let geometry = style.geometry;
        let page = document.add_page(Page::new(&geometry));
        Ok(ReportWriter {
            document,
            fonts,
            style,
            geometry,
            content_width: geometry.content_width(),
            state: WriterState::new(&geometry),
            page,
            pages: vec![page],
            sections: 0,
            toc: Vec::new(),
        })
    }

    pub fn state(&self) -> &WriterState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The page content is currently drawn on
    pub fn current_page(&self) -> Id<Page> {
        self.page
    }

    /// Every page the writer has created, in creation order
    pub fn pages(&self) -> &[Id<Page>] {
        &self.pages
    }

    pub fn toc_entries(&self) -> &[TocEntry] {
        &self.toc
    }

    pub fn content_width(&self) -> Pt {
        self.content_width
    }

    /// Stop writing and hand back the document
    pub fn finish(self) -> Document {
        self.document
    }

    /// Reserve `required` height below the cursor, allocating a page if one is started
    pub fn ensure_space(&mut self, required: Pt) -> PageBreak {
        let page_break = self.state.ensure_space(required);
        if page_break == PageBreak::Added {
            self.allocate_page();
        }
        page_break
    }

    /// Start a new page regardless of the room left on this one
    pub fn new_page(&mut self) {
        self.state.new_page();
        self.allocate_page();
    }

    fn allocate_page(&mut self) {
        self.page = self.document.add_page(Page::new(&self.geometry));
        self.pages.push(self.page);
    }

    /// Advance the cursor, returning how far it actually moved
    fn advance(&mut self, by: Pt) -> Pt {
        let before = self.state.cursor();
        self.state.advance(by);
        self.state.cursor() - before
    }

    fn here(&self) -> (usize, Pt) {
        (self.state.page_index(), self.state.cursor())
    }

    fn font_id(&self, bold: bool) -> Id<Font> {
        if bold {
            self.fonts.bold
        } else {
            self.fonts.regular
        }
    }

    fn font(&self, bold: bool) -> &Font {
        &self.document.fonts[self.font_id(bold)]
    }

    /// Offset from the top of a line box to the baseline of text centred in it
    fn baseline(&self, bold: bool, size: Pt, line: Pt) -> Pt {
        let font = self.font(bold);
        font.ascent(size) + (line - font.line_height(size)) / 2.0
    }

    /// Wrap `text` to the content width
    fn wrap(&self, text: &str, bold: bool, size: Pt) -> Vec<String> {
        wrap_text(text, self.font(bold), size, self.content_width)
    }

    fn text_width(&self, text: &str, bold: bool, size: Pt) -> Pt {
        self.font(bold).text_width(text, size)
    }

    fn draw_text(&mut self, page: Id<Page>, x: Pt, baseline: Pt, text: &str, face: Face) {
        if text.is_empty() {
            return;
        }
        let span = SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.font_id(face.bold),
                size: face.size,
            },
            colour: face.colour,
            coords: (x, self.geometry.to_pdf_y(baseline)),
        };
        if let Some(page) = self.document.pages.get_mut(page) {
            page.add_span(span);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_panel(
        &mut self,
        page: Id<Page>,
        x: Pt,
        top: Pt,
        width: Pt,
        height: Pt,
        corner_radius: Pt,
        fill: Option<Colour>,
        stroke: Option<(Colour, Pt)>,
    ) {
        let shape = ShapeLayout {
            rect: Rect::from_origin(x, self.geometry.to_pdf_y(top + height), width, height),
            corner_radius,
            fill,
            stroke,
        };
        if let Some(page) = self.document.pages.get_mut(page) {
            page.add_shape(shape);
        }
    }

    fn draw_rule(&mut self, page: Id<Page>, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, width: Pt) {
        let rule = RuleLayout {
            from: (from.0, self.geometry.to_pdf_y(from.1)),
            to: (to.0, self.geometry.to_pdf_y(to.1)),
            colour,
            width,
        };
        if let Some(page) = self.document.pages.get_mut(page) {
            page.add_rule(rule);
        }
    }

    /// The title block opening the first content page: document title, a line naming the
    /// organisation and date, and a rule underneath. Both text lines wrap, and the whole
    /// block is kept on one page.
    pub fn header(&mut self, meta: &ReportMeta) -> Placement {
        let style = self.style;
        let h = &style.header;

        let mut details: Vec<String> = Vec::new();
        details.extend(meta.subtitle.clone());
        details.push(meta.organisation.clone());
        details.push(meta.date.format("%-d %B %Y").to_string());
        let title_lines = self.wrap(&meta.title, true, h.title_size);
        let detail_lines = self.wrap(&details.join(" \u{b7} "), false, h.meta_size);

        let title_height = h.title_line * title_lines.len().max(1) as f32;
        let detail_height = h.meta_line * detail_lines.len().max(1) as f32;
        let required = title_height + detail_height + h.gap;
        self.ensure_space(required);
        let (page, top) = self.here();
        let left = self.geometry.margins.left;

        let face = Face {
            bold: true,
            size: h.title_size,
            colour: style.palette.ink,
        };
        let baseline = top + self.baseline(true, h.title_size, h.title_line);
        for (i, line) in title_lines.iter().enumerate() {
            self.draw_text(self.page, left, baseline + h.title_line * i as f32, line, face);
        }

        let face = Face {
            bold: false,
            size: h.meta_size,
            colour: style.palette.muted,
        };
        let baseline = top + title_height + self.baseline(false, h.meta_size, h.meta_line);
        for (i, line) in detail_lines.iter().enumerate() {
            self.draw_text(self.page, left, baseline + h.meta_line * i as f32, line, face);
        }

        let rule_y = top + title_height + detail_height + h.gap / 2.0;
        self.draw_rule(
            self.page,
            (left, rule_y),
            (left + self.content_width, rule_y),
            style.palette.rule,
            h.rule_width,
        );

        let height = self.advance(required);
        Placement { page, top, height }
    }

    /// A numbered section title: a small "SECTION 01" label over the title itself, which
    /// wraps. The title is recorded for the table of contents and the document outline.
    pub fn section_title(&mut self, title: &str) -> Placement {
        let style = self.style;
        let s = &style.section_title;
        self.sections += 1;
        let number = format!("{:02}", self.sections);
        log::debug!("section {number}: {title}");

        let title_lines = self.wrap(title, true, s.title_size);
        let lines = s.label_line + s.title_line * title_lines.len().max(1) as f32;
        self.ensure_space(s.reserve.max(lines));
        let (page, top) = self.here();
        let left = self.geometry.margins.left;

        let label = if s.label_prefix.is_empty() {
            number.clone()
        } else {
            format!("{} {}", s.label_prefix, number)
        };
        let baseline = top + self.baseline(false, s.label_size, s.label_line);
        let face = Face {
            bold: false,
            size: s.label_size,
            colour: style.palette.accent,
        };
        self.draw_text(self.page, left, baseline, &label, face);

        let baseline = top + s.label_line + self.baseline(true, s.title_size, s.title_line);
        let face = Face {
            bold: true,
            size: s.title_size,
            colour: style.palette.ink,
        };
        for (i, line) in title_lines.iter().enumerate() {
            self.draw_text(self.page, left, baseline + s.title_line * i as f32, line, face);
        }

        let anchor = self.geometry.to_pdf_y(top);
        self.document.add_bookmark(title, self.page, anchor);
        self.toc.push(TocEntry {
            label: number,
            title: title.to_string(),
            page: self.page,
        });

        let height = self.advance(lines + s.gap);
        Placement { page, top, height }
    }

    /// Body text wrapped to the content width. Every line is guarded separately, so a
    /// paragraph flows across as many pages as it needs.
    pub fn paragraph(&mut self, text: &str) -> Placement {
        let style = self.style;
        let p = &style.paragraph;
        let lines = self.wrap(text, false, p.size);
        let face = Face {
            bold: false,
            size: p.size,
            colour: style.palette.ink,
        };
        let left = self.geometry.margins.left;
        let baseline = self.baseline(false, p.size, p.line_height);

        let mut start: Option<(usize, Pt)> = None;
        let mut height = Pt(0.0);
        for line in lines.iter() {
            self.ensure_space(p.line_height);
            let (page, top) = self.here();
            start.get_or_insert((page, top));
            self.draw_text(self.page, left, top + baseline, line, face);
            height += self.advance(p.line_height);
        }

        let (page, top) = start.unwrap_or_else(|| self.here());
        height += self.advance(p.gap);
        Placement { page, top, height }
    }

    /// A single bold line with a fixed reservation; never wrapped
    pub fn subtitle(&mut self, text: &str) -> Placement {
        let style = self.style;
        let s = &style.subtitle;
        self.ensure_space(s.height);
        let (page, top) = self.here();

        let baseline = top + self.font(true).ascent(s.size);
        let face = Face {
            bold: true,
            size: s.size,
            colour: style.palette.ink,
        };
        self.draw_text(self.page, self.geometry.margins.left, baseline, text, face);

        let height = self.advance(s.height);
        Placement { page, top, height }
    }

    /// One bullet point. The text is wrapped to the content width minus the indent, and
    /// the whole item is kept on one page.
    pub fn bullet(&mut self, text: &str) -> Placement {
        let style = self.style;
        let b = &style.bullet;
        let indent = b.indent;
        let lines = wrap_text(text, self.font(false), b.size, self.content_width - indent);
        let required = b.line_height * lines.len() as f32 + b.gap;
        self.ensure_space(required);
        let (page, top) = self.here();
        let left = self.geometry.margins.left;

        let face = Face {
            bold: false,
            size: b.size,
            colour: style.palette.ink,
        };
        let baseline = self.baseline(false, b.size, b.line_height);
        if !lines.is_empty() {
            let glyph_face = Face {
                colour: style.palette.accent,
                ..face
            };
            self.draw_text(self.page, left, top + baseline, &b.glyph, glyph_face);
        }
        for (i, line) in lines.iter().enumerate() {
            let line_top = top + b.line_height * i as f32;
            self.draw_text(self.page, left + indent, line_top + baseline, line, face);
        }

        let height = self.advance(required);
        Placement { page, top, height }
    }

    /// A table row on a rounded background: label on the left, value right-aligned or at
    /// a fixed offset. Values are not wrapped.
    pub fn key_value_row(&mut self, row: &KeyValueRow) -> Placement {
        let style = self.style;
        let kv = &style.key_value;
        self.ensure_space(kv.row_height);
        let (page, top) = self.here();
        let left = self.geometry.margins.left;

        let fill = if row.emphasis {
            style.palette.panel_accent
        } else {
            style.palette.panel
        };
        self.draw_panel(
            self.page,
            left,
            top,
            self.content_width,
            kv.row_height,
            kv.corner_radius,
            Some(fill),
            None,
        );

        let bold = row.emphasis;
        let baseline = top + self.baseline(bold, kv.size, kv.row_height);
        let label_face = Face {
            bold,
            size: kv.size,
            colour: style.palette.ink,
        };
        self.draw_text(self.page, left + kv.label_offset, baseline, &row.label, label_face);

        let value_x = match kv.value {
            ValuePlacement::Right { inset } => {
                left + self.content_width - inset - self.text_width(&row.value, bold, kv.size)
            }
            ValuePlacement::Offset { offset } => left + offset,
        };
        let value_face = Face {
            colour: if row.emphasis {
                style.palette.accent
            } else {
                style.palette.ink
            },
            ..label_face
        };
        self.draw_text(self.page, value_x, baseline, &row.value, value_face);

        let height = self.advance(kv.row_height + kv.row_gap);
        Placement { page, top, height }
    }

    /// A fixed-height block of free-form items, kept on one page
    pub fn block(&mut self, block: &LayoutBlock) -> Placement {
        let style = self.style;
        self.ensure_space(block.height);
        let (page, top) = self.here();
        let left = self.geometry.margins.left;

        for item in block.items.iter() {
            match item {
                BlockItem::Text {
                    x,
                    y,
                    text,
                    size,
                    bold,
                    colour,
                } => {
                    let face = Face {
                        bold: *bold,
                        size: size.unwrap_or(style.paragraph.size),
                        colour: colour.unwrap_or(style.palette.ink),
                    };
                    self.draw_text(self.page, left + *x, top + *y, text, face);
                }
                BlockItem::Panel {
                    x,
                    y,
                    width,
                    height,
                    radius,
                    fill,
                    stroke,
                } => {
                    self.draw_panel(
                        self.page,
                        left + *x,
                        top + *y,
                        *width,
                        *height,
                        *radius,
                        *fill,
                        stroke.map(|c| (c, style.header.rule_width)),
                    );
                }
                BlockItem::Rule {
                    from,
                    to,
                    colour,
                    width,
                } => {
                    self.draw_rule(
                        self.page,
                        (left + from.0, top + from.1),
                        (left + to.0, top + to.1),
                        colour.unwrap_or(style.palette.rule),
                        width.unwrap_or(style.header.rule_width),
                    );
                }
            }
        }

        let height = self.advance(block.height + style.block_gap);
        Placement { page, top, height }
    }

    /// Draw one model section with the primitive for its kind. Bullet lists and tables
    /// draw one bullet or row per entry.
    pub fn section(&mut self, section: &Section) -> Placement {
        match section {
            Section::Title { text } => self.section_title(text),
            Section::Paragraph { text } => self.paragraph(text),
            Section::Subtitle { text } => self.subtitle(text),
            Section::Bullets { items } => {
                let placements: Vec<Placement> = items.iter().map(|item| self.bullet(item)).collect();
                self.combine(placements)
            }
            Section::Table { rows } => {
                let placements: Vec<Placement> = rows.iter().map(|row| self.key_value_row(row)).collect();
                self.combine(placements)
            }
            Section::Block(block) => self.block(block),
        }
    }

    fn combine(&self, placements: Vec<Placement>) -> Placement {
        let (page, top) = match placements.first() {
            Some(first) => (first.page, first.top),
            None => self.here(),
        };
        Placement {
            page,
            top,
            height: placements.iter().map(|p| p.height).sum(),
        }
    }

    /// Draw the footer of `page`: `text` on the left and the page number on the right, at
    /// a fixed distance from the bottom edge. The cursor is left alone.
    pub fn footer(&mut self, page: Id<Page>, ordinal: usize, total: usize, text: &str) -> Result<(), ReportError> {
        if self.document.pages.get(page).is_none() {
            return Err(ReportError::PageMissing);
        }
        let style = self.style;
        let f = &style.footer;
        let baseline = self.geometry.height - f.offset;
        let face = Face {
            bold: false,
            size: f.size,
            colour: style.palette.muted,
        };
        self.draw_text(page, self.geometry.margins.left, baseline, text, face);

        let label = f.page_label(ordinal, total);
        let x = self.geometry.width - self.geometry.margins.right - self.text_width(&label, false, f.size);
        self.draw_text(page, x, baseline, &label, face);
        Ok(())
    }

    /// Insert a cover page in front of every other page. It is laid out at fixed
    /// positions and has no effect on the cursor.
    pub fn cover(&mut self, meta: &ReportMeta) -> Id<Page> {
        let style = self.style;
        let c = &style.cover;
        let blank = Page::new(&self.geometry);
        let page = match self.document.id_of_page_index(0) {
            Some(first) => self.document.insert_page_before_id(blank, first),
            None => self.document.add_page(blank),
        };
        let left = self.geometry.margins.left;

        self.draw_panel(
            page,
            Pt(0.0),
            Pt(0.0),
            self.geometry.width,
            c.band_height,
            Pt(0.0),
            Some(style.palette.accent),
            None,
        );

        let mut y = c.title_top;
        let label_face = Face {
            bold: true,
            size: c.label_size,
            colour: style.palette.accent,
        };
        self.draw_text(page, left, y, &meta.doc_type.to_uppercase(), label_face);
        y += c.title_line;

        let title_face = Face {
            bold: true,
            size: c.title_size,
            colour: style.palette.ink,
        };
        for line in self.wrap(&meta.title, true, c.title_size) {
            self.draw_text(page, left, y, &line, title_face);
            y += c.title_line;
        }

        if let Some(subtitle) = &meta.subtitle {
            let face = Face {
                bold: false,
                size: c.subtitle_size,
                colour: style.palette.muted,
            };
            for line in self.wrap(subtitle, false, c.subtitle_size) {
                self.draw_text(page, left, y, &line, face);
                y += c.subtitle_line;
            }
        }

        let issued = format!("{} \u{b7} {}", meta.organisation, meta.date.format("%-d %B %Y"));
        let face = Face {
            bold: false,
            size: c.subtitle_size,
            colour: style.palette.muted,
        };
        self.draw_text(page, left, self.geometry.bottom_limit(), &issued, face);

        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::standard::StandardFont;

    fn style() -> ReportStyle {
        let mut style = ReportStyle::default();
        style.geometry = PageGeometry::new((Pt(400.0), Pt(300.0)), Margins::trbl(Pt(30.0), Pt(20.0), Pt(20.0), Pt(20.0)));
        style
    }

    fn writer(style: &ReportStyle) -> ReportWriter<'_> {
        let mut document = Document::default();
        let fonts = FontSet::register(
            &mut document,
            Font::from(StandardFont::Courier),
            Font::from(StandardFont::Courier),
        );
        ReportWriter::new(document, fonts, style).expect("fonts are registered")
    }

    #[test]
    fn budget_table_rows_stack_by_height_and_gap() {
        let mut style = style();
        style.key_value.row_height = Pt(10.0);
        style.key_value.row_gap = Pt(4.0);
        let mut w = writer(&style);

        let tops: Vec<Pt> = (0..4)
            .map(|i| w.key_value_row(&KeyValueRow::new(format!("row {i}"), "1")).top)
            .collect();
        assert_eq!(tops, vec![Pt(30.0), Pt(44.0), Pt(58.0), Pt(72.0)]);
        assert_eq!(w.pages().len(), 1);
    }

    #[test]
    fn empty_paragraph_only_adds_its_gap() {
        let style = style();
        let mut w = writer(&style);
        let placement = w.paragraph("   ");
        assert_eq!(placement.top, Pt(30.0));
        assert_eq!(placement.height, style.paragraph.gap);
        assert_eq!(w.state().cursor(), Pt(30.0) + style.paragraph.gap);
        let page = w.current_page();
        assert!(w.document().pages[page].text().is_empty());
    }

    #[test]
    fn paragraph_lines_flow_onto_new_pages() {
        let mut style = style();
        style.paragraph.line_height = Pt(50.0);
        let mut w = writer(&style);
        // 360pt of content width fits 60 Courier characters at 10pt
        let text = "word ".repeat(12 * 6);
        let placement = w.paragraph(&text);
        // six lines of 50pt, five fit between 30 and 280
        assert_eq!(placement.page, 0);
        assert_eq!(w.pages().len(), 2);
        assert!(w.state().cursor() <= w.state().limit());
    }

    #[test]
    fn overflowing_row_starts_a_new_page_first() {
        let mut style = style();
        style.key_value.row_height = Pt(12.0);
        style.key_value.row_gap = Pt(0.0);
        let mut w = writer(&style);
        // leave exactly 10pt above the bottom limit
        w.state.advance(Pt(240.0));
        let placement = w.key_value_row(&KeyValueRow::new("a", "b"));
        assert_eq!(placement.page, 1);
        assert_eq!(placement.top, Pt(30.0));
        assert_eq!(w.pages().len(), 2);
        let first = w.pages()[0];
        assert!(w.document().pages[first].contents.is_empty());
    }

    #[test]
    fn section_titles_are_numbered_and_recorded() {
        let style = style();
        let mut w = writer(&style);
        w.section_title("Outcome");
        w.section_title("Method");
        let page = w.current_page();
        assert_eq!(
            w.document().pages[page].text(),
            vec!["SECTION 01", "Outcome", "SECTION 02", "Method"]
        );
        let labels: Vec<&str> = w.toc_entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["01", "02"]);
        assert_eq!(w.document().outline.entries.len(), 2);
    }

    #[test]
    fn bullets_wrap_under_the_indent() {
        let mut style = style();
        style.bullet.indent = Pt(60.0);
        let mut w = writer(&style);
        // 300pt after the indent is 50 Courier characters
        let placement = w.bullet(&"abcd ".repeat(20));
        let page = w.current_page();
        let spans: Vec<&SpanLayout> = w.document().pages[page].spans().collect();
        assert_eq!(spans[0].text, "\u{2022}");
        assert_eq!(spans[0].coords.0, Pt(20.0));
        assert!(spans[1..].iter().all(|s| s.coords.0 == Pt(80.0)));
        assert_eq!(spans.len(), 3);
        assert_eq!(placement.height, style.bullet.line_height * 2.0 + style.bullet.gap);
    }

    #[test]
    fn right_aligned_values_end_at_the_inset() {
        let style = style();
        let mut w = writer(&style);
        w.key_value_row(&KeyValueRow::new("Savings", "1234"));
        let page = w.current_page();
        let value = w.document().pages[page]
            .spans()
            .find(|s| s.text == "1234")
            .cloned()
            .expect("value is drawn");
        // Courier 10pt: 4 characters are 24pt wide; row spans 20..380, inset 8
        assert_eq!(value.coords.0, Pt(380.0 - 8.0 - 24.0));
    }

    #[test]
    fn footer_leaves_the_cursor_alone() {
        let style = style();
        let mut w = writer(&style);
        w.paragraph("some text");
        let before = w.state().clone();
        let page = w.current_page();
        w.footer(page, 1, 3, "ProcureData").expect("page exists");
        assert_eq!(w.state(), &before);
        let text = w.document().pages[page].text();
        assert!(text.contains(&"Page 1 of 3"));
        let footer = w.document().pages[page]
            .spans()
            .find(|s| s.text == "ProcureData")
            .cloned()
            .expect("footer text is drawn");
        assert_eq!(footer.coords.1, style.footer.offset);
    }

    #[test]
    fn blocks_offset_items_from_the_cursor() {
        let style = style();
        let mut w = writer(&style);
        w.state.advance(Pt(10.0));
        let block = LayoutBlock::new(Pt(40.0)).item(BlockItem::Text {
            x: Pt(5.0),
            y: Pt(15.0),
            text: "42%".into(),
            size: None,
            bold: true,
            colour: None,
        });
        let placement = w.block(&block);
        assert_eq!(placement.top, Pt(40.0));
        assert_eq!(placement.height, Pt(40.0) + style.block_gap);
        let page = w.current_page();
        let span = w.document().pages[page].spans().next().cloned().expect("drawn");
        assert_eq!(span.coords, (Pt(25.0), Pt(300.0 - 55.0)));
    }

    #[test]
    fn cover_goes_first_without_moving_the_cursor() {
        let style = style();
        let mut w = writer(&style);
        w.paragraph("body");
        let cursor = w.state().cursor();
        let meta = ReportMeta::new(
            "Case Study",
            "Route optimisation",
            "ProcureData",
            chrono::NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        );
        let cover = w.cover(&meta);
        assert_eq!(w.document().index_of_page(cover), Some(0));
        assert_eq!(w.state().cursor(), cursor);
        assert!(w.document().pages[cover].text().contains(&"CASE STUDY"));
    }

    /// Every span on the current page ends at or before the right margin
    fn assert_inside_right_margin(w: &ReportWriter<'_>, style: &ReportStyle) {
        let right = style.geometry.width - style.geometry.margins.right;
        let page = w.current_page();
        for span in w.document().pages[page].spans() {
            let width = w.document().fonts[span.font.id].text_width(&span.text, span.font.size);
            assert!(
                span.coords.0 + width <= right + Pt(0.01),
                "{:?} ends at {}, past {}",
                span.text,
                span.coords.0 + width,
                right
            );
        }
    }

    #[test]
    fn long_titles_wrap_inside_the_margins() {
        let style = style();
        let mut w = writer(&style);
        let title = "Predictive maintenance for regional rail fleets using shared sensor data from three operators";
        let meta = ReportMeta::new(
            "Case Study",
            title,
            "ProcureData",
            chrono::NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        );

        // Courier 20pt: 30 characters per 360pt line
        let header_lines = wrap_text(title, &StandardFont::Courier, style.header.title_size, w.content_width()).len();
        assert!(header_lines > 1);
        let header = w.header(&meta);
        let h = &style.header;
        assert_eq!(header.height, h.title_line * header_lines as f32 + h.meta_line + h.gap);

        let title_lines = wrap_text(title, &StandardFont::Courier, style.section_title.title_size, w.content_width()).len();
        assert!(title_lines > 1);
        let section = w.section_title(title);
        let s = &style.section_title;
        assert_eq!(section.page, 0);
        assert_eq!(section.height, s.label_line + s.title_line * title_lines as f32 + s.gap);

        assert_inside_right_margin(&w, &style);
        assert!(w.state().cursor() <= w.state().limit());
    }
}
