use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::layout::PageGeometry;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::ReportError;
use id_arena::{Arena, Id};
use std::collections::BTreeSet;
use pdf_writer::{Filter, Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text in a single font and colour, starting at a baseline position in PDF
/// page space
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A filled and/or stroked rectangle, optionally with rounded corners
#[derive(Clone, PartialEq, Debug)]
pub struct ShapeLayout {
    pub rect: Rect,
    pub corner_radius: Pt,
    pub fill: Option<Colour>,
    pub stroke: Option<(Colour, Pt)>,
}

/// A straight line
#[derive(Clone, PartialEq, Debug)]
pub struct RuleLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub colour: Colour,
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Shape(ShapeLayout),
    Rule(RuleLayout),
}

#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(geometry: &PageGeometry) -> Page {
        Page {
            media_box: geometry.media_box(),
            content_box: geometry.content_box(),
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_shape(&mut self, shape: ShapeLayout) {
        self.contents.push(PageContents::Shape(shape));
    }

    pub fn add_rule(&mut self, rule: RuleLayout) {
        self.contents.push(PageContents::Rule(rule));
    }

    /// All text spans on the page, in painting order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().flat_map(|c| match c {
            PageContents::Text(spans) => spans.as_slice(),
            _ => &[] as &[SpanLayout],
        })
    }

    /// The page's text, one span per line of output
    pub fn text(&self) -> Vec<&str> {
        self.spans().map(|s| s.text.as_str()).collect()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        compress: bool,
        missing: &mut BTreeSet<char>,
        writer: &mut Pdf,
    ) -> Result<(), ReportError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(ReportError::PageMissing)?;
        let page_tree_id = refs
            .get(RefType::PageTree)
            .ok_or(ReportError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, fonts, missing)?;
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&rendered, 6);
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        } else {
            writer.stream(content_id, rendered.as_slice());
        }

        Ok(())
    }
}
