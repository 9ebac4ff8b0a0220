use crate::{
    font::Font,
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    units::Pt,
    ReportError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::collections::BTreeSet;

/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::to_bytes]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub outline: Outline,
    /// Deflate page content streams when writing
    pub compress: bool,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            info: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            fonts: Arena::new(),
            outline: Outline::default(),
            compress: true,
        }
    }
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Number of pages currently in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a page to the end of the document, returning its id. The id stays valid when
    /// pages are inserted or moved later; the page's index does not.
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add a page to the document, inserting it before the page identified by `next`.
    /// If there is no page identified by `next`, the page will be added to the end of
    /// the document.
    pub fn insert_page_before_id(&mut self, page: Page, next: Id<Page>) -> Id<Page> {
        let id = self.pages.alloc(page);
        match self.index_of_page(next) {
            Some(index) => self.page_order.insert(index, id),
            None => self.page_order.push(id),
        }
        id
    }

    /// Move the last `count` pages, keeping their relative order, so the first of them
    /// ends up at `index`. Pages laid out after the fact (a table of contents, say) are
    /// put in place this way.
    pub fn move_last_pages(&mut self, count: usize, index: usize) {
        let count = count.min(self.page_order.len());
        let split = self.page_order.len() - count;
        let index = index.min(split);
        let moved: Vec<Id<Page>> = self.page_order.drain(split..).collect();
        self.page_order.splice(index..index, moved);
    }

    /// Get the 0-based index of a page given its ID. Note that changing the page order
    /// after this call _will_ invalidate the returned page index
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|p| *p == page)
    }

    /// Get the page Id of a page at the given index. Returns [None] if
    /// `page_index >= self.page_order.len()`.
    pub fn id_of_page_index(&self, page_index: usize) -> Option<Id<Page>> {
        self.page_order.get(page_index).copied()
    }

    /// Pages in document order
    pub fn pages_in_order(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can refer to it by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add a bookmark to the document outline that jumps to `top` (in PDF page space) on
    /// the given page
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page: Id<Page>, top: Pt) {
        self.outline.add_bookmark(page, top, title.to_string());
    }

    /// Render the document into a PDF file held in memory
    pub fn to_bytes(self) -> Result<Vec<u8>, ReportError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            outline,
            compress,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not by arena index
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        let mut missing = BTreeSet::new();
        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(ReportError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, compress, &mut missing, &mut writer)?;
        }
        for ch in missing {
            log::warn!("{ch:?} has no glyph in its font and was substituted");
        }

        let outlines_id = outline.write(&mut refs, &page_order, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        catalog.finish();

        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;
    use crate::standard::StandardFont;

    fn doc_with_pages(n: usize) -> (Document, Vec<Id<Page>>) {
        let geometry = PageGeometry::a4();
        let mut doc = Document::default();
        let ids = (0..n).map(|_| doc.add_page(Page::new(&geometry))).collect();
        (doc, ids)
    }

    #[test]
    fn inserting_keeps_ids_stable() {
        let (mut doc, ids) = doc_with_pages(2);
        let cover = doc.insert_page_before_id(Page::new(&PageGeometry::a4()), ids[0]);
        assert_eq!(doc.index_of_page(cover), Some(0));
        assert_eq!(doc.index_of_page(ids[0]), Some(1));
        let dangling = doc_with_pages(1).1[0];
        let tail = doc.insert_page_before_id(Page::new(&PageGeometry::a4()), dangling);
        assert_eq!(doc.id_of_page_index(3), Some(tail));
    }

    #[test]
    fn moves_trailing_pages_into_place() {
        let (mut doc, ids) = doc_with_pages(5);
        doc.move_last_pages(2, 1);
        assert_eq!(doc.page_order, vec![ids[0], ids[3], ids[4], ids[1], ids[2]]);

        doc.move_last_pages(10, 0);
        assert_eq!(doc.page_count(), 5);
    }

    #[test]
    fn writes_a_pdf() {
        let (mut doc, ids) = doc_with_pages(2);
        doc.add_font(StandardFont::Helvetica.into());
        doc.add_bookmark("Second", ids[1], Pt(700.0));
        doc.compress = false;
        let bytes = doc.to_bytes().expect("document renders");
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica"));
        assert!(text.contains("/Outlines"));
    }
}
