use crate::page::Page;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::Id;
use pdf_writer::{Finish, Pdf, Ref, TextStr};

/// A flat list of bookmarks, one per section title
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// The page the bookmark jumps to. Stored by id, so inserting a cover or table of
    /// contents page in front of it later keeps the bookmark pointing at the right page.
    pub page: Id<Page>,
    /// Height on the page to scroll to, in PDF page space
    pub top: Pt,
    pub title: String,
}

impl Outline {
    pub fn add_bookmark(&mut self, page: Id<Page>, top: Pt, title: String) {
        self.entries.push(OutlineEntry { page, top, title });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the outline tree. Entries whose page is not in `page_order` are skipped.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_order: &[Id<Page>],
        writer: &mut Pdf,
    ) -> Option<Ref> {
        let entries: Vec<(&OutlineEntry, Ref)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let page_index = page_order.iter().position(|p| *p == entry.page)?;
                refs.get(RefType::Page(page_index)).map(|page_ref| (entry, page_ref))
            })
            .collect();
        if entries.is_empty() {
            return None;
        }

        // generate IDs for everything
        let outlines_id = refs.gen(RefType::Outlines);
        let item_ids: Vec<Ref> = (0..entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        outline.first(item_ids[0]);
        outline.last(item_ids[item_ids.len() - 1]);
        outline.count(item_ids.len() as i32);
        outline.finish();

        for (i, (entry, page_ref)) in entries.iter().enumerate() {
            let mut item = writer.outline_item(item_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if i + 1 < item_ids.len() {
                item.next(item_ids[i + 1]);
            }
            item.dest().page(*page_ref).xyz(0.0, entry.top.0, None);
            item.finish();
        }

        Some(outlines_id)
    }
}
