use crate::{
    refs::{ObjectReferences, RefType},
    standard::{to_winansi_bytes, StandardFont},
    Pt, ReportError,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::collections::{BTreeMap, BTreeSet};

/// The text measurement facility layout depends on.
///
/// Word wrapping, right alignment and baseline placement only ever ask a font these
/// questions, so anything that can answer them (a real font, or a fixed-advance stand-in)
/// can drive the report writer.
pub trait TextMeasure {
    /// Advance width of `text` set at `size`
    fn text_width(&self, text: &str, size: Pt) -> Pt;

    /// Distance from the baseline to the top of the tallest glyphs
    fn ascent(&self, size: Pt) -> Pt;

    /// Distance from the baseline to the bottom of the lowest glyphs; usually negative
    fn descent(&self, size: Pt) -> Pt;

    /// Natural distance between two baselines
    fn line_height(&self, size: Pt) -> Pt {
        self.ascent(size) - self.descent(size)
    }
}

impl TextMeasure for StandardFont {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        StandardFont::text_width(self, text, size)
    }

    fn ascent(&self, size: Pt) -> Pt {
        StandardFont::ascent(self, size)
    }

    fn descent(&self, size: Pt) -> Pt {
        StandardFont::descent(self, size)
    }
}

/// A font registered with a [crate::Document]. Pages refer to fonts by their arena id.
pub enum Font {
    /// One of the fonts every PDF viewer provides; nothing is embedded
    Standard(StandardFont),
    /// A TrueType / OpenType face embedded in full
    TrueType(TrueTypeFont),
}

impl Font {
    /// Load a TrueType or OpenType font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, ReportError> {
        Ok(Font::TrueType(TrueTypeFont::load(bytes)?))
    }

    /// Encode text the way this font's content stream operands expect. Characters the
    /// font cannot show are replaced and recorded in `missing`.
    pub(crate) fn encode(&self, text: &str, missing: &mut BTreeSet<char>) -> Vec<u8> {
        match self {
            Font::Standard(_) => to_winansi_bytes(text, missing),
            Font::TrueType(font) => text
                .chars()
                .flat_map(|ch| {
                    if font.glyph_id(ch).is_none() {
                        missing.insert(ch);
                    }
                    font.glyph_id_or_replacement(ch).to_be_bytes()
                })
                .collect(),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        match self {
            Font::Standard(standard) => {
                let font_id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(font_id)
                    .base_font(Name(standard.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Font::TrueType(font) => font.write(refs, font_index, writer),
        }
    }
}

impl From<StandardFont> for Font {
    fn from(font: StandardFont) -> Self {
        Font::Standard(font)
    }
}

impl TextMeasure for Font {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => f.text_width(text, size),
            Font::TrueType(f) => f.text_width(text, size),
        }
    }

    fn ascent(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => StandardFont::ascent(f, size),
            Font::TrueType(f) => f.ascent(size),
        }
    }

    fn descent(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => StandardFont::descent(f, size),
            Font::TrueType(f) => f.descent(size),
        }
    }

    fn line_height(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(f) => f.line_height(size),
            Font::TrueType(f) => f.line_height(size),
        }
    }
}

/// A parsed TrueType / OpenType face. The whole font file is embedded as a CID font with
/// Identity-H encoding, so large fonts noticeably grow the generated report.
pub struct TrueTypeFont {
    pub face: OwnedFace,
}

impl TrueTypeFont {
    pub fn load(bytes: Vec<u8>) -> Result<TrueTypeFont, ReportError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(TrueTypeFont { face })
    }

    fn scale(&self, size: Pt) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// The PostScript name, or `None` if the font does not carry one
    pub fn postscript_name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|name| name.to_string())
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|g| g.0)
    }

    /// Glyph for `ch`, falling back to U+FFFD, then `?`, then `.notdef`
    fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Width of a glyph in PDF text space units (1/1000 em)
    fn glyph_width_1000(&self, gid: u16) -> f32 {
        let face = self.face.as_face_ref();
        face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * 1000.0
            / face.units_per_em() as f32
    }

    fn text_width(&self, text: &str, size: Pt) -> Pt {
        let units: f32 = text
            .chars()
            .map(|ch| self.glyph_width_1000(self.glyph_id_or_replacement(ch)))
            .sum();
        Pt(size.0 * units / 1000.0)
    }

    fn ascent(&self, size: Pt) -> Pt {
        Pt(self.scale(size) * self.face.as_face_ref().ascender() as f32)
    }

    fn descent(&self, size: Pt) -> Pt {
        Pt(self.scale(size) * self.face.as_face_ref().descender() as f32)
    }

    fn line_height(&self, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let units = face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32;
        Pt(self.scale(size) * units)
    }

    /// Every glyph the cmap can reach, with the first character that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let glyphs = self.glyph_chars();
        let base_font = self
            .postscript_name()
            .filter(|n| n.is_ascii() && !n.contains(char::is_whitespace))
            .unwrap_or_else(|| format!("F{font_index}"));

        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let descriptor_id = refs.gen(RefType::FontDescriptor(font_index));
        let data_id = refs.gen(RefType::FontData(font_index));
        let to_unicode_id = refs.gen(RefType::ToUnicode(font_index));

        writer
            .type0_font(font_id)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(self.glyph_width_1000(0));
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        // one /W entry per run of consecutive glyph ids
        let mut widths = cid_font.widths();
        let mut run: Vec<f32> = Vec::new();
        let mut run_start: u16 = 0;
        for &gid in glyphs.keys() {
            if !run.is_empty() && gid as usize != run_start as usize + run.len() {
                widths.consecutive(run_start, run.drain(..));
            }
            if run.is_empty() {
                run_start = gid;
            }
            run.push(self.glyph_width_1000(gid));
        }
        if !run.is_empty() {
            widths.consecutive(run_start, run.drain(..));
        }
        widths.finish();
        cid_font.finish();

        let face = self.face.as_face_ref();
        let to_1000 = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();
        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let mut descriptor = writer.font_descriptor(descriptor_id);
        descriptor.name(Name(base_font.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * to_1000,
            bbox.y_min as f32 * to_1000,
            bbox.x_max as f32 * to_1000,
            bbox.y_max as f32 * to_1000,
        ));
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * to_1000);
        descriptor.descent(face.descender() as f32 * to_1000);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * to_1000)
                .unwrap_or(face.ascender() as f32 * to_1000),
        );
        // not recorded in TrueType fonts; a typical regular-weight value
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let cmap = to_unicode_cmap(&glyphs);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(cmap.as_bytes(), 6);
        writer
            .stream(to_unicode_id, compressed.as_slice())
            .filter(Filter::FlateDecode);
    }
}

/// Build the ToUnicode CMap that lets viewers copy text out of glyph-id strings
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    // bfchar sections hold at most 100 entries
    for block in entries.chunks(100) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmap_lists_every_glyph() {
        let glyphs: BTreeMap<u16, char> = [(3, 'A'), (4, 'B'), (700, '\u{1F600}')].into_iter().collect();
        let cmap = to_unicode_cmap(&glyphs);
        assert!(cmap.contains("3 beginbfchar"));
        assert!(cmap.contains("<0003> <0041>"));
        assert!(cmap.contains("<02bc> <d83dde00>"));
    }

    #[test]
    fn standard_fonts_measure_through_the_trait() {
        let font: Font = StandardFont::Courier.into();
        assert_eq!(font.text_width("abc", Pt(10.0)), Pt(18.0));
        assert!(font.line_height(Pt(10.0)) > Pt(7.0));
        let mut missing = BTreeSet::new();
        assert_eq!(font.encode("a\u{2022}", &mut missing), vec![b'a', 0x95]);
        assert!(missing.is_empty());
    }
}
