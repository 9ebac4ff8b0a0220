use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::error::ReportError;
use crate::font::Font;
use crate::layout::PageGeometry;
use crate::standard::StandardFont;
use crate::units::Pt;
use id_arena::Id;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every tunable of a report's appearance. Missing fields in a JSON style fall back to the
/// defaults, so a style file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportStyle {
    pub geometry: PageGeometry,
    pub palette: Palette,
    pub fonts: FontChoice,
    pub header: HeaderStyle,
    pub section_title: SectionTitleStyle,
    pub paragraph: ParagraphStyle,
    pub subtitle: SubtitleStyle,
    pub bullet: BulletStyle,
    pub key_value: KeyValueStyle,
    pub footer: FooterStyle,
    pub cover: CoverStyle,
    /// Gap left below a layout block
    pub block_gap: Pt,
    /// Start the report with a cover page
    pub cover_page: bool,
    /// List the section titles and their pages after the cover
    pub table_of_contents: bool,
    pub toc_title: String,
    /// Deflate page content streams
    pub compress: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        ReportStyle {
            geometry: PageGeometry::a4(),
            palette: Palette::default(),
            fonts: FontChoice::default(),
            header: HeaderStyle::default(),
            section_title: SectionTitleStyle::default(),
            paragraph: ParagraphStyle::default(),
            subtitle: SubtitleStyle::default(),
            bullet: BulletStyle::default(),
            key_value: KeyValueStyle::default(),
            footer: FooterStyle::default(),
            cover: CoverStyle::default(),
            block_gap: Pt(10.0),
            cover_page: false,
            table_of_contents: false,
            toc_title: "Contents".into(),
            compress: true,
        }
    }
}

impl ReportStyle {
    pub fn from_json(json: &str) -> Result<ReportStyle, ReportError> {
        let style: ReportStyle = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ReportStyle, ReportError> {
        let json = std::fs::read_to_string(path)?;
        ReportStyle::from_json(&json)
    }

    /// Check the page has room for content, that every line and row is taller than zero,
    /// that every font size is positive, and that no gap would move the cursor backwards
    pub fn validate(&self) -> Result<(), ReportError> {
        self.geometry.validate()?;

        let extents = [
            ("header.title_line", self.header.title_line),
            ("header.meta_line", self.header.meta_line),
            ("section_title.label_line", self.section_title.label_line),
            ("section_title.title_line", self.section_title.title_line),
            ("paragraph.line_height", self.paragraph.line_height),
            ("subtitle.height", self.subtitle.height),
            ("bullet.line_height", self.bullet.line_height),
            ("key_value.row_height", self.key_value.row_height),
            ("cover.title_line", self.cover.title_line),
            ("cover.subtitle_line", self.cover.subtitle_line),
            ("header.title_size", self.header.title_size),
            ("header.meta_size", self.header.meta_size),
            ("section_title.label_size", self.section_title.label_size),
            ("section_title.title_size", self.section_title.title_size),
            ("paragraph.size", self.paragraph.size),
            ("subtitle.size", self.subtitle.size),
            ("bullet.size", self.bullet.size),
            ("key_value.size", self.key_value.size),
            ("footer.size", self.footer.size),
            ("cover.label_size", self.cover.label_size),
            ("cover.title_size", self.cover.title_size),
            ("cover.subtitle_size", self.cover.subtitle_size),
        ];
        if let Some((name, value)) = extents
            .iter()
            .find(|(_, value)| !value.is_finite() || value.0 <= 0.0)
        {
            return Err(ReportError::InvalidGeometry(format!(
                "{name} must be finite and positive, got {value}"
            )));
        }

        let gaps = [
            ("header.gap", self.header.gap),
            ("section_title.reserve", self.section_title.reserve),
            ("section_title.gap", self.section_title.gap),
            ("paragraph.gap", self.paragraph.gap),
            ("bullet.gap", self.bullet.gap),
            ("key_value.row_gap", self.key_value.row_gap),
            ("block_gap", self.block_gap),
        ];
        if let Some((name, value)) = gaps
            .iter()
            .find(|(_, value)| !value.is_finite() || value.0 < 0.0)
        {
            return Err(ReportError::InvalidGeometry(format!(
                "{name} must be finite and non-negative, got {value}"
            )));
        }
        if self.bullet.indent >= self.geometry.content_width() {
            return Err(ReportError::InvalidGeometry(format!(
                "bullet indent {} leaves no room for text",
                self.bullet.indent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub ink: Colour,
    pub muted: Colour,
    pub accent: Colour,
    pub panel: Colour,
    pub panel_accent: Colour,
    pub rule: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            ink: colours::INK,
            muted: colours::MUTED,
            accent: colours::ACCENT,
            panel: colours::PANEL,
            panel_accent: colours::PANEL_ACCENT,
            rule: colours::RULE,
        }
    }
}

/// The standard fonts used when no TrueType faces are supplied
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontChoice {
    pub regular: StandardFont,
    pub bold: StandardFont,
}

impl Default for FontChoice {
    fn default() -> Self {
        FontChoice {
            regular: StandardFont::Helvetica,
            bold: StandardFont::HelveticaBold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub title_size: Pt,
    pub title_line: Pt,
    pub meta_size: Pt,
    pub meta_line: Pt,
    pub rule_width: Pt,
    /// Space below the meta line; the rule sits in its middle
    pub gap: Pt,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        HeaderStyle {
            title_size: Pt(20.0),
            title_line: Pt(26.0),
            meta_size: Pt(9.0),
            meta_line: Pt(14.0),
            rule_width: Pt(0.75),
            gap: Pt(18.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionTitleStyle {
    /// Text before the section number on the label line
    pub label_prefix: String,
    pub label_size: Pt,
    pub label_line: Pt,
    pub title_size: Pt,
    pub title_line: Pt,
    /// Minimum room required below the cursor before a title is drawn, so a title is
    /// never stranded at the foot of a page
    pub reserve: Pt,
    pub gap: Pt,
}

impl Default for SectionTitleStyle {
    fn default() -> Self {
        SectionTitleStyle {
            label_prefix: "SECTION".into(),
            label_size: Pt(8.0),
            label_line: Pt(12.0),
            title_size: Pt(15.0),
            title_line: Pt(20.0),
            reserve: Pt(57.0),
            gap: Pt(8.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub size: Pt,
    pub line_height: Pt,
    pub gap: Pt,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle {
            size: Pt(10.0),
            line_height: Pt(14.0),
            gap: Pt(6.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleStyle {
    pub size: Pt,
    /// Reserved and advanced in one go; includes the space below the line
    pub height: Pt,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        SubtitleStyle {
            size: Pt(12.0),
            height: Pt(20.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletStyle {
    pub glyph: String,
    pub size: Pt,
    pub line_height: Pt,
    /// Distance from the left margin to the bullet text
    pub indent: Pt,
    pub gap: Pt,
}

impl Default for BulletStyle {
    fn default() -> Self {
        BulletStyle {
            glyph: "\u{2022}".into(),
            size: Pt(10.0),
            line_height: Pt(14.0),
            indent: Pt(14.0),
            gap: Pt(3.0),
        }
    }
}

/// Where the value of a key-value row goes
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "align", rename_all = "snake_case")]
pub enum ValuePlacement {
    /// Right-aligned, `inset` in from the row's right edge
    Right { inset: Pt },
    /// Left-aligned at `offset` from the row's left edge
    Offset { offset: Pt },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValueStyle {
    pub size: Pt,
    pub row_height: Pt,
    pub row_gap: Pt,
    pub corner_radius: Pt,
    pub label_offset: Pt,
    pub value: ValuePlacement,
}

impl Default for KeyValueStyle {
    fn default() -> Self {
        KeyValueStyle {
            size: Pt(10.0),
            row_height: Pt(22.0),
            row_gap: Pt(4.0),
            corner_radius: Pt(3.0),
            label_offset: Pt(8.0),
            value: ValuePlacement::Right { inset: Pt(8.0) },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterStyle {
    /// Distance from the bottom edge of the page to the footer baseline
    pub offset: Pt,
    pub size: Pt,
    /// Page number text; `{page}` and `{total}` are substituted
    pub page_format: String,
}

impl Default for FooterStyle {
    fn default() -> Self {
        FooterStyle {
            offset: Pt(28.0),
            size: Pt(8.0),
            page_format: "Page {page} of {total}".into(),
        }
    }
}

impl FooterStyle {
    pub fn page_label(&self, page: usize, total: usize) -> String {
        self.page_format
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverStyle {
    /// Height of the accent band across the top edge
    pub band_height: Pt,
    /// Distance from the top edge to the document type label
    pub title_top: Pt,
    pub label_size: Pt,
    pub title_size: Pt,
    pub title_line: Pt,
    pub subtitle_size: Pt,
    pub subtitle_line: Pt,
}

impl Default for CoverStyle {
    fn default() -> Self {
        CoverStyle {
            band_height: Pt(12.0),
            title_top: Pt(260.0),
            label_size: Pt(10.0),
            title_size: Pt(28.0),
            title_line: Pt(34.0),
            subtitle_size: Pt(13.0),
            subtitle_line: Pt(18.0),
        }
    }
}

/// The regular and bold faces a report is set in. Both ids must belong to the document
/// the report is written into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontSet {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
}

impl FontSet {
    /// Register a pair of fonts with `document`
    pub fn register(document: &mut Document, regular: Font, bold: Font) -> FontSet {
        FontSet {
            regular: document.add_font(regular),
            bold: document.add_font(bold),
        }
    }

    /// Register the standard fonts named by `choice`
    pub fn standard(document: &mut Document, choice: FontChoice) -> FontSet {
        FontSet::register(document, choice.regular.into(), choice.bold.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;

    #[test]
    fn partial_json_keeps_defaults() {
        let style = ReportStyle::from_json(
            r#"{
                "key_value": { "row_height": 10, "row_gap": 4, "value": { "align": "offset", "offset": 120 } },
                "table_of_contents": true
            }"#,
        )
        .expect("style parses");
        assert_eq!(style.key_value.row_height, Pt(10.0));
        assert_eq!(style.key_value.value, ValuePlacement::Offset { offset: Pt(120.0) });
        assert_eq!(style.key_value.corner_radius, Pt(3.0));
        assert!(style.table_of_contents);
        assert_eq!(style.paragraph, ParagraphStyle::default());
        assert_eq!(style.geometry, PageGeometry::a4());
    }

    #[test]
    fn rejects_geometry_without_content_area() {
        let mut style = ReportStyle::default();
        style.geometry.margins = Margins::all(Pt(400.0));
        assert!(matches!(style.validate(), Err(ReportError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_negative_heights() {
        let mut style = ReportStyle::default();
        style.paragraph.line_height = Pt(-1.0);
        assert!(matches!(style.validate(), Err(ReportError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_zero_line_height() {
        let mut style = ReportStyle::default();
        style.paragraph.line_height = Pt(0.0);
        assert!(matches!(style.validate(), Err(ReportError::InvalidGeometry(m)) if m.contains("paragraph.line_height")));

        let mut style = ReportStyle::default();
        style.key_value.row_height = Pt(0.0);
        assert!(style.validate().is_err());
    }

    #[test]
    fn rejects_unusable_font_sizes() {
        let mut style = ReportStyle::default();
        style.footer.size = Pt(0.0);
        assert!(style.validate().is_err());

        let mut style = ReportStyle::default();
        style.paragraph.size = Pt(f32::INFINITY);
        assert!(style.validate().is_err());
    }

    #[test]
    fn zero_gaps_are_allowed() {
        let mut style = ReportStyle::default();
        style.paragraph.gap = Pt(0.0);
        style.key_value.row_gap = Pt(0.0);
        style.block_gap = Pt(0.0);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn zero_heights_fail_to_load() {
        assert!(ReportStyle::from_json(r#"{ "bullet": { "line_height": 0 } }"#).is_err());
    }

    #[test]
    fn mistyped_colours_fail_to_load() {
        let json = r#"{ "palette": { "accent": { "r": 1.0, "g": 0.2 } } }"#;
        assert!(matches!(ReportStyle::from_json(json), Err(ReportError::Json(_))));

        let style = ReportStyle::from_json(r##"{ "palette": { "accent": "#ff0000" } }"##).expect("hex accent");
        assert_eq!(style.palette.accent, Colour::new_rgb_bytes(255, 0, 0));
    }

    #[test]
    fn footer_label() {
        assert_eq!(FooterStyle::default().page_label(2, 7), "Page 2 of 7");
    }
}
