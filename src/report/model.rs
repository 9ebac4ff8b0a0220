use crate::colour::Colour;
use crate::error::ReportError;
use crate::units::Pt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Describes the report as a whole; shown in the header, on the cover and in the PDF
/// metadata, and used to name the output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Kind of report, e.g. "Case Study" or "ROI Summary". The file name is derived from it.
    pub doc_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// The organisation the report is issued by or for
    pub organisation: String,
    /// Generation date
    pub date: NaiveDate,
}

impl ReportMeta {
    pub fn new<D: ToString, T: ToString, O: ToString>(
        doc_type: D,
        title: T,
        organisation: O,
        date: NaiveDate,
    ) -> ReportMeta {
        ReportMeta {
            doc_type: doc_type.to_string(),
            title: title.to_string(),
            subtitle: None,
            organisation: organisation.to_string(),
            date,
        }
    }

    pub fn with_subtitle<S: ToString>(mut self, subtitle: S) -> ReportMeta {
        self.subtitle = Some(subtitle.to_string());
        self
    }
}

/// One row of a budget / KPI table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueRow {
    pub label: String,
    pub value: String,
    /// Totals and headline figures are drawn in bold on the accent background
    #[serde(default)]
    pub emphasis: bool,
}

impl KeyValueRow {
    pub fn new<L: ToString, V: ToString>(label: L, value: V) -> KeyValueRow {
        KeyValueRow {
            label: label.to_string(),
            value: value.to_string(),
            emphasis: false,
        }
    }

    pub fn emphasised<L: ToString, V: ToString>(label: L, value: V) -> KeyValueRow {
        KeyValueRow {
            emphasis: true,
            ..KeyValueRow::new(label, value)
        }
    }
}

/// Something drawn inside a [LayoutBlock]. Positions are relative to the block's top-left
/// corner and grow to the right and downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockItem {
    /// A single unwrapped line of text; `y` is the baseline
    Text {
        x: Pt,
        y: Pt,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<Pt>,
        #[serde(default)]
        bold: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        colour: Option<Colour>,
    },
    /// A rectangle, optionally rounded; `y` is its top edge
    Panel {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        #[serde(default)]
        radius: Pt,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Colour>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<Colour>,
    },
    /// A straight line between two points
    Rule {
        from: (Pt, Pt),
        to: (Pt, Pt),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        colour: Option<Colour>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<Pt>,
    },
}

impl BlockItem {
    fn coordinates(&self) -> Vec<Pt> {
        match self {
            BlockItem::Text { x, y, size, .. } => {
                let mut c = vec![*x, *y];
                c.extend(size);
                c
            }
            BlockItem::Panel {
                x,
                y,
                width,
                height,
                radius,
                ..
            } => vec![*x, *y, *width, *height, *radius],
            BlockItem::Rule { from, to, width, .. } => {
                let mut c = vec![from.0, from.1, to.0, to.1];
                c.extend(width);
                c
            }
        }
    }
}

/// A fixed-height block of free-form content: metric cards, callouts and the like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub height: Pt,
    #[serde(default)]
    pub items: Vec<BlockItem>,
}

impl LayoutBlock {
    pub fn new(height: Pt) -> LayoutBlock {
        LayoutBlock {
            height,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: BlockItem) -> LayoutBlock {
        self.items.push(item);
        self
    }
}

/// One entry of a report, drawn by the primitive of the same name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    /// A numbered section heading
    Title { text: String },
    Paragraph { text: String },
    Subtitle { text: String },
    Bullets { items: Vec<String> },
    Table { rows: Vec<KeyValueRow> },
    Block(LayoutBlock),
}

impl Section {
    /// Every tag a serialised section may carry
    pub const TAGS: [&'static str; 6] = ["title", "paragraph", "subtitle", "bullets", "table", "block"];

    pub fn tag(&self) -> &'static str {
        match self {
            Section::Title { .. } => "title",
            Section::Paragraph { .. } => "paragraph",
            Section::Subtitle { .. } => "subtitle",
            Section::Bullets { .. } => "bullets",
            Section::Table { .. } => "table",
            Section::Block(_) => "block",
        }
    }
}

/// Everything a report shows, in order. Values are already computed and formatted; the
/// writer only lays them out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub meta: ReportMeta,
    pub sections: Vec<Section>,
}

#[derive(Deserialize)]
struct RawModel {
    meta: ReportMeta,
    #[serde(default)]
    sections: Vec<serde_json::Value>,
}

impl ReportModel {
    pub fn new(meta: ReportMeta) -> ReportModel {
        ReportModel {
            meta,
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, section: Section) -> ReportModel {
        self.sections.push(section);
        self
    }

    pub fn title<S: ToString>(self, text: S) -> ReportModel {
        self.section(Section::Title {
            text: text.to_string(),
        })
    }

    pub fn paragraph<S: ToString>(self, text: S) -> ReportModel {
        self.section(Section::Paragraph {
            text: text.to_string(),
        })
    }

    pub fn subtitle<S: ToString>(self, text: S) -> ReportModel {
        self.section(Section::Subtitle {
            text: text.to_string(),
        })
    }

    pub fn bullets<I, S>(self, items: I) -> ReportModel
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.section(Section::Bullets {
            items: items.into_iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn table<I: IntoIterator<Item = KeyValueRow>>(self, rows: I) -> ReportModel {
        self.section(Section::Table {
            rows: rows.into_iter().collect(),
        })
    }

    pub fn block(self, block: LayoutBlock) -> ReportModel {
        self.section(Section::Block(block))
    }

    /// Parse a model from JSON. Sections are checked one at a time so an unknown or
    /// malformed section is reported with its position.
    pub fn from_json(json: &str) -> Result<ReportModel, ReportError> {
        let raw: RawModel = serde_json::from_str(json)?;
        let sections = raw
            .sections
            .into_iter()
            .enumerate()
            .map(|(index, value)| parse_section(index, value))
            .collect::<Result<Vec<Section>, ReportError>>()?;
        Ok(ReportModel {
            meta: raw.meta,
            sections,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ReportModel, ReportError> {
        let json = std::fs::read_to_string(path)?;
        ReportModel::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Reject layout blocks that could not be placed: heights must be positive and every
    /// coordinate finite
    pub fn validate(&self) -> Result<(), ReportError> {
        for (index, section) in self.sections.iter().enumerate() {
            let Section::Block(block) = section else {
                continue;
            };
            if !block.height.is_finite() || block.height <= Pt(0.0) {
                return Err(ReportError::InvalidBlock {
                    index,
                    reason: format!("height must be positive, got {}", block.height),
                });
            }
            if block
                .items
                .iter()
                .flat_map(BlockItem::coordinates)
                .any(|c| !c.is_finite())
            {
                return Err(ReportError::InvalidBlock {
                    index,
                    reason: "item coordinates must be finite".into(),
                });
            }
        }
        Ok(())
    }
}

fn parse_section(index: usize, value: serde_json::Value) -> Result<Section, ReportError> {
    let tag = match value.get("type").and_then(|t| t.as_str()) {
        Some(tag) => tag.to_string(),
        None => return Err(ReportError::MissingSectionTag { index }),
    };
    if !Section::TAGS.contains(&tag.as_str()) {
        return Err(ReportError::UnknownSection { index, tag });
    }
    serde_json::from_value(value).map_err(|source| ReportError::MalformedSection { index, tag, source })
}
