//! Turns page contents into PDF content stream operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, RuleLayout, ShapeLayout, SpanFont, SpanLayout};
use crate::units::Pt;
use crate::ReportError;
use id_arena::Arena;
use std::collections::BTreeSet;
use std::io::Write;

/// Bézier handle length that approximates a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// Characters no font could show are added to `missing`
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
    missing: &mut BTreeSet<char>,
) -> Result<Vec<u8>, ReportError> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts, missing)?,
            PageContents::Shape(shape) => render_shape(&mut content, shape)?,
            PageContents::Rule(rule) => render_rule(&mut content, rule)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
    missing: &mut BTreeSet<char>,
) -> Result<(), ReportError> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write_font(content, current_font)?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
        write!(content, "<")?;
        let font = fonts.get(current_font.id).ok_or(ReportError::FontMissing)?;
        for byte in font.encode(&span.text, missing) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, shape: &ShapeLayout) -> Result<(), std::io::Error> {
    if shape.fill.is_none() && shape.stroke.is_none() {
        return Ok(());
    }

    write!(content, "q\n")?;
    if let Some(fill) = shape.fill {
        write_fill_colour(content, fill)?;
    }
    if let Some((colour, width)) = shape.stroke {
        write_stroke_colour(content, colour)?;
        write!(content, "{} w\n", width.0)?;
    }

    let r = shape.rect;
    let radius = shape
        .corner_radius
        .min(r.width() / 2.0)
        .min(r.height() / 2.0)
        .max(Pt(0.0));

    if radius <= Pt(0.0) {
        write!(content, "{} {} {} {} re\n", r.x1.0, r.y1.0, r.width().0, r.height().0)?;
    } else {
        let (x1, y1, x2, y2, rad) = (r.x1.0, r.y1.0, r.x2.0, r.y2.0, radius.0);
        let k = rad * KAPPA;
        write!(content, "{} {} m\n", x1 + rad, y1)?;
        write!(content, "{} {} l\n", x2 - rad, y1)?;
        write!(content, "{} {} {} {} {} {} c\n", x2 - rad + k, y1, x2, y1 + rad - k, x2, y1 + rad)?;
        write!(content, "{} {} l\n", x2, y2 - rad)?;
        write!(content, "{} {} {} {} {} {} c\n", x2, y2 - rad + k, x2 - rad + k, y2, x2 - rad, y2)?;
        write!(content, "{} {} l\n", x1 + rad, y2)?;
        write!(content, "{} {} {} {} {} {} c\n", x1 + rad - k, y2, x1, y2 - rad + k, x1, y2 - rad)?;
        write!(content, "{} {} l\n", x1, y1 + rad)?;
        write!(content, "{} {} {} {} {} {} c\n", x1, y1 + rad - k, x1 + rad - k, y1, x1 + rad, y1)?;
        write!(content, "h\n")?;
    }

    let op = match (shape.fill.is_some(), shape.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        _ => "S",
    };
    write!(content, "{op}\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rule(content: &mut Vec<u8>, rule: &RuleLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_stroke_colour(content, rule.colour)?;
    write!(content, "{} w\n", rule.width.0)?;
    write!(content, "{} {} m\n", rule.from.0 .0, rule.from.1 .0)?;
    write!(content, "{} {} l\n", rule.to.0 .0, rule.to.1 .0)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.id.index(), font.size.0)
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} K\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::rect::Rect;
    use crate::standard::StandardFont;

    fn render(contents: &[PageContents]) -> String {
        let mut fonts: Arena<Font> = Arena::new();
        fonts.alloc(StandardFont::Helvetica.into());
        let out = render_contents(contents, &fonts, &mut BTreeSet::new()).expect("renders");
        String::from_utf8(out).expect("ascii")
    }

    #[test]
    fn text_is_hex_encoded() {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(StandardFont::Helvetica.into());
        let span = SpanLayout {
            text: "Hi".into(),
            font: SpanFont { id, size: Pt(12.0) },
            colour: colours::BLACK,
            coords: (Pt(10.0), Pt(20.0)),
        };
        let out = render_contents(&[PageContents::Text(vec![span])], &fonts, &mut BTreeSet::new()).expect("renders");
        let out = String::from_utf8(out).expect("ascii");
        assert!(out.contains("/F0 12 Tf"));
        assert!(out.contains("10 20 Td"));
        assert!(out.contains("<4869> Tj"));
    }

    #[test]
    fn square_shapes_use_re() {
        let out = render(&[PageContents::Shape(ShapeLayout {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(5.0)),
            corner_radius: Pt(0.0),
            fill: Some(colours::BLACK),
            stroke: None,
        })]);
        assert!(out.contains("0 0 10 5 re"));
        assert!(out.contains("\nf\n"));
    }

    #[test]
    fn rounded_shapes_use_curves() {
        let out = render(&[PageContents::Shape(ShapeLayout {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(40.0), Pt(20.0)),
            corner_radius: Pt(4.0),
            fill: None,
            stroke: Some((colours::BLACK, Pt(1.0))),
        })]);
        assert_eq!(out.matches(" c\n").count(), 4);
        assert!(out.contains("\nS\n"));
    }

    #[test]
    fn unencodable_characters_are_collected_once() {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(StandardFont::Helvetica.into());
        let span = |text: &str| SpanLayout {
            text: text.into(),
            font: SpanFont { id, size: Pt(10.0) },
            colour: colours::BLACK,
            coords: (Pt(0.0), Pt(0.0)),
        };
        let contents = [
            PageContents::Text(vec![span("\u{4e2d}a"), span("b\u{4e2d}")]),
            PageContents::Text(vec![span("\u{4e2d}\u{6587}")]),
        ];
        let mut missing = BTreeSet::new();
        let out = render_contents(&contents, &fonts, &mut missing).expect("renders");
        assert!(String::from_utf8(out).expect("ascii").contains("<3f61> Tj"));
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec!['\u{4e2d}', '\u{6587}']);
    }

    #[test]
    fn foreign_font_ids_are_an_error() {
        let mut other: Arena<Font> = Arena::new();
        other.alloc(StandardFont::Courier.into());
        let id = other.alloc(StandardFont::Courier.into());
        let mut fonts: Arena<Font> = Arena::new();
        fonts.alloc(StandardFont::Helvetica.into());
        let span = SpanLayout {
            text: "x".into(),
            font: SpanFont { id, size: Pt(10.0) },
            colour: colours::BLACK,
            coords: (Pt(0.0), Pt(0.0)),
        };
        assert!(matches!(
            render_contents(&[PageContents::Text(vec![span])], &fonts, &mut BTreeSet::new()),
            Err(ReportError::FontMissing)
        ));
    }
}
