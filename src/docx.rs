//! Authoring helpers on top of `docx-rs`: the style sheet, headings, text runs
//! and packing to bytes.

use std::io::Cursor;
use std::path::Path;

use docx_rs::{BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType, TableCell};

use crate::error::Error;

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Deepest heading level with a style of its own (`Heading9`).
pub const MAX_HEADING_LEVEL: u8 = 9;

fn pts_to_half_points(pts: f32) -> usize {
    (pts * 2.0).round() as usize
}

/// XML 1.0 admits tab, LF and CR below U+0020, and nothing in U+FFFE..=U+FFFF.
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&ch)
        || ('\u{E000}'..='\u{FFFD}').contains(&ch)
        || ch >= '\u{10000}'
}

/// Style id for a heading level: `Title` for 0, `Heading1`..`Heading9` above.
/// Levels past [`MAX_HEADING_LEVEL`] are clamped to it.
pub fn heading_style_id(level: u8) -> String {
    match level {
        0 => "Title".to_string(),
        1..=MAX_HEADING_LEVEL => format!("Heading{level}"),
        _ => {
            log::warn!("Heading level {level} out of range, using {MAX_HEADING_LEVEL}");
            format!("Heading{MAX_HEADING_LEVEL}")
        }
    }
}

pub fn heading(text: &str, level: u8) -> Paragraph {
    Paragraph::new()
        .add_run(text_run(text))
        .style(&heading_style_id(level))
}

pub fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(text_run(text))
}

pub fn table_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(paragraph(text))
}

/// Builds a run from plain text. `\n` becomes a line break and `\t` a tab;
/// `\r` and characters XML cannot carry are dropped.
pub fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    let mut pending = String::new();
    for ch in text.chars().filter(|c| is_xml_char(*c)) {
        match ch {
            '\n' | '\t' => {
                if !pending.is_empty() {
                    run = run.add_text(std::mem::take(&mut pending));
                }
                run = if ch == '\n' {
                    run.add_break(BreakType::TextWrapping)
                } else {
                    run.add_tab()
                };
            }
            '\r' => {}
            _ => pending.push(ch),
        }
    }
    if !pending.is_empty() {
        run = run.add_text(pending);
    }
    run
}

fn heading_style(level: u8) -> Style {
    // Heading 1 is 14pt; deeper levels step down to the body size
    let size = match level {
        1 => 28,
        2 => 26,
        _ => 22,
    };
    let color = if level == 1 { "365F91" } else { "4F81BD" };
    Style::new(heading_style_id(level), StyleType::Paragraph)
        .name(format!("heading {level}"))
        .based_on("Normal")
        .size(size)
        .color(color)
        .bold()
}

/// Sets the document-wide default font and registers the paragraph and table
/// styles used by [`heading`] and the proposal.
pub fn with_styles(docx: Docx, family: &str, size: f32) -> Docx {
    let fonts = RunFonts::new()
        .ascii(family)
        .hi_ansi(family)
        .east_asia(family)
        .cs(family);

    let mut docx = docx
        .default_fonts(fonts)
        .default_size(pts_to_half_points(size))
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .based_on("Normal")
                .size(52)
                .color("17365D"),
        )
        .add_style(
            Style::new("Subtitle", StyleType::Paragraph)
                .name("Subtitle")
                .based_on("Normal")
                .size(24)
                .color("4F81BD")
                .italic(),
        )
        .add_style(Style::new("TableGrid", StyleType::Table).name("Table Grid"));

    for level in 1..=MAX_HEADING_LEVEL {
        docx = docx.add_style(heading_style(level));
    }
    docx
}

/// Packs `docx` into an in-memory `.docx` package.
pub fn to_bytes(docx: Docx) -> Result<Vec<u8>, Error> {
    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| Error::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Writes `docx` to `path`, overwriting any existing file.
///
/// The package is packed in memory first, so a failed write never leaves a
/// partially written package behind.
pub fn save(docx: Docx, path: &Path) -> Result<(), Error> {
    let bytes = to_bytes(docx)?;
    std::fs::write(path, &bytes)?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
