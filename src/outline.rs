//! Reads a `.docx` package back into a flat outline of its body.
//!
//! Only what the authoring layer writes is understood: paragraph styles,
//! alignment, run text with bold/italic/size, tables and page breaks.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::docx::{MAX_HEADING_LEVEL, WML_NS};
use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32, // points
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub default_font: Option<Font>,
    pub blocks: Vec<OutlineBlock>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OutlineBlock {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        style: Option<String>,
        alignment: Option<Alignment>,
        runs: Vec<OutlineRun>,
    },
    Table {
        style: Option<String>,
        rows: Vec<Vec<String>>,
    },
    PageBreak,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutlineRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size: Option<f32>, // points
}

impl Outline {
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            OutlineBlock::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &[Vec<String>]> {
        self.blocks.iter().filter_map(|b| match b {
            OutlineBlock::Table { rows, .. } => Some(rows.as_slice()),
            _ => None,
        })
    }
}

impl OutlineBlock {
    /// Plain text of a heading or paragraph; empty for other blocks.
    pub fn text(&self) -> String {
        match self {
            OutlineBlock::Heading { text, .. } => text.clone(),
            OutlineBlock::Paragraph { runs, .. } => runs.iter().map(|r| r.text.as_str()).collect(),
            _ => String::new(),
        }
    }
}

fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn wml_children<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> {
    node.children()
        .filter(move |n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

fn half_points_attr(node: roxmltree::Node, child: &str) -> Option<f32> {
    wml_attr(node, child)
        .and_then(|v| v.parse::<f32>().ok())
        .map(|hp| hp / 2.0)
}

/// `<w:b/>` is on unless `w:val` says otherwise.
fn toggle(node: roxmltree::Node, child: &str) -> bool {
    wml(node, child).is_some_and(|n| {
        !matches!(n.attribute((WML_NS, "val")), Some("0" | "false" | "off"))
    })
}

/// `Title` is level 0, `HeadingN` is level N.
fn heading_level(style_id: &str) -> Option<u8> {
    match style_id {
        "Title" => Some(0),
        _ => style_id
            .strip_prefix("Heading")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=MAX_HEADING_LEVEL).contains(n)),
    }
}

fn parse_alignment(val: &str) -> Option<Alignment> {
    match val {
        "left" | "start" => Some(Alignment::Left),
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "both" | "distribute" => Some(Alignment::Justify),
        _ => None,
    }
}

fn read_part<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Result<String, Error> {
    let mut content = String::new();
    zip.by_name(name)?.read_to_string(&mut content)?;
    Ok(content)
}

fn parse_default_font<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> Option<Font> {
    let xml_content = read_part(zip, "word/styles.xml").ok()?;
    let xml = roxmltree::Document::parse(&xml_content).ok()?;
    let rpr = wml(xml.root_element(), "docDefaults")
        .and_then(|n| wml(n, "rPrDefault"))
        .and_then(|n| wml(n, "rPr"))?;
    let family = wml(rpr, "rFonts")
        .and_then(|n| n.attribute((WML_NS, "ascii")))?
        .to_string();
    let size = half_points_attr(rpr, "sz")?;
    Some(Font { family, size })
}

/// Collects run content, mapping `w:br` to `\n` and `w:tab` to `\t`.
/// The flag is set when the run contains a page break.
fn run_text(run_node: roxmltree::Node) -> (String, bool) {
    let mut text = String::new();
    let mut page_break = false;
    for child in run_node.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" if child.attribute((WML_NS, "type")) == Some("page") => page_break = true,
            "br" => text.push('\n'),
            _ => {}
        }
    }
    (text, page_break)
}

fn parse_paragraph(node: roxmltree::Node) -> OutlineBlock {
    let ppr = wml(node, "pPr");
    let style = ppr.and_then(|ppr| wml_attr(ppr, "pStyle"));
    let alignment = ppr
        .and_then(|ppr| wml_attr(ppr, "jc"))
        .and_then(parse_alignment);

    let mut runs = Vec::new();
    let mut page_break = false;
    for run_node in wml_children(node, "r") {
        let (text, breaks_page) = run_text(run_node);
        page_break |= breaks_page;
        if text.is_empty() {
            continue;
        }
        let rpr = wml(run_node, "rPr");
        runs.push(OutlineRun {
            text,
            bold: rpr.is_some_and(|n| toggle(n, "b")),
            italic: rpr.is_some_and(|n| toggle(n, "i")),
            size: rpr.and_then(|n| half_points_attr(n, "sz")),
        });
    }

    if page_break && runs.is_empty() {
        return OutlineBlock::PageBreak;
    }

    match style.and_then(heading_level) {
        Some(level) => OutlineBlock::Heading {
            level,
            text: runs.iter().map(|r| r.text.as_str()).collect(),
        },
        None => OutlineBlock::Paragraph {
            style: style.map(str::to_string),
            alignment,
            runs,
        },
    }
}

fn parse_table(node: roxmltree::Node) -> OutlineBlock {
    let style = wml(node, "tblPr")
        .and_then(|n| wml_attr(n, "tblStyle"))
        .map(str::to_string);
    let rows = wml_children(node, "tr")
        .map(|tr| {
            wml_children(tr, "tc")
                .map(|tc| {
                    let paragraphs: Vec<String> = wml_children(tc, "p")
                        .map(|p| wml_children(p, "r").map(|r| run_text(r).0).collect())
                        .collect();
                    paragraphs.join("\n")
                })
                .collect()
        })
        .collect();
    OutlineBlock::Table { style, rows }
}

pub fn read(path: &Path) -> Result<Outline, Error> {
    let file = std::fs::File::open(path)?;
    parse(zip::ZipArchive::new(file)?)
}

pub fn read_bytes(bytes: &[u8]) -> Result<Outline, Error> {
    parse(zip::ZipArchive::new(Cursor::new(bytes))?)
}

fn parse<R: Read + Seek>(mut zip: zip::ZipArchive<R>) -> Result<Outline, Error> {
    let default_font = parse_default_font(&mut zip);

    let xml_content = read_part(&mut zip, "word/document.xml")?;
    let xml = roxmltree::Document::parse(&xml_content)?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let mut blocks = Vec::new();
    for node in body.children() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => blocks.push(parse_paragraph(node)),
            "tbl" => blocks.push(parse_table(node)),
            _ => {}
        }
    }
    log::debug!("Read {} body blocks", blocks.len());

    Ok(Outline { default_font, blocks })
}
