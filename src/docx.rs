//! WordprocessingML (.docx) writer.
//!
//! Serializes a [`Document`] into the minimal Open XML package Word needs:
//! content types, package relationships, the main document part, styles and
//! a numbering part for bulleted and numbered lists. Text is Arial throughout.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::document::{Block, Document, Run, TableRow, BODY_SIZE, TITLE_SIZE};
use crate::error::Result;
use crate::patterns::WHITESPACE_NORMALIZE;

const FONT: &str = "Arial";
const DESCRIPTION_COLOR: &str = "666666";

// Space after each paragraph kind, in twentieths of a point.
const SPACE_AFTER_BODY: u32 = 200;
const SPACE_AFTER_LIST_ITEM: u32 = 120;
const SPACE_AFTER_HEADING: u32 = 240;
const SPACE_AFTER_DESCRIPTION: u32 = 360;

// Numbering instances declared in numbering.xml. Ordered lists take
// `DECIMAL_NUM_ID` and up, one instance per list.
const BULLET_NUM_ID: u32 = 1;
const DECIMAL_NUM_ID: u32 = 2;

/// Write `document` to a `.docx` file at `path`.
///
/// The parent directory must already exist.
pub fn save(document: Document, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = write_to(document, BufWriter::new(file))?;
    writer.flush()?;
    debug!(path = %path.display(), "docx written");
    Ok(())
}

/// Write `document` as a `.docx` package into `writer`, returning it.
pub fn write_to<W: Write + Seek>(document: Document, writer: W) -> Result<W> {
    let body = document_xml(document.blocks());
    let numbering = numbering_xml(ordered_list_count(document.blocks()));

    let mut zip = ZipWriter::new(writer);
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.add_directory("_rels/", opt)?;
    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.add_directory("word/", opt)?;
    zip.add_directory("word/_rels/", opt)?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(body.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(WORD_RELS_XML.as_bytes())?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(styles_xml().as_bytes())?;

    zip.start_file("word/numbering.xml", opt)?;
    zip.write_all(numbering.as_bytes())?;

    Ok(zip.finish()?)
}

/// Render the `word/document.xml` part for a block sequence.
#[must_use]
pub fn document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for (block, list_id) in blocks.iter().zip(ordered_list_ids(blocks)) {
        write_block(&mut body, block, list_id);
    }
    // a table may not be the last element before the section properties
    if matches!(blocks.last(), Some(Block::Table { .. })) {
        body.push_str("<w:p/>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
      <w:cols w:space="708"/>
      <w:docGrid w:linePitch="360"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

#[derive(Debug, Clone, Copy, Default)]
struct RunStyle<'a> {
    bold: bool,
    italic: bool,
    size: u8,
    color: Option<&'a str>,
}

impl RunStyle<'_> {
    fn body() -> Self {
        Self {
            size: BODY_SIZE,
            ..Self::default()
        }
    }
}

/// Numbering instance of each ordered list item.
///
/// A run of consecutive ordered items is one list; each list gets its own
/// instance so numbering restarts at 1.
fn ordered_list_ids(blocks: &[Block]) -> Vec<Option<u32>> {
    let mut lists = 0;
    let mut previous_ordered = false;
    blocks
        .iter()
        .map(|block| {
            let ordered = matches!(block, Block::ListItem { ordered: true, .. });
            if ordered && !previous_ordered {
                lists += 1;
            }
            previous_ordered = ordered;
            ordered.then_some(DECIMAL_NUM_ID + lists - 1)
        })
        .collect()
}

fn ordered_list_count(blocks: &[Block]) -> u32 {
    ordered_list_ids(blocks)
        .into_iter()
        .flatten()
        .max()
        .map_or(0, |id| id - DECIMAL_NUM_ID + 1)
}

fn write_block(out: &mut String, block: &Block, list_id: Option<u32>) {
    match block {
        Block::Title { text } => {
            let style = RunStyle { bold: true, size: TITLE_SIZE, ..RunStyle::default() };
            write_text_paragraph(out, text, style, SPACE_AFTER_HEADING);
        }
        Block::Description { text } => {
            let style = RunStyle {
                italic: true,
                color: Some(DESCRIPTION_COLOR),
                ..RunStyle::body()
            };
            write_text_paragraph(out, text, style, SPACE_AFTER_DESCRIPTION);
        }
        Block::Heading { text, size, .. } => {
            let style = RunStyle { bold: true, size: *size, ..RunStyle::default() };
            write_text_paragraph(out, text, style, SPACE_AFTER_HEADING);
        }
        Block::Paragraph { runs } => {
            out.push_str("<w:p>");
            paragraph_props(out, SPACE_AFTER_BODY, None);
            for run in runs {
                write_run(out, run);
            }
            out.push_str("</w:p>");
        }
        Block::ListItem { text, ordered, depth } => {
            let num_id = if *ordered {
                list_id.unwrap_or(DECIMAL_NUM_ID)
            } else {
                BULLET_NUM_ID
            };
            out.push_str("<w:p>");
            paragraph_props(out, SPACE_AFTER_LIST_ITEM, Some((num_id, *depth)));
            text_run(out, &collapse(text), RunStyle::body());
            out.push_str("</w:p>");
        }
        Block::Table { rows } => write_table(out, rows),
    }
}

fn write_text_paragraph(out: &mut String, text: &str, style: RunStyle, space_after: u32) {
    out.push_str("<w:p>");
    paragraph_props(out, space_after, None);
    text_run(out, &collapse(text), style);
    out.push_str("</w:p>");
}

fn paragraph_props(out: &mut String, space_after: u32, numbering: Option<(u32, u8)>) {
    out.push_str("<w:pPr>");
    if let Some((num_id, level)) = numbering {
        out.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr>"#
        ));
    }
    out.push_str(&format!(r#"<w:spacing w:after="{space_after}"/>"#));
    out.push_str("</w:pPr>");
}

fn write_run(out: &mut String, run: &Run) {
    if run.line_break {
        out.push_str("<w:r><w:br/></w:r>");
        return;
    }
    let style = RunStyle {
        bold: run.bold,
        italic: run.italic,
        ..RunStyle::body()
    };
    let text = WHITESPACE_NORMALIZE.replace_all(&run.text, " ");
    text_run(out, &text, style);
}

fn text_run(out: &mut String, text: &str, style: RunStyle) {
    if text.is_empty() {
        return;
    }
    out.push_str("<w:r><w:rPr>");
    out.push_str(&format!(
        r#"<w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}" w:cs="{FONT}"/>"#
    ));
    if style.bold {
        out.push_str("<w:b/>");
    }
    if style.italic {
        out.push_str("<w:i/>");
    }
    if let Some(color) = style.color {
        out.push_str(&format!(r#"<w:color w:val="{color}"/>"#));
    }
    let half_points = u32::from(style.size) * 2;
    out.push_str(&format!(
        r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#
    ));
    out.push_str(r#"</w:rPr><w:t xml:space="preserve">"#);
    out.push_str(&xml_text(text));
    out.push_str("</w:t></w:r>");
}

fn write_table(out: &mut String, rows: &[TableRow]) {
    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    if columns == 0 {
        return;
    }

    out.push_str(r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/><w:tblBorders>"#);
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        out.push_str(&format!(
            r#"<w:{edge} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#
        ));
    }
    out.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
    for _ in 0..columns {
        out.push_str("<w:gridCol/>");
    }
    out.push_str("</w:tblGrid>");

    for row in rows {
        out.push_str("<w:tr>");
        for cell in &row.cells {
            out.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="0" w:type="auto"/></w:tcPr><w:p>"#);
            let style = RunStyle {
                bold: cell.is_header,
                ..RunStyle::body()
            };
            text_run(out, &collapse(&cell.text), style);
            out.push_str("</w:p></w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

fn collapse(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Escape text for a `w:t` element, dropping characters XML 1.0 forbids.
fn xml_text(text: &str) -> String {
    let allowed: String = text
        .chars()
        .filter(|&c| {
            (!c.is_control() || matches!(c, '\t' | '\n' | '\r')) && !matches!(c, '\u{FFFE}' | '\u{FFFF}')
        })
        .collect();
    html_escape::encode_text(&allowed).into_owned()
}

fn styles_xml() -> String {
    let half_points = u32::from(BODY_SIZE) * 2;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault>
      <w:rPr>
        <w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}" w:cs="{FONT}"/>
        <w:sz w:val="{half_points}"/>
        <w:szCs w:val="{half_points}"/>
      </w:rPr>
    </w:rPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

/// Numbering part with one bullet instance and `ordered_lists` decimal
/// instances (at least one), each restarting at 1.
fn numbering_xml(ordered_lists: u32) -> String {
    let mut instances = format!(
        r#"<w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="0"/></w:num>"#
    );
    for num_id in DECIMAL_NUM_ID..DECIMAL_NUM_ID + ordered_lists.max(1) {
        instances.push_str(&format!(
            r#"<w:num w:numId="{num_id}"><w:abstractNumId w:val="1"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#
        ));
    }
    format!("{ABSTRACT_NUMBERING}{instances}</w:numbering>")
}

const ABSTRACT_NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="hybridMultilevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="bullet"/>
      <w:lvlText w:val="&#8226;"/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="hybridMultilevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="decimal"/>
      <w:lvlText w:val="%1."/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
    </w:lvl>
  </w:abstractNum>
  "#;
