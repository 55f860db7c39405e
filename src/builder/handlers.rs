//! Element handlers for headings, styled containers, tables and paragraph runs.
//!
//! Handlers look at one element and return the block it maps to (if any).
//! Recursion into children stays in the walk in `builder/mod.rs`.

use crate::dom::{self, NodeRef};
use crate::document::{Block, Run, TableCell, TableRow};
use crate::patterns::WHITESPACE_NORMALIZE;

use super::tags::{
    heading_size, level_for_size, ACCORDION_H3_SIZE, ACCORDION_TITLE_CLASSES, CELL_TAGS,
    HEADING_CLASSES, TABLE_HEAD_BODY_TAGS, TABLE_SECTION_TAGS,
};

/// Map an `h1`-`h6` element to a heading block.
///
/// The text is the element's spaced text content with entities decoded.
/// Empty headings produce nothing. An `h3` inside an accordion title is
/// shrunk to 13pt.
#[must_use]
pub fn handle_heading(element: &NodeRef, level: u8) -> Option<Block> {
    let text = dom::text_content(element);
    let text = html_escape::decode_html_entities(&text).trim().to_string();
    if text.is_empty() {
        return None;
    }

    let mut size = heading_size(level);
    if level == 3 && dom::self_or_ancestor_has_class(element, &ACCORDION_TITLE_CLASSES) {
        size = ACCORDION_H3_SIZE;
    }

    Some(Block::Heading { text, level, size })
}

/// Heading size for a container carrying one of the heading classes.
#[must_use]
pub fn heading_class_size(element: &NodeRef) -> Option<u8> {
    HEADING_CLASSES
        .iter()
        .find(|(class, _)| dom::has_class_token(element, class))
        .map(|&(_, size)| size)
}

/// Heading block for a class-styled container's flattened text.
#[must_use]
pub fn handle_class_heading(element: &NodeRef, size: u8) -> Option<Block> {
    let text = dom::text_content(element);
    if text.is_empty() {
        return None;
    }
    Some(Block::Heading {
        text,
        level: level_for_size(size),
        size,
    })
}

/// Paragraph block from flattened text, `None` when empty.
#[must_use]
pub fn handle_paragraph(element: &NodeRef) -> Option<Block> {
    let text = dom::text_content(element);
    if text.is_empty() {
        None
    } else {
        Some(Block::text(text))
    }
}

/// Map a `table` element to a table block.
///
/// The first row (under `thead`/`tbody`, else a direct `tr`) decides whether
/// the table has any columns; a table without cells yields nothing. Rows are
/// then taken from `thead`/`tbody`/`tfoot` sections and bare `tr` children in
/// document order. Every cell of the first row is marked as a header, as is
/// every `th`, whether or not the row came from a `thead`.
#[must_use]
pub fn handle_table(table: &NodeRef) -> Option<Block> {
    let first_row = dom::children_named(table, &TABLE_HEAD_BODY_TAGS)
        .iter()
        .find_map(|section| dom::children_named(section, &["tr"]).into_iter().next())
        .or_else(|| dom::children_named(table, &["tr"]).into_iter().next())?;

    if dom::children_named(&first_row, &CELL_TAGS).is_empty() {
        return None;
    }

    let mut rows: Vec<TableRow> = Vec::new();
    for child in dom::element_children(table) {
        let Some(tag) = dom::tag_name(&child) else {
            continue;
        };
        if TABLE_SECTION_TAGS.contains(&tag.as_str()) {
            for tr in dom::children_named(&child, &["tr"]) {
                push_row(&mut rows, &tr);
            }
        } else if tag == "tr" {
            push_row(&mut rows, &child);
        }
    }

    if rows.is_empty() {
        None
    } else {
        Some(Block::Table { rows })
    }
}

fn push_row(rows: &mut Vec<TableRow>, tr: &NodeRef) {
    let is_first = rows.is_empty();
    let cells: Vec<TableCell> = dom::children_named(tr, &CELL_TAGS)
        .iter()
        .map(|cell| TableCell {
            text: dom::text_content(cell),
            is_header: is_first || dom::tag_name(cell).as_deref() == Some("th"),
        })
        .collect();

    if !cells.is_empty() {
        rows.push(TableRow { cells });
    }
}

/// Append a text node's content to the active run list.
///
/// Whitespace runs collapse to one space; whitespace-only text is kept only
/// as a separator between two runs.
pub fn push_text_run(runs: &mut Vec<Run>, text: &str) {
    let text = WHITESPACE_NORMALIZE.replace_all(text, " ");
    if text.is_empty() {
        return;
    }
    if text == " " && runs.last().is_none_or(|r| r.line_break || r.text.ends_with(' ')) {
        return;
    }
    runs.push(Run::plain(text));
}

/// Trim the outer edges of a run list and drop empty runs.
///
/// Returns the finished runs, or `None` when no visible text remains.
#[must_use]
pub fn finish_runs(mut runs: Vec<Run>) -> Option<Vec<Run>> {
    while runs.first().is_some_and(|r| r.line_break || r.text.trim().is_empty()) {
        runs.remove(0);
    }
    while runs.last().is_some_and(|r| r.line_break || r.text.trim().is_empty()) {
        runs.pop();
    }
    if let Some(first) = runs.first_mut() {
        first.text = first.text.trim_start().to_string();
    }
    if let Some(last) = runs.last_mut() {
        last.text = last.text.trim_end().to_string();
    }

    if runs.is_empty() {
        None
    } else {
        Some(runs)
    }
}
