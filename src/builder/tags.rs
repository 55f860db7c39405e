//! Tag constants and lookup tables for the document builder.
//!
//! The class-to-heading table and the accordion markers are literal lookup
//! tables matched token by token. They are not a style engine.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Heading font sizes in points, indexed by level - 1 (h1..h6).
pub static HEADING_SIZES: [u8; 6] = [18, 16, 14, 13, 12, 11];

/// Containers checked against the heading-class table before recursing.
pub static CONTAINER_TAGS: [&str; 4] = ["div", "section", "article", "main"];

/// Bold inline tags.
pub static BOLD_TAGS: [&str; 2] = ["strong", "b"];

/// Italic inline tags.
pub static ITALIC_TAGS: [&str; 2] = ["em", "i"];

/// List tags.
pub static LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// Table sections holding rows.
pub static TABLE_SECTION_TAGS: [&str; 3] = ["thead", "tbody", "tfoot"];

/// Sections searched for the first row when counting columns.
pub static TABLE_HEAD_BODY_TAGS: [&str; 2] = ["thead", "tbody"];

/// Cell tags: th, td
pub static CELL_TAGS: [&str; 2] = ["td", "th"];

/// Class tokens marking an accordion title. An `h3` inside one is shrunk.
pub static ACCORDION_TITLE_CLASSES: [&str; 3] =
    ["accordion-title", "accordion__title", "accordion-heading"];

/// Font size of an `h3` inside an accordion title.
pub const ACCORDION_H3_SIZE: u8 = 13;

/// Class token → heading size (points) for generic containers.
///
/// Checked in order; the first token present on the element wins.
pub static HEADING_CLASSES: [(&str, u8); 8] = [
    ("title1", 16),
    ("title2", 14),
    ("title3", 13),
    ("feature-title", 16),
    ("feature-heading", 15),
    ("feature-subtitle", 14),
    ("section-title", 14),
    ("block-title", 13),
];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `CONTAINER_TAGS` as a `HashSet`
pub static CONTAINER_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    CONTAINER_TAGS.into_iter().collect()
});

// === Helper Functions ===

/// Font size for a heading level (1-6).
#[must_use]
pub fn heading_size(level: u8) -> u8 {
    let index = usize::from(level.clamp(1, 6) - 1);
    HEADING_SIZES[index]
}

/// Heading level matching a font size, for class-styled containers.
///
/// Sizes between table entries map to the larger heading.
#[must_use]
pub fn level_for_size(size: u8) -> u8 {
    HEADING_SIZES
        .iter()
        .position(|&s| size >= s)
        .and_then(|i| u8::try_from(i + 1).ok())
        .unwrap_or(6)
}

#[inline]
#[must_use]
pub fn is_container_tag(tag: &str) -> bool {
    CONTAINER_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_bold_tag(tag: &str) -> bool {
    BOLD_TAGS.contains(&tag)
}

#[inline]
#[must_use]
pub fn is_italic_tag(tag: &str) -> bool {
    ITALIC_TAGS.contains(&tag)
}

#[inline]
#[must_use]
pub fn is_list_tag(tag: &str) -> bool {
    LIST_TAGS.contains(&tag)
}
