//! Selector Engine
//!
//! Resolves the small selector grammar used for content exclusion:
//!
//! - `#name` matches elements whose `id` equals `name`
//! - `.name` matches elements whose class list contains the token `name`
//! - a bare `name` matches by tag name, class token, or id
//!
//! Bare names are deliberately ambiguous: the configuration format does not
//! tell element names apart from class or id names. This is not a CSS engine;
//! combinators, attribute selectors and pseudo-classes are not supported.

use std::collections::HashSet;

use crate::dom::{self, NodeId, NodeRef};

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    ById(String),
    /// `.class`
    ByClass(String),
    /// Bare token, tried as element name, class and id.
    ByNameOrClassOrId(String),
}

impl Selector {
    /// Parse a single trimmed selector token.
    ///
    /// Returns `None` for empty tokens (including a lone `#` or `.`).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let selector = if let Some(id) = token.strip_prefix('#') {
            Self::ById(id.to_string())
        } else if let Some(class) = token.strip_prefix('.') {
            Self::ByClass(class.to_string())
        } else {
            Self::ByNameOrClassOrId(token.to_string())
        };

        if selector.name().is_empty() {
            None
        } else {
            Some(selector)
        }
    }

    /// The name this selector matches against.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ById(name) | Self::ByClass(name) | Self::ByNameOrClassOrId(name) => name,
        }
    }

    /// Whether a single element node matches this selector.
    #[must_use]
    pub fn is_match(&self, node: &NodeRef) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Self::ById(id) => dom::id(node).is_some_and(|v| v == *id),
            Self::ByClass(class) => dom::has_class_token(node, class),
            Self::ByNameOrClassOrId(name) => {
                dom::tag_name(node).is_some_and(|tag| tag.eq_ignore_ascii_case(name))
                    || dom::has_class_token(node, name)
                    || dom::id(node).is_some_and(|v| v == *name)
            }
        }
    }
}

/// Ordered list of selectors parsed from a comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a comma-separated selector list. Empty tokens are skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use page2docx::selector::{Selector, SelectorList};
    ///
    /// let list = SelectorList::parse("#sidebar, .share,, nav ");
    /// assert_eq!(list.selectors(), &[
    ///     Selector::ById("sidebar".to_string()),
    ///     Selector::ByClass("share".to_string()),
    ///     Selector::ByNameOrClassOrId("nav".to_string()),
    /// ]);
    /// ```
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self {
            selectors: list.split(',').filter_map(Selector::parse).collect(),
        }
    }

    /// The parsed selectors, in configuration order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Whether no selectors were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Union of all selectors' matches, in document order without duplicates.
    #[must_use]
    pub fn matches<'a>(&self, root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
        collect(root, |node| self.selectors.iter().any(|s| s.is_match(node)))
    }
}

/// All elements below `root` matching `selector`, in document order.
///
/// A selector with no matches yields an empty vector; that is not an error.
#[must_use]
pub fn matches<'a>(root: &NodeRef<'a>, selector: &Selector) -> Vec<NodeRef<'a>> {
    collect(root, |node| selector.is_match(node))
}

fn collect<'a>(root: &NodeRef<'a>, mut rule: impl FnMut(&NodeRef<'a>) -> bool) -> Vec<NodeRef<'a>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut out = Vec::new();

    for node in root.descendants() {
        if node.is_element() && rule(&node) && seen.insert(node.id) {
            out.push(node);
        }
    }

    out
}
