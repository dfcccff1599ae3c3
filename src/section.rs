//! Section representation for segmented markdown documents.
//!
//! A section is one unit of copyable output: an optional boundary heading followed by the tokens
//! that belong to it. Headings deeper than the segmentation depth are ordinary members, so a
//! section may contain nested headings of its own.

use crate::token::{CodeBlock, Heading, Token};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Heading-delimited division of a document, never empty once exposed.
pub struct Section {
    /// Zero-based position in the segmented output.
    pub index: usize,
    /// Anchor-style identifier, unique within one segmentation run.
    pub id: String,
    /// Boundary heading that opened the section, absent for leading content.
    pub heading: Option<Heading>,
    /// Tokens following the heading, in source order. Empty only when the heading stands alone.
    pub members: Vec<Token>,
}

impl Section {
    /// All tokens of the section with the heading first, as they serialise.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.heading
            .iter()
            .cloned()
            .map(Token::Heading)
            .chain(self.members.iter().cloned())
    }

    /// Code blocks embedded in this section, in order.
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.members.iter().filter_map(|token| match token {
            Token::Code(block) => Some(block),
            Token::Heading(_) | Token::Text { .. } => None,
        })
    }

    #[must_use]
    /// Heading level and text, the descriptor shown for each section.
    pub fn heading_descriptor(&self) -> Option<(usize, &str)> {
        self.heading
            .as_ref()
            .map(|heading| (heading.level, heading.text.as_str()))
    }

    #[must_use]
    /// Human-readable title, falling back to a placeholder for leading content.
    pub fn title(&self) -> &str {
        self.heading
            .as_ref()
            .map_or("(preface)", |heading| heading.text.as_str())
    }
}

/// Lowercase, hyphen-separated slug of a heading for use as an anchor.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Appends `-1`, `-2`, ... until `base` is unused, recording the result.
pub(crate) fn ensure_unique(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut suffix = 0usize;
    while used.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}-{suffix}");
    }
    used.insert(candidate.clone());
    candidate
}
