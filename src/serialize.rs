//! Rendering sections and code blocks back to literal markdown.
//!
//! Serialisation is the inverse of tokenization for one section: tokenizing and segmenting the
//! output reproduces the same heading and token content.

use crate::section::Section;
use crate::token::{CodeBlock, Heading, Token};
use serde::Serialize;

#[derive(Debug, Serialize)]
/// Everything an external consumer needs about one section.
pub struct SectionSummary<'a> {
    /// Zero-based position in the segmented output.
    pub index: usize,
    /// Section identifier.
    pub id: &'a str,
    /// Boundary heading, if any.
    pub heading: Option<&'a Heading>,
    /// The section as literal markdown.
    pub markdown: String,
    /// Embedded code blocks with their language tags and bodies.
    pub code_blocks: Vec<&'a CodeBlock>,
}

/// Renders a section, heading first, as trimmed markdown.
#[must_use]
pub fn to_markdown(section: &Section) -> String {
    tokens_to_markdown(section.tokens())
}

impl Section {
    #[must_use]
    /// Summary with the serialised markdown and embedded code blocks.
    pub fn summary(&self) -> SectionSummary<'_> {
        SectionSummary {
            index: self.index,
            id: &self.id,
            heading: self.heading.as_ref(),
            markdown: to_markdown(self),
            code_blocks: self.code_blocks().collect(),
        }
    }
}

/// Renders a token sequence joined by newlines and trimmed.
///
/// Only surrounding blank lines and trailing whitespace go. Indentation of the first line is
/// content: `   # x` is text, while `# x` would be a heading.
#[must_use]
pub fn tokens_to_markdown<I>(tokens: I) -> String
where
    I: IntoIterator<Item = Token>,
{
    let parts: Vec<String> = tokens.into_iter().map(|token| render_token(&token)).collect();
    parts.join("\n").trim_start_matches('\n').trim_end().to_string()
}

fn render_token(token: &Token) -> String {
    match token {
        Token::Heading(heading) => render_heading(heading),
        Token::Text { content } => content.clone(),
        Token::Code(block) => block.to_markdown(),
    }
}

pub(crate) fn render_heading(heading: &Heading) -> String {
    format!("{} {}", "#".repeat(heading.level), heading.text)
}

impl CodeBlock {
    #[must_use]
    /// Fenced form of the block, for code-only copy requests.
    ///
    /// Uses a fence that no line of the body can close and that the language tag cannot break.
    pub fn to_markdown(&self) -> String {
        let fence = self.fence();
        let language = self.language.as_deref().unwrap_or("");
        if self.body.is_empty() {
            format!("{fence}{language}\n{fence}")
        } else {
            format!("{fence}{language}\n{}\n{fence}", self.body)
        }
    }

    /// Marker run for this block: backticks, or tildes when the language tag holds a backtick.
    pub(crate) fn fence(&self) -> String {
        let tag_has_backtick = self
            .language
            .as_deref()
            .is_some_and(|language| language.contains('`'));
        let marker = if tag_has_backtick { '~' } else { '`' };
        marker.to_string().repeat(fence_len(&self.body, marker))
    }
}

/// Three, or one more than the longest run of `marker` opening any body line.
fn fence_len(body: &str, marker: char) -> usize {
    body.lines()
        .map(|line| {
            line.trim_start_matches(' ')
                .chars()
                .take_while(|c| *c == marker)
                .count()
        })
        .max()
        .map_or(3, |longest| longest.max(2) + 1)
}

#[cfg(test)]
#[path = "tests/serialize.rs"]
mod tests;
