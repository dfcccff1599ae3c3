//! Presentation-only syntax highlighting for code blocks.
//!
//! Highlighting is a collaborator of the display layer, never of the core: it receives a language
//! tag and a literal body and returns something to print. Any failure falls back to the plain
//! body, and nothing it does feeds back into tokens, sections or copied text.

use crate::section::Section;
use crate::serialize::render_heading;
use crate::token::Token;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Resets terminal colours after a highlighted block.
const ANSI_RESET: &str = "\x1b[0m";

/// Turns a code body into displayable text.
pub trait Highlighter {
    /// Renders `body` for display, given the fence's language tag.
    fn highlight(&self, language: Option<&str>, body: &str) -> String;
}

/// Leaves code untouched.
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _language: Option<&str>, body: &str) -> String {
        body.to_string()
    }
}

/// Highlights code with syntect into 24-bit terminal escapes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Loads the bundled syntaxes and the named theme.
    ///
    /// Returns `None` when the theme is not one of syntect's defaults.
    #[must_use]
    pub fn new(theme_name: &str) -> Option<Self> {
        let mut themes = ThemeSet::load_defaults();
        let Some(theme) = themes.themes.remove(theme_name) else {
            tracing::warn!(theme = theme_name, "unknown highlight theme");
            return None;
        };
        Some(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn try_highlight(&self, language: Option<&str>, body: &str) -> Result<String, syntect::Error> {
        let syntax = language
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut out = String::with_capacity(body.len() * 2);
        for line in LinesWithEndings::from(body) {
            let ranges = highlighter.highlight_line(line, &self.syntaxes)?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        out.push_str(ANSI_RESET);
        Ok(out)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: Option<&str>, body: &str) -> String {
        self.try_highlight(language, body).unwrap_or_else(|e| {
            tracing::warn!("highlighting failed, showing plain code: {e}");
            body.to_string()
        })
    }
}

/// Renders a section for display, passing each code body through `highlighter`.
///
/// Headings and text are shown as their markdown; fences stay plain so the block boundaries
/// remain visible around the highlighted body.
#[must_use]
pub fn render_section(section: &Section, highlighter: &dyn Highlighter) -> String {
    let parts: Vec<String> = section
        .tokens()
        .map(|token| match token {
            Token::Heading(heading) => render_heading(&heading),
            Token::Text { content } => content,
            Token::Code(block) if block.body.is_empty() => block.to_markdown(),
            Token::Code(block) => {
                let language = block.language.as_deref();
                let fence = block.fence();
                let body = highlighter.highlight(language, &block.body);
                format!("{fence}{}\n{body}\n{fence}", language.unwrap_or(""))
            }
        })
        .collect();
    parts.join("\n")
}

#[cfg(test)]
#[path = "tests/highlight.rs"]
mod tests;
