//! Line-based markdown tokenizer.
//!
//! The scanner walks the source one line at a time and only tracks whether it is inside a
//! fenced code block. Outside a fence, ATX headings (`#` to `######`) become heading tokens and
//! everything else accumulates into text runs. Inside a fence nothing is interpreted: heading-like
//! lines are body content until the matching closing fence.

use serde::Serialize;

/// Deepest ATX heading level recognised.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Shortest run of backticks or tildes that opens a fence.
const MIN_FENCE_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One typed unit of a tokenized markdown document.
pub enum Token {
    /// An ATX heading outside any fence.
    Heading(Heading),
    /// A contiguous, normalised run of plain lines.
    Text {
        /// The lines of the run joined with `\n`.
        content: String,
    },
    /// A terminated fenced code block.
    Code(CodeBlock),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Heading level and its trimmed text.
pub struct Heading {
    /// Number of leading `#` characters, 1 to 6.
    pub level: usize,
    /// Heading text with surrounding whitespace removed.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Literal content of a fenced code block with its fences stripped.
pub struct CodeBlock {
    /// First word of the fence info string, if any.
    pub language: Option<String>,
    /// Lines between the fences joined with `\n`.
    pub body: String,
}

impl Token {
    /// Creates a text token from already-normalised content.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Creates a heading token.
    #[must_use]
    pub fn heading(level: usize, text: impl Into<String>) -> Self {
        Self::Heading(Heading {
            level,
            text: text.into(),
        })
    }

    /// Creates a code token.
    #[must_use]
    pub fn code(language: Option<&str>, body: impl Into<String>) -> Self {
        Self::Code(CodeBlock {
            language: language.map(str::to_string),
            body: body.into(),
        })
    }
}

/// An open fence and everything collected since it opened.
struct OpenFence<'a> {
    marker: char,
    len: usize,
    opening_line: &'a str,
    language: Option<String>,
    /// Text run pending when the fence opened, held back in case the fence never closes.
    preceding: Vec<&'a str>,
    body: Vec<&'a str>,
}

/// Splits markdown source into heading, text and code tokens.
///
/// Line endings are normalised to `\n` first. An unterminated fence is not an error: its opening
/// line and body are emitted as literal text, merged with the text run that preceded it.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let source = normalize_line_endings(source);
    let mut tokens = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut fence: Option<OpenFence<'_>> = None;

    for line in source.split('\n') {
        if let Some(open) = fence.as_mut() {
            if !is_closing_fence(line, open.marker, open.len) {
                open.body.push(line);
                continue;
            }
            if let Some(open) = fence.take() {
                push_text(&mut tokens, &open.preceding);
                tokens.push(Token::Code(CodeBlock {
                    language: open.language,
                    body: open.body.join("\n"),
                }));
            }
            continue;
        }

        if let Some((marker, len, language)) = parse_opening_fence(line) {
            fence = Some(OpenFence {
                marker,
                len,
                opening_line: line,
                language,
                preceding: std::mem::take(&mut pending),
                body: Vec::new(),
            });
        } else if let Some(heading) = parse_heading(line) {
            push_text(&mut tokens, &pending);
            pending.clear();
            tokens.push(Token::Heading(heading));
        } else {
            pending.push(line);
        }
    }

    if let Some(open) = fence {
        tracing::debug!(
            language = open.language.as_deref().unwrap_or(""),
            lines = open.body.len(),
            "unterminated code fence kept as text"
        );
        pending = open.preceding;
        pending.push(open.opening_line);
        pending.extend(open.body);
    }
    push_text(&mut tokens, &pending);

    tokens
}

fn normalize_line_endings(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}

fn push_text(tokens: &mut Vec<Token>, lines: &[&str]) {
    if let Some(content) = normalize_text_run(lines) {
        tokens.push(Token::text(content));
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collapses three or more consecutive blank lines to one and trims blank lines at either end,
/// along with trailing whitespace on the last line.
///
/// Returns `None` when nothing but blank lines remain.
#[must_use]
pub fn normalize_text_run(lines: &[&str]) -> Option<String> {
    let start = lines.iter().position(|line| !is_blank(line))?;
    let end = lines.iter().rposition(|line| !is_blank(line))? + 1;

    let mut out: Vec<&str> = Vec::with_capacity(end - start);
    let mut blanks: Vec<&str> = Vec::new();
    for line in &lines[start..end] {
        if is_blank(line) {
            blanks.push(line);
            continue;
        }
        if blanks.len() >= 3 {
            out.push("");
        } else {
            out.append(&mut blanks);
        }
        blanks.clear();
        out.push(line);
    }

    Some(out.join("\n").trim_end().to_string())
}

/// Strips up to three spaces of indentation, as fences allow.
fn strip_fence_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent <= 3).then(|| &line[indent..])
}

fn marker_run(line: &str) -> Option<(char, usize)> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == marker).count();
    (len >= MIN_FENCE_LEN).then_some((marker, len))
}

/// Recognises an opening fence, returning its marker, run length and language tag.
fn parse_opening_fence(line: &str) -> Option<(char, usize, Option<String>)> {
    let rest = strip_fence_indent(line)?;
    let (marker, len) = marker_run(rest)?;
    let info = rest[len..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }
    let language = info.split_whitespace().next().map(str::to_string);
    Some((marker, len, language))
}

fn is_closing_fence(line: &str, marker: char, min_len: usize) -> bool {
    let Some(rest) = strip_fence_indent(line) else {
        return false;
    };
    match marker_run(rest) {
        Some((found, len)) => found == marker && len >= min_len && rest[len..].trim().is_empty(),
        None => false,
    }
}

fn parse_heading(line: &str) -> Option<Heading> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some(Heading {
        level,
        text: text.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/token.rs"]
mod tests;
