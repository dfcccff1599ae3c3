//! Reading markdown sources and turning them into sections.

use crate::section::Section;
use crate::segment::{segment, Depth};
use crate::token::{tokenize, Token};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// A tokenized markdown source, ready to be segmented at any depth.
///
/// Changing the text means parsing a new document; changing the depth only re-runs segmentation
/// over the same tokens.
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    #[must_use]
    /// Tokenizes `source`.
    pub fn parse(source: &str) -> Self {
        Self {
            tokens: tokenize(source),
        }
    }

    #[must_use]
    /// The document's tokens in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    /// Sections split at headings no deeper than `depth`.
    pub fn sections(&self, depth: Depth) -> Vec<Section> {
        segment(&self.tokens, depth)
    }
}

/// Reads markdown from `path`, or from standard input when it is absent or `-`.
///
/// # Errors
///
/// Returns an error if the file or standard input cannot be read as UTF-8.
pub fn read_source(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Reads and segments a markdown source in one step, `None` or `-` meaning standard input.
///
/// # Errors
///
/// Returns an error if the source cannot be read.
pub fn extract_sections(path: Option<&Path>, depth: Depth) -> io::Result<Vec<Section>> {
    let source = read_source(path)?;
    Ok(Document::parse(&source).sections(depth))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
