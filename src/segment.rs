//! Heading-depth segmentation of a token stream.
//!
//! Segmentation is a pure function of the tokens and the depth: a heading at or above the depth
//! opens a new section, deeper headings stay inside the current one. Changing the depth means
//! segmenting the same tokens again, nothing is cached between calls.

use crate::section::{ensure_unique, slugify, Section};
use crate::token::{Heading, Token};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier given to the headingless section before the first boundary heading.
const PREFACE_ID: &str = "preface";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Deepest heading level that still starts a new section: 1, 2 or 3.
pub struct Depth(u8);

#[derive(Debug, Error, PartialEq, Eq)]
/// Depth outside the supported range.
pub enum DepthError {
    /// The value was a number but not 1, 2 or 3.
    #[error("depth must be 1, 2 or 3, got {0}")]
    OutOfRange(i64),
    /// The value was not a number at all.
    #[error("depth must be 1, 2 or 3, got {0:?}")]
    NotANumber(String),
}

impl Depth {
    /// Only top-level headings split.
    pub const ONE: Self = Self(1);
    /// Top- and second-level headings split.
    pub const TWO: Self = Self(2);
    /// Headings down to level three split.
    pub const THREE: Self = Self(3);

    /// All supported depths, shallowest first.
    pub const ALL: [Self; 3] = [Self::ONE, Self::TWO, Self::THREE];

    /// Validates a raw depth value.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError::OutOfRange`] for anything other than 1, 2 or 3.
    pub fn new(value: u8) -> Result<Self, DepthError> {
        match value {
            1..=3 => Ok(Self(value)),
            other => Err(DepthError::OutOfRange(i64::from(other))),
        }
    }

    #[must_use]
    /// Numeric value of the depth.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    /// Whether a heading at `level` starts a section at this depth.
    pub fn is_boundary(self, level: usize) -> bool {
        level <= self.get()
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::TWO
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Depth {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DepthError::NotANumber(s.to_string()))?;
        u8::try_from(value)
            .map_err(|_| DepthError::OutOfRange(value))
            .and_then(Self::new)
    }
}

/// A section under construction.
struct OpenSection {
    heading: Option<Heading>,
    members: Vec<Token>,
}

/// Groups tokens into sections at headings no deeper than `depth`.
///
/// Content before the first boundary heading forms a headingless leading section, dropped when
/// there is no such content. A boundary heading always yields a section, even with nothing after
/// it: the heading is the section's first token. So raising the depth only ever splits sections,
/// never removes them. Sections keep their source order and are indexed from zero.
#[must_use]
pub fn segment(tokens: &[Token], depth: Depth) -> Vec<Section> {
    let mut open = OpenSection {
        heading: None,
        members: Vec::new(),
    };
    let mut finished = Vec::new();

    for token in tokens {
        match token {
            Token::Heading(heading) if depth.is_boundary(heading.level) => {
                let next = OpenSection {
                    heading: Some(heading.clone()),
                    members: Vec::new(),
                };
                finished.push(std::mem::replace(&mut open, next));
            }
            Token::Heading(_) | Token::Text { .. } | Token::Code(_) => {
                open.members.push(token.clone());
            }
        }
    }
    finished.push(open);

    let mut used_ids = HashSet::new();
    finished
        .into_iter()
        .filter(|section| section.heading.is_some() || !section.members.is_empty())
        .enumerate()
        .map(|(index, section)| {
            let base = match &section.heading {
                Some(heading) => {
                    if section.members.is_empty() {
                        tracing::debug!(
                            level = heading.level,
                            text = %heading.text,
                            "section has no content beyond its heading"
                        );
                    }
                    slugify(&heading.text)
                }
                None => PREFACE_ID.to_string(),
            };
            Section {
                index,
                id: ensure_unique(&base, &mut used_ids),
                heading: section.heading,
                members: section.members,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/segment.rs"]
mod tests;
