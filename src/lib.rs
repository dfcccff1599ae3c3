//! sectcopy: split markdown into heading-delimited sections and copy them out.
//!
//! The pipeline runs leaves first:
//!
//! ```text
//! source ─> token::tokenize ─> segment::segment(depth) ─> sections
//!                                                          │
//!                 serialize::to_markdown / CodeBlock::to_markdown
//!                                                          │
//!                                               copy::CopyProtocol ─> CopyOutcome
//! ```
//!
//! Fenced code blocks are opaque to segmentation: headings inside a fence are never boundaries.
//! Copying degrades from the native clipboard to a platform copy command to a manual hand-off.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod copy;
pub mod highlight;
pub mod input;
pub mod logging;
pub mod section;
pub mod segment;
pub mod serialize;
pub mod token;

pub use copy::{CopyOutcome, CopyProtocol, ManualHandoff};
pub use section::Section;
pub use segment::{segment, Depth};
pub use serialize::to_markdown;
pub use token::{tokenize, CodeBlock, Heading, Token};
