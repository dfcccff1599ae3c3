//! User settings from sectcopy.toml, with built-in defaults for anything unset.
//!
//! The file is looked up in the working directory. Besides the segmentation depth it controls
//! code highlighting and the copy tiers.

use crate::segment::{Depth, DepthError};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "sectcopy.toml";

const DEFAULT_DEPTH: u8 = 2;
const DEFAULT_THEME: &str = "base16-ocean.dark";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from sectcopy.toml or falling back to defaults.
pub struct Config {
    #[facet(default = DEFAULT_DEPTH)]
    /// Deepest heading level that starts a section (1, 2 or 3).
    pub depth: u8,
    #[facet(default = true)]
    /// Whether code blocks are syntax highlighted when shown.
    pub highlight: bool,
    #[facet(default = DEFAULT_THEME.to_string())]
    /// Syntect theme used for highlighting.
    pub theme: String,
    #[facet(default = true)]
    /// Whether the native clipboard tier is attempted at all.
    pub native_clipboard: bool,
    #[facet(default = Vec::new())]
    /// Copy command lines for the legacy tier, tried in order; empty uses the platform list.
    pub copy_commands: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            highlight: true,
            theme: DEFAULT_THEME.to_string(),
            native_clipboard: true,
            copy_commands: Vec::new(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectcopy.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid configuration: {e}");
                Self::default()
            }
        }
    }

    /// The configured depth, validated.
    ///
    /// # Errors
    ///
    /// Returns a [`DepthError`] if the file sets a depth other than 1, 2 or 3.
    pub fn depth(&self) -> Result<Depth, DepthError> {
        Depth::new(self.depth)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
