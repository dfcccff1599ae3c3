use super::Config;
use crate::segment::{Depth, DepthError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let cfg = Config::load_from(Path::new("/nonexistent/sectcopy.toml"));

    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.depth(), Ok(Depth::TWO));
    assert!(cfg.highlight);
    assert!(cfg.native_clipboard);
    assert!(cfg.copy_commands.is_empty());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = config_file("depth = 3\n");

    let cfg = Config::load_from(file.path());

    assert_eq!(cfg.depth(), Ok(Depth::THREE));
    assert_eq!(cfg.theme, "base16-ocean.dark");
    assert!(cfg.highlight);
}

#[test]
fn test_full_file() {
    let file = config_file(
        r#"
depth = 1
highlight = false
theme = "InspiredGitHub"
native_clipboard = false
copy_commands = ["xsel --clipboard --input", "pbcopy"]
"#,
    );

    let cfg = Config::load_from(file.path());

    assert_eq!(cfg.depth(), Ok(Depth::ONE));
    assert!(!cfg.highlight);
    assert_eq!(cfg.theme, "InspiredGitHub");
    assert!(!cfg.native_clipboard);
    assert_eq!(cfg.copy_commands, vec!["xsel --clipboard --input", "pbcopy"]);
}

#[test]
fn test_malformed_file_falls_back() {
    let file = config_file("depth = [not toml");

    assert_eq!(Config::load_from(file.path()), Config::default());
}

#[test]
fn test_out_of_range_depth_is_reported() {
    let file = config_file("depth = 5\n");

    let cfg = Config::load_from(file.path());

    assert_eq!(cfg.depth(), Err(DepthError::OutOfRange(5)));
}
