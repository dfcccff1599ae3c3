//! Legacy copy tier: pipe the text into a platform copy command.
//!
//! Each request spawns one transient process, feeds it the text on stdin and waits for its exit
//! status. The process is owned by a guard that kills and reaps it on every exit path, so no copy
//! command outlives the request that created it.

use super::{CopyError, LegacyExec};
use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Copies text by running the first available command line from an ordered list.
pub struct CommandCopier {
    candidates: Vec<Vec<String>>,
}

impl CommandCopier {
    #[must_use]
    /// Candidate commands for the current platform and display server.
    pub fn platform_default() -> Self {
        let mut candidates: Vec<&[&str]> = Vec::new();
        if cfg!(target_os = "macos") {
            candidates.push(&["pbcopy"]);
        } else if cfg!(windows) {
            candidates.push(&["clip.exe"]);
        } else {
            if env::var_os("WAYLAND_DISPLAY").is_some() {
                candidates.push(&["wl-copy"]);
            }
            if env::var_os("DISPLAY").is_some() {
                candidates.push(&["xclip", "-selection", "clipboard"]);
                candidates.push(&["xsel", "--clipboard", "--input"]);
            }
        }
        Self {
            candidates: candidates
                .into_iter()
                .map(|argv| argv.iter().map(|arg| (*arg).to_string()).collect())
                .collect(),
        }
    }

    #[must_use]
    /// Candidates from whitespace-separated command lines, blank lines ignored.
    pub fn from_command_lines(lines: &[String]) -> Self {
        Self {
            candidates: lines
                .iter()
                .map(|line| line.split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .filter(|argv| !argv.is_empty())
                .collect(),
        }
    }

    /// The first candidate whose program can be found.
    fn resolve(&self) -> Option<&[String]> {
        self.candidates
            .iter()
            .find(|argv| find_program(&argv[0]).is_some())
            .map(Vec::as_slice)
    }
}

impl LegacyExec for CommandCopier {
    fn exec_copy(&mut self, text: &str) -> Result<(), CopyError> {
        let argv = self.resolve().ok_or(CopyError::NoCommand)?;
        tracing::debug!(program = %argv[0], "running copy command");
        let mut process = TransientProcess::spawn(argv)?;
        process.populate(text)?;
        process.finish()
    }
}

/// A running copy command, killed and reaped on drop unless it already finished.
struct TransientProcess {
    program: String,
    child: Option<Child>,
}

impl TransientProcess {
    fn spawn(argv: &[String]) -> Result<Self, CopyError> {
        let program = argv[0].clone();
        let child = Command::new(&program)
            .args(&argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CopyError::Spawn {
                program: program.clone(),
                source,
            })?;
        Ok(Self {
            program,
            child: Some(child),
        })
    }

    fn io_error(&self, source: std::io::Error) -> CopyError {
        CopyError::Io {
            program: self.program.clone(),
            source,
        }
    }

    /// Writes the text and closes stdin so the command sees end of input.
    fn populate(&mut self, text: &str) -> Result<(), CopyError> {
        let stdin = self
            .child
            .as_mut()
            .and_then(|child| child.stdin.take());
        let Some(mut stdin) = stdin else {
            return Err(self.io_error(std::io::Error::other("stdin not captured")));
        };
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| self.io_error(e))
    }

    /// Waits for the exit status. On a wait error the child stays owned so drop still kills it.
    fn finish(mut self) -> Result<(), CopyError> {
        let Some(child) = self.child.as_mut() else {
            return Ok(());
        };
        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => return Err(self.io_error(e)),
        };
        self.child = None;
        if status.success() {
            Ok(())
        } else {
            Err(CopyError::CommandFailed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

impl Drop for TransientProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                tracing::debug!(program = %self.program, "killing unfinished copy command");
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

/// Locates `program` directly or on `PATH`.
fn find_program(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }
    let search = env::var_os("PATH").unwrap_or_else(OsString::new);
    env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
