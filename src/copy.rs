//! Tiered copy protocol for delivering text to the system clipboard.
//!
//! A copy request walks three tiers in a fixed order and stops at the first that succeeds:
//!
//! ```text
//! ClipboardApi ──fail──> LegacyExec ──fail──> ManualRequired
//!      │                     │                      │
//!    done                  done          hand text to the user
//! ```
//!
//! Failures on the first two tiers are normal degradation, not errors: they are logged and the
//! next tier is tried exactly once. The manual tier cannot fail. It hands the text to whatever
//! surface the caller provides and leaves the actual copying to the user, whose explicit
//! acknowledgement fires the optional completion continuation.

pub mod legacy;
pub mod native;

pub use legacy::CommandCopier;
pub use native::NativeClipboard;

use crate::config::Config;
use serde::Serialize;
use std::fmt;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Which tier satisfied a copy request.
pub enum CopyOutcome {
    /// The native clipboard accepted the text.
    ClipboardApi,
    /// A transient copy command accepted the text.
    LegacyExec,
    /// Neither automated tier worked; the text was handed to the user.
    ManualRequired,
}

impl fmt::Display for CopyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ClipboardApi => "copied to clipboard",
            Self::LegacyExec => "copied via copy command",
            Self::ManualRequired => "manual copy required",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
/// Why an automated tier could not deliver the text.
pub enum CopyError {
    /// The native clipboard could not be opened in this session.
    #[error("native clipboard unavailable")]
    Unavailable,
    /// The native clipboard refused the write.
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
    /// No copy command was configured or found on `PATH`.
    #[error("no copy command available")]
    NoCommand,
    /// The copy command could not be started.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// Writing to or waiting on the copy command failed.
    #[error("`{program}` did not accept input: {source}")]
    Io {
        /// Program being fed.
        program: String,
        /// Underlying pipe or wait error.
        #[source]
        source: io::Error,
    },
    /// The copy command ran but reported failure.
    #[error("`{program}` exited with {status}")]
    CommandFailed {
        /// Program that failed.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },
}

/// First tier: an asynchronous-style native clipboard capability.
pub trait ClipboardApi {
    /// Whether the capability is exposed in the current session.
    fn is_available(&self) -> bool;

    /// Writes `text`, blocking until the write settles.
    ///
    /// # Errors
    ///
    /// Returns a [`CopyError`] when the write is refused or the capability is missing.
    fn write_text(&mut self, text: &str) -> Result<(), CopyError>;
}

/// Second tier: a synchronous copy command run against a transient holder of the text.
pub trait LegacyExec {
    /// Runs the copy command for `text`, cleaning up whatever it created before returning.
    ///
    /// # Errors
    ///
    /// Returns a [`CopyError`] when the command is unsupported, cannot start or fails.
    fn exec_copy(&mut self, text: &str) -> Result<(), CopyError>;
}

/// Text handed to the user when no automated tier worked.
///
/// Consuming the hand-off with [`ManualHandoff::acknowledge`] fires the completion
/// continuation, so it runs at most once and only on an explicit confirmation.
pub struct ManualHandoff {
    text: String,
    on_confirmed: Option<Box<dyn FnOnce()>>,
}

impl ManualHandoff {
    #[must_use]
    /// The literal text the user should copy.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Whether acknowledging will run a completion continuation.
    pub fn has_completion(&self) -> bool {
        self.on_confirmed.is_some()
    }

    /// Records that the user copied the text, running the continuation if there is one.
    pub fn acknowledge(self) {
        tracing::debug!("manual copy acknowledged");
        if let Some(on_confirmed) = self.on_confirmed {
            on_confirmed();
        }
    }
}

/// Runs copy requests through the native, legacy and manual tiers in order.
pub struct CopyProtocol<C, L> {
    clipboard: C,
    legacy: L,
}

/// The protocol wired to the real system clipboard and copy commands.
pub type SystemCopyProtocol = CopyProtocol<NativeClipboard, CommandCopier>;

impl SystemCopyProtocol {
    #[must_use]
    /// Builds the system protocol for a process that exits once the copy returns.
    ///
    /// Where native clipboard contents die with their owner, the native tier is skipped so the
    /// copy command tier, whose helpers keep serving the selection, does the work.
    pub fn from_config(cfg: &Config) -> Self {
        let clipboard = if cfg.native_clipboard && NativeClipboard::outlives_process() {
            NativeClipboard::open()
        } else {
            if cfg.native_clipboard {
                tracing::debug!("native clipboard would not outlive this process, skipping it");
            }
            NativeClipboard::disabled()
        };
        let legacy = if cfg.copy_commands.is_empty() {
            CommandCopier::platform_default()
        } else {
            CommandCopier::from_command_lines(&cfg.copy_commands)
        };
        Self::new(clipboard, legacy)
    }
}

impl<C: ClipboardApi, L: LegacyExec> CopyProtocol<C, L> {
    #[must_use]
    /// Combines the two automated tiers.
    pub fn new(clipboard: C, legacy: L) -> Self {
        Self { clipboard, legacy }
    }

    /// Copies `text`, calling `on_manual_required` if both automated tiers fail.
    pub fn copy<F>(&mut self, text: &str, on_manual_required: F) -> CopyOutcome
    where
        F: FnOnce(ManualHandoff),
    {
        self.run(text, on_manual_required, None)
    }

    /// Like [`copy`](Self::copy), attaching a continuation the manual hand-off fires once the
    /// user confirms.
    pub fn copy_then<F, G>(
        &mut self,
        text: &str,
        on_manual_required: F,
        on_confirmed: G,
    ) -> CopyOutcome
    where
        F: FnOnce(ManualHandoff),
        G: FnOnce() + 'static,
    {
        self.run(text, on_manual_required, Some(Box::new(on_confirmed)))
    }

    fn run<F>(
        &mut self,
        text: &str,
        on_manual_required: F,
        on_confirmed: Option<Box<dyn FnOnce()>>,
    ) -> CopyOutcome
    where
        F: FnOnce(ManualHandoff),
    {
        if self.clipboard.is_available() {
            match self.clipboard.write_text(text) {
                Ok(()) => {
                    tracing::debug!(bytes = text.len(), "copied with native clipboard");
                    return CopyOutcome::ClipboardApi;
                }
                Err(e) => tracing::info!("native clipboard failed, falling back: {e}"),
            }
        } else {
            tracing::debug!("native clipboard unavailable, falling back");
        }

        match self.legacy.exec_copy(text) {
            Ok(()) => {
                tracing::debug!(bytes = text.len(), "copied with copy command");
                return CopyOutcome::LegacyExec;
            }
            Err(e @ CopyError::Spawn { .. }) => {
                tracing::warn!("copy command could not be created: {e}");
            }
            Err(e) => tracing::info!("copy command failed, handing off: {e}"),
        }

        on_manual_required(ManualHandoff {
            text: text.to_string(),
            on_confirmed,
        });
        CopyOutcome::ManualRequired
    }
}

#[cfg(test)]
#[path = "tests/copy.rs"]
mod tests;
