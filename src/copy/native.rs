//! Native clipboard tier backed by arboard.

use super::{ClipboardApi, CopyError};

/// System clipboard handle, absent when the session exposes no clipboard.
///
/// On X11 and Wayland the copied text is served by the owning process and disappears with it
/// unless a clipboard manager takes it over. Only long-lived owners should open it there; see
/// [`NativeClipboard::outlives_process`].
pub struct NativeClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl NativeClipboard {
    #[must_use]
    /// Opens the system clipboard, recording it as unavailable if that fails.
    pub fn open() -> Self {
        match arboard::Clipboard::new() {
            Ok(clipboard) => Self {
                clipboard: Some(clipboard),
            },
            Err(e) => {
                tracing::debug!("native clipboard not exposed: {e}");
                Self::disabled()
            }
        }
    }

    #[must_use]
    /// Whether text written here stays on the clipboard after this process exits.
    ///
    /// True on macOS and Windows, where the OS holds the contents. Elsewhere the selection is
    /// served by the writer, so a process that exits right after copying loses it.
    pub const fn outlives_process() -> bool {
        cfg!(any(target_os = "macos", windows))
    }

    #[must_use]
    /// A handle that never attempts a native write.
    pub fn disabled() -> Self {
        Self { clipboard: None }
    }
}

impl ClipboardApi for NativeClipboard {
    fn is_available(&self) -> bool {
        self.clipboard.is_some()
    }

    fn write_text(&mut self, text: &str) -> Result<(), CopyError> {
        let clipboard = self.clipboard.as_mut().ok_or(CopyError::Unavailable)?;
        clipboard
            .set_text(text)
            .map_err(|e| CopyError::Rejected(e.to_string()))
    }
}
