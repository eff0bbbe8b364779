use temposync_core::Clipboard;

/// The operating system clipboard. Writes fail when no clipboard is reachable
/// (headless sessions) or the crate was built without the `clipboard` feature.
///
/// On Linux the copying process owns the selection, so a write blocks until
/// another client has taken the contents. Otherwise the text would vanish
/// when `temposync` exits.
pub struct SystemClipboard {
    #[cfg(feature = "clipboard")]
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// True when [`Clipboard::write_text`] only returns after the value was pasted.
    pub const WAITS_FOR_PASTE: bool = cfg!(all(feature = "clipboard", target_os = "linux"));

    #[cfg(feature = "clipboard")]
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!(%err, "system clipboard unavailable");
                None
            }
        };
        Self { inner }
    }

    #[cfg(not(feature = "clipboard"))]
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(feature = "clipboard", target_os = "linux"))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text.to_owned())
}

#[cfg(all(feature = "clipboard", not(target_os = "linux")))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_owned())
}

impl Clipboard for SystemClipboard {
    #[cfg(feature = "clipboard")]
    fn write_text(&mut self, text: &str) -> bool {
        let Some(clipboard) = self.inner.as_mut() else {
            return false;
        };
        match set_text(clipboard, text) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "failed to set clipboard contents");
                false
            }
        }
    }

    #[cfg(not(feature = "clipboard"))]
    fn write_text(&mut self, _text: &str) -> bool {
        false
    }
}
