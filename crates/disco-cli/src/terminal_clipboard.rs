//! Clipboard writes through the OSC 52 terminal escape.
//!
//! Most modern terminal emulators (and tmux with `set-clipboard on`) copy
//! the payload of `ESC ] 52 ; c ; <base64> BEL` to the system clipboard.

use std::io::Write;

use base64::Engine as _;
use disco_coordinator::{Clipboard, ClipboardError};
use parking_lot::Mutex;

pub(crate) fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

pub(crate) struct Osc52Clipboard<W> {
    out: Mutex<W>,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.lock();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("SAVE10"), "\x1b]52;c;U0FWRTEw\x07");
    }

    #[test]
    fn set_text_writes_sequence() {
        let clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.set_text("SAVE10").unwrap();
        clipboard.set_text("FREESHIP").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(
            written,
            format!("{}{}", osc52_sequence("SAVE10"), osc52_sequence("FREESHIP"))
        );
    }
}
