//! System clipboard access for the "copy address" action.

/// Lazily opened clipboard. Opening can fail on headless hosts, so it is
/// deferred until the first copy.
#[derive(Default)]
pub struct ClipboardWriter {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardWriter {
    pub fn write(&mut self, text: &str) -> Result<(), arboard::Error> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_owned()),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }
}
