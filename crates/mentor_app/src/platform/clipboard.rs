//! System clipboard access.
//!
//! On Linux the copied text is served by the process that set it, and only
//! while a clipboard handle is alive. The handle is therefore opened on the
//! first copy and kept for the rest of the session.

pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

impl ClipboardBackend for arboard::Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        arboard::Clipboard::set_text(self, text.to_owned()).map_err(|err| err.to_string())
    }
}

fn open_system() -> Result<arboard::Clipboard, String> {
    arboard::Clipboard::new().map_err(|err| err.to_string())
}

/// Lazily opened clipboard handle that outlives each copy.
pub struct SessionClipboard<B = arboard::Clipboard> {
    handle: Option<B>,
    open: fn() -> Result<B, String>,
}

impl SessionClipboard {
    pub fn system() -> Self {
        Self::with_opener(open_system)
    }
}

impl<B: ClipboardBackend> SessionClipboard<B> {
    pub fn with_opener(open: fn() -> Result<B, String>) -> Self {
        Self { handle: None, open }
    }

    /// Places `text` on the clipboard, opening the handle on first use.
    pub fn write_text(&mut self, text: &str) -> Result<(), String> {
        let mut handle = match self.handle.take() {
            Some(handle) => handle,
            None => (self.open)()?,
        };
        let result = handle.set_text(text);
        self.handle = Some(handle);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static OPENED: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Vec<String>,
    }

    impl ClipboardBackend for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), String> {
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    fn open_recording() -> Result<RecordingClipboard, String> {
        OPENED.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingClipboard::default())
    }

    fn open_failing() -> Result<RecordingClipboard, String> {
        Err("no display".to_string())
    }

    #[test]
    fn handle_is_opened_once_and_kept_between_copies() {
        let mut clipboard = SessionClipboard::with_opener(open_recording);
        assert_eq!(OPENED.load(Ordering::SeqCst), 0);

        clipboard.write_text("Your tests failed because...").unwrap();
        clipboard.write_text("second answer").unwrap();

        assert_eq!(OPENED.load(Ordering::SeqCst), 1);
        let handle = clipboard.handle.as_ref().expect("handle kept alive");
        assert_eq!(
            handle.writes,
            vec![
                "Your tests failed because...".to_string(),
                "second answer".to_string()
            ]
        );
    }

    #[test]
    fn open_failure_is_reported_and_retried_next_time() {
        let mut clipboard = SessionClipboard::with_opener(open_failing);
        assert_eq!(clipboard.write_text("x"), Err("no display".to_string()));
        assert!(clipboard.handle.is_none());
        assert_eq!(clipboard.write_text("x"), Err("no display".to_string()));
    }
}
