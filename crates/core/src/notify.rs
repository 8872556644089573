use std::sync::Mutex;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ToastVariant>,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: ToastVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Some(ToastVariant::Destructive)
    }
}

/// Surface that shows toasts to the user.
pub trait Notifier: Send + Sync {
    fn toast(&self, toast: Toast);
}

#[derive(Debug, thiserror::Error)]
#[error("Clipboard unavailable: {reason}")]
pub struct ClipboardError {
    pub reason: String,
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self.contents.lock().map_err(|_| ClipboardError {
            reason: "clipboard lock poisoned".to_string(),
        })?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Keeps every toast it receives; handy wherever output is inspected later.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

/// Copies `text` and confirms with a toast naming what was copied.
pub fn copy_to_clipboard(
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
    text: &str,
    kind: &str,
) -> Result<(), ClipboardError> {
    clipboard.write_text(text)?;
    notifier.toast(Toast::new("Copied!", format!("{kind} copied to clipboard")));
    Ok(())
}
