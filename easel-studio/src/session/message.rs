//! Outcome messages shown after each interaction

/// How a message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Informational (shown as success)
    Info,
    /// Error (shown as failure)
    Error,
}

/// Human-readable outcome of the last interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    text: String,
    kind: MessageKind,
}

impl PendingMessage {
    /// Create a message, classifying it from its text
    ///
    /// Any text mentioning "success" (any case) is informational; everything
    /// else is an error.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text.to_lowercase().contains("success") {
            MessageKind::Info
        } else {
            MessageKind::Error
        };
        Self { text, kind }
    }

    /// Message text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Presentation kind
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Whether the message reports success
    pub fn is_info(&self) -> bool {
        self.kind == MessageKind::Info
    }
}

impl std::fmt::Display for PendingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
