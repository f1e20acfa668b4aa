use super::keyboard::Keyboard;

/// Rendering mode of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Sent as-is
    #[default]
    Plain,
    /// Telegram MarkdownV2; dynamic parts must already be escaped
    MarkdownV2,
}

/// Outbound message to the user who triggered the event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message text
    pub text: String,
    /// Keyboard to attach, if any
    pub keyboard: Option<Keyboard>,
    /// Rendering mode
    pub format: TextFormat,
}

impl Reply {
    /// Plain-text reply without a keyboard.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            format: TextFormat::Plain,
        }
    }

    /// MarkdownV2 reply without a keyboard.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            format: TextFormat::MarkdownV2,
        }
    }

    /// Attach a keyboard.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}
