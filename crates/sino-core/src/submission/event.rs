use super::keyboard::{
    BUTTON_BACK, BUTTON_PROCEED, BUTTON_RESET, CALLBACK_CONFIRM, CALLBACK_EDIT_PHONE,
    CALLBACK_RESET,
};

/// Something the user did, already stripped of platform types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// `/start` command
    Start {
        /// Display name used in the greeting
        first_name: Option<String>,
    },
    /// Explicit reset (command, button or callback)
    Reset,
    /// Free text
    Text(String),
    /// Photo attachment
    Photo {
        /// Platform file reference
        file_ref: String,
    },
    /// Video attachment
    Video {
        /// Platform file reference
        file_ref: String,
    },
    /// Any attachment that is neither a photo nor a video
    Unsupported,
    /// Back button
    Back,
    /// Done adding media
    Proceed,
    /// Edit the phone from the confirmation message
    EditPhone,
    /// Confirm the submission
    Confirm,
}

impl InboundEvent {
    /// Map message text to an event, recognizing reply-keyboard buttons.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text {
            BUTTON_BACK => Self::Back,
            BUTTON_PROCEED => Self::Proceed,
            BUTTON_RESET => Self::Reset,
            other => Self::Text(other.to_string()),
        }
    }

    /// Map inline-button callback data to an event.
    #[must_use]
    pub fn from_callback(data: &str) -> Option<Self> {
        match data {
            CALLBACK_CONFIRM => Some(Self::Confirm),
            CALLBACK_EDIT_PHONE => Some(Self::EditPhone),
            CALLBACK_RESET => Some(Self::Reset),
            _ => None,
        }
    }

    /// Short label for logs; never includes user-entered content.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Reset => "reset",
            Self::Text(_) => "text",
            Self::Photo { .. } => "photo",
            Self::Video { .. } => "video",
            Self::Unsupported => "unsupported",
            Self::Back => "back",
            Self::Proceed => "proceed",
            Self::EditPhone => "edit_phone",
            Self::Confirm => "confirm",
        }
    }
}
