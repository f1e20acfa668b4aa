use serde::{Deserialize, Serialize};

/// Named position in the fixed form sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Step {
    /// Choosing one of the fixed partner categories
    #[default]
    Category,
    /// Entering the company, group or personal name
    Company,
    /// Sending a link or up to five photos/videos
    Media,
    /// Entering the service price
    Price,
    /// Entering the contact phone
    Phone,
    /// Reviewing the summary before publishing
    Confirm,
    /// Submission published
    Done,
}

impl Step {
    /// Every step in form order.
    pub const ALL: [Self; 7] = [
        Self::Category,
        Self::Company,
        Self::Media,
        Self::Price,
        Self::Phone,
        Self::Confirm,
        Self::Done,
    ];

    /// The step that follows this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Category => Some(Self::Company),
            Self::Company => Some(Self::Media),
            Self::Media => Some(Self::Price),
            Self::Price => Some(Self::Phone),
            Self::Phone => Some(Self::Confirm),
            Self::Confirm => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Where "back" leads. `Category` is the first real step and `Done` is
    /// terminal, so neither has a predecessor.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Category | Self::Done => None,
            Self::Company => Some(Self::Category),
            Self::Media => Some(Self::Company),
            Self::Price => Some(Self::Media),
            Self::Phone => Some(Self::Price),
            Self::Confirm => Some(Self::Phone),
        }
    }
}
