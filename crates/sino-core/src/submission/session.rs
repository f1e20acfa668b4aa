use serde::{Deserialize, Serialize};

use super::step::Step;
use super::validation::MediaRejection;

/// Telegram user identifier
pub type UserId = i64;

/// Maximum attachments per submission.
pub const MAX_MEDIA_ITEMS: usize = 5;

/// Attachment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Photo attachment
    Photo,
    /// Video attachment
    Video,
}

/// Uploaded attachment, referenced by its platform file id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Photo or video
    pub kind: MediaKind,
    /// Platform-assigned file reference
    pub file_ref: String,
}

impl MediaItem {
    /// Photo attachment.
    pub fn photo(file_ref: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Photo,
            file_ref: file_ref.into(),
        }
    }

    /// Video attachment.
    pub fn video(file_ref: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            file_ref: file_ref.into(),
        }
    }
}

/// Answers collected from one user so far
///
/// Text fields are stored already escaped for MarkdownV2. The media list is
/// only reachable through [`UserSession::push_media`], which keeps it at
/// [`MAX_MEDIA_ITEMS`] entries with at most one video.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSession {
    /// Current step
    pub step: Step,
    /// Selected category
    pub category: Option<String>,
    /// Company, group or personal name
    pub company: Option<String>,
    /// Portfolio link
    pub link: Option<String>,
    media: Vec<MediaItem>,
    /// Price text
    pub price: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    #[serde(default)]
    broadcast_sent: bool,
}

impl UserSession {
    /// Empty session positioned at the first step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attachments in upload order.
    #[must_use]
    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    /// Whether a video is already attached.
    #[must_use]
    pub fn has_video(&self) -> bool {
        self.media.iter().any(|m| m.kind == MediaKind::Video)
    }

    /// Whether the media limit is reached.
    #[must_use]
    pub fn is_media_full(&self) -> bool {
        self.media.len() >= MAX_MEDIA_ITEMS
    }

    /// Whether the media step has anything to show: a link or an attachment.
    #[must_use]
    pub fn has_portfolio(&self) -> bool {
        self.link.is_some() || !self.media.is_empty()
    }

    /// Drop all attachments.
    pub fn clear_media(&mut self) {
        self.media.clear();
    }

    /// Whether the channel text of this submission is already posted.
    ///
    /// Set when a publish got the text out but not the album, so that a
    /// retry only sends what is missing.
    #[must_use]
    pub const fn broadcast_sent(&self) -> bool {
        self.broadcast_sent
    }

    /// Record that the channel text was posted.
    pub fn mark_broadcast_sent(&mut self) {
        self.broadcast_sent = true;
    }

    /// Forget a posted channel text, e.g. after the answers were edited.
    pub fn clear_broadcast_sent(&mut self) {
        self.broadcast_sent = false;
    }

    /// Append an attachment and return the new count.
    ///
    /// # Errors
    ///
    /// `LimitReached` when five items are attached, `VideoAlreadyPresent`
    /// for a second video. The session is left unchanged on error.
    pub fn push_media(&mut self, item: MediaItem) -> Result<usize, MediaRejection> {
        if item.kind == MediaKind::Video && self.has_video() {
            return Err(MediaRejection::VideoAlreadyPresent);
        }
        if self.is_media_full() {
            return Err(MediaRejection::LimitReached);
        }
        self.media.push(item);
        Ok(self.media.len())
    }
}
