//! Broadcast channel seam
//!
//! The flow publishes a confirmed submission through [`ChannelGateway`];
//! the Telegram transport implements it on top of the bot API.

use async_trait::async_trait;
use thiserror::Error;

use super::session::MediaItem;

/// Largest album the platform accepts in one call.
pub const MEDIA_GROUP_LIMIT: usize = 10;

/// Errors reported by a channel gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The platform refused the request (bad file id, missing rights, ...)
    #[error("channel rejected the message: {0}")]
    Rejected(String),
    /// The request did not reach the platform
    #[error("channel unreachable: {0}")]
    Network(String),
}

/// Destination for published submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    /// Post a MarkdownV2 text message.
    async fn send_text(&self, text: &str) -> Result<(), GatewayError>;

    /// Post attachments as one album; `items` holds at most
    /// [`MEDIA_GROUP_LIMIT`] entries.
    async fn send_media_group(&self, items: &[MediaItem]) -> Result<(), GatewayError>;
}
