//! Publishing to the partner channel through the Bot API.

use async_trait::async_trait;
use sino_core::config::ChannelTarget;
use sino_core::submission::{ChannelGateway, GatewayError, MediaItem, MediaKind};
use teloxide::prelude::*;
use teloxide::types::{
    FileId, InputFile, InputMedia, InputMediaPhoto, InputMediaVideo, ParseMode, Recipient,
};
use teloxide::RequestError;
use tracing::debug;

/// [`ChannelGateway`] backed by a Telegram channel
///
/// Sends are not retried here; a failed publish is reported back to the user,
/// who can confirm again.
#[derive(Clone)]
pub struct TelegramChannel {
    bot: Bot,
    target: Recipient,
}

impl TelegramChannel {
    /// Gateway posting to `channel` on behalf of `bot`.
    #[must_use]
    pub fn new(bot: Bot, channel: &ChannelTarget) -> Self {
        Self {
            bot,
            target: recipient(channel),
        }
    }
}

/// Bot API recipient for a configured channel.
#[must_use]
pub fn recipient(channel: &ChannelTarget) -> Recipient {
    match channel {
        ChannelTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChannelTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

fn input_file(item: &MediaItem) -> InputFile {
    InputFile::file_id(FileId(item.file_ref.clone()))
}

fn input_media(item: &MediaItem) -> InputMedia {
    match item.kind {
        MediaKind::Photo => InputMedia::Photo(InputMediaPhoto::new(input_file(item))),
        MediaKind::Video => InputMedia::Video(InputMediaVideo::new(input_file(item))),
    }
}

fn gateway_error(e: RequestError) -> GatewayError {
    match e {
        RequestError::Network(e) => GatewayError::Network(e.to_string()),
        RequestError::Io(e) => GatewayError::Network(e.to_string()),
        other => GatewayError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl ChannelGateway for TelegramChannel {
    async fn send_text(&self, text: &str) -> Result<(), GatewayError> {
        self.bot
            .send_message(self.target.clone(), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(gateway_error)?;
        Ok(())
    }

    async fn send_media_group(&self, items: &[MediaItem]) -> Result<(), GatewayError> {
        debug!(items = items.len(), "Publishing media to channel");
        match items {
            [] => Ok(()),
            // sendMediaGroup needs at least two items
            [single] => {
                let result = match single.kind {
                    MediaKind::Photo => self
                        .bot
                        .send_photo(self.target.clone(), input_file(single))
                        .await
                        .map(drop),
                    MediaKind::Video => self
                        .bot
                        .send_video(self.target.clone(), input_file(single))
                        .await
                        .map(drop),
                };
                result.map_err(gateway_error)
            }
            _ => {
                let media: Vec<InputMedia> = items.iter().map(input_media).collect();
                self.bot
                    .send_media_group(self.target.clone(), media)
                    .await
                    .map_err(gateway_error)?;
                Ok(())
            }
        }
    }
}
