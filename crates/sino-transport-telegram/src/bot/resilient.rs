//! Resilient messaging with automatic retry for Telegram API operations.
//!
//! Replies to the user are retried on failure using exponential backoff with
//! jitter. Channel publishing does not go through here.

use crate::bot::views::{parse_mode, reply_markup};
use crate::config::{
    TELEGRAM_API_INITIAL_BACKOFF_MS, TELEGRAM_API_MAX_BACKOFF_MS, TELEGRAM_API_MAX_RETRIES,
};
use anyhow::Result;
use sino_core::submission::Reply;
use std::future::Future;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message};
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;
use tracing::warn;

/// Run a Telegram API operation, retrying with exponential backoff.
///
/// # Errors
///
/// Returns the last error once all attempts are exhausted.
pub async fn retry_telegram_operation<F, Fut, T>(operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(TELEGRAM_API_INITIAL_BACKOFF_MS)
        .max_delay(Duration::from_millis(TELEGRAM_API_MAX_BACKOFF_MS))
        .map(jitter)
        .take(TELEGRAM_API_MAX_RETRIES);

    Retry::spawn(retry_strategy, operation).await.map_err(|e| {
        warn!(
            "Telegram API operation failed after {} attempts: {}",
            TELEGRAM_API_MAX_RETRIES, e
        );
        e
    })
}

/// Send a core reply with its keyboard and parse mode, retrying on failure.
///
/// # Errors
///
/// Returns an error after all retries are exhausted.
pub async fn send_reply_resilient(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<Message> {
    retry_telegram_operation(|| async {
        let mut req = bot.send_message(chat_id, reply.text.clone());
        if let Some(pm) = parse_mode(reply.format) {
            req = req.parse_mode(pm);
        }
        if let Some(keyboard) = reply.keyboard {
            req = req.reply_markup(reply_markup(keyboard));
        }
        req.await
            .map_err(|e| anyhow::anyhow!("Telegram send error: {e}"))
    })
    .await
}

/// Send a plain text message, retrying on failure.
///
/// # Errors
///
/// Returns an error after all retries are exhausted.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
) -> Result<Message> {
    send_reply_resilient(bot, chat_id, &Reply::plain(text)).await
}
