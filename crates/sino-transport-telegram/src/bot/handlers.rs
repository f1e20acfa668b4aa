use crate::bot::resilient::{send_message_resilient, send_reply_resilient};
use anyhow::Result;
use sino_core::submission::prompts;
use sino_core::submission::{InboundEvent, Reply, SubmissionFlow, UserId};
use teloxide::{prelude::*, types::CallbackQuery, utils::command::BotCommands};
use tracing::{debug, error, info, warn};

// Helper function to get user name from Message
fn get_user_name(msg: &Message) -> String {
    if let Some(ref user) = msg.from {
        if let Some(ref username) = user.username {
            return username.clone();
        }
        if !user.first_name.is_empty() {
            return user.first_name.clone();
        }
    }
    "Unknown".to_string()
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start a new submission; a deep-link payload is accepted and ignored
    #[command(description = "Start a new submission.")]
    Start(String),
    /// Drop the current submission and pick a category again
    #[command(description = "Start over.")]
    Reset,
    /// Explain the steps
    #[command(description = "How it works.")]
    Help,
    /// Check bot health
    #[command(description = "Check bot health.")]
    Healthcheck,
}

/// Map message content to a flow event.
///
/// Text wins over attachments; of several photo sizes the largest one is
/// used. Anything else is reported as unsupported.
#[must_use]
pub fn event_from_message(msg: &Message) -> InboundEvent {
    let photo = msg
        .photo()
        .and_then(|sizes| sizes.last())
        .map(|size| size.file.id.0.clone());
    let video = msg.video().map(|video| video.file.id.0.clone());
    event_from_parts(msg.text(), photo, video)
}

fn event_from_parts(
    text: Option<&str>,
    photo: Option<String>,
    video: Option<String>,
) -> InboundEvent {
    match (text, photo, video) {
        (Some(text), _, _) => InboundEvent::from_text(text),
        (None, Some(file_ref), _) => InboundEvent::Photo { file_ref },
        (None, None, Some(file_ref)) => InboundEvent::Video { file_ref },
        (None, None, None) => InboundEvent::Unsupported,
    }
}

/// Run one event through the flow and deliver the replies.
///
/// Store failures are logged and answered with a generic notice.
///
/// # Errors
///
/// Returns an error if a reply cannot be delivered.
pub async fn dispatch_event(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    flow: &SubmissionFlow,
    event: InboundEvent,
) -> Result<()> {
    debug!(user_id, event = event.kind(), "Handling event");
    let replies = match flow.handle(user_id, event).await {
        Ok(replies) => replies,
        Err(e) => {
            error!("Session store error for user {user_id}: {e}");
            vec![Reply::plain(prompts::INTERNAL_ERROR)]
        }
    };
    send_replies(bot, chat_id, &replies).await
}

/// Send replies in order, stopping at the first undeliverable one.
///
/// # Errors
///
/// Returns an error if a reply cannot be delivered after retries.
pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: &[Reply]) -> Result<()> {
    for reply in replies {
        send_reply_resilient(bot, chat_id, reply).await?;
    }
    Ok(())
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the greeting cannot be sent.
pub async fn start(bot: Bot, msg: Message, flow: &SubmissionFlow) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    let user_name = get_user_name(&msg);
    info!("User {user_id} ({user_name}) initiated /start command.");

    let first_name = msg.from.as_ref().map(|u| u.first_name.clone());
    dispatch_event(
        &bot,
        msg.chat.id,
        user_id,
        flow,
        InboundEvent::Start { first_name },
    )
    .await
}

/// Reset handler
///
/// # Errors
///
/// Returns an error if the category prompt cannot be sent.
pub async fn reset(bot: Bot, msg: Message, flow: &SubmissionFlow) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    info!("User {user_id} reset the submission.");
    dispatch_event(&bot, msg.chat.id, user_id, flow, InboundEvent::Reset).await
}

/// Help handler
///
/// # Errors
///
/// Returns an error if the help text cannot be sent.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    send_message_resilient(&bot, msg.chat.id, prompts::HELP).await?;
    Ok(())
}

/// Healthcheck handler
///
/// # Errors
///
/// Returns an error if the healthcheck response cannot be sent.
pub async fn healthcheck(bot: Bot, msg: Message) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    info!("Healthcheck command received from user {user_id}.");
    bot.send_message(msg.chat.id, "OK").await?;
    info!("Responded 'OK' to healthcheck from user {user_id}.");
    Ok(())
}

/// Handler for every non-command message: text, button labels and media.
///
/// # Errors
///
/// Returns an error if a reply cannot be delivered.
pub async fn handle_message(bot: Bot, msg: Message, flow: &SubmissionFlow) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    let event = event_from_message(&msg);
    dispatch_event(&bot, msg.chat.id, user_id, flow, event).await
}

/// Handler for inline-button presses on the confirmation message.
///
/// The query is always answered so the client stops its spinner.
///
/// # Errors
///
/// Returns an error if a reply cannot be delivered.
pub async fn handle_callback(bot: Bot, q: CallbackQuery, flow: &SubmissionFlow) -> Result<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {e}");
    }

    let user_id = q.from.id.0.cast_signed();
    let Some(event) = q.data.as_deref().and_then(InboundEvent::from_callback) else {
        debug!(user_id, "Ignoring unknown callback data");
        return Ok(());
    };
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        warn!(user_id, "Callback query without a message");
        return Ok(());
    };

    dispatch_event(&bot, chat_id, user_id, flow, event).await
}
