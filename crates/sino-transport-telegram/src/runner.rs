use crate::bot;
use crate::bot::handlers::Command;
use crate::bot::TelegramChannel;
use crate::config::BotSettings;
use sino_core::submission::{InMemorySessionStore, SubmissionFlow};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{error, info};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let bot = Bot::new(settings.telegram.bot_token.clone());
    let flow = init_flow(&bot, &settings);
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![flow])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_flow(bot: &Bot, settings: &BotSettings) -> Arc<SubmissionFlow> {
    let store = Arc::new(InMemorySessionStore::from_settings(&settings.flow));
    info!(
        "Session store initialized (capacity: {}, idle timeout: {}s)",
        settings.flow.session_capacity, settings.flow.session_idle_timeout_secs
    );

    let channel = Arc::new(TelegramChannel::new(bot.clone(), &settings.channel));
    info!("Publishing to channel {:?}", settings.channel);

    Arc::new(SubmissionFlow::new(store, channel))
}

/// Update routing: private chats only; commands, then button callbacks,
/// then every other message.
#[must_use]
pub fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_callback_query()
                .filter(|q: CallbackQuery| {
                    q.message.as_ref().is_some_and(|m| m.chat().is_private())
                })
                .endpoint(handle_callback),
        )
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.chat.is_private())
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(dptree::endpoint(handle_message)),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    flow: Arc<SubmissionFlow>,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start(_) => bot::handlers::start(bot, msg, &flow).await,
        Command::Reset => bot::handlers::reset(bot, msg, &flow).await,
        Command::Help => bot::handlers::help(bot, msg).await,
        Command::Healthcheck => bot::handlers::healthcheck(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    flow: Arc<SubmissionFlow>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_message(bot, msg, &flow).await {
        error!("Message handler error: {}", e);
    }
    respond(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    flow: Arc<SubmissionFlow>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_callback(bot, q, &flow).await {
        error!("Callback handler error: {}", e);
    }
    respond(())
}
