/// Partner channel gateway
pub mod channel;
/// Command, message and callback handlers
pub mod handlers;
/// Resilient messaging with automatic retry for Telegram API operations
pub mod resilient;
/// Telegram markup for core keyboards
pub mod views;

pub use channel::TelegramChannel;
