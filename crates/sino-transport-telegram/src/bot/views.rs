//! Telegram markup for core keyboards

use sino_core::submission::{Keyboard, Layout, TextFormat};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, KeyboardRemove,
    ParseMode, ReplyMarkup,
};

/// Render a keyboard as Bot API markup.
#[must_use]
pub fn reply_markup(keyboard: Keyboard) -> ReplyMarkup {
    match keyboard.layout() {
        Layout::Reply(rows) => {
            let rows: Vec<Vec<KeyboardButton>> = rows
                .into_iter()
                .map(|row| row.into_iter().map(KeyboardButton::new).collect())
                .collect();
            KeyboardMarkup::new(rows).resize_keyboard().into()
        }
        Layout::Inline(rows) => {
            let rows: Vec<Vec<InlineKeyboardButton>> = rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|(label, data)| InlineKeyboardButton::callback(label, data))
                        .collect()
                })
                .collect();
            InlineKeyboardMarkup::new(rows).into()
        }
        Layout::Remove => KeyboardRemove::new().into(),
    }
}

/// Parse mode for a reply format.
#[must_use]
pub const fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::MarkdownV2 => Some(ParseMode::MarkdownV2),
    }
}
