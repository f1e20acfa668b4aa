//! Keyboard descriptions
//!
//! The core only names keyboards and their button layout; the transport
//! turns a [`Layout`] into platform markup.

use super::validation::{CATEGORIES, NEGOTIABLE_PRICE};

// ─────────────────────────────────────────────────────────────────────────────
// Button labels and callback data
// ─────────────────────────────────────────────────────────────────────────────

/// Reply button: go one step back
pub const BUTTON_BACK: &str = "🔙 Назад";
/// Reply button: finish the media step
pub const BUTTON_PROCEED: &str = "➡️ Далее";
/// Reply button: discard the session and start over
pub const BUTTON_RESET: &str = "🔄 Начать заново";
/// Inline button: publish the submission
pub const BUTTON_CONFIRM: &str = "✅ Подтвердить заявку";
/// Inline button: return to the phone step
pub const BUTTON_EDIT_PHONE: &str = "🔙 Изменить телефон";

/// Callback data for [`BUTTON_CONFIRM`]
pub const CALLBACK_CONFIRM: &str = "confirm";
/// Callback data for [`BUTTON_EDIT_PHONE`]
pub const CALLBACK_EDIT_PHONE: &str = "back_to_phone";
/// Callback data for the inline reset button
pub const CALLBACK_RESET: &str = "reset";

/// Keyboard attached to a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Category choice
    Categories,
    /// Back and reset only
    Back,
    /// Proceed, back and reset
    Media,
    /// Negotiable-price shortcut, back and reset
    Price,
    /// Inline confirm / edit phone / reset
    Confirm,
    /// Remove the reply keyboard
    Remove,
}

/// Platform-neutral button layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Rows of reply buttons; pressing one sends its label as text
    Reply(Vec<Vec<&'static str>>),
    /// Rows of `(label, callback data)` inline buttons
    Inline(Vec<Vec<(&'static str, &'static str)>>),
    /// Hide the current reply keyboard
    Remove,
}

impl Keyboard {
    /// Button layout of this keyboard.
    #[must_use]
    pub fn layout(self) -> Layout {
        match self {
            Self::Categories => {
                let mut rows: Vec<Vec<&'static str>> =
                    CATEGORIES.chunks(2).map(|pair| pair.to_vec()).collect();
                rows.push(vec![BUTTON_BACK]);
                Layout::Reply(rows)
            }
            Self::Back => Layout::Reply(vec![nav_row()]),
            Self::Media => Layout::Reply(vec![vec![BUTTON_PROCEED], nav_row()]),
            Self::Price => Layout::Reply(vec![vec![NEGOTIABLE_PRICE], nav_row()]),
            Self::Confirm => Layout::Inline(vec![
                vec![(BUTTON_CONFIRM, CALLBACK_CONFIRM)],
                vec![(BUTTON_EDIT_PHONE, CALLBACK_EDIT_PHONE)],
                vec![(BUTTON_RESET, CALLBACK_RESET)],
            ]),
            Self::Remove => Layout::Remove,
        }
    }
}

fn nav_row() -> Vec<&'static str> {
    vec![BUTTON_BACK, BUTTON_RESET]
}
