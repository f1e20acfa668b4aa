//! Input validators for the free-text steps
//!
//! Every validator returns the value ready for storage, i.e. already
//! escaped for MarkdownV2 rendering.

use lazy_regex::regex_is_match;
use thiserror::Error;

/// Fixed partner categories, in keyboard order.
pub const CATEGORIES: [&str; 6] = [
    "Рестораны",
    "Оформление",
    "Певец",
    "Салон красоты",
    "Оператор/Фотограф",
    "Музыканты",
];

/// Maximum company name length in characters.
pub const COMPANY_MAX_CHARS: usize = 100;

/// Price label accepted verbatim instead of a number.
pub const NEGOTIABLE_PRICE: &str = "Договорная";

/// Maximum portfolio link length in characters.
///
/// Keeps the summary and the channel post well under Telegram's
/// 4096-character message limit even after escaping.
pub const LINK_MAX_CHARS: usize = 500;

/// Substrings that make a media-step text count as a portfolio link.
pub const LINK_MARKERS: [&str; 2] = ["instagram.com", "youtu"];

/// Characters reserved by Telegram MarkdownV2.
const MARKDOWN_V2_RESERVED: [char; 19] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Why a media-step input was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MediaRejection {
    /// A second video was sent
    #[error("a video is already attached")]
    VideoAlreadyPresent,
    /// Five items are already attached
    #[error("media limit reached")]
    LimitReached,
    /// Neither a photo, a video nor a recognized link
    #[error("unsupported content")]
    Unsupported,
    /// Proceed pressed with nothing attached
    #[error("no media or link yet")]
    Empty,
}

/// Input that does not fit the current step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Company name is blank
    #[error("company name is empty")]
    CompanyEmpty,
    /// Company name exceeds [`COMPANY_MAX_CHARS`]
    #[error("company name is {0} characters long")]
    CompanyTooLong(usize),
    /// Price does not match the accepted shapes
    #[error("price does not match the expected format")]
    InvalidPrice,
    /// Phone does not match the accepted shapes
    #[error("phone does not match the expected format")]
    InvalidPhone,
    /// Portfolio link exceeds [`LINK_MAX_CHARS`]
    #[error("link is {0} characters long")]
    LinkTooLong(usize),
}

/// Escape MarkdownV2 reserved characters with a backslash.
#[must_use]
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Exact match against [`CATEGORIES`].
#[must_use]
pub fn match_category(text: &str) -> Option<&'static str> {
    CATEGORIES.iter().copied().find(|c| *c == text)
}

/// Validate a company name and return it sanitized.
///
/// # Errors
///
/// `CompanyEmpty` for blank input, `CompanyTooLong` above the limit.
pub fn validate_company(text: &str) -> Result<String, ValidationError> {
    let name = text.trim();
    if name.is_empty() {
        return Err(ValidationError::CompanyEmpty);
    }
    let len = name.chars().count();
    if len > COMPANY_MAX_CHARS {
        return Err(ValidationError::CompanyTooLong(len));
    }
    Ok(escape_markdown_v2(name))
}

/// Whether a media-step text is a portfolio link.
#[must_use]
pub fn is_link(text: &str) -> bool {
    LINK_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Validate a portfolio link and return it sanitized.
///
/// Call only for texts [`is_link`] accepted.
///
/// # Errors
///
/// `LinkTooLong` above [`LINK_MAX_CHARS`].
pub fn validate_link(text: &str) -> Result<String, ValidationError> {
    let link = text.trim();
    let len = link.chars().count();
    if len > LINK_MAX_CHARS {
        return Err(ValidationError::LinkTooLong(len));
    }
    Ok(escape_markdown_v2(link))
}

/// Validate a price and return it sanitized.
///
/// Accepts `5000`, `5000 TJS`, `от 15000 TJS` and [`NEGOTIABLE_PRICE`].
///
/// # Errors
///
/// `InvalidPrice` for anything else.
pub fn validate_price(text: &str) -> Result<String, ValidationError> {
    let price = text.trim();
    if price == NEGOTIABLE_PRICE
        || regex_is_match!(
            r"(?i)^(?:(?:от|from) )?[0-9]+(?:\s?(?:TJS|сомони|сом|смн))?$",
            price
        )
    {
        Ok(escape_markdown_v2(price))
    } else {
        Err(ValidationError::InvalidPrice)
    }
}

/// Validate a Tajik phone number and return it sanitized.
///
/// # Errors
///
/// `InvalidPhone` unless the input is nine digits, optionally prefixed
/// with `+992`.
pub fn validate_phone(text: &str) -> Result<String, ValidationError> {
    let phone = text.trim();
    if regex_is_match!(r"^(?:\+992)?[0-9]{9}$", phone) {
        Ok(escape_markdown_v2(phone))
    } else {
        Err(ValidationError::InvalidPhone)
    }
}
