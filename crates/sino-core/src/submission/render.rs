//! MarkdownV2 rendering of a session
//!
//! Stored text fields are already escaped; only the category, which comes
//! from the fixed list, is escaped here.

use std::fmt::Write;

use super::session::UserSession;
use super::validation::escape_markdown_v2;

const MISSING: &str = "—";

/// Review message shown at the confirmation step.
#[must_use]
pub fn summary(session: &UserSession) -> String {
    let mut text = String::from("📝 *Проверьте заявку:*\n\n");
    push_common_fields(&mut text, session, true);
    text.push_str("\nВсе верно?");
    text
}

/// Message published to the channel.
#[must_use]
pub fn broadcast(session: &UserSession) -> String {
    let mut text = String::from("🎉 *Новая заявка от партнёра\\!*\n\n");
    push_common_fields(&mut text, session, false);
    text.truncate(text.trim_end().len());
    text
}

fn push_common_fields(text: &mut String, session: &UserSession, with_media_count: bool) {
    let category = session
        .category
        .as_deref()
        .map_or_else(|| MISSING.to_string(), escape_markdown_v2);

    let _ = writeln!(text, "📌 *Категория:* {category}");
    let _ = writeln!(text, "🏷 *Название:* {}", field(session.company.as_deref()));
    let _ = writeln!(text, "🔗 *Ссылка:* {}", field(session.link.as_deref()));
    if with_media_count {
        let _ = writeln!(text, "📎 *Файлов:* {}", session.media().len());
    }
    let _ = writeln!(text, "💰 *Цена:* {}", field(session.price.as_deref()));
    let _ = writeln!(text, "📞 *Телефон:* {}", field(session.phone.as_deref()));
}

fn field(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}
