//! User input must never turn into MarkdownV2 markup in channel posts.

use lazy_regex::{regex_is_match, regex_replace_all};
use sino_core::submission::render::broadcast;
use sino_core::submission::validation::{escape_markdown_v2, validate_company};
use sino_core::submission::UserSession;

/// Drop every `\x` escape pair; whatever reserved character is left was not
/// escaped.
fn has_unescaped_markup(value: &str) -> bool {
    let stripped = regex_replace_all!(r"\\.", value, |_| "");
    regex_is_match!(r"[_*\[\]()~`>#+\-=|{}.!\\]", &stripped)
}

fn field<'a>(text: &'a str, label: &str) -> &'a str {
    text.lines()
        .find_map(|line| line.strip_prefix(label))
        .unwrap_or_else(|| panic!("{label} missing in {text}"))
}

#[test]
fn test_company_markup_is_escaped() {
    for input in [
        "*Bold* _italic_ ~strike~",
        "[click](https://evil.example)",
        "`code` > quote | spoiler",
        "Tuyona.tj - #1 {best}!",
        "back\\slash",
    ] {
        let mut session = UserSession::new();
        session.company = Some(validate_company(input).expect("valid company"));
        let text = broadcast(&session);
        let company = field(&text, "🏷 *Название:* ");
        assert!(!has_unescaped_markup(company), "{input:?} leaked as {company:?}");
    }
}

#[test]
fn test_link_markup_is_escaped() {
    let mut session = UserSession::new();
    session.link = Some(escape_markdown_v2(
        "https://instagram.com/tuyona_(official)?a=1&b=2",
    ));
    let text = broadcast(&session);
    let link = field(&text, "🔗 *Ссылка:* ");
    assert!(!has_unescaped_markup(link), "{link:?}");
}

#[test]
fn test_detector_catches_raw_markup() {
    assert!(has_unescaped_markup("*raw*"));
    assert!(has_unescaped_markup("\\\\."));
    assert!(!has_unescaped_markup("\\*safe\\*"));
}
