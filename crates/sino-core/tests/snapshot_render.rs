use insta::assert_snapshot;
use sino_core::submission::render::{broadcast, summary};
use sino_core::submission::validation::{
    escape_markdown_v2, validate_company, validate_phone, validate_price,
};
use sino_core::submission::{MediaItem, Step, UserSession};

fn submission() -> UserSession {
    let mut session = UserSession::new();
    session.step = Step::Confirm;
    session.category = Some("Оператор/Фотограф".to_string());
    session.company = Some(validate_company(" Studio.tj ").expect("company"));
    session.link = Some(escape_markdown_v2("https://instagram.com/tuyona"));
    session.price = Some(validate_price("от 15000 TJS").expect("price"));
    session.phone = Some(validate_phone("+992123456789").expect("phone"));
    session.push_media(MediaItem::photo("p1")).expect("photo");
    session.push_media(MediaItem::video("v1")).expect("video");
    session
}

#[test]
fn test_summary_snapshot() {
    assert_snapshot!(summary(&submission()), @r"
    📝 *Проверьте заявку:*

    📌 *Категория:* Оператор/Фотограф
    🏷 *Название:* Studio\.tj
    🔗 *Ссылка:* https://instagram\.com/tuyona
    📎 *Файлов:* 2
    💰 *Цена:* от 15000 TJS
    📞 *Телефон:* \+992123456789

    Все верно?
    ");
}

#[test]
fn test_broadcast_snapshot() {
    assert_snapshot!(broadcast(&submission()), @r"
    🎉 *Новая заявка от партнёра\!*

    📌 *Категория:* Оператор/Фотограф
    🏷 *Название:* Studio\.tj
    🔗 *Ссылка:* https://instagram\.com/tuyona
    💰 *Цена:* от 15000 TJS
    📞 *Телефон:* \+992123456789
    ");
}
