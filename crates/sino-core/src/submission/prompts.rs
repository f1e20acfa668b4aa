//! User-facing texts
//!
//! Plain text unless stated otherwise; MarkdownV2 texts live in
//! [`super::render`].

use super::session::MAX_MEDIA_ITEMS;
use super::validation::{COMPANY_MAX_CHARS, LINK_MAX_CHARS};

/// Category prompt
pub const CHOOSE_CATEGORY: &str =
    "Выберите категорию, в которой вы хотели бы стать нашим партнёром:";
/// Category prompt shown after going back
pub const CHOOSE_CATEGORY_AGAIN: &str = "Выберите категорию:";
/// Company prompt
pub const ASK_COMPANY: &str = "Введите название вашей компании, группы или имя:";
/// Company name blank
pub const COMPANY_EMPTY: &str = "Название не может быть пустым. Введите название:";
/// Media prompt
pub const ASK_MEDIA: &str = "Отправьте ссылку или до 5 файлов: фото и/или видео.\n\
     Можно 1 видео и до 4 фото, или 5 фото, или только 1 видео.";
/// Media prompt shown after going back
pub const ASK_MEDIA_AGAIN: &str = "Снова отправьте ссылку или до 5 медиафайлов.\n\
     Допустимо: 1 видео и до 4 фото, или только фото, или только видео.";
/// Link accepted
pub const LINK_SAVED: &str = "Ссылка сохранена ✅\nТеперь укажите цену:";
/// Invitation to continue after an upload
pub const MORE_OR_PROCEED: &str = "Отправьте ещё файлы или нажмите «➡️ Далее».";
/// Fifth file accepted
pub const MEDIA_COMPLETE: &str = "Вы загрузили 5 файлов. ✅\nУкажите цену:";
/// Second video refused
pub const VIDEO_ALREADY_PRESENT: &str = "Вы уже отправили видео. Можно только одно.";
/// Sixth file refused
pub const MEDIA_LIMIT_REACHED: &str = "Вы уже отправили 5 файлов.";
/// Anything but a link, photo or video
pub const MEDIA_UNSUPPORTED: &str =
    "Этот тип файла не поддерживается. Отправьте ссылку, фото или видео.";
/// Proceed pressed with nothing attached
pub const MEDIA_EMPTY: &str = "Сначала отправьте ссылку или хотя бы один файл.";
/// Price prompt
pub const ASK_PRICE: &str = "Укажите цену за вашу услугу:";
/// Price format hint
pub const PRICE_FORMAT: &str =
    "Укажите цену в формате: 5000, 5000 TJS, от 15000 TJS или «Договорная».";
/// Price accepted
pub const PRICE_SAVED: &str = "Цена сохранена ✅\nУкажите номер телефона:";
/// Phone prompt
pub const ASK_PHONE: &str = "Укажите ваш номер телефона:";
/// Phone rejected
pub const INVALID_PHONE: &str =
    "Неверный номер телефона. Формат: +992XXXXXXXXX или XXXXXXXXX (9 цифр).";
/// Submission published
pub const SUBMITTED: &str = "Ваша заявка отправлена ✅";
/// Offer to start another submission
pub const SUBMIT_ANOTHER: &str = "Хотите отправить ещё одну заявку? Введите /start";
/// Channel send failed
pub const SUBMIT_FAILED: &str =
    "Ошибка при отправке заявки. Данные сохранены, попробуйте подтвердить ещё раз.";
/// Generic failure while processing an event
pub const INTERNAL_ERROR: &str = "Произошла ошибка. Попробуйте ещё раз или введите /start.";
/// Back pressed at the first step
pub const ALREADY_AT_START: &str = "Вы уже в начале. Введите /start, чтобы начать заново.";
/// Any input before `/start`
pub const START_FIRST: &str = "Начните с команды /start.";
/// Confirm pressed without a session
pub const CONFIRM_WITHOUT_SESSION: &str = "Что-то пошло не так. Введите /start.";
/// Input that fits no rule of the current step
pub const FOLLOW_STEPS: &str = "Следуйте шагам или введите /start.";
/// `/help` body
pub const HELP: &str = "Я помогу отправить заявку на партнёрство с Tuyona.\n\n\
     Шаги: категория → название → ссылка или медиа → цена → телефон → подтверждение.\n\
     Кнопка «🔙 Назад» возвращает на предыдущий шаг, «🔄 Начать заново» сбрасывает заявку.";

/// Greeting sent on `/start`.
#[must_use]
pub fn greeting(first_name: Option<&str>) -> String {
    let name = first_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("гость");
    format!(
        "Здравствуйте, {name}! Я бот Sino от компании Tuyona. \
         Я готов помочь вам с отправкой заявки. Давайте начнем."
    )
}

/// Company name over the limit.
#[must_use]
pub fn company_too_long(len: usize) -> String {
    format!(
        "Название слишком длинное ({len} символов). Максимум — {COMPANY_MAX_CHARS}. Введите короче:"
    )
}

/// Reply to a portfolio link above the length limit.
#[must_use]
pub fn link_too_long(len: usize) -> String {
    format!(
        "Ссылка слишком длинная ({len} символов). Максимум — {LINK_MAX_CHARS}. Отправьте короткую ссылку:"
    )
}

/// Photo accepted.
#[must_use]
pub fn photo_added(count: usize) -> String {
    format!("Фото загружено. Файлов: {count}/{MAX_MEDIA_ITEMS}")
}

/// Video accepted.
#[must_use]
pub fn video_added(count: usize) -> String {
    format!("Видео загружено. Файлов: {count}/{MAX_MEDIA_ITEMS}")
}
