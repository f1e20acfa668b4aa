//! Transition table
//!
//! [`advance`] is pure: it looks at the stored session and one event and
//! decides what to store and what to answer. Publishing is left to the
//! caller through [`Transition::Publish`].

use super::event::InboundEvent;
use super::keyboard::Keyboard;
use super::prompts;
use super::render;
use super::reply::Reply;
use super::session::{MediaItem, MediaKind, UserSession};
use super::step::Step;
use super::validation::{self, MediaRejection, ValidationError};

/// Outcome of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Discard any session and create a fresh one at [`Step::Category`]
    Begin(Vec<Reply>),
    /// Store the updated session
    Save {
        /// Session after the event
        session: UserSession,
        /// Replies to the user
        replies: Vec<Reply>,
    },
    /// No state change
    Reply(Vec<Reply>),
    /// Send the session to the channel
    Publish(UserSession),
}

impl Transition {
    fn save(session: UserSession, reply: Reply) -> Self {
        Self::Save {
            session,
            replies: vec![reply],
        }
    }

    fn reply(reply: Reply) -> Self {
        Self::Reply(vec![reply])
    }
}

/// Evaluate `event` against the stored session.
#[must_use]
pub fn advance(current: Option<&UserSession>, event: InboundEvent) -> Transition {
    match event {
        InboundEvent::Start { first_name } => Transition::Begin(vec![
            Reply::plain(prompts::greeting(first_name.as_deref())),
            prompt_for(Step::Category),
        ]),
        InboundEvent::Reset => Transition::Begin(vec![prompt_for(Step::Category)]),
        event => match current {
            None => without_session(&event),
            Some(session) => on_step(session.clone(), event),
        },
    }
}

/// Prompt that opens `step`, with its keyboard.
#[must_use]
pub fn prompt_for(step: Step) -> Reply {
    match step {
        Step::Category => Reply::plain(prompts::CHOOSE_CATEGORY).with_keyboard(Keyboard::Categories),
        Step::Company => Reply::plain(prompts::ASK_COMPANY).with_keyboard(Keyboard::Back),
        Step::Media => Reply::plain(prompts::ASK_MEDIA).with_keyboard(Keyboard::Media),
        Step::Price => Reply::plain(prompts::ASK_PRICE).with_keyboard(Keyboard::Price),
        Step::Phone => Reply::plain(prompts::ASK_PHONE).with_keyboard(Keyboard::Back),
        Step::Confirm | Step::Done => Reply::plain(prompts::FOLLOW_STEPS),
    }
}

fn without_session(event: &InboundEvent) -> Transition {
    match event {
        InboundEvent::Confirm => Transition::reply(Reply::plain(prompts::CONFIRM_WITHOUT_SESSION)),
        _ => Transition::reply(Reply::plain(prompts::START_FIRST)),
    }
}

fn on_step(session: UserSession, event: InboundEvent) -> Transition {
    match (session.step, event) {
        (_, InboundEvent::Back) => back(session),
        (Step::Category, InboundEvent::Text(text)) => category(session, &text),
        (Step::Company, InboundEvent::Text(text)) => company(session, &text),
        (Step::Media, InboundEvent::Text(text)) => media_text(session, &text),
        (Step::Media, InboundEvent::Photo { file_ref }) => {
            media_item(session, MediaItem::photo(file_ref))
        }
        (Step::Media, InboundEvent::Video { file_ref }) => {
            media_item(session, MediaItem::video(file_ref))
        }
        (Step::Media, InboundEvent::Unsupported) => media_rejected(MediaRejection::Unsupported),
        (Step::Media, InboundEvent::Proceed) => proceed(session),
        (Step::Price, InboundEvent::Text(text)) => price(session, &text),
        (Step::Phone, InboundEvent::Text(text)) => phone(session, &text),
        (Step::Confirm, InboundEvent::Confirm) => Transition::Publish(session),
        (Step::Confirm, InboundEvent::EditPhone) => move_to(session, Step::Phone),
        _ => Transition::reply(Reply::plain(prompts::FOLLOW_STEPS)),
    }
}

fn move_to(mut session: UserSession, step: Step) -> Transition {
    // Answers may change again, so a posted text no longer matches them.
    if step != Step::Confirm {
        session.clear_broadcast_sent();
    }
    session.step = step;
    Transition::save(session, prompt_for(step))
}

fn back(session: UserSession) -> Transition {
    match (session.step, session.step.previous()) {
        (Step::Category, _) => Transition::reply(Reply::plain(prompts::ALREADY_AT_START)),
        (_, Some(Step::Category)) => {
            let mut session = session;
            session.step = Step::Category;
            Transition::save(
                session,
                Reply::plain(prompts::CHOOSE_CATEGORY_AGAIN).with_keyboard(Keyboard::Categories),
            )
        }
        (_, Some(Step::Media)) => {
            let mut session = session;
            session.step = Step::Media;
            Transition::save(
                session,
                Reply::plain(prompts::ASK_MEDIA_AGAIN).with_keyboard(Keyboard::Media),
            )
        }
        (_, Some(previous)) => move_to(session, previous),
        (_, None) => Transition::reply(Reply::plain(prompts::FOLLOW_STEPS)),
    }
}

fn category(mut session: UserSession, text: &str) -> Transition {
    match validation::match_category(text) {
        Some(category) => {
            session.category = Some(category.to_string());
            move_to(session, Step::Company)
        }
        None => Transition::reply(Reply::plain(prompts::FOLLOW_STEPS)),
    }
}

fn company(mut session: UserSession, text: &str) -> Transition {
    match validation::validate_company(text) {
        Ok(name) => {
            session.company = Some(name);
            session.clear_media();
            move_to(session, Step::Media)
        }
        Err(ValidationError::CompanyTooLong(len)) => Transition::reply(
            Reply::plain(prompts::company_too_long(len)).with_keyboard(Keyboard::Back),
        ),
        Err(_) => Transition::reply(Reply::plain(prompts::COMPANY_EMPTY).with_keyboard(Keyboard::Back)),
    }
}

fn media_text(mut session: UserSession, text: &str) -> Transition {
    if validation::is_link(text) {
        return match validation::validate_link(text) {
            Ok(link) => {
                session.link = Some(link);
                session.step = Step::Price;
                Transition::save(
                    session,
                    Reply::plain(prompts::LINK_SAVED).with_keyboard(Keyboard::Price),
                )
            }
            Err(ValidationError::LinkTooLong(len)) => Transition::reply(
                Reply::plain(prompts::link_too_long(len)).with_keyboard(Keyboard::Media),
            ),
            Err(_) => media_rejected(MediaRejection::Unsupported),
        };
    }

    // A price typed while something is attached counts as "proceed".
    if session.has_portfolio() {
        if let Ok(price) = validation::validate_price(text) {
            session.price = Some(price);
            return move_to_phone(session);
        }
    }

    media_rejected(MediaRejection::Unsupported)
}

fn media_item(mut session: UserSession, item: MediaItem) -> Transition {
    let kind = item.kind;
    match session.push_media(item) {
        Ok(count) => {
            let added = match kind {
                MediaKind::Photo => prompts::photo_added(count),
                MediaKind::Video => prompts::video_added(count),
            };
            if session.is_media_full() {
                session.step = Step::Price;
                Transition::save(
                    session,
                    Reply::plain(format!("{added}\n{}", prompts::MEDIA_COMPLETE))
                        .with_keyboard(Keyboard::Price),
                )
            } else {
                Transition::save(
                    session,
                    Reply::plain(format!("{added}\n{}", prompts::MORE_OR_PROCEED))
                        .with_keyboard(Keyboard::Media),
                )
            }
        }
        Err(rejection) => media_rejected(rejection),
    }
}

fn media_rejected(rejection: MediaRejection) -> Transition {
    let text = match rejection {
        MediaRejection::VideoAlreadyPresent => prompts::VIDEO_ALREADY_PRESENT,
        MediaRejection::LimitReached => prompts::MEDIA_LIMIT_REACHED,
        MediaRejection::Unsupported => prompts::MEDIA_UNSUPPORTED,
        MediaRejection::Empty => prompts::MEDIA_EMPTY,
    };
    Transition::reply(Reply::plain(text).with_keyboard(Keyboard::Media))
}

fn proceed(session: UserSession) -> Transition {
    if session.has_portfolio() {
        move_to(session, Step::Price)
    } else {
        media_rejected(MediaRejection::Empty)
    }
}

fn price(mut session: UserSession, text: &str) -> Transition {
    match validation::validate_price(text) {
        Ok(price) => {
            session.price = Some(price);
            move_to_phone(session)
        }
        Err(_) => Transition::reply(Reply::plain(prompts::PRICE_FORMAT).with_keyboard(Keyboard::Price)),
    }
}

fn move_to_phone(mut session: UserSession) -> Transition {
    session.step = Step::Phone;
    Transition::save(
        session,
        Reply::plain(prompts::PRICE_SAVED).with_keyboard(Keyboard::Back),
    )
}

fn phone(mut session: UserSession, text: &str) -> Transition {
    match validation::validate_phone(text) {
        Ok(phone) => {
            session.phone = Some(phone);
            session.step = Step::Confirm;
            let summary = Reply::markdown(render::summary(&session)).with_keyboard(Keyboard::Confirm);
            Transition::save(session, summary)
        }
        Err(_) => Transition::reply(Reply::plain(prompts::INVALID_PHONE).with_keyboard(Keyboard::Back)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(step: Step) -> UserSession {
        let mut session = UserSession::new();
        session.step = step;
        session
    }

    fn saved(transition: Transition) -> (UserSession, Vec<Reply>) {
        match transition {
            Transition::Save { session, replies } => (session, replies),
            other => panic!("expected Save, got {other:?}"),
        }
    }

    fn replied(transition: Transition) -> Vec<Reply> {
        match transition {
            Transition::Reply(replies) => replies,
            other => panic!("expected Reply, got {other:?}"),
        }
    }

    #[test]
    fn test_start_without_session_begins() {
        let transition = advance(None, InboundEvent::Start { first_name: None });
        let Transition::Begin(replies) = transition else {
            panic!("start must begin a session");
        };
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[1].keyboard, Some(Keyboard::Categories));
    }

    #[test]
    fn test_no_session_prompts_start() {
        let replies = replied(advance(None, InboundEvent::Text("hi".into())));
        assert_eq!(replies[0].text, prompts::START_FIRST);

        let replies = replied(advance(None, InboundEvent::Confirm));
        assert_eq!(replies[0].text, prompts::CONFIRM_WITHOUT_SESSION);
    }

    #[test]
    fn test_category_selection() {
        let (session, replies) = saved(advance(
            Some(&at(Step::Category)),
            InboundEvent::Text("Рестораны".into()),
        ));
        assert_eq!(session.step, Step::Company);
        assert_eq!(session.category.as_deref(), Some("Рестораны"));
        assert_eq!(replies[0].text, prompts::ASK_COMPANY);

        let replies = replied(advance(
            Some(&at(Step::Category)),
            InboundEvent::Text("Кафе".into()),
        ));
        assert_eq!(replies[0].text, prompts::FOLLOW_STEPS);
    }

    #[test]
    fn test_long_company_is_not_stored() {
        let long = "x".repeat(101);
        let replies = replied(advance(Some(&at(Step::Company)), InboundEvent::Text(long)));
        assert_eq!(replies[0].text, prompts::company_too_long(101));
    }

    #[test]
    fn test_company_resets_media() {
        let mut session = at(Step::Company);
        session.push_media(MediaItem::video("old")).expect("fits");
        let (session, _) = saved(advance(Some(&session), InboundEvent::Text("Test Co".into())));
        assert_eq!(session.step, Step::Media);
        assert!(session.media().is_empty());
        assert!(!session.has_video());
    }

    #[test]
    fn test_link_jumps_to_price() {
        let mut session = at(Step::Media);
        session.push_media(MediaItem::photo("p1")).expect("fits");
        let (session, replies) = saved(advance(
            Some(&session),
            InboundEvent::Text("https://instagram.com/tuyona".into()),
        ));
        assert_eq!(session.step, Step::Price);
        assert_eq!(session.link.as_deref(), Some("https://instagram\\.com/tuyona"));
        assert_eq!(session.media().len(), 1);
        assert_eq!(replies[0].text, prompts::LINK_SAVED);
    }

    #[test]
    fn test_link_without_media_jumps_to_price() {
        let (session, replies) = saved(advance(
            Some(&at(Step::Media)),
            InboundEvent::Text("https://youtu.be/abc".into()),
        ));
        assert_eq!(session.step, Step::Price);
        assert_eq!(session.link.as_deref(), Some("https://youtu\\.be/abc"));
        assert!(session.media().is_empty());
        assert_eq!(replies[0].keyboard, Some(Keyboard::Price));
    }

    #[test]
    fn test_link_after_four_items_with_video_jumps_to_price() {
        let mut session = at(Step::Media);
        for i in 0..3 {
            session.push_media(MediaItem::photo(format!("p{i}"))).expect("fits");
        }
        session.push_media(MediaItem::video("v1")).expect("fits");
        let (session, replies) = saved(advance(
            Some(&session),
            InboundEvent::Text("https://instagram.com/tuyona".into()),
        ));
        assert_eq!(session.step, Step::Price);
        assert_eq!(session.media().len(), 4);
        assert!(session.has_video());
        assert_eq!(replies[0].text, prompts::LINK_SAVED);
    }

    #[test]
    fn test_overlong_link_stays_at_media() {
        let mut session = at(Step::Media);
        session.push_media(MediaItem::photo("p1")).expect("fits");
        let link = format!("https://youtu.be/{}", "a".repeat(4000));
        let replies = replied(advance(Some(&session), InboundEvent::Text(link.clone())));
        assert_eq!(
            replies[0].text,
            prompts::link_too_long(link.chars().count())
        );
        assert_eq!(replies[0].keyboard, Some(Keyboard::Media));
    }

    #[test]
    fn test_edit_phone_forgets_posted_text() {
        let mut session = at(Step::Confirm);
        session.mark_broadcast_sent();
        let (session, _) = saved(advance(Some(&session), InboundEvent::EditPhone));
        assert_eq!(session.step, Step::Phone);
        assert!(!session.broadcast_sent());
    }

    #[test]
    fn test_fifth_item_advances() {
        let mut session = at(Step::Media);
        for i in 0..4 {
            session.push_media(MediaItem::photo(format!("p{i}"))).expect("fits");
        }
        let (session, replies) = saved(advance(
            Some(&session),
            InboundEvent::Video { file_ref: "v".into() },
        ));
        assert_eq!(session.step, Step::Price);
        assert!(replies[0].text.contains("5/5"));
    }

    #[test]
    fn test_second_video_rejected() {
        let mut session = at(Step::Media);
        session.push_media(MediaItem::video("v1")).expect("fits");
        let replies = replied(advance(
            Some(&session),
            InboundEvent::Video { file_ref: "v2".into() },
        ));
        assert_eq!(replies[0].text, prompts::VIDEO_ALREADY_PRESENT);
    }

    #[test]
    fn test_unsupported_media_rejected() {
        let replies = replied(advance(Some(&at(Step::Media)), InboundEvent::Unsupported));
        assert_eq!(replies[0].text, prompts::MEDIA_UNSUPPORTED);

        let replies = replied(advance(Some(&at(Step::Media)), InboundEvent::Text("5000".into())));
        assert_eq!(replies[0].text, prompts::MEDIA_UNSUPPORTED);
    }

    #[test]
    fn test_proceed_requires_portfolio() {
        let replies = replied(advance(Some(&at(Step::Media)), InboundEvent::Proceed));
        assert_eq!(replies[0].text, prompts::MEDIA_EMPTY);

        let mut session = at(Step::Media);
        session.push_media(MediaItem::photo("p1")).expect("fits");
        let (session, _) = saved(advance(Some(&session), InboundEvent::Proceed));
        assert_eq!(session.step, Step::Price);
    }

    #[test]
    fn test_price_typed_during_media_step() {
        let mut session = at(Step::Media);
        session.push_media(MediaItem::photo("p1")).expect("fits");
        let (session, _) = saved(advance(Some(&session), InboundEvent::Text("5000 TJS".into())));
        assert_eq!(session.step, Step::Phone);
        assert_eq!(session.price.as_deref(), Some("5000 TJS"));
    }

    #[test]
    fn test_invalid_price_and_phone_keep_step() {
        let replies = replied(advance(Some(&at(Step::Price)), InboundEvent::Text("cheap".into())));
        assert_eq!(replies[0].text, prompts::PRICE_FORMAT);

        let replies = replied(advance(Some(&at(Step::Phone)), InboundEvent::Text("12345".into())));
        assert_eq!(replies[0].text, prompts::INVALID_PHONE);
    }

    #[test]
    fn test_phone_shows_summary() {
        let (session, replies) = saved(advance(
            Some(&at(Step::Phone)),
            InboundEvent::Text("+992123456789".into()),
        ));
        assert_eq!(session.step, Step::Confirm);
        assert_eq!(replies[0].keyboard, Some(Keyboard::Confirm));
        assert_eq!(replies[0].format, crate::submission::TextFormat::MarkdownV2);
    }

    #[test]
    fn test_back_follows_previous() {
        for step in [Step::Company, Step::Media, Step::Price, Step::Phone, Step::Confirm] {
            let (session, _) = saved(advance(Some(&at(step)), InboundEvent::Back));
            assert_eq!(Some(session.step), step.previous(), "back from {step:?}");
        }
    }

    #[test]
    fn test_back_from_phone_shows_price_prompt() {
        let (_, replies) = saved(advance(Some(&at(Step::Phone)), InboundEvent::Back));
        assert_eq!(replies[0].text, prompts::ASK_PRICE);
        assert_eq!(replies[0].keyboard, Some(Keyboard::Price));
    }

    #[test]
    fn test_back_at_category_is_dead_end() {
        let replies = replied(advance(Some(&at(Step::Category)), InboundEvent::Back));
        assert_eq!(replies[0].text, prompts::ALREADY_AT_START);
    }

    #[test]
    fn test_edit_phone_only_from_confirm() {
        let (session, _) = saved(advance(Some(&at(Step::Confirm)), InboundEvent::EditPhone));
        assert_eq!(session.step, Step::Phone);

        let replies = replied(advance(Some(&at(Step::Price)), InboundEvent::EditPhone));
        assert_eq!(replies[0].text, prompts::FOLLOW_STEPS);
    }

    #[test]
    fn test_confirm_publishes_only_at_confirm() {
        let session = at(Step::Confirm);
        assert_eq!(
            advance(Some(&session), InboundEvent::Confirm),
            Transition::Publish(session)
        );
        let replies = replied(advance(Some(&at(Step::Phone)), InboundEvent::Confirm));
        assert_eq!(replies[0].text, prompts::FOLLOW_STEPS);
    }

    #[test]
    fn test_every_step_handles_every_event() {
        let events = [
            InboundEvent::Text("?".into()),
            InboundEvent::Photo { file_ref: "p".into() },
            InboundEvent::Video { file_ref: "v".into() },
            InboundEvent::Unsupported,
            InboundEvent::Back,
            InboundEvent::Proceed,
            InboundEvent::EditPhone,
            InboundEvent::Confirm,
            InboundEvent::Reset,
        ];
        for step in Step::ALL {
            for event in events.clone() {
                let transition = advance(Some(&at(step)), event.clone());
                let replies = match transition {
                    Transition::Begin(replies)
                    | Transition::Reply(replies)
                    | Transition::Save { replies, .. } => replies,
                    Transition::Publish(_) => continue,
                };
                assert!(!replies.is_empty(), "{step:?} x {event:?} produced no reply");
            }
        }
    }
}
