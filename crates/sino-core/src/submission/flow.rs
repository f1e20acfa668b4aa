//! Async shell around the transition table
//!
//! [`SubmissionFlow`] serializes events per user, applies the outcome of
//! [`advance`] to the session store and performs the channel publish.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::event::InboundEvent;
use super::gateway::{ChannelGateway, GatewayError, MEDIA_GROUP_LIMIT};
use super::keyboard::Keyboard;
use super::prompts;
use super::render;
use super::reply::Reply;
use super::session::{UserId, UserSession};
use super::store::{SessionStore, StoreError};
use super::transition::{advance, Transition};

const LOCK_IDLE: Duration = Duration::from_secs(3600);

/// Drives one submission per user
#[derive(Clone)]
pub struct SubmissionFlow {
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn ChannelGateway>,
    locks: Cache<UserId, Arc<Mutex<()>>>,
}

impl SubmissionFlow {
    /// Flow over the given store and channel.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<dyn ChannelGateway>) -> Self {
        let locks = Cache::builder().time_to_idle(LOCK_IDLE).build();
        Self {
            store,
            gateway,
            locks,
        }
    }

    /// Process one event and return the replies for the user.
    ///
    /// Events of one user are handled strictly one after another. A failed
    /// channel publish is not an error: the user is told to retry and the
    /// session is kept, remembering whether its text already went out.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the session store fails.
    pub async fn handle(
        &self,
        user_id: UserId,
        event: InboundEvent,
    ) -> Result<Vec<Reply>, StoreError> {
        let lock = self
            .locks
            .get_with(user_id, async { Arc::new(Mutex::new(())) })
            .await;
        let _guard = lock.lock().await;

        let current = self.store.get(user_id).await?;
        let kind = event.kind();

        match advance(current.as_ref(), event) {
            Transition::Begin(replies) => {
                self.store.create(user_id).await?;
                debug!(user_id, event = kind, "Submission started");
                Ok(replies)
            }
            Transition::Save { session, replies } => {
                debug!(
                    user_id,
                    event = kind,
                    from = ?current.as_ref().map(|s| s.step),
                    to = ?session.step,
                    "Step updated"
                );
                self.store.update(user_id, session).await?;
                Ok(replies)
            }
            Transition::Reply(replies) => Ok(replies),
            Transition::Publish(session) => self.publish(user_id, session).await,
        }
    }

    async fn publish(
        &self,
        user_id: UserId,
        mut session: UserSession,
    ) -> Result<Vec<Reply>, StoreError> {
        match self.send_to_channel(&mut session).await {
            Ok(()) => {
                self.store.delete(user_id).await?;
                info!(user_id, media = session.media().len(), "Submission published");
                Ok(vec![
                    Reply::plain(prompts::SUBMITTED).with_keyboard(Keyboard::Remove),
                    Reply::plain(prompts::SUBMIT_ANOTHER),
                ])
            }
            Err(e) => {
                warn!(
                    user_id,
                    error = %e,
                    text_sent = session.broadcast_sent(),
                    "Failed to publish submission"
                );
                self.store.update(user_id, session).await?;
                Ok(vec![
                    Reply::plain(prompts::SUBMIT_FAILED).with_keyboard(Keyboard::Confirm),
                ])
            }
        }
    }

    /// Post the text unless an earlier attempt did, then the album.
    async fn send_to_channel(&self, session: &mut UserSession) -> Result<(), GatewayError> {
        if !session.broadcast_sent() {
            self.gateway.send_text(&render::broadcast(session)).await?;
            session.mark_broadcast_sent();
        }

        let media = session.media();
        if !media.is_empty() {
            let album = &media[..media.len().min(MEDIA_GROUP_LIMIT)];
            self.gateway.send_media_group(album).await?;
        }
        Ok(())
    }
}
