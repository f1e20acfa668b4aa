//! Submission flow
//!
//! The user walks through category → company → media → price → phone →
//! confirmation. Each inbound event is evaluated by the pure [`transition`]
//! table and applied by [`SubmissionFlow`], which owns the session store and
//! the channel gateway.

/// Inbound events produced by the transport layer
pub mod event;
/// The async shell around the transition table
pub mod flow;
/// Broadcast channel seam
pub mod gateway;
/// Transport-agnostic keyboard descriptions
pub mod keyboard;
/// User-facing texts
pub mod prompts;
/// Summary and broadcast rendering
pub mod render;
/// Outbound reply instructions
pub mod reply;
/// Per-user session record
pub mod session;
/// Step enum
pub mod step;
/// Session storage abstraction
pub mod store;
/// Pure transition table
pub mod transition;
/// Input validators and sanitization
pub mod validation;

pub use event::InboundEvent;
pub use flow::SubmissionFlow;
pub use gateway::{ChannelGateway, GatewayError, MEDIA_GROUP_LIMIT};
pub use keyboard::{Keyboard, Layout};
pub use reply::{Reply, TextFormat};
pub use session::{MediaItem, MediaKind, UserId, UserSession, MAX_MEDIA_ITEMS};
pub use step::Step;
pub use store::{InMemorySessionStore, SessionStore, StoreError};
pub use transition::{advance, Transition};
pub use validation::{MediaRejection, ValidationError};
