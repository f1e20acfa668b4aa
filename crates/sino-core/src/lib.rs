#![deny(missing_docs)]
//! Sino core library.
//!
//! Partner submission flow: per-user sessions, input validation, the step
//! state machine and the seam towards the broadcast channel.

/// Configuration management.
pub mod config;
/// Submission flow: sessions, transitions and publishing.
pub mod submission;
