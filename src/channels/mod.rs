//! Bot Channels
//!
//! Inbound chat surfaces that extract plain text, resolve the chat
//! identity to an owning user, and invoke the intent pipeline.

pub mod telegram;

pub use telegram::{parse_update, InboundMessage, TelegramChannel};
