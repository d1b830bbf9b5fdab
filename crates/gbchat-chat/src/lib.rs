//! Conversation engine for gbchat
//!
//! This crate owns one request/response exchange: it records the user turn,
//! replays the history to the chat-completion API, filters the reply to the
//! GB2312 repertoire and writes the transcript.

pub mod client;
pub mod context;
pub mod outcome;

pub use client::{ChatClient, ChatError};
pub use context::SessionContext;
pub use outcome::ExchangeOutcome;
