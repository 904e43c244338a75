//! whos-there-bot - A Discord bot that DMs subscribers when members of their
//! servers join or leave voice channels.
//!
//! Users opt in per server with `/subscribe` and out with `/unsubscribe` or
//! `/unsubscribe-all`. On every voice-state transition the bot looks up the
//! guild's subscribers, filters them by channel visibility, and sends each a
//! direct message.

pub mod bot;
pub mod config;
pub mod database;
pub mod error;
pub mod event;
pub mod logging;
pub mod service;
pub mod subscriber;
