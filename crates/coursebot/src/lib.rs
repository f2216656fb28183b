//! A Discord bot backed by a Google Sheets course roster.
//!
//! Users register their name, receive course offers with choice buttons,
//! query their upcoming courses and get reminded a day and a week ahead.

pub mod bot;
pub mod config;
pub mod roster;
pub mod scheduler;
#[cfg(feature = "http")]
pub mod server;
pub mod service;
pub mod sheets;
pub mod types;
