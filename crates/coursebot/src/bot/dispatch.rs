//! Delivery of direct messages to individual users.

use crate::roster::OfferChoice;
use poise::serenity_prelude as serenity;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while delivering to one recipient.
#[derive(Debug, Error, Clone)]
pub enum DispatchError {
    /// The registry holds an id the chat platform cannot address
    #[error("Invalid recipient id: {id}")]
    InvalidRecipient { id: String },

    /// The chat platform rejected the message
    #[error("Discord error: {message}")]
    Discord { message: String },
}

impl From<serenity::Error> for DispatchError {
    fn from(err: serenity::Error) -> Self {
        DispatchError::Discord {
            message: err.to_string(),
        }
    }
}

/// A message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub content: String,
    /// When set, the message carries the offer buttons for this signup row
    pub offer_row: Option<u32>,
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            offer_row: None,
        }
    }

    pub fn offer(content: impl Into<String>, signup_row: u32) -> Self {
        Self {
            content: content.into(),
            offer_row: Some(signup_row),
        }
    }
}

/// Sends messages to users by chat id. Each send succeeds or fails on its own.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        recipient_id: &str,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// The button row attached to a course offer.
pub fn offer_buttons(signup_row: u32) -> serenity::CreateActionRow {
    let buttons = OfferChoice::ALL
        .into_iter()
        .map(|choice| {
            let style = match choice {
                OfferChoice::Lecturer => serenity::ButtonStyle::Primary,
                OfferChoice::Facilitator => serenity::ButtonStyle::Success,
                OfferChoice::Either => serenity::ButtonStyle::Secondary,
                OfferChoice::Neither => serenity::ButtonStyle::Danger,
            };
            serenity::CreateButton::new(choice.custom_id(signup_row))
                .label(choice.label())
                .style(style)
        })
        .collect();

    serenity::CreateActionRow::Buttons(buttons)
}

/// Sends direct messages through the Discord REST API.
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

impl Notifier for DiscordNotifier {
    async fn send(&self, recipient_id: &str, message: &OutgoingMessage) -> Result<(), DispatchError> {
        let id = recipient_id
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| DispatchError::InvalidRecipient {
                id: recipient_id.to_string(),
            })?;

        let mut builder = serenity::CreateMessage::new().content(message.content.as_str());
        if let Some(row) = message.offer_row {
            builder = builder.components(vec![offer_buttons(row)]);
        }

        let http = self.http.as_ref();
        let channel = serenity::UserId::new(id).create_dm_channel(http).await?;
        channel.id.send_message(http, builder).await?;

        debug!(recipient = %recipient_id, "Direct message sent");
        Ok(())
    }
}
