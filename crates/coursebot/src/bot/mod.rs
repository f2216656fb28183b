//! Discord wiring: slash commands, offer buttons and the gateway client.

mod commands;
pub mod dispatch;
mod replies;

use crate::roster::parse_custom_id;
use crate::service;
use crate::types::BotState;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, info};

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data available to every command invocation and event.
pub struct Data {
    pub state: Arc<BotState>,
}

/// Connects to the gateway, registers the slash commands and serves
/// interactions until the connection ends.
pub async fn run(state: Arc<BotState>) -> Result<(), Error> {
    let token = state.config.discord_token.clone();
    let guild_id = state.config.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::register_name(), commands::query_courses()],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match guild_id {
                    Some(id) => {
                        poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id))
                            .await?
                    }
                    None => poise::builtins::register_globally(ctx, commands).await?,
                }
                info!(guild = ?guild_id, "Slash commands registered");
                Ok(Data { state })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&token, serenity::GatewayIntents::GUILDS)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            info!(user = %data_about_bot.user.name, "Logged in");
        }
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
            ..
        } => {
            handle_offer_choice(ctx, component, data).await?;
        }
        _ => {}
    }
    Ok(())
}

/// Records the choice behind an offer button and answers the presser
/// privately.
async fn handle_offer_choice(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some((signup_row, choice)) = parse_custom_id(&component.data.custom_id) else {
        debug!(custom_id = %component.data.custom_id, "Ignoring unknown component");
        return Ok(());
    };

    let state = &data.state;
    let external_id = component.user.id.to_string();

    let reply = match service::record_choice(
        &state.sheets,
        &state.config.sheets,
        &external_id,
        signup_row,
        choice,
    )
    .await
    {
        Ok(outcome) => replies::choice(&outcome),
        Err(e) => {
            error!(user = %external_id, row = signup_row, error = %e, "Recording offer choice failed");
            replies::ACTION_FAILED.to_string()
        }
    };

    let response = serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new()
            .content(reply)
            .ephemeral(true),
    );
    component.create_response(ctx, response).await?;
    Ok(())
}
