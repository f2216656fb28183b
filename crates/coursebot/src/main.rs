use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coursebot::bot::{self, dispatch::DiscordNotifier};
use coursebot::config::Config;
use coursebot::scheduler;
use coursebot::sheets::SheetsClient;
use coursebot::types::BotState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(err) = app_main().await {
        error!(?err, "application error");
        std::process::exit(1);
    }
}

async fn app_main() -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    let sheets = SheetsClient::new(config.spreadsheet_id.clone(), config.credentials.clone())
        .context("failed to create Sheets client")?;
    let http = Arc::new(serenity::Http::new(&config.discord_token));

    let state = Arc::new(BotState {
        notifier: DiscordNotifier::new(http),
        sheets,
        config,
    });

    tokio::spawn(scheduler::run_daily_reminders(state.clone()));

    #[cfg(feature = "http")]
    {
        let server_state = state.clone();
        tokio::spawn(async move {
            if let Err(err) = coursebot::server::serve(server_state).await {
                error!(?err, "HTTP server stopped");
            }
        });
    }

    tokio::select! {
        result = bot::run(state) => result.context("Discord client stopped"),
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
