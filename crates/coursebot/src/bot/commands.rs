//! Slash commands.

use super::{replies, Context, Error};
use crate::roster::format::{split_message, MESSAGE_LIMIT};
use crate::service::{self, QueryOutcome};
use chrono::Local;
use tracing::{error, info};

/// 讓我記住你的姓名
#[poise::command(slash_command, rename = "註冊姓名")]
pub async fn register_name(
    ctx: Context<'_>,
    #[description = "請輸入你的姓名（兩到三個中文字）"]
    #[rename = "姓名"]
    name: String,
) -> Result<(), Error> {
    let state = &ctx.data().state;
    let author = ctx.author();
    let external_id = author.id.to_string();

    info!(user = %external_id, "/註冊姓名");

    let reply = match service::register(
        &state.sheets,
        &state.config.sheets,
        &external_id,
        &name,
        &author.name,
    )
    .await
    {
        Ok(outcome) => replies::register(&outcome),
        Err(e) => {
            error!(user = %external_id, error = %e, "Registration failed");
            replies::ACTION_FAILED.to_string()
        }
    };

    ctx.say(reply).await?;
    Ok(())
}

/// 查詢你之後的課程
#[poise::command(slash_command, rename = "查課程")]
pub async fn query_courses(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let state = &ctx.data().state;
    let external_id = ctx.author().id.to_string();
    let today = Local::now().date_naive();

    info!(user = %external_id, %today, "/查課程");

    match service::query_upcoming(&state.sheets, &state.config.sheets, &external_id, today).await {
        Ok(QueryOutcome::NotRegistered) => {
            ctx.say(replies::QUERY_NOT_REGISTERED).await?;
        }
        Ok(QueryOutcome::Upcoming { reply, .. }) => {
            for chunk in split_message(&reply, MESSAGE_LIMIT) {
                ctx.say(chunk).await?;
            }
        }
        Err(e) => {
            error!(user = %external_id, error = %e, "Course query failed");
            ctx.say(replies::QUERY_FAILED).await?;
        }
    }

    Ok(())
}
