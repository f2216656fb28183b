//! The daily reminder trigger.

use crate::service;
use crate::types::BotState;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use tracing::{error, info};

/// The first moment strictly after `now` whose time of day is `hour:00`.
pub fn next_run_after(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Runs the reminder sweep every day at the configured local hour. Errors
/// are logged and the loop keeps going.
pub async fn run_daily_reminders(state: Arc<BotState>) {
    let hour = state.config.reminder_hour;

    loop {
        let now = Local::now().naive_local();
        let next = next_run_after(now, hour);
        let wait = (next - now).to_std().unwrap_or_default();

        info!(next_run = %next, "Daily reminder sweep scheduled");
        tokio::time::sleep(wait).await;

        let today = Local::now().date_naive();
        if let Err(e) =
            service::daily_sweep(&state.sheets, &state.notifier, &state.config.sheets, today).await
        {
            error!(error = %e, "Daily reminder sweep failed");
        }
    }
}
