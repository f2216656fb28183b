//! The bot's triggers: registering a name, querying upcoming courses,
//! recording an offer choice, broadcasting an offer and the daily sweep.
//!
//! Each trigger reads the spreadsheet fresh, runs the roster engine and
//! either writes one value back or hands messages to a [`Notifier`].

mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use types::*;

use crate::bot::dispatch::{Notifier, OutgoingMessage};
use crate::config::SheetNames;
use crate::roster::format::{format_course, format_offer, format_query_reply, FormatMode};
use crate::roster::matcher::{due_in_offset, upcoming_for, NEXT_WEEK_OFFSET_DAYS, TOMORROW_OFFSET_DAYS};
use crate::roster::{
    find_user, is_valid_display_name, project_table, users_from_rows, CourseRow, OfferChoice,
    RegisteredUser,
};
use crate::sheets::{SheetStore, SheetsError};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

/// Reads every registered user.
pub async fn load_users<S: SheetStore>(
    sheets: &S,
    names: &SheetNames,
) -> Result<Vec<RegisteredUser>, SheetsError> {
    let rows = sheets.read_range(&names.users_range()).await?;
    Ok(users_from_rows(&rows))
}

/// Reads every course row.
pub async fn load_courses<S: SheetStore>(
    sheets: &S,
    names: &SheetNames,
) -> Result<Vec<CourseRow>, SheetsError> {
    let table = sheets.read_range(&names.courses_range()).await?;
    Ok(project_table(&table))
}

/// Registers `input_name` for a chat user, unless the name is malformed or
/// the user is already registered.
pub async fn register<S: SheetStore>(
    sheets: &S,
    names: &SheetNames,
    external_id: &str,
    input_name: &str,
    handle: &str,
) -> Result<RegisterOutcome, SheetsError> {
    let display_name = input_name.trim();
    if !is_valid_display_name(display_name) {
        return Ok(RegisterOutcome::InvalidName);
    }

    let users = load_users(sheets, names).await?;
    if find_user(&users, external_id).is_some() {
        return Ok(RegisterOutcome::AlreadyRegistered);
    }

    let user = RegisteredUser::new(external_id, display_name, handle);
    sheets
        .append_row(&names.users_append_range(), user.to_row())
        .await?;

    info!(user = %external_id, name = %display_name, "Registered user");
    Ok(RegisterOutcome::Registered {
        display_name: display_name.to_string(),
    })
}

/// Lists the caller's courses from `today` on.
pub async fn query_upcoming<S: SheetStore>(
    sheets: &S,
    names: &SheetNames,
    external_id: &str,
    today: NaiveDate,
) -> Result<QueryOutcome, SheetsError> {
    let users = load_users(sheets, names).await?;
    let Some(user) = find_user(&users, external_id) else {
        return Ok(QueryOutcome::NotRegistered);
    };

    let courses = load_courses(sheets, names).await?;
    let upcoming = upcoming_for(&user.display_name, &courses, today);

    debug!(
        user = %external_id,
        name = %user.display_name,
        count = upcoming.len(),
        "Answered course query"
    );

    Ok(QueryOutcome::Upcoming {
        display_name: user.display_name.clone(),
        count: upcoming.len(),
        reply: format_query_reply(&user.display_name, &upcoming),
    })
}

/// Writes a user's answer to a course offer into their column of the signup
/// sheet.
pub async fn record_choice<S: SheetStore>(
    sheets: &S,
    names: &SheetNames,
    external_id: &str,
    signup_row: u32,
    choice: OfferChoice,
) -> Result<ChoiceOutcome, SheetsError> {
    let users = load_users(sheets, names).await?;
    let Some(user) = find_user(&users, external_id) else {
        return Ok(ChoiceOutcome::NotRegistered);
    };

    let header = sheets
        .read_range(&names.signup_header_range())
        .await?
        .into_iter()
        .next()
        .unwrap_or_default();

    let Some(column) = header.iter().position(|title| *title == user.display_name) else {
        warn!(name = %user.display_name, "No signup column for user");
        return Ok(ChoiceOutcome::ColumnNotFound {
            display_name: user.display_name.clone(),
        });
    };

    sheets
        .write_cell(&names.signup_cell(column, signup_row), choice.label())
        .await?;

    info!(
        name = %user.display_name,
        choice = %choice,
        row = signup_row,
        "Recorded offer choice"
    );

    Ok(ChoiceOutcome::Recorded {
        display_name: user.display_name.clone(),
        choice,
        signup_row,
    })
}

/// Sends a course offer, with the choice buttons, to every registered user.
pub async fn broadcast_offer<S: SheetStore, N: Notifier>(
    sheets: &S,
    notifier: &N,
    names: &SheetNames,
    signup_row: u32,
    course: &CourseRow,
) -> Result<DeliveryReport, SheetsError> {
    let correlation_id = generate_correlation_id();
    let users = load_users(sheets, names).await?;

    info!(
        correlation_id = %correlation_id,
        row = signup_row,
        users = users.len(),
        "Broadcasting course offer"
    );

    let message = OutgoingMessage::offer(format_offer(course), signup_row);
    let recipients: Vec<&RegisteredUser> = users.iter().collect();
    let report = deliver(notifier, &recipients, &message, &correlation_id).await;

    info!(
        correlation_id = %correlation_id,
        delivered = report.delivered,
        failed = report.failed,
        "Course offer broadcast finished"
    );
    Ok(report)
}

/// Reminds lecturers and facilitators of courses tomorrow and in one week.
pub async fn daily_sweep<S: SheetStore, N: Notifier>(
    sheets: &S,
    notifier: &N,
    names: &SheetNames,
    today: NaiveDate,
) -> Result<SweepReport, SheetsError> {
    let correlation_id = generate_correlation_id();
    info!(correlation_id = %correlation_id, %today, "Starting daily reminder sweep");

    let users = load_users(sheets, names).await?;
    let courses = load_courses(sheets, names).await?;

    let tomorrow = due_in_offset(&courses, &users, today, TOMORROW_OFFSET_DAYS);
    let next_week = due_in_offset(&courses, &users, today, NEXT_WEEK_OFFSET_DAYS);

    let mut report = SweepReport {
        due_tomorrow: tomorrow.len(),
        due_next_week: next_week.len(),
        ..SweepReport::default()
    };

    for (due, mode) in [
        (tomorrow, FormatMode::DueTomorrow),
        (next_week, FormatMode::DueNextWeek),
    ] {
        for course in due {
            if course.recipients.is_empty() {
                debug!(
                    correlation_id = %correlation_id,
                    row = ?course.course.row.sheet_row,
                    "Due course matches no registered user"
                );
                continue;
            }

            let message = OutgoingMessage::text(format_course(&course.course, mode));
            let delivery = deliver(notifier, &course.recipients, &message, &correlation_id).await;
            report.delivery.merge(delivery);
        }
    }

    info!(
        correlation_id = %correlation_id,
        due_tomorrow = report.due_tomorrow,
        due_next_week = report.due_next_week,
        delivered = report.delivery.delivered,
        failed = report.delivery.failed,
        "Daily reminder sweep finished"
    );
    Ok(report)
}

/// Sends `message` to each user in turn. A failed send is logged and does
/// not stop the rest.
async fn deliver<N: Notifier>(
    notifier: &N,
    recipients: &[&RegisteredUser],
    message: &OutgoingMessage,
    correlation_id: &str,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for user in recipients {
        match notifier.send(&user.external_id, message).await {
            Ok(()) => {
                report.delivered += 1;
                info!(
                    correlation_id = %correlation_id,
                    user = %user.external_id,
                    name = %user.display_name,
                    "Notified user"
                );
            }
            Err(e) => {
                report.failed += 1;
                warn!(
                    correlation_id = %correlation_id,
                    user = %user.external_id,
                    name = %user.display_name,
                    error = %e,
                    "Could not notify user"
                );
            }
        }
    }

    report
}

/// Generates a short id tying together the log lines of one batch.
fn generate_correlation_id() -> String {
    let random: u32 = rand::thread_rng().gen();
    format!("{:08x}", random)
}
