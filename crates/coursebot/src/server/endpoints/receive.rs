//! Course offers pushed from the spreadsheet side.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::roster::CourseRow;
use crate::server::types::ApiErrorType;
use crate::service;
use crate::types::BotState;

/// Body of POST /receive.
#[derive(Debug, Deserialize)]
pub struct ReceiveRequest {
    /// Signup sheet row the offer answers are written to
    #[serde(rename = "rowIndex")]
    pub row_index: Option<Value>,
    /// The course, keyed by column title
    pub course: Option<Map<String, Value>>,
}

impl ReceiveRequest {
    /// Validates the request into `(signup row, course)`.
    pub fn into_offer(self) -> Option<(u32, CourseRow)> {
        let row = self.row_index.as_ref().and_then(parse_row_index)?;
        let course = self.course?;

        let pairs = course.into_iter().map(|(column, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (column, text)
        });
        Some((row, CourseRow::from_pairs(pairs)))
    }
}

/// Row numbers arrive as JSON numbers or numeric strings.
fn parse_row_index(value: &Value) -> Option<u32> {
    let row = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }?;
    (row > 0).then_some(row)
}

/// POST /receive
/// Sends the course offer, with choice buttons, to every registered user
pub async fn post_receive(
    State(s): State<Arc<BotState>>,
    Json(body): Json<ReceiveRequest>,
) -> Response {
    let Some((signup_row, course)) = body.into_offer() else {
        return ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "❌ 缺少 rowIndex 或 course",
            None,
        ))
        .into_response();
    };

    info!("POST /receive - course offer for signup row {}", signup_row);

    match service::broadcast_offer(&s.sheets, &s.notifier, &s.config.sheets, signup_row, &course)
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "message": "✅ 已成功發送課程通知",
                "delivered": report.delivered,
                "failed": report.failed,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to broadcast course offer: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "伺服器錯誤",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Value) -> ReceiveRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_into_offer() {
        let (row, course) = request(json!({
            "rowIndex": 12,
            "course": {
                "學校": "光明國小",
                "日期": "12月1日",
                "人數": 30,
                "備註": null,
                "其他": "ignored"
            }
        }))
        .into_offer()
        .unwrap();

        assert_eq!(row, 12);
        assert_eq!(course.school.as_deref(), Some("光明國小"));
        assert_eq!(course.headcount.as_deref(), Some("30"));
        assert_eq!(course.remarks.as_deref(), Some(""));
    }

    #[test]
    fn test_row_index_as_string() {
        let offer = request(json!({ "rowIndex": "7", "course": {} })).into_offer();
        assert_eq!(offer.map(|(row, _)| row), Some(7));
    }

    #[test]
    fn test_missing_fields() {
        assert!(request(json!({ "course": {} })).into_offer().is_none());
        assert!(request(json!({ "rowIndex": 3 })).into_offer().is_none());
        assert!(request(json!({ "rowIndex": 0, "course": {} })).into_offer().is_none());
        assert!(request(json!({ "rowIndex": "x", "course": {} })).into_offer().is_none());
    }
}
