use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;

const MAX_USER_ID_LEN: usize = 100;
const MAX_RANGE_DAYS: i64 = 90;

/// A fully validated webhook request. Only the validator constructs this;
/// it is immutable for the rest of the request.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub user_id: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub access_token: String,
}

/// Carries every violated constraint, not just the first.
#[derive(Debug, Clone, Error)]
#[error("{}", .details.join("; "))]
pub struct ValidationError {
    pub details: Vec<String>,
}

/// Validates the raw, untyped request body. Field checks all run and
/// collect; the cross-field date checks run only once both dates parse.
pub fn validate_webhook_request(body: &Value) -> Result<WebhookRequest, ValidationError> {
    let mut details = Vec::new();

    let user_id = match string_field(body, "user_id") {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.len() > MAX_USER_ID_LEN {
                details.push(format!(
                    "\"user_id\" length must be between 1 and {} characters",
                    MAX_USER_ID_LEN
                ));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => {
            details.push("\"user_id\" is required and must be a string".to_string());
            None
        }
    };

    let from = date_field(body, "from", &mut details);
    let to = date_field(body, "to", &mut details);

    let access_token = match string_field(body, "access_token") {
        Some(raw) if !raw.is_empty() => Some(raw.to_string()),
        Some(_) => {
            details.push("\"access_token\" is not allowed to be empty".to_string());
            None
        }
        None => {
            details.push("\"access_token\" is required and must be a string".to_string());
            None
        }
    };

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            details.push("from date must be before to date".to_string());
        }
        if to > Utc::now() {
            details.push("to date cannot be in the future".to_string());
        }
        if to - from > Duration::days(MAX_RANGE_DAYS) {
            details.push("date range cannot exceed 90 days".to_string());
        }
    }

    match (user_id, from, to, access_token) {
        (Some(user_id), Some(from), Some(to), Some(access_token)) if details.is_empty() => {
            Ok(WebhookRequest {
                user_id,
                from,
                to,
                access_token,
            })
        }
        _ => Err(ValidationError { details }),
    }
}

fn string_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

fn date_field(body: &Value, field: &str, details: &mut Vec<String>) -> Option<DateTime<Utc>> {
    let Some(raw) = string_field(body, field) else {
        details.push(format!("\"{}\" is required and must be a string", field));
        return None;
    };
    match parse_iso_date(raw) {
        Some(parsed) => Some(parsed),
        None => {
            details.push(format!("\"{}\" must be a valid ISO-8601 date", field));
            None
        }
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 date-time.
fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "user_id": "user123",
            "from": "2024-01-01",
            "to": "2024-01-31",
            "access_token": "tok",
        })
    }

    #[test]
    fn test_valid_request_passes() {
        let request = validate_webhook_request(&valid_body()).unwrap();
        assert_eq!(request.user_id, "user123");
        assert_eq!(request.access_token, "tok");
        assert_eq!(request.from.format("%Y-%m-%d").to_string(), "2024-01-01");
        assert_eq!(request.to.format("%Y-%m-%d").to_string(), "2024-01-31");
    }

    #[test]
    fn test_user_id_is_trimmed() {
        let mut body = valid_body();
        body["user_id"] = json!("  user123  ");
        let request = validate_webhook_request(&body).unwrap();
        assert_eq!(request.user_id, "user123");
    }

    #[test]
    fn test_accepts_full_datetime_strings() {
        let mut body = valid_body();
        body["from"] = json!("2024-01-01T08:30:00Z");
        body["to"] = json!("2024-01-31T17:00:00+02:00");
        assert!(validate_webhook_request(&body).is_ok());
    }

    #[test]
    fn test_from_after_to_is_rejected() {
        let mut body = valid_body();
        body["from"] = json!("2024-02-01");
        body["to"] = json!("2024-01-01");
        let err = validate_webhook_request(&body).unwrap_err();
        assert!(err
            .details
            .contains(&"from date must be before to date".to_string()));
    }

    #[test]
    fn test_equal_from_and_to_is_allowed() {
        let mut body = valid_body();
        body["from"] = json!("2024-01-15");
        body["to"] = json!("2024-01-15");
        assert!(validate_webhook_request(&body).is_ok());
    }

    #[test]
    fn test_future_to_date_is_rejected() {
        let mut body = valid_body();
        let future = (Utc::now() + Duration::days(2)).format("%Y-%m-%d").to_string();
        body["from"] = json!(future.clone());
        body["to"] = json!(future);
        let err = validate_webhook_request(&body).unwrap_err();
        assert!(err
            .details
            .contains(&"to date cannot be in the future".to_string()));
    }

    #[test]
    fn test_range_over_90_days_is_rejected() {
        let mut body = valid_body();
        body["from"] = json!("2024-01-01");
        body["to"] = json!("2024-05-01");
        let err = validate_webhook_request(&body).unwrap_err();
        assert_eq!(
            err.details,
            vec!["date range cannot exceed 90 days".to_string()]
        );
    }

    #[test]
    fn test_range_of_exactly_90_days_is_allowed() {
        let mut body = valid_body();
        body["from"] = json!("2024-01-01");
        body["to"] = json!("2024-03-31");
        assert!(validate_webhook_request(&body).is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = validate_webhook_request(&json!({})).unwrap_err();
        assert_eq!(err.details.len(), 4);
        assert!(err.details.iter().any(|d| d.contains("user_id")));
        assert!(err.details.iter().any(|d| d.contains("from")));
        assert!(err.details.iter().any(|d| d.contains("to")));
        assert!(err.details.iter().any(|d| d.contains("access_token")));
    }

    #[test]
    fn test_non_string_user_id_is_rejected() {
        let mut body = valid_body();
        body["user_id"] = json!(42);
        let err = validate_webhook_request(&body).unwrap_err();
        assert!(err.details.iter().any(|d| d.contains("user_id")));
    }

    #[test]
    fn test_overlong_user_id_is_rejected() {
        let mut body = valid_body();
        body["user_id"] = json!("x".repeat(101));
        let err = validate_webhook_request(&body).unwrap_err();
        assert!(err
            .details
            .iter()
            .any(|d| d.contains("between 1 and 100")));
    }

    #[test]
    fn test_empty_access_token_is_rejected() {
        let mut body = valid_body();
        body["access_token"] = json!("");
        let err = validate_webhook_request(&body).unwrap_err();
        assert!(err.details.iter().any(|d| d.contains("access_token")));
    }

    #[test]
    fn test_unparseable_date_skips_cross_field_checks() {
        let mut body = valid_body();
        body["from"] = json!("not-a-date");
        let err = validate_webhook_request(&body).unwrap_err();
        assert_eq!(
            err.details,
            vec!["\"from\" must be a valid ISO-8601 date".to_string()]
        );
    }
}
