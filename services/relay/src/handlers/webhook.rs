use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{error, info};

use shared::utils::{generate_request_id, sanitize_parameter};
use zoom_connector::extract_mp4_downloads;
use zoom_connector::models::DownloadRecord;

use crate::config::FetchMode;
use crate::error::RelayError;
use crate::validate::validate_webhook_request;
use crate::AppState;

struct WebhookOutcome {
    downloads: Vec<DownloadRecord>,
    skipped_users: Option<usize>,
}

/// The orchestrator: validate, sanitize, fetch, extract. Every failure is
/// converted to a wire response here and nowhere else.
pub async fn process_webhook(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Response {
    let request_id = generate_request_id();
    let started = Instant::now();

    info!("[{}] Webhook received: {}", request_id, payload);

    match handle(&state, &payload).await {
        Ok(outcome) => {
            info!(
                "[{}] Fetched {} downloads in {}ms",
                request_id,
                outcome.downloads.len(),
                started.elapsed().as_millis()
            );
            success_response(outcome)
        }
        Err(err) => {
            error!(
                "[{}] Webhook processing failed after {}ms: {}",
                request_id,
                started.elapsed().as_millis(),
                err
            );
            failure_response(&state, err, &request_id)
        }
    }
}

async fn handle(state: &AppState, payload: &Value) -> Result<WebhookOutcome, RelayError> {
    let request = validate_webhook_request(payload)?;

    let from = sanitize_parameter(&request.from.format("%Y-%m-%d").to_string());
    let to = sanitize_parameter(&request.to.format("%Y-%m-%d").to_string());

    match state.config.fetch_mode {
        FetchMode::Single => {
            let user_id = sanitize_parameter(&request.user_id);
            let batch = state
                .zoom
                .user_recordings(&request.access_token, &user_id, &from, &to)
                .await?;
            Ok(WebhookOutcome {
                downloads: extract_mp4_downloads(&batch.meetings),
                skipped_users: None,
            })
        }
        FetchMode::FanOut => {
            let recordings = state
                .zoom
                .fetch_all_recordings(&request.access_token, &from, &to)
                .await?;
            let mut downloads = Vec::new();
            for batch in &recordings.batches {
                downloads.extend(extract_mp4_downloads(&batch.meetings));
            }
            Ok(WebhookOutcome {
                downloads,
                skipped_users: (recordings.skipped_users > 0).then_some(recordings.skipped_users),
            })
        }
    }
}

fn success_response(outcome: WebhookOutcome) -> Response {
    let length = outcome.downloads.len();
    let mut body = json!({
        "success": true,
        "message": "Downloads fetched successfully",
        "downloads": outcome.downloads,
        "length": length,
    });
    if let Some(skipped) = outcome.skipped_users {
        body["skipped_users"] = json!(skipped);
    }
    (StatusCode::OK, Json(body)).into_response()
}

fn failure_response(state: &AppState, err: RelayError, request_id: &str) -> Response {
    let status = err.status();
    let mut body = json!({
        "success": false,
        "error": err.public_message(),
        "requestId": request_id,
    });
    if let RelayError::Validation(validation) = &err {
        body["details"] = json!(validation.details);
    } else if state.config.development {
        // Raw upstream/transport detail is only exposed in development.
        body["message"] = json!(err.to_string());
    }
    (status, Json(body)).into_response()
}
