//! HTTP handlers for the webhook endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::telegram::Update;
use crate::application::handlers::dialogue::{DialogueEngine, DialogueError};
use crate::ports::ReplySender;

use super::dto::{route_update, ErrorResponse, HealthResponse};

/// Header the platform echoes the registered secret in.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebhookState {
    engine: Arc<DialogueEngine>,
    replies: Arc<dyn ReplySender>,
    secret: Option<Arc<SecretString>>,
}

impl WebhookState {
    pub fn new(engine: Arc<DialogueEngine>, replies: Arc<dyn ReplySender>) -> Self {
        Self {
            engine,
            replies,
            secret: None,
        }
    }

    /// Require deliveries to carry `secret` in the secret-token header.
    pub fn with_secret(mut self, secret: SecretString) -> Self {
        self.secret = Some(Arc::new(secret));
        self
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.secret else {
            return true;
        };
        let Some(provided) = headers.get(SECRET_TOKEN_HEADER) else {
            return false;
        };
        constant_time_compare(expected.expose_secret().as_bytes(), provided.as_bytes())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST <webhook_path> - Apply one platform update
///
/// Answers 200 for everything the dialogue consumed or chose to ignore, so
/// the platform does not redeliver it. Store or database failures answer 500
/// and the update is redelivered.
pub async fn handle_update(State(state): State<WebhookState>, headers: HeaderMap, body: Bytes) -> Response {
    if !state.is_authorized(&headers) {
        tracing::warn!("Webhook delivery with missing or wrong secret token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("INVALID_SECRET_TOKEN", "Secret token mismatch")),
        )
            .into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Undecodable update; dropping");
            return StatusCode::OK.into_response();
        }
    };

    let Some(routed) = route_update(&update) else {
        tracing::debug!(update_id = update.update_id, "Update carries no dialogue event");
        return StatusCode::OK.into_response();
    };

    match state.engine.handle(routed.event).await {
        Ok(outcome) => {
            if let Some(reply) = outcome.reply {
                // The step is already persisted; a lost reply is not retried.
                if let Err(e) = state.replies.send_reply(routed.chat_id, &reply).await {
                    tracing::warn!(chat_id = %routed.chat_id, error = %e, "Reply not delivered");
                }
            }
            StatusCode::OK.into_response()
        }
        Err(e) => handle_dialogue_error(e),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_dialogue_error(err: DialogueError) -> Response {
    let error_code = match &err {
        DialogueError::StateStore(_) => "STATE_STORE_UNAVAILABLE",
        DialogueError::Repository(_) => "REPOSITORY_FAILED",
        DialogueError::Transition(_) => "ILLEGAL_TRANSITION",
    };
    tracing::error!(error = %err, error_code, "Dialogue event failed");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(error_code, "Event not applied")),
    )
        .into_response()
}
