//! Axum router configuration for the webhook endpoint.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{handle_update, health, WebhookState};

/// Create the bot router.
///
/// # Routes
/// - `POST <webhook_path>` - Platform updates (secret token verified when configured)
/// - `GET /health` - Liveness probe
pub fn webhook_router(state: WebhookState, webhook_path: &str, request_timeout: Duration) -> Router {
    Router::new()
        .route(webhook_path, post(handle_update))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::geocoding::FixedGeocoder;
    use crate::adapters::memory::{
        InMemoryAddressRepository, InMemoryCustomerRepository, InMemoryDeliveryZoneReader,
        RecordingNotifier, StaticTextResolver,
    };
    use crate::adapters::storage::InMemoryDialogueStore;
    use crate::application::handlers::dialogue::{DialogueCollaborators, DialogueEngine};
    use crate::domain::dialogue::Step;
    use crate::domain::foundation::{ChatId, ExternalUserId};
    use crate::ports::{DialogueStateStore, StateStoreError};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    const PATH: &str = "/telegram/webhook";

    struct Harness {
        store: InMemoryDialogueStore,
        replies: RecordingNotifier,
        state: WebhookState,
    }

    fn harness() -> Harness {
        let store = InMemoryDialogueStore::new();
        let replies = RecordingNotifier::new();
        let engine = DialogueEngine::new(DialogueCollaborators {
            state_store: Arc::new(store.clone()),
            customers: Arc::new(InMemoryCustomerRepository::new()),
            addresses: Arc::new(InMemoryAddressRepository::new()),
            zones: Arc::new(InMemoryDeliveryZoneReader::new(vec![])),
            texts: Arc::new(
                StaticTextResolver::new()
                    .with("LANGUAGES_MESSAGE", "Tilni tanlang / Выберите язык")
                    .with("LANGUAGE_BUTTON_UZ", "O'zbekcha"),
            ),
            geocoder: Arc::new(FixedGeocoder::not_found()),
            notifier: Arc::new(RecordingNotifier::new()),
        });
        let state = WebhookState::new(Arc::new(engine), Arc::new(replies.clone()));
        Harness { store, replies, state }
    }

    fn router(state: WebhookState) -> Router {
        webhook_router(state, PATH, Duration::from_secs(5))
    }

    fn delivery(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn start_update() -> serde_json::Value {
        json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "chat": {"id": 77},
                "from": {"id": 77, "is_bot": false, "first_name": "Aziz"},
                "text": "/start"
            }
        })
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let h = harness();
        let response = router(h.state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn start_delivery_replies_with_language_prompt() {
        let h = harness();
        let response = router(h.state).oneshot(delivery(start_update())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let replies = h.replies.replies().await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].0, ChatId::new(77));
        assert_eq!(replies[0].1.text, "Tilni tanlang / Выберите язык");
        assert_eq!(replies[0].1.labels(), vec!["O'zbekcha"]);

        let stored = h.store.get(ExternalUserId::new(77)).await.unwrap().unwrap();
        assert_eq!(stored.step, Step::SetInitialLanguage);
    }

    #[tokio::test]
    async fn ignored_event_sends_nothing() {
        let h = harness();
        let update = json!({
            "update_id": 2,
            "message": {"message_id": 2, "chat": {"id": 77}, "from": {"id": 77}, "text": "hello"}
        });

        let response = router(h.state).oneshot(delivery(update)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(h.replies.replies().await.is_empty());
    }

    #[tokio::test]
    async fn undecodable_body_is_acknowledged() {
        let h = harness();
        let request = Request::builder()
            .method("POST")
            .uri(PATH)
            .body(Body::from("not json"))
            .unwrap();

        let response = router(h.state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let h = harness();
        let state = h.state.with_secret(SecretString::new("s3cret".to_string()));

        let mut request = delivery(start_update());
        request
            .headers_mut()
            .insert(super::super::handlers::SECRET_TOKEN_HEADER, "wrong".parse().unwrap());
        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let missing = router(state).oneshot(delivery(start_update())).await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert!(h.replies.replies().await.is_empty());
    }

    #[tokio::test]
    async fn matching_secret_is_accepted() {
        let h = harness();
        let state = h.state.with_secret(SecretString::new("s3cret".to_string()));

        let mut request = delivery(start_update());
        request
            .headers_mut()
            .insert(super::super::handlers::SECRET_TOKEN_HEADER, "s3cret".parse().unwrap());
        let response = router(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(h.replies.replies().await.len(), 1);
    }

    #[tokio::test]
    async fn closed_store_answers_500() {
        let h = harness();
        h.store.close().await.unwrap();

        let response = router(h.state).oneshot(delivery(start_update())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            h.store.get(ExternalUserId::new(77)).await,
            Err(StateStoreError::Closed)
        ));
    }
}
