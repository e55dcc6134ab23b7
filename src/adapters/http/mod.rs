//! HTTP adapters - Webhook endpoint for the chat platform.

pub mod webhook;

pub use webhook::{webhook_router, WebhookState};
