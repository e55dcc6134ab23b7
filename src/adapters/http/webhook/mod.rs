//! HTTP adapter for platform webhook deliveries.

mod dto;
mod handlers;
mod routes;

pub use dto::{route_update, ErrorResponse, HealthResponse, RoutedEvent, START_COMMAND};
pub use handlers::{WebhookState, SECRET_TOKEN_HEADER};
pub use routes::webhook_router;
