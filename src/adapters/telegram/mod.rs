//! Telegram adapters.
//!
//! - `TelegramClient` - `sendMessage` / `setWebhook` over HTTPS
//! - `TelegramNotifier` - Notifier port over the same client
//! - `types` - Update and reply-keyboard wire types

mod client;
mod notifier;
pub mod types;

pub use client::{TelegramClient, TelegramError};
pub use notifier::TelegramNotifier;
pub use types::{reply_markup, Update};
