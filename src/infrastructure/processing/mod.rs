//! Remote background removal adapter.

mod dto;
mod webhook_client;

pub use dto::ProcessResponse;
pub use webhook_client::WebhookProcessingClient;
