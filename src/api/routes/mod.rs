//! Route handlers, grouped by area.

pub mod auth;
pub mod bills;
pub mod kitchen;
pub mod shopping;
pub mod staff;

use crate::api::extract::Json;
use serde::{Deserialize, Serialize};

/// Body of responses that only carry a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Liveness probe.
pub async fn health() -> Json<MessageResponse> {
    MessageResponse::new("ok")
}
