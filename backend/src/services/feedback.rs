use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::Arc;

use crate::constants::PENDING_FEEDBACK_KEY;
use crate::error::{AppError, AppResult};
use crate::models::FeedbackPayload;
use crate::store::{self, KeyValueStore};

pub const MSG_OFFLINE: &str = "You're offline.\nFeedback will send automatically when online.";
pub const MSG_SENT: &str = "Thank you! Feedback sent ✅";
pub const MSG_REJECTED: &str = "Error sending feedback.";
pub const MSG_NETWORK: &str = "Network error.";

/// Posts feedback to the form-collection endpoint.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    client: Client,
    endpoint: String,
}

impl FeedbackClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Any 2xx is success; other statuses map to `FeedbackRejected`.
    pub async fn submit(&self, payload: &FeedbackPayload) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::FeedbackRejected(status.as_u16()))
        }
    }
}

/// Single-slot offline buffer for feedback, plus the connectivity flag.
pub struct FeedbackOutbox {
    store: Arc<dyn KeyValueStore>,
    online: bool,
}

impl FeedbackOutbox {
    pub fn new(store: Arc<dyn KeyValueStore>, online: bool) -> Self {
        Self { store, online }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn buffered(&self) -> Option<FeedbackPayload> {
        store::load_json(self.store.as_ref(), PENDING_FEEDBACK_KEY)
    }

    /// Buffers the payload, overwriting anything already waiting.
    pub fn buffer(&self, payload: &FeedbackPayload) {
        if let Err(e) = store::save_json(self.store.as_ref(), PENDING_FEEDBACK_KEY, payload) {
            tracing::warn!("Failed to buffer feedback: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(PENDING_FEEDBACK_KEY) {
            tracing::warn!("Failed to clear buffered feedback: {}", e);
        }
    }

    /// User-facing notice for a delivery result; clears the buffer on success.
    pub fn settle(&self, result: &AppResult<()>) -> &'static str {
        match result {
            Ok(()) => {
                self.clear();
                tracing::info!("✅ Feedback delivered");
                MSG_SENT
            }
            Err(AppError::FeedbackRejected(status)) => {
                tracing::warn!("❌ Feedback rejected with status {}", status);
                MSG_REJECTED
            }
            Err(e) => {
                tracing::warn!("❌ Feedback delivery failed: {}", e);
                MSG_NETWORK
            }
        }
    }
}
