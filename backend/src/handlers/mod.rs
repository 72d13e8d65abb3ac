pub mod api;
pub mod pages;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::app::{App, Effect};
use crate::services::{AssetCache, FeedbackClient, Origin};

pub type SharedApp = Arc<Mutex<App>>;

/// Everything the HTTP handlers share.
#[derive(Clone)]
pub struct ServerState {
    pub app: SharedApp,
    pub feedback: FeedbackClient,
    pub assets: Arc<Mutex<AssetCache>>,
    pub origin: Arc<dyn Origin>,
}

impl ServerState {
    pub fn new(app: App, feedback: FeedbackClient, assets: AssetCache, origin: Arc<dyn Origin>) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
            feedback,
            assets: Arc::new(Mutex::new(assets)),
            origin,
        }
    }

    /// Carries out an effect returned by the controller. The HTTP round-trip
    /// happens without holding the controller lock.
    pub async fn perform(&self, effect: Effect) {
        if let Effect::DeliverFeedback(payload) = effect {
            let result = self.feedback.submit(&payload).await;
            self.app.lock().await.feedback_settled(result);
        }
    }
}

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(api::health_check))
        // Screens
        .route("/", get(pages::screen_page))
        .route("/find", get(pages::screen_page))
        .route("/responses", get(pages::screen_page))
        .route("/feedback", get(pages::screen_page))
        // Controller API
        .route("/api/state", get(api::get_state))
        .route("/api/buddies", get(api::list_buddies))
        .route("/api/invites", get(api::list_invites).post(api::create_invite))
        .route("/api/navigate", post(api::navigate))
        .route("/api/back", post(api::go_back))
        .route("/api/history/back", post(api::history_back))
        .route("/api/history/forward", post(api::history_forward))
        .route("/api/search", post(api::search))
        .route("/api/interests", put(api::set_interests))
        .route("/api/feedback", post(api::submit_feedback))
        .route("/api/connectivity", post(api::connectivity))
        // Everything else is a static asset
        .fallback(pages::asset)
        .with_state(state)
}
