use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::ServerState;
use crate::app::UserAction;
use crate::error::AppResult;
use crate::models::{FeedbackPayload, Invite, Screen, WalkTime};
use crate::view::{BuddyCard, Snapshot};

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub name: String,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub screen: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct BuddyQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ConnectivityRequest {
    pub online: bool,
}

#[derive(Debug, Serialize)]
pub struct InviteEntry {
    pub name: String,
    #[serde(flatten)]
    pub invite: Invite,
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn get_state(State(state): State<ServerState>) -> Json<Snapshot> {
    Json(state.app.lock().await.snapshot())
}

pub async fn list_buddies(State(state): State<ServerState>, Query(query): Query<BuddyQuery>) -> Json<Vec<BuddyCard>> {
    Json(state.app.lock().await.buddy_cards(&query.q))
}

pub async fn list_invites(State(state): State<ServerState>) -> Json<Vec<InviteEntry>> {
    let entries = state
        .app
        .lock()
        .await
        .registry()
        .list()
        .into_iter()
        .map(|(name, invite)| InviteEntry { name, invite })
        .collect();
    Json(entries)
}

pub async fn create_invite(
    State(state): State<ServerState>,
    Json(req): Json<InviteRequest>,
) -> AppResult<(StatusCode, Json<Snapshot>)> {
    // No slot chosen means "later today", as the card's default does.
    let time = match req.time.as_deref() {
        Some(raw) => raw.parse()?,
        None => WalkTime::LaterToday,
    };
    let snapshot = dispatch(&state, UserAction::Invite { name: req.name, time }).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn navigate(State(state): State<ServerState>, Json(req): Json<NavigateRequest>) -> AppResult<Json<Snapshot>> {
    let screen: Screen = req.screen.parse()?;
    let action = match screen {
        Screen::Find => UserAction::GoToFind,
        Screen::Feedback => UserAction::GoToFeedback,
        other => UserAction::Navigate(other),
    };
    Ok(Json(dispatch(&state, action).await?))
}

pub async fn go_back(State(state): State<ServerState>) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::Back).await?))
}

pub async fn history_back(State(state): State<ServerState>) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::HistoryBack).await?))
}

pub async fn history_forward(State(state): State<ServerState>) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::HistoryForward).await?))
}

pub async fn search(State(state): State<ServerState>, Json(req): Json<SearchRequest>) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::Search(req.query)).await?))
}

pub async fn set_interests(
    State(state): State<ServerState>,
    Json(interests): Json<Vec<String>>,
) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::SetInterests(interests)).await?))
}

pub async fn submit_feedback(
    State(state): State<ServerState>,
    Json(payload): Json<FeedbackPayload>,
) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::SubmitFeedback(payload)).await?))
}

pub async fn connectivity(
    State(state): State<ServerState>,
    Json(req): Json<ConnectivityRequest>,
) -> AppResult<Json<Snapshot>> {
    Ok(Json(dispatch(&state, UserAction::Connectivity { online: req.online }).await?))
}

/// Runs one action, performs its effect, and returns the resulting snapshot.
async fn dispatch(state: &ServerState, action: UserAction) -> AppResult<Snapshot> {
    let effect = state.app.lock().await.dispatch(action)?;
    state.perform(effect).await;
    Ok(state.app.lock().await.snapshot())
}
