use axum::{
    extract::State,
    http::{header, Uri},
    response::{IntoResponse, Redirect, Response},
};

use super::ServerState;
use crate::constants::PATH_EXPLANATION;
use crate::error::AppResult;
use crate::services::cache::Asset;

/// A page load on one of the screen paths. Deep links that need invite
/// context redirect to the explanation screen.
pub async fn screen_page(State(state): State<ServerState>, uri: Uri) -> AppResult<Response> {
    let (_, redirected) = state.app.lock().await.load_page(uri.path());
    if redirected {
        return Ok(Redirect::to(PATH_EXPLANATION).into_response());
    }
    serve(&state, "/index.html").await
}

pub async fn asset(State(state): State<ServerState>, uri: Uri) -> AppResult<Response> {
    serve(&state, uri.path()).await
}

async fn serve(state: &ServerState, path: &str) -> AppResult<Response> {
    let Asset { content_type, body } = state.assets.lock().await.fetch(path, state.origin.as_ref())?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
