use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::models::{InviteStatus, Screen, WalkSummary, WalkTime};

/// Everything a renderer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub path: &'static str,
    pub hidden: Vec<Screen>,
    pub interests: Vec<String>,
    pub search: String,
    pub buddies: Vec<BuddyCard>,
    pub responses: Vec<ResponseCard>,
    pub online: bool,
    pub feedback_buffered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuddyCard {
    pub name: String,
    pub age: u32,
    pub distance: String,
    pub location: String,
    pub matching_interests: Vec<String>,
    pub invite_status: Option<InviteStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseCard {
    pub name: String,
    pub time: WalkTime,
    pub status: InviteStatus,
    pub label: &'static str,
    pub summary: Option<WalkSummary>,
}

/// Rendering capability supplied by whatever draws the UI.
pub trait View: Send {
    fn render(&mut self, snapshot: &Snapshot);
    fn notify(&mut self, message: &str);
}

/// Writes renders and notices to the log.
#[derive(Debug, Default)]
pub struct TracingView;

impl View for TracingView {
    fn render(&mut self, snapshot: &Snapshot) {
        tracing::debug!(
            "🖼️ Render {} ({} buddies, {} responses)",
            snapshot.screen,
            snapshot.buddies.len(),
            snapshot.responses.len()
        );
    }

    fn notify(&mut self, message: &str) {
        tracing::info!("💬 {}", message.replace('\n', " "));
    }
}

/// Keeps every render and notice; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    renders: Vec<Snapshot>,
    notices: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_render(&self) -> Option<Snapshot> {
        self.lock().renders.last().cloned()
    }

    pub fn notices(&self) -> Vec<String> {
        self.lock().notices.clone()
    }

    /// Takes the notices recorded so far, leaving the list empty.
    pub fn drain_notices(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().notices)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl View for RecordingView {
    fn render(&mut self, snapshot: &Snapshot) {
        self.lock().renders.push(snapshot.clone());
    }

    fn notify(&mut self, message: &str) {
        self.lock().notices.push(message.to_string());
    }
}
