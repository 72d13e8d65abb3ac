//! The application controller.
//!
//! `App` owns every piece of mutable state (AppState, invite registry,
//! router, scheduler, sweeper, simulator and feedback outbox). User actions
//! come in through [`App::dispatch`], timers through [`App::run_due`], and
//! every visible change is pushed to the [`View`] as a full [`Snapshot`].
//!
//! Feedback delivery is the one asynchronous step: `dispatch` hands the
//! payload back as [`Effect::DeliverFeedback`], the caller performs the HTTP
//! request without holding the controller, and reports back through
//! [`App::feedback_settled`].

use chrono::Duration;
use std::sync::Arc;

use crate::constants::{
    namespaced_key, DEFAULT_ACCEPT_PROBABILITY, DEFAULT_INVITE_TTL_MINUTES, DEFAULT_RESPONSE_DELAY_MS,
    DEFAULT_STORE_NAMESPACE, DEFAULT_SWEEP_INTERVAL_SECS, INVITES_KEY_SUFFIX, STATE_KEY_SUFFIX,
};
use crate::error::{AppError, AppResult};
use crate::models::{buddy, AppState, FeedbackPayload, Outcome, Screen, WalkSummary, WalkTime};
use crate::services::clock::Clock;
use crate::services::feedback::{FeedbackOutbox, MSG_OFFLINE};
use crate::services::registry::InviteRegistry;
use crate::services::router::{back_target, initial_screen, HistoryMode, Router};
use crate::services::scheduler::{Scheduler, Task};
use crate::services::simulator::ResponseSimulator;
use crate::services::sweeper::ExpirySweeper;
use crate::store::{self, KeyValueStore};
use crate::utils::Config;
use crate::view::{BuddyCard, ResponseCard, Snapshot, View};

/// Tunables the controller needs, usually derived from [`Config`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub namespace: String,
    pub invite_ttl: Duration,
    pub sweep_interval: Duration,
    pub response_delay: Duration,
    pub accept_probability: f64,
}

impl AppSettings {
    /// Validates `config` first, so every duration below is in range.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            namespace: config.namespace.clone(),
            invite_ttl: Duration::minutes(config.invite_ttl_minutes),
            sweep_interval: Duration::seconds(config.sweep_interval_secs as i64),
            response_delay: Duration::milliseconds(config.response_delay_ms as i64),
            accept_probability: config.accept_probability,
        })
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_STORE_NAMESPACE.to_string(),
            invite_ttl: Duration::minutes(DEFAULT_INVITE_TTL_MINUTES),
            sweep_interval: Duration::seconds(DEFAULT_SWEEP_INTERVAL_SECS as i64),
            response_delay: Duration::milliseconds(DEFAULT_RESPONSE_DELAY_MS as i64),
            accept_probability: DEFAULT_ACCEPT_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Invite { name: String, time: WalkTime },
    Navigate(Screen),
    GoToFind,
    GoToFeedback,
    Back,
    HistoryBack,
    HistoryForward,
    Search(String),
    SetInterests(Vec<String>),
    SubmitFeedback(FeedbackPayload),
    Connectivity { online: bool },
}

/// Work the caller must carry out after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    DeliverFeedback(FeedbackPayload),
}

pub struct App {
    clock: Arc<dyn Clock>,
    store: Arc<dyn KeyValueStore>,
    state_key: String,
    state: AppState,
    router: Router,
    registry: InviteRegistry,
    scheduler: Scheduler,
    sweeper: ExpirySweeper,
    simulator: ResponseSimulator,
    outbox: FeedbackOutbox,
    search: String,
    view: Box<dyn View>,
}

impl App {
    /// Boots the app as a page load at `initial_path` would: restores state,
    /// routes the deep link, starts the sweeper and renders once.
    pub fn start(
        settings: AppSettings,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        simulator: ResponseSimulator,
        view: Box<dyn View>,
        initial_path: &str,
    ) -> Self {
        let state_key = namespaced_key(&settings.namespace, STATE_KEY_SUFFIX);
        let invites_key = namespaced_key(&settings.namespace, INVITES_KEY_SUFFIX);

        let mut state: AppState = store::load_json(store.as_ref(), &state_key).unwrap_or_default();
        let (router, redirected) = Router::initial(initial_path);
        if redirected {
            tracing::info!("↩️ Deep link {} redirected to {}", initial_path, router.current().path());
        }
        state.screen = router.current();

        let registry = InviteRegistry::load(store.clone(), invites_key, settings.invite_ttl);
        let outbox = FeedbackOutbox::new(store.clone(), true);

        let mut app = Self {
            clock,
            store,
            state_key,
            state,
            router,
            registry,
            scheduler: Scheduler::new(),
            sweeper: ExpirySweeper::new(settings.sweep_interval),
            simulator,
            outbox,
            search: String::new(),
            view,
        };

        let now = app.clock.now();
        app.sweeper.sweep(&mut app.registry, now);
        app.sweeper.start(&mut app.scheduler, now);
        // Invites left pending by a previous session still deserve an answer.
        for (name, invite) in app.registry.list() {
            if invite.is_pending() {
                app.simulator.schedule(&mut app.scheduler, &name, now);
            }
        }
        app.persist_state();
        app.render();
        app
    }

    pub fn dispatch(&mut self, action: UserAction) -> AppResult<Effect> {
        match action {
            UserAction::Invite { name, time } => {
                self.create_invite(&name, time)?;
            }
            UserAction::Navigate(screen) => self.navigate(screen),
            UserAction::GoToFind => self.navigate(Screen::Find),
            UserAction::GoToFeedback => self.navigate(Screen::Feedback),
            UserAction::Back => self.go_back(),
            UserAction::HistoryBack => {
                if let Some(screen) = self.router.history_back() {
                    self.restore(screen);
                }
            }
            UserAction::HistoryForward => {
                if let Some(screen) = self.router.history_forward() {
                    self.restore(screen);
                }
            }
            UserAction::Search(query) => {
                self.search = query;
                self.render();
            }
            UserAction::SetInterests(interests) => {
                self.state.interests = interests;
                self.persist_state();
                self.render();
            }
            UserAction::SubmitFeedback(payload) => return Ok(self.submit_feedback(payload)),
            UserAction::Connectivity { online } => return Ok(self.set_online(online)),
        }
        Ok(Effect::None)
    }

    /// Sends a walk invite to a known buddy and moves to the response screen.
    pub fn create_invite(&mut self, name: &str, time: WalkTime) -> AppResult<()> {
        if buddy::find(name).is_none() {
            return Err(AppError::UnknownBuddy(name.to_string()));
        }
        let now = self.clock.now();
        self.registry.create(name, time, now);
        self.simulator.schedule(&mut self.scheduler, name, now);

        self.view.notify(&format!("Invitation sent to {}.\n\nWaiting for response…", name));
        self.navigate(Screen::Response);
        Ok(())
    }

    /// Handles a fresh page load at `path` on an already running app. Returns
    /// the screen shown and whether the deep link was redirected.
    pub fn load_page(&mut self, path: &str) -> (Screen, bool) {
        let (screen, redirected) = initial_screen(path);
        if redirected {
            tracing::info!("↩️ Deep link {} redirected to {}", path, screen.path());
        }
        self.show(screen, HistoryMode::Replace);
        (screen, redirected)
    }

    /// Shows `screen`, records it in history and persists it.
    pub fn navigate(&mut self, screen: Screen) {
        self.show(screen, HistoryMode::Push);
    }

    /// In-app back button: response goes to find, feedback to response.
    pub fn go_back(&mut self) {
        if let Some(target) = back_target(self.router.current()) {
            self.navigate(target);
        }
    }

    /// Re-enters a screen chosen by a back/forward signal without pushing.
    fn restore(&mut self, screen: Screen) {
        self.show(screen, HistoryMode::Restore);
    }

    fn show(&mut self, screen: Screen, mode: HistoryMode) {
        self.router.navigate(screen, mode);
        self.state.screen = screen;
        self.persist_state();
        self.render();
    }

    fn submit_feedback(&mut self, payload: FeedbackPayload) -> Effect {
        if !self.outbox.is_online() {
            self.outbox.buffer(&payload);
            self.view.notify(MSG_OFFLINE);
            self.render();
            return Effect::None;
        }
        Effect::DeliverFeedback(payload)
    }

    fn set_online(&mut self, online: bool) -> Effect {
        let was_online = self.outbox.is_online();
        self.outbox.set_online(online);
        tracing::info!("📶 Connectivity: {}", if online { "online" } else { "offline" });

        let effect = match (was_online, online, self.outbox.buffered()) {
            (false, true, Some(payload)) => Effect::DeliverFeedback(payload),
            _ => Effect::None,
        };
        self.render();
        effect
    }

    /// Reports the outcome of a feedback delivery started by an earlier effect.
    pub fn feedback_settled(&mut self, result: AppResult<()>) {
        let message = self.outbox.settle(&result);
        self.view.notify(message);
        self.render();
    }

    /// Runs every scheduler task that is due. Returns how many fired.
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.now();
        let due = self.scheduler.take_due(now);
        let fired = due.len();

        for (_, task) in due {
            match task {
                Task::Sweep => {
                    if !self.sweeper.sweep(&mut self.registry, now).is_empty() {
                        self.render();
                    }
                }
                Task::Respond { name } => match self.simulator.respond(&mut self.registry, &name, now) {
                    Some(Outcome::Accepted) => {
                        self.view.notify(&format!("Great! {} accepted your walk.", name));
                        self.render();
                    }
                    Some(Outcome::Declined) => {
                        self.view.notify(&format!("No problem. {} can’t join this time.", name));
                        self.render();
                    }
                    None => self.render(),
                },
            }
        }
        fired
    }

    /// Stops the periodic sweep and drops queued responses.
    pub fn shutdown(&mut self) {
        self.sweeper.stop(&mut self.scheduler);
        self.scheduler = Scheduler::new();
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn registry(&self) -> &InviteRegistry {
        &self.registry
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Buddy cards matching `query`, annotated with shared interests and invite status.
    pub fn buddy_cards(&self, query: &str) -> Vec<BuddyCard> {
        buddy::search(query)
            .into_iter()
            .map(|b| BuddyCard {
                name: b.name.clone(),
                age: b.age,
                distance: b.distance.clone(),
                location: b.location.clone(),
                matching_interests: b.common_interests(&self.state.interests),
                invite_status: self.registry.get(&b.name).map(|i| i.status),
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let buddies = self.buddy_cards(&self.search);

        let responses = self
            .registry
            .list()
            .into_iter()
            .map(|(name, invite)| ResponseCard {
                summary: WalkSummary::for_invite(&name, &invite),
                time: invite.time,
                status: invite.status,
                label: invite.status.label(),
                name,
            })
            .collect();

        Snapshot {
            screen: self.router.current(),
            path: self.router.current().path(),
            hidden: Screen::ALL
                .into_iter()
                .filter(|s| !self.router.is_visible(*s))
                .collect(),
            interests: self.state.interests.clone(),
            search: self.search.clone(),
            buddies,
            responses,
            online: self.outbox.is_online(),
            feedback_buffered: self.outbox.buffered().is_some(),
        }
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.view.render(&snapshot);
    }

    fn persist_state(&self) {
        if let Err(e) = store::save_json(self.store.as_ref(), &self.state_key, &self.state) {
            tracing::warn!("Failed to persist app state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PENDING_FEEDBACK_KEY;
    use crate::models::InviteStatus;
    use crate::services::clock::ManualClock;
    use crate::services::feedback::{MSG_NETWORK, MSG_SENT};
    use crate::store::MemoryStore;
    use crate::view::RecordingView;
    use chrono::{DateTime, Utc};

    struct Harness {
        app: App,
        clock: ManualClock,
        store: Arc<MemoryStore>,
        view: RecordingView,
    }

    fn harness_with(store: Arc<MemoryStore>, accept_probability: f64, path: &str) -> Harness {
        harness_at(store, accept_probability, path, DateTime::<Utc>::UNIX_EPOCH)
    }

    fn harness_at(store: Arc<MemoryStore>, accept_probability: f64, path: &str, start: DateTime<Utc>) -> Harness {
        let clock = ManualClock::new(start);
        let view = RecordingView::new();
        let settings = AppSettings {
            namespace: "walkiepal".to_string(),
            invite_ttl: Duration::seconds(3600),
            sweep_interval: Duration::seconds(30),
            response_delay: Duration::milliseconds(2500),
            accept_probability,
        };
        let simulator = ResponseSimulator::seeded(settings.response_delay, accept_probability, 11);
        let app = App::start(
            settings,
            store.clone(),
            Arc::new(clock.clone()),
            simulator,
            Box::new(view.clone()),
            path,
        );
        Harness { app, clock, store, view }
    }

    fn harness(accept_probability: f64) -> Harness {
        harness_with(Arc::new(MemoryStore::new()), accept_probability, "/")
    }

    fn feedback() -> FeedbackPayload {
        FeedbackPayload {
            q1: "Loved it".to_string(),
            q2: "Nothing".to_string(),
            q3: "Yes".to_string(),
        }
    }

    #[test]
    fn test_settings_reject_invalid_config() {
        let config = Config {
            invite_ttl_minutes: i64::MAX,
            ..Config::default()
        };
        assert!(AppSettings::from_config(&config).is_err());

        let settings = AppSettings::from_config(&Config::default()).unwrap();
        assert_eq!(settings.invite_ttl, AppSettings::default().invite_ttl);
    }

    #[test]
    fn test_invite_moves_to_response_screen() {
        let mut h = harness(0.6);
        h.app.create_invite("Tom", WalkTime::Morning).unwrap();

        assert_eq!(h.app.router().current(), Screen::Response);
        assert_eq!(h.app.state().screen, Screen::Response);
        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Pending);
        assert!(h.view.notices()[0].starts_with("Invitation sent to Tom."));

        let stored: AppState = store::load_json(h.store.as_ref(), "walkiepal_state").unwrap();
        assert_eq!(stored.screen, Screen::Response);
    }

    #[test]
    fn test_unknown_buddy_is_rejected() {
        let mut h = harness(0.6);
        let result = h.app.create_invite("Zed", WalkTime::Evening);
        assert!(matches!(result, Err(AppError::UnknownBuddy(_))));
        assert!(h.app.registry().is_empty());
    }

    #[test]
    fn test_unanswered_invite_expires_on_sweep() {
        let mut h = harness(0.6);
        h.app.create_invite("Tom", WalkTime::Morning).unwrap();
        // Drop the queued response so only the sweeper acts.
        h.app.shutdown();
        let now = h.clock.now();
        h.app.sweeper.start(&mut h.app.scheduler, now);

        h.clock.advance(Duration::seconds(3600));
        h.app.run_due();
        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Pending);

        h.clock.advance(Duration::seconds(30));
        h.app.run_due();
        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Expired);

        let raw = h.store.get("walkiepal_invites").unwrap();
        assert!(raw.contains("EXPIRED"));
    }

    #[test]
    fn test_accepted_walk_has_summary() {
        let mut h = harness(1.0);
        h.app.create_invite("Linda", WalkTime::Evening).unwrap();

        h.clock.advance(Duration::milliseconds(2500));
        assert_eq!(h.app.run_due(), 1);

        let snapshot = h.view.last_render().unwrap();
        let card = snapshot.responses.iter().find(|c| c.name == "Linda").unwrap();
        assert_eq!(card.status, InviteStatus::Accepted);
        assert_eq!(
            card.summary,
            Some(WalkSummary {
                with: "Linda".to_string(),
                place: "Mount Vernon Trail, Alexandria".to_string(),
                time: WalkTime::Evening,
            })
        );
        assert!(h.view.notices().contains(&"Great! Linda accepted your walk.".to_string()));
    }

    #[test]
    fn test_declined_walk() {
        let mut h = harness(0.0);
        h.app.create_invite("Tom", WalkTime::Afternoon).unwrap();
        h.clock.advance(Duration::seconds(3));
        h.app.run_due();

        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Declined);
        assert!(h.view.notices().last().unwrap().starts_with("No problem. Tom"));
    }

    #[test]
    fn test_reinvite_cancels_stale_response() {
        let mut h = harness(1.0);
        h.app.create_invite("Tom", WalkTime::Morning).unwrap();
        h.clock.advance(Duration::milliseconds(2000));
        h.app.create_invite("Tom", WalkTime::Evening).unwrap();

        // The first task would have fired here.
        h.clock.advance(Duration::milliseconds(600));
        h.app.run_due();
        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Pending);

        h.clock.advance(Duration::milliseconds(2000));
        h.app.run_due();
        let tom = h.app.registry().get("Tom").unwrap();
        assert_eq!(tom.status, InviteStatus::Accepted);
        assert_eq!(tom.time, WalkTime::Evening);
    }

    #[test]
    fn test_back_button_mapping() {
        let mut h = harness(0.6);
        h.app.dispatch(UserAction::GoToFind).unwrap();
        h.app.dispatch(UserAction::Navigate(Screen::Response)).unwrap();
        h.app.dispatch(UserAction::GoToFeedback).unwrap();

        h.app.dispatch(UserAction::Back).unwrap();
        assert_eq!(h.app.router().current(), Screen::Response);
        h.app.dispatch(UserAction::Back).unwrap();
        assert_eq!(h.app.router().current(), Screen::Find);
        h.app.dispatch(UserAction::Back).unwrap();
        assert_eq!(h.app.router().current(), Screen::Find);
    }

    #[test]
    fn test_history_signals_restore_without_pushing() {
        let mut h = harness(0.6);
        h.app.dispatch(UserAction::GoToFind).unwrap();
        h.app.dispatch(UserAction::Navigate(Screen::Response)).unwrap();
        let entries = h.app.router().history().len();

        h.app.dispatch(UserAction::HistoryBack).unwrap();
        assert_eq!(h.app.router().current(), Screen::Find);
        assert_eq!(h.app.state().screen, Screen::Find);
        assert_eq!(h.view.last_render().unwrap().buddies.len(), 3);

        h.app.dispatch(UserAction::HistoryForward).unwrap();
        assert_eq!(h.app.router().current(), Screen::Response);
        assert_eq!(h.app.router().history().len(), entries);
    }

    #[test]
    fn test_deep_link_to_responses_redirects() {
        let h = harness_with(Arc::new(MemoryStore::new()), 0.6, "/responses");
        assert_eq!(h.app.router().current(), Screen::Explanation);

        let h = harness_with(Arc::new(MemoryStore::new()), 0.6, "/find");
        assert_eq!(h.app.router().current(), Screen::Find);
    }

    #[test]
    fn test_state_survives_restart() {
        let store = Arc::new(MemoryStore::new());
        let mut first = harness_with(store.clone(), 0.6, "/");
        first
            .app
            .dispatch(UserAction::SetInterests(vec!["chess".to_string()]))
            .unwrap();
        first.app.create_invite("Robert", WalkTime::Morning).unwrap();

        let second = harness_with(store, 0.6, "/find");
        assert_eq!(second.app.state().interests, vec!["chess".to_string()]);
        assert_eq!(second.app.registry().list(), first.app.registry().list());

        let robert = second
            .view
            .last_render()
            .unwrap()
            .buddies
            .into_iter()
            .find(|b| b.name == "Robert")
            .unwrap();
        assert_eq!(robert.matching_interests, vec!["chess".to_string()]);
        assert_eq!(robert.invite_status, Some(InviteStatus::Pending));
        // The restored pending invite gets a fresh response task.
        assert_eq!(second.app.scheduler().len(), 2);
    }

    #[test]
    fn test_overdue_invite_expires_on_restart() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                "walkiepal_invites",
                r#"{"Tom":{"status":"PENDING","createdAt":0,"expiresAt":3600000,"time":"Morning"}}"#.to_string(),
            )
            .unwrap();

        let mut h = harness_at(store, 1.0, "/", DateTime::<Utc>::UNIX_EPOCH + Duration::hours(5));
        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Expired);

        h.clock.advance(Duration::milliseconds(2500));
        h.app.run_due();
        assert_eq!(h.app.registry().get("Tom").unwrap().status, InviteStatus::Expired);
        assert!(!h.view.notices().iter().any(|n| n.contains("accepted")));
        assert!(h.store.get("walkiepal_invites").unwrap().contains("EXPIRED"));
    }

    #[test]
    fn test_restored_invite_expiring_before_answer_is_not_resolved() {
        let store = Arc::new(MemoryStore::new());
        // Still pending at restart, but due one second later.
        store
            .set(
                "walkiepal_invites",
                r#"{"Linda":{"status":"PENDING","createdAt":0,"expiresAt":3600000,"time":"Evening"}}"#.to_string(),
            )
            .unwrap();

        let mut h = harness_at(store, 1.0, "/", DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(3599));
        assert_eq!(h.app.registry().get("Linda").unwrap().status, InviteStatus::Pending);

        h.clock.advance(Duration::milliseconds(2500));
        h.app.run_due();
        assert_eq!(h.app.registry().get("Linda").unwrap().status, InviteStatus::Expired);
        assert_eq!(h.view.last_render().unwrap().responses[0].status, InviteStatus::Expired);
    }

    #[test]
    fn test_corrupt_state_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set("walkiepal_state", "{\"screen\": 42}".to_string()).unwrap();
        store.set("walkiepal_invites", "oops".to_string()).unwrap();

        let h = harness_with(store, 0.6, "/");
        assert_eq!(h.app.state(), &AppState::default());
        assert!(h.app.registry().is_empty());
    }

    #[test]
    fn test_offline_feedback_flushes_when_online() {
        let mut h = harness(0.6);
        h.app.dispatch(UserAction::Connectivity { online: false }).unwrap();

        let effect = h.app.dispatch(UserAction::SubmitFeedback(feedback())).unwrap();
        assert_eq!(effect, Effect::None);
        assert!(h.store.get(PENDING_FEEDBACK_KEY).is_some());
        assert_eq!(h.view.notices().last().unwrap(), MSG_OFFLINE);

        let effect = h.app.dispatch(UserAction::Connectivity { online: true }).unwrap();
        assert_eq!(effect, Effect::DeliverFeedback(feedback()));

        h.app.feedback_settled(Ok(()));
        assert!(h.store.get(PENDING_FEEDBACK_KEY).is_none());
        assert_eq!(h.view.notices().last().unwrap(), MSG_SENT);
    }

    #[test]
    fn test_failed_flush_keeps_payload() {
        let mut h = harness(0.6);
        h.app.dispatch(UserAction::Connectivity { online: false }).unwrap();
        h.app.dispatch(UserAction::SubmitFeedback(feedback())).unwrap();
        h.app.dispatch(UserAction::Connectivity { online: true }).unwrap();

        h.app.feedback_settled(Err(AppError::Io(std::io::Error::other("connection reset"))));
        assert!(h.store.get(PENDING_FEEDBACK_KEY).is_some());
        assert_eq!(h.view.notices().last().unwrap(), MSG_NETWORK);
    }

    #[test]
    fn test_online_submit_is_delivered_directly() {
        let mut h = harness(0.6);
        let effect = h.app.dispatch(UserAction::SubmitFeedback(feedback())).unwrap();
        assert_eq!(effect, Effect::DeliverFeedback(feedback()));
        assert!(h.store.get(PENDING_FEEDBACK_KEY).is_none());
    }

    #[test]
    fn test_search_filters_buddy_cards() {
        let mut h = harness(0.6);
        h.app.dispatch(UserAction::Search("ro".to_string())).unwrap();
        let names: Vec<_> = h
            .view
            .last_render()
            .unwrap()
            .buddies
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Robert".to_string()]);
    }

    #[test]
    fn test_load_page_replaces_current_entry() {
        let mut h = harness(0.6);
        h.app.dispatch(UserAction::GoToFind).unwrap();

        assert_eq!(h.app.load_page("/feedback"), (Screen::Explanation, true));
        assert_eq!(h.app.router().history().len(), 2);
        assert_eq!(h.app.load_page("/find"), (Screen::Find, false));
        assert_eq!(h.app.state().screen, Screen::Find);
    }

    #[test]
    fn test_shutdown_clears_timers() {
        let mut h = harness(0.6);
        h.app.create_invite("Tom", WalkTime::Morning).unwrap();
        h.app.shutdown();
        assert!(h.app.scheduler().is_empty());
    }
}
