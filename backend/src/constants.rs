// =============================================================================
// WalkiePal Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

// =============================================================================
// INVITE LIFECYCLE
// =============================================================================

/// How long (in minutes) a pending invite stays open before it expires
pub const DEFAULT_INVITE_TTL_MINUTES: i64 = 60;

/// How often the expiry sweeper runs
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;

/// Delay before the simulated buddy answers an invite
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 2500;

/// Probability that the simulated buddy accepts
pub const DEFAULT_ACCEPT_PROBABILITY: f64 = 0.6;

// =============================================================================
// PERSISTENT STORE
// =============================================================================

/// Namespace prefix for the app's store keys
pub const DEFAULT_STORE_NAMESPACE: &str = "walkiepal";

/// Suffix of the AppState key (`<ns>_state`)
pub const STATE_KEY_SUFFIX: &str = "state";

/// Suffix of the invite registry key (`<ns>_invites`)
pub const INVITES_KEY_SUFFIX: &str = "invites";

/// Buffered feedback payload key (not namespaced)
pub const PENDING_FEEDBACK_KEY: &str = "pending_feedback";

/// Default location of the JSON file store
pub const DEFAULT_STORE_PATH: &str = "./walkiepal_store.json";

// =============================================================================
// FEEDBACK
// =============================================================================

/// Form-collection endpoint that receives feedback
pub const DEFAULT_FEEDBACK_ENDPOINT: &str = "https://formspree.io/f/mdaebjqn";

// =============================================================================
// ROUTING
// =============================================================================

pub const PATH_EXPLANATION: &str = "/";
pub const PATH_FIND: &str = "/find";
pub const PATH_RESPONSES: &str = "/responses";
pub const PATH_FEEDBACK: &str = "/feedback";

// =============================================================================
// OFFLINE ASSET CACHE
// =============================================================================

/// Build tag appended to cache partition names
pub const DEFAULT_CACHE_VERSION: &str = "v2";

/// Prefix shared by every cache partition this app owns
pub const CACHE_PREFIX: &str = "walkiepal";

/// Assets served cache-first
pub const STATIC_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/style.css",
    "/app.js",
    "/favicon.ico",
    "/manifest.json",
];

/// Directory the server reads assets from
pub const DEFAULT_ASSET_DIR: &str = "./public";

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// How often the server fires due scheduler tasks
pub const SCHEDULER_POLL_INTERVAL_MS: u64 = 250;

/// Shortest period a repeating task may use
pub const MIN_REPEAT_INTERVAL_MS: i64 = 1000;

/// Longest accepted invite TTL (one week)
pub const MAX_INVITE_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Longest accepted sweep interval (one day)
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Longest accepted simulated response delay (one hour)
pub const MAX_RESPONSE_DELAY_MS: u64 = 60 * 60 * 1000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Builds a namespaced store key, e.g. `walkiepal_invites`
pub fn namespaced_key(namespace: &str, suffix: &str) -> String {
    format!("{}_{}", namespace, suffix)
}

/// Validates that a probability can be fed to a Bernoulli draw
pub fn is_valid_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}
