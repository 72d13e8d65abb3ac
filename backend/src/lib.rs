pub mod app;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
pub mod view;

pub use app::{App, AppSettings, Effect, UserAction};
pub use error::{AppError, AppResult};
pub use utils::config::Config;

// Re-export common types
pub use anyhow::Result;
pub use chrono::{DateTime, Utc};
