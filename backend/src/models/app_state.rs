use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{PATH_EXPLANATION, PATH_FEEDBACK, PATH_FIND, PATH_RESPONSES};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Explanation,
    Find,
    Response,
    Feedback,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Explanation, Screen::Find, Screen::Response, Screen::Feedback];

    pub fn path(self) -> &'static str {
        match self {
            Screen::Explanation => PATH_EXPLANATION,
            Screen::Find => PATH_FIND,
            Screen::Response => PATH_RESPONSES,
            Screen::Feedback => PATH_FEEDBACK,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Screen::ALL.into_iter().find(|s| s.path() == normalized)
    }

    /// Screens that can be entered straight from a deep link
    pub fn is_deep_linkable(self) -> bool {
        matches!(self, Screen::Explanation | Screen::Find)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Explanation => "explanation",
            Screen::Find => "find",
            Screen::Response => "response",
            Screen::Feedback => "feedback",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| AppError::UnknownScreen(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub screen: Screen,
    #[serde(default)]
    pub interests: Vec<String>,
}
