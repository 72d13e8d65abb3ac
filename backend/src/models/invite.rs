use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InviteStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, InviteStatus::Pending)
    }

    /// Short label shown on buddy and response cards
    pub fn label(self) -> &'static str {
        match self {
            InviteStatus::Pending => "⏳ Pending",
            InviteStatus::Accepted => "✅ Accepted",
            InviteStatus::Declined => "❌ Declined",
            InviteStatus::Expired => "⏱️ Expired",
        }
    }
}

/// How a buddy answered an invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Declined,
}

impl From<Outcome> for InviteStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Accepted => InviteStatus::Accepted,
            Outcome::Declined => InviteStatus::Declined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkTime {
    Morning,
    Afternoon,
    Evening,
    #[serde(rename = "Later today")]
    LaterToday,
}

impl fmt::Display for WalkTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WalkTime::Morning => "Morning",
            WalkTime::Afternoon => "Afternoon",
            WalkTime::Evening => "Evening",
            WalkTime::LaterToday => "Later today",
        };
        f.write_str(s)
    }
}

impl FromStr for WalkTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(WalkTime::Morning),
            "afternoon" => Ok(WalkTime::Afternoon),
            "evening" => Ok(WalkTime::Evening),
            "later today" | "later" => Ok(WalkTime::LaterToday),
            _ => Err(AppError::UnknownWalkTime(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub status: InviteStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    pub time: WalkTime,
}

impl Invite {
    pub fn pending(time: WalkTime, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            status: InviteStatus::Pending,
            created_at: now,
            expires_at: now + ttl,
            time,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }

    /// A pending invite is due once `now` is strictly past its expiry.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && now > self.expires_at
    }
}
