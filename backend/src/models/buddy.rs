use once_cell::sync::Lazy;
use serde::Serialize;

use super::invite::{Invite, InviteStatus, WalkTime};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Buddy {
    pub name: String,
    pub age: u32,
    pub distance: String,
    pub location: String,
    pub interests: Vec<String>,
}

impl Buddy {
    fn new(name: &str, age: u32, distance: &str, location: &str, interests: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            age,
            distance: distance.to_string(),
            location: location.to_string(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
        }
    }

    /// Interests shared with the user, in the buddy's own order
    pub fn common_interests(&self, user_interests: &[String]) -> Vec<String> {
        self.interests
            .iter()
            .filter(|i| user_interests.contains(i))
            .cloned()
            .collect()
    }
}

static BUDDIES: Lazy<Vec<Buddy>> = Lazy::new(|| {
    vec![
        Buddy::new("Tom", 68, "About a 5-minute walk", "Arlington County, VA", &["walking", "chess"]),
        Buddy::new("Linda", 72, "About a 7-minute walk", "City of Alexandria, VA", &["walking", "gardening"]),
        Buddy::new(
            "Robert",
            65,
            "About a 10-minute walk",
            "City of Richmond, VA",
            &["walking", "chess", "reading"],
        ),
    ]
});

pub fn all() -> &'static [Buddy] {
    &BUDDIES
}

pub fn find(name: &str) -> Option<&'static Buddy> {
    BUDDIES.iter().find(|b| b.name == name)
}

/// Case-insensitive substring search on buddy names; an empty query matches everyone.
pub fn search(query: &str) -> Vec<&'static Buddy> {
    let query = query.trim().to_lowercase();
    BUDDIES
        .iter()
        .filter(|b| b.name.to_lowercase().contains(&query))
        .collect()
}

/// Where a confirmed walk with `name` takes place
pub fn meeting_spot(name: &str) -> &'static str {
    if name == "Linda" {
        "Mount Vernon Trail, Alexandria"
    } else {
        "Lakeside Park, Arlington"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub with: String,
    pub place: String,
    pub time: WalkTime,
}

impl WalkSummary {
    /// Only accepted invites produce a summary.
    pub fn for_invite(name: &str, invite: &Invite) -> Option<Self> {
        (invite.status == InviteStatus::Accepted).then(|| Self {
            with: name.to_string(),
            place: meeting_spot(name).to_string(),
            time: invite.time,
        })
    }
}
