use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Invite, InviteStatus, Outcome, WalkTime};
use crate::store::KeyValueStore;

/// Invites keyed by buddy name, mirrored to the store after every change.
pub struct InviteRegistry {
    store: Arc<dyn KeyValueStore>,
    key: String,
    ttl: Duration,
    entries: Vec<(String, Invite)>,
}

impl InviteRegistry {
    /// Hydrates from `key`. Anything unreadable hydrates as an empty registry.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, ttl: Duration) -> Self {
        let key = key.into();
        let entries = store.get(&key).map(|raw| parse_entries(&key, &raw)).unwrap_or_default();
        tracing::debug!("Loaded {} invites from {}", entries.len(), key);
        Self {
            store,
            key,
            ttl,
            entries,
        }
    }

    /// Creates a fresh pending invite, replacing any earlier one for `name` in place.
    pub fn create(&mut self, name: &str, time: WalkTime, now: DateTime<Utc>) -> Invite {
        let invite = Invite::pending(time, now, self.ttl);
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = invite.clone(),
            None => self.entries.push((name.to_string(), invite.clone())),
        }
        self.persist();
        tracing::info!("💌 Invite to {} for {} (expires {})", name, time, invite.expires_at);
        invite
    }

    pub fn get(&self, name: &str) -> Option<&Invite> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, invite)| invite)
    }

    /// Snapshot in insertion order.
    pub fn list(&self) -> Vec<(String, Invite)> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves a pending invite to the outcome. Returns false if nothing changed.
    pub fn resolve(&mut self, name: &str, outcome: Outcome) -> bool {
        let Some(invite) = self.pending_mut(name) else {
            tracing::debug!("Ignoring {:?} for {}: no pending invite", outcome, name);
            return false;
        };
        invite.status = outcome.into();
        self.persist();
        true
    }

    /// Expires `name` if it is pending and past due. Returns false if nothing changed.
    pub fn expire(&mut self, name: &str, now: DateTime<Utc>) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, invite)) if invite.is_due(now) => {
                invite.status = InviteStatus::Expired;
            }
            _ => return false,
        }
        self.persist();
        true
    }

    /// Expires every overdue invite with a single store write.
    pub fn expire_due(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let mut expired = Vec::new();
        for (name, invite) in self.entries.iter_mut() {
            if invite.is_due(now) {
                invite.status = InviteStatus::Expired;
                expired.push(name.clone());
            }
        }
        if !expired.is_empty() {
            self.persist();
        }
        expired
    }

    fn pending_mut(&mut self, name: &str) -> Option<&mut Invite> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, invite)| invite)
            .filter(|invite| invite.is_pending())
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut map = Map::new();
        for (name, invite) in &self.entries {
            map.insert(name.clone(), serde_json::to_value(invite)?);
        }
        serde_json::to_string(&Value::Object(map))
    }

    fn persist(&self) {
        let result = self
            .to_json()
            .map_err(AppError::from)
            .and_then(|raw| self.store.set(&self.key, raw));
        if let Err(e) = result {
            tracing::warn!("Failed to persist invites under {}: {}", self.key, e);
        }
    }
}

fn parse_entries(key: &str, raw: &str) -> Vec<(String, Invite)> {
    let parsed = serde_json::from_str::<Map<String, Value>>(raw).and_then(|map| {
        map.into_iter()
            .map(|(name, value)| serde_json::from_value::<Invite>(value).map(|invite| (name, invite)))
            .collect::<Result<Vec<_>, _>>()
    });
    match parsed {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Discarding unreadable invites under {}: {}", key, e);
            Vec::new()
        }
    }
}
