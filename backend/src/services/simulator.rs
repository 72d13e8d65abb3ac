use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::HashMap;

use super::registry::InviteRegistry;
use super::scheduler::{Scheduler, Task, TaskHandle};
use crate::constants::is_valid_probability;
use crate::models::Outcome;

/// Stand-in for a real buddy: answers each invite once, at random, after a delay.
pub struct ResponseSimulator {
    delay: Duration,
    accept_probability: f64,
    rng: Box<dyn RngCore + Send>,
    handles: HashMap<String, TaskHandle>,
}

impl ResponseSimulator {
    pub fn new(delay: Duration, accept_probability: f64, rng: Box<dyn RngCore + Send>) -> Self {
        let accept_probability = if is_valid_probability(accept_probability) {
            accept_probability
        } else if accept_probability > 1.0 {
            1.0
        } else {
            // Below zero or NaN: never accept.
            0.0
        };
        Self {
            delay,
            accept_probability,
            rng,
            handles: HashMap::new(),
        }
    }

    pub fn seeded(delay: Duration, accept_probability: f64, seed: u64) -> Self {
        Self::new(delay, accept_probability, Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_entropy(delay: Duration, accept_probability: f64) -> Self {
        Self::new(delay, accept_probability, Box::new(StdRng::from_os_rng()))
    }

    /// Schedules the answer for `name`, cancelling any answer still queued for an older invite.
    pub fn schedule(&mut self, scheduler: &mut Scheduler, name: &str, now: DateTime<Utc>) -> TaskHandle {
        if let Some(stale) = self.handles.remove(name) {
            if scheduler.cancel(stale) {
                tracing::debug!("Cancelled stale response task for {}", name);
            }
        }
        let handle = scheduler.schedule_once(now, self.delay, Task::Respond { name: name.to_string() });
        self.handles.insert(name.to_string(), handle);
        handle
    }

    pub fn pending_handle(&self, name: &str) -> Option<TaskHandle> {
        self.handles.get(name).copied()
    }

    /// Fires the answer for `name`. Returns `None` when the invite is no
    /// longer pending, which is the expected result of losing a race with
    /// the sweeper. A pending invite already past its expiry is expired
    /// instead of answered.
    pub fn respond(&mut self, registry: &mut InviteRegistry, name: &str, now: DateTime<Utc>) -> Option<Outcome> {
        self.handles.remove(name);

        match registry.get(name) {
            Some(invite) if invite.is_pending() && invite.is_due(now) => {
                registry.expire(name, now);
                tracing::info!("⏱️ {} answered too late, invite expired", name);
                return None;
            }
            Some(invite) if invite.is_pending() => {}
            _ => {
                tracing::debug!("No pending invite for {}, skipping response", name);
                return None;
            }
        }

        let outcome = if self.rng.random_bool(self.accept_probability) {
            Outcome::Accepted
        } else {
            Outcome::Declined
        };
        registry.resolve(name, outcome);
        tracing::info!("📨 {} answered: {:?}", name, outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InviteStatus, WalkTime};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + Duration::seconds(secs)
    }

    fn registry() -> InviteRegistry {
        InviteRegistry::load(Arc::new(MemoryStore::new()), "walkiepal_invites", Duration::minutes(60))
    }

    #[test]
    fn test_forced_outcomes() {
        let mut registry = registry();
        registry.create("Tom", WalkTime::Morning, t(0));
        registry.create("Linda", WalkTime::Morning, t(0));

        let mut yes = ResponseSimulator::seeded(Duration::milliseconds(2500), 1.0, 1);
        let mut no = ResponseSimulator::seeded(Duration::milliseconds(2500), 0.0, 1);

        assert_eq!(yes.respond(&mut registry, "Tom", t(3)), Some(Outcome::Accepted));
        assert_eq!(no.respond(&mut registry, "Linda", t(3)), Some(Outcome::Declined));
        assert_eq!(registry.get("Tom").unwrap().status, InviteStatus::Accepted);
        assert_eq!(registry.get("Linda").unwrap().status, InviteStatus::Declined);
    }

    #[test]
    fn test_respond_after_expiry_is_noop() {
        let mut registry = registry();
        registry.create("Tom", WalkTime::Morning, t(0));
        registry.expire("Tom", t(3601));

        let mut simulator = ResponseSimulator::seeded(Duration::milliseconds(2500), 1.0, 7);
        assert_eq!(simulator.respond(&mut registry, "Tom", t(3602)), None);
        assert_eq!(simulator.respond(&mut registry, "Nobody", t(3602)), None);
        assert_eq!(registry.get("Tom").unwrap().status, InviteStatus::Expired);
    }

    #[test]
    fn test_overdue_invite_expires_instead_of_answering() {
        let mut registry = registry();
        registry.create("Tom", WalkTime::Morning, t(0));

        let mut simulator = ResponseSimulator::seeded(Duration::milliseconds(2500), 1.0, 7);
        assert_eq!(simulator.respond(&mut registry, "Tom", t(5 * 3600)), None);
        assert_eq!(registry.get("Tom").unwrap().status, InviteStatus::Expired);
    }

    #[test]
    fn test_nan_probability_never_accepts() {
        let mut registry = registry();
        registry.create("Tom", WalkTime::Morning, t(0));

        let mut simulator = ResponseSimulator::seeded(Duration::milliseconds(2500), f64::NAN, 7);
        assert_eq!(simulator.respond(&mut registry, "Tom", t(3)), Some(Outcome::Declined));
    }

    #[test]
    fn test_reschedule_cancels_stale_task() {
        let mut scheduler = Scheduler::new();
        let mut simulator = ResponseSimulator::seeded(Duration::milliseconds(2500), 0.6, 3);

        let first = simulator.schedule(&mut scheduler, "Tom", t(0));
        let second = simulator.schedule(&mut scheduler, "Tom", t(1));

        assert_ne!(first, second);
        assert!(!scheduler.is_scheduled(first));
        assert!(scheduler.is_scheduled(second));
        assert_eq!(simulator.pending_handle("Tom"), Some(second));
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let outcomes = |seed| {
            let mut registry = registry();
            let mut simulator = ResponseSimulator::seeded(Duration::milliseconds(2500), 0.6, seed);
            (0..20)
                .map(|_| {
                    registry.create("Robert", WalkTime::Evening, t(0));
                    simulator.respond(&mut registry, "Robert", t(3))
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(outcomes(42), outcomes(42));
    }
}
