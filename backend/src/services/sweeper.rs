use chrono::{DateTime, Duration, Utc};

use super::registry::InviteRegistry;
use super::scheduler::{Scheduler, Task, TaskHandle};

/// Periodically expires pending invites whose TTL has run out.
#[derive(Debug)]
pub struct ExpirySweeper {
    interval: Duration,
    handle: Option<TaskHandle>,
}

impl ExpirySweeper {
    pub fn new(interval: Duration) -> Self {
        Self { interval, handle: None }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Arms the repeating sweep. Calling it again while running does nothing.
    pub fn start(&mut self, scheduler: &mut Scheduler, now: DateTime<Utc>) {
        if self.handle.is_some() {
            return;
        }
        self.handle = Some(scheduler.schedule_repeating(now, self.interval, Task::Sweep));
        tracing::info!("🧹 Expiry sweeper started (every {}s)", self.interval.num_seconds());
    }

    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
            tracing::info!("🛑 Expiry sweeper stopped");
        }
    }

    /// One tick: returns the buddies whose invites just expired.
    pub fn sweep(&self, registry: &mut InviteRegistry, now: DateTime<Utc>) -> Vec<String> {
        let expired = registry.expire_due(now);
        if !expired.is_empty() {
            tracing::info!("⏱️ Expired {} invites: {}", expired.len(), expired.join(", "));
        }
        expired
    }
}
