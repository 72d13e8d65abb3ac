use chrono::{DateTime, Duration, Utc};

use crate::constants::MIN_REPEAT_INTERVAL_MS;

/// Work the application knows how to run later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Expire overdue invites
    Sweep,
    /// Let the named buddy answer their invite
    Respond { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled {
    handle: TaskHandle,
    due: DateTime<Utc>,
    every: Option<Duration>,
    task: Task,
}

/// Virtual-time task queue. Nothing runs by itself: the owner asks for due
/// tasks with [`Scheduler::take_due`] and executes them.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, now: DateTime<Utc>, delay: Duration, task: Task) -> TaskHandle {
        self.insert(now + delay, None, task)
    }

    /// Periods shorter than [`MIN_REPEAT_INTERVAL_MS`] are raised to it.
    pub fn schedule_repeating(&mut self, now: DateTime<Utc>, every: Duration, task: Task) -> TaskHandle {
        let min = Duration::milliseconds(MIN_REPEAT_INTERVAL_MS);
        let every = if every < min {
            tracing::warn!("Repeat interval {}ms too short, using {}ms", every.num_milliseconds(), MIN_REPEAT_INTERVAL_MS);
            min
        } else {
            every
        };
        self.insert(now + every, Some(every), task)
    }

    /// Returns false when the handle already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() < before
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Removes and returns every task due at `now`, earliest first.
    ///
    /// Repeating tasks are re-armed from their previous due time and fire at
    /// most once per call even if several periods elapsed.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<(TaskHandle, Task)> {
        let mut due: Vec<(DateTime<Utc>, TaskHandle, Task)> = Vec::new();

        self.entries.retain_mut(|entry| {
            if entry.due > now {
                return true;
            }
            due.push((entry.due, entry.handle, entry.task.clone()));
            match entry.every {
                Some(every) => {
                    while entry.due <= now {
                        entry.due += every;
                    }
                    true
                }
                None => false,
            }
        });

        due.sort_by_key(|(at, handle, _)| (*at, *handle));
        due.into_iter().map(|(_, handle, task)| (handle, task)).collect()
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.due).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, due: DateTime<Utc>, every: Option<Duration>, task: Task) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.entries.push(Scheduled {
            handle,
            due,
            every,
            task,
        });
        handle
    }
}
