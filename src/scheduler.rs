//! Tick-driven task scheduler.
//!
//! Replaces wall-clock timers: the owner advances time explicitly with
//! `tick(delta_ms)` so tests can simulate hours in microseconds.  When a
//! task comes due the scheduler calls the [`SchedulerDelegate`]; it knows
//! nothing about polling, audio or notifications.
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                    Scheduler                       │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐  │
//! │  │ poll       │   │ notify     │   │ ...        │  │
//! │  │ (one-shot, │   │ (repeating │   │            │  │
//! │  │  re-armed) │   │  1 Hz)     │   │            │  │
//! │  └─────┬──────┘   └─────┬──────┘   └─────┬──────┘  │
//! │        └────────────────┼────────────────┘         │
//! │                         ▼                          │
//! │                SchedulerDelegate                   │
//! └────────────────────────────────────────────────────┘
//! ```

use crate::app::ports::SchedulerDelegate;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Task types
// ═══════════════════════════════════════════════════════════════

/// Handle returned by [`Scheduler::add`]; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A single task entry.
#[derive(Debug, Clone)]
pub struct Task {
    /// Human-readable label (e.g., "poll").
    pub label: &'static str,
    pub kind: TaskKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Fire every `period_ms` until cancelled.
    Repeating { period_ms: u32 },
    /// Fire once after `delay_ms`, then drop out.
    OneShot { delay_ms: u32 },
}

impl Task {
    pub fn repeating(label: &'static str, period_ms: u32) -> Self {
        Self {
            label,
            kind: TaskKind::Repeating { period_ms },
        }
    }

    pub fn one_shot(label: &'static str, delay_ms: u32) -> Self {
        Self {
            label,
            kind: TaskKind::OneShot { delay_ms },
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Internal bookkeeping for a live task.
#[derive(Debug, Clone)]
struct TaskEntry {
    id: TaskId,
    task: Task,
    /// Milliseconds accumulated toward the next fire.
    elapsed_ms: u64,
}

pub struct Scheduler {
    tasks: Vec<TaskEntry>,
    next_id: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a task and return its handle.
    pub fn add(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        debug!("Scheduler: added '{}' ({:?})", task.label, task.kind);
        self.tasks.push(TaskEntry {
            id,
            task,
            elapsed_ms: 0,
        });
        id
    }

    /// Cancel a task.  Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|e| e.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!("Scheduler: cancelled {:?}", id);
        }
        removed
    }

    /// Drop every task.
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            info!("Scheduler: cancelling {} task(s)", self.tasks.len());
        }
        self.tasks.clear();
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|e| e.id == id)
    }

    /// Advance time by `delta_ms` and fire every task that came due.
    ///
    /// A task fires at most once per tick; a repeating task carries the
    /// remainder of an overshoot into its next period.
    pub fn tick(&mut self, delta_ms: u32, delegate: &mut dyn SchedulerDelegate) {
        self.tasks.retain_mut(|entry| {
            entry.elapsed_ms += u64::from(delta_ms);
            match entry.task.kind {
                TaskKind::Repeating { period_ms } => {
                    let period = u64::from(period_ms.max(1));
                    if entry.elapsed_ms >= period {
                        entry.elapsed_ms %= period;
                        delegate.on_task_fired(entry.id, entry.task.label);
                    }
                    true
                }
                TaskKind::OneShot { delay_ms } => {
                    if entry.elapsed_ms >= u64::from(delay_ms) {
                        delegate.on_task_fired(entry.id, entry.task.label);
                        false
                    } else {
                        true
                    }
                }
            }
        });
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
