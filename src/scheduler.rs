// SPDX-License-Identifier: MPL-2.0
//! Cooperative task scheduler with a virtual clock.
//!
//! All deferred work (ready flushes, component timers, touch activity
//! reports) is queued here and only runs when the owner calls [`Scheduler::tick`]
//! or [`Scheduler::advance`]. Nothing blocks and nothing runs on its own,
//! which keeps ordering deterministic and testable without wall-clock delays.
//!
//! Tasks due at the same instant run in the order they were scheduled.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle of a scheduled timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat { every: u64, callback: Rc<dyn Fn()> },
}

struct Entry {
    due: u64,
    seq: u64,
    task: Option<Task>,
}

#[derive(Default)]
struct Queue {
    now: u64,
    next_id: u64,
    next_seq: u64,
    entries: BTreeMap<TimerId, Entry>,
}

impl Queue {
    fn push(&mut self, delay: u64, task: Task) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let seq = self.bump_seq();
        self.entries.insert(
            id,
            Entry {
                due: self.now.saturating_add(delay),
                seq,
                task: Some(task),
            },
        );
        id
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Earliest entry due at or before `limit`, optionally only among
    /// entries scheduled before `seq_limit`.
    fn next_due(&self, limit: u64, seq_limit: Option<u64>) -> Option<(TimerId, u64)> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.due <= limit)
            .filter(|(_, entry)| seq_limit.map_or(true, |max| entry.seq < max))
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(id, entry)| (*id, entry.due))
    }
}

/// Shared handle to the task queue. Cloning shares the queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<Queue>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("Scheduler")
            .field("now_ms", &queue.now)
            .field("pending", &queue.entries.len())
            .finish()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    /// Runs `f` once, `delay` after now. A zero delay runs on the next tick.
    pub fn set_timeout(&self, f: impl FnOnce() + 'static, delay: Duration) -> TimerId {
        self.queue
            .borrow_mut()
            .push(millis(delay), Task::Once(Box::new(f)))
    }

    /// Runs `f` every `every`, first after one period. Periods shorter than
    /// one millisecond are rounded up.
    pub fn set_interval(&self, f: impl Fn() + 'static, every: Duration) -> TimerId {
        let every = millis(every).max(1);
        self.queue.borrow_mut().push(
            every,
            Task::Repeat {
                every,
                callback: Rc::new(f),
            },
        )
    }

    /// Cancels a timeout or interval. Returns whether it was still pending.
    pub fn clear(&self, id: TimerId) -> bool {
        self.queue.borrow_mut().entries.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.borrow().entries.contains_key(&id)
    }

    /// Number of scheduled timeouts and intervals.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Runs every task that is due now and was scheduled before this call.
    ///
    /// Tasks scheduled while the tick runs wait for the next tick.
    pub fn tick(&self) -> usize {
        let (now, seq_limit) = {
            let mut queue = self.queue.borrow_mut();
            let limit = queue.bump_seq();
            (queue.now, limit)
        };
        let mut ran = 0;
        loop {
            let next = self.queue.borrow().next_due(now, Some(seq_limit));
            let Some((id, _)) = next else {
                break;
            };
            self.run(id);
            ran += 1;
        }
        ran
    }

    /// Ticks until nothing is due at the current time. Intervals keep their
    /// place in the queue.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let batch = self.tick();
            if batch == 0 {
                return ran;
            }
            ran += batch;
        }
    }

    /// Moves the clock forward by `by`, running tasks as their due time is
    /// reached. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(millis(by));
        let mut ran = 0;
        loop {
            let next = self.queue.borrow().next_due(target, None);
            let Some((id, due)) = next else {
                break;
            };
            {
                let mut queue = self.queue.borrow_mut();
                queue.now = queue.now.max(due);
            }
            self.run(id);
            ran += 1;
        }
        self.queue.borrow_mut().now = target;
        ran
    }

    fn run(&self, id: TimerId) {
        let task = {
            let mut queue = self.queue.borrow_mut();
            let seq = queue.bump_seq();
            let Some(entry) = queue.entries.get_mut(&id) else {
                return;
            };
            match entry.task.take() {
                Some(Task::Once(f)) => {
                    queue.entries.remove(&id);
                    Some(Task::Once(f))
                }
                Some(Task::Repeat { every, callback }) => {
                    entry.due = entry.due.saturating_add(every);
                    entry.seq = seq;
                    entry.task = Some(Task::Repeat {
                        every,
                        callback: Rc::clone(&callback),
                    });
                    Some(Task::Repeat { every, callback })
                }
                None => None,
            }
        };

        match task {
            Some(Task::Once(f)) => f(),
            Some(Task::Repeat { callback, .. }) => callback(),
            None => {}
        }
    }
}
