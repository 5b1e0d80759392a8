use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::foundation::core::Millis;

/// Identifier of one interval timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub(crate) u64);

#[derive(Clone, Copy, Debug)]
struct IntervalEntry {
    period: Millis,
    next_due: Millis,
}

#[derive(Debug, Default)]
struct SchedulerState {
    now: Millis,
    next_id: u64,
    timers: BTreeMap<TimerId, IntervalEntry>,
}

/// Virtual clock with periodic timers for one page.
///
/// Clones share state. Timers are owned through [`IntervalHandle`]s and disappear when the handle
/// is cancelled or dropped.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.state.borrow().now
    }

    /// Register a periodic timer first due one `period` from now. Zero periods are clamped to 1 ms.
    pub fn set_interval(&self, period: Millis) -> IntervalHandle {
        let period = Millis(period.0.max(1));
        let mut st = self.state.borrow_mut();
        let id = TimerId(st.next_id);
        st.next_id += 1;
        let next_due = st.now.saturating_add(period);
        st.timers.insert(id, IntervalEntry { period, next_due });
        tracing::trace!(timer = id.0, %period, "interval set");
        IntervalHandle {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.state.borrow().timers.contains_key(&id)
    }

    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Earliest pending firing, if any timer is active.
    pub fn next_due(&self) -> Option<Millis> {
        self.state.borrow().timers.values().map(|t| t.next_due).min()
    }

    /// Fire the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the firing time and the timer is rescheduled one period later. Ties
    /// fire in registration order. A timer whose next firing would overflow the clock is removed
    /// after this firing, so every timer fires at most once per due time.
    pub(crate) fn pop_due(&self, deadline: Millis) -> Option<TimerId> {
        let mut st = self.state.borrow_mut();
        let (id, due) = st
            .timers
            .iter()
            .filter(|(_, t)| t.next_due <= deadline)
            .min_by_key(|(id, t)| (t.next_due, **id))
            .map(|(id, t)| (*id, t.next_due))?;
        st.now = st.now.max(due);
        let next = st
            .timers
            .get(&id)
            .and_then(|t| due.0.checked_add(t.period.0));
        match next {
            Some(next) => {
                if let Some(t) = st.timers.get_mut(&id) {
                    t.next_due = Millis(next);
                }
            }
            None => {
                st.timers.remove(&id);
                tracing::debug!(timer = id.0, "interval retired at the end of the clock");
            }
        }
        Some(id)
    }

    /// Move the clock forward to `to` without firing anything. Never moves backwards.
    pub(crate) fn settle(&self, to: Millis) {
        let mut st = self.state.borrow_mut();
        st.now = st.now.max(to);
    }
}

/// Owned periodic timer. Cancels itself on drop.
#[derive(Debug)]
pub struct IntervalHandle {
    id: TimerId,
    state: Weak<RefCell<SchedulerState>>,
}

impl IntervalHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().timers.remove(&self.id);
            tracing::trace!(timer = self.id.0, "interval cleared");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scheduler.rs"]
mod tests;
