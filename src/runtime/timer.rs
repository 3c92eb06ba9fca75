//! Deadline timer service.
//!
//! A single worker thread owns a deadline heap. Callbacks run on that thread
//! when their deadline passes, so they must be `Send` and should do nothing
//! heavier than mutating shared state and requesting a render. Repeating
//! behavior is built by rescheduling from inside the callback via a cloned
//! [`TimerHandle`].

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

type TimerCallback = Box<dyn FnOnce() + Send>;

struct TimerEntry {
    deadline: Instant,
    id: TimerId,
    callback: TimerCallback,
}

// BinaryHeap is a max-heap; invert the comparison so the earliest deadline
// is at the top, with the id as a deterministic tie-breaker.
impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.id == other.id
    }
}

impl Eq for TimerEntry {}

#[derive(Default)]
struct TimerState {
    queue: BinaryHeap<TimerEntry>,
    cancelled: HashSet<TimerId>,
    next_id: u64,
    shutdown: bool,
}

#[derive(Default)]
struct TimerShared {
    state: Mutex<TimerState>,
    cvar: Condvar,
}

impl TimerShared {
    fn lock_state(&self) -> MutexGuard<'_, TimerState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Cloneable scheduling handle, usable from timer callbacks.
#[derive(Clone)]
pub struct TimerHandle {
    shared: Arc<TimerShared>,
}

impl TimerHandle {
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.lock_state();
        let id = TimerId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);
        state.queue.push(TimerEntry {
            deadline: Instant::now() + delay,
            id,
            callback: Box::new(callback),
        });
        self.shared.cvar.notify_one();
        id
    }

    /// Cancels a pending timer. A no-op if it already fired.
    pub fn cancel(&self, id: TimerId) {
        let mut state = self.shared.lock_state();
        if state.queue.iter().any(|entry| entry.id == id) {
            state.cancelled.insert(id);
        }
    }
}

pub struct TimerService {
    shared: Arc<TimerShared>,
    worker: Option<JoinHandle<()>>,
}

impl TimerService {
    pub fn new() -> Self {
        let shared = Arc::new(TimerShared::default());
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || run_worker(&worker_shared));
        Self {
            shared,
            worker: Some(worker),
        }
    }

    pub fn handle(&self) -> TimerHandle {
        TimerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle().schedule(delay, callback)
    }

    pub fn cancel(&self, id: TimerId) {
        self.handle().cancel(id);
    }
}

impl Default for TimerService {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock_state();
            state.shutdown = true;
            self.shared.cvar.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(shared: &TimerShared) {
    let mut state = shared.lock_state();
    loop {
        if state.shutdown {
            return;
        }

        let now = Instant::now();
        match state.queue.peek().map(|entry| entry.deadline) {
            None => {
                state = shared
                    .cvar
                    .wait(state)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
            }
            Some(deadline) if deadline > now => {
                let (guard, _timeout) = shared
                    .cvar
                    .wait_timeout(state, deadline - now)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                state = guard;
            }
            Some(_) => {
                let Some(entry) = state.queue.pop() else {
                    continue;
                };
                if state.cancelled.remove(&entry.id) {
                    continue;
                }
                // Run the callback unlocked so it can schedule or cancel.
                drop(state);
                (entry.callback)();
                state = shared.lock_state();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimerService;
    use std::sync::mpsc;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use std::time::Duration;

    #[test]
    fn timers_fire_in_deadline_order() {
        let service = TimerService::new();
        let (tx, rx) = mpsc::channel();

        let tx_late = tx.clone();
        service.schedule(Duration::from_millis(60), move || {
            let _ = tx_late.send("late");
        });
        service.schedule(Duration::from_millis(10), move || {
            let _ = tx.send("early");
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(1)), Ok("early"));
        assert_eq!(rx.recv_timeout(Duration::from_secs(1)), Ok("late"));
    }

    #[test]
    fn cancel_prevents_fire() {
        let service = TimerService::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = Arc::clone(&fired);
        let id = service.schedule(Duration::from_millis(50), move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        service.cancel(id);

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callbacks_can_reschedule_via_handle() {
        let service = TimerService::new();
        let handle = service.handle();
        let (tx, rx) = mpsc::channel();

        service.schedule(Duration::from_millis(5), move || {
            handle.schedule(Duration::from_millis(5), move || {
                let _ = tx.send(());
            });
        });

        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn drop_stops_worker_without_firing_pending_timers() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let service = TimerService::new();
            let fired_clone = Arc::clone(&fired);
            service.schedule(Duration::from_secs(5), move || {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
