use parking_lot::{Condvar, Mutex};

/// Reusable rendezvous point for a fixed number of threads.
///
/// Each round blocks callers until `threshold` of them have arrived, then
/// releases all of them at once. A round has two phases: arrivals are counted
/// until the threshold is met, then the round drains as waiters leave. A thread
/// that comes back for the next round while the previous one is still draining
/// blocks until the drain completes, so consecutive rounds never merge.
///
/// There is no timeout or cancellation: a barrier with fewer than `threshold`
/// live participants blocks forever.
#[derive(Debug)]
pub struct Barrier {
    threshold: usize,
    state: Mutex<BarrierState>,
    condvar: Condvar,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    waiting: usize,
    releasing: bool,
}

impl Barrier {
    /// A threshold of zero behaves like one.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            state: Mutex::new(BarrierState::default()),
            condvar: Condvar::new(),
        }
    }

    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn wait(&self) {
        let mut state = self.state.lock();
        while state.releasing {
            self.condvar.wait(&mut state);
        }

        state.arrived += 1;
        if state.arrived == self.threshold {
            state.waiting = self.threshold - 1;
            if state.waiting == 0 {
                state.arrived = 0;
            } else {
                state.releasing = true;
                self.condvar.notify_all();
            }
            return;
        }

        while !state.releasing {
            self.condvar.wait(&mut state);
        }

        state.waiting -= 1;
        if state.waiting == 0 {
            state.arrived = 0;
            state.releasing = false;
            self.condvar.notify_all();
        }
    }
}
