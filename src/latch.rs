//! One-shot edge latches for the guest buttons.
//!
//! A latch is set from whatever context observes the rising edge (a GPIO
//! interrupt, a watcher thread, a simulator UI) and read once by the control
//! loop. State lives behind `critical-section`, so latches can sit in a
//! `static` and be shared with interrupt handlers.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

use crate::hardware::Input;

#[derive(Debug, Clone, Copy)]
struct LatchState {
    armed: bool,
    pending: bool,
    last_edge: Option<Instant>,
}

impl LatchState {
    const IDLE: Self = Self {
        armed: false,
        pending: false,
        last_edge: None,
    };
}

/// Edge detector with arming and bounce suppression
pub struct EdgeLatch {
    state: Mutex<Cell<LatchState>>,
    bounce: Duration,
}

impl EdgeLatch {
    /// Create a disarmed latch
    ///
    /// Edges arriving less than `bounce` after the last accepted edge are
    /// ignored.
    pub const fn new(bounce: Duration) -> Self {
        Self {
            state: Mutex::new(Cell::new(LatchState::IDLE)),
            bounce,
        }
    }

    /// Start detecting edges, dropping anything seen before
    pub fn arm(&self) {
        self.update(|state| {
            *state = LatchState {
                armed: true,
                ..LatchState::IDLE
            };
        });
    }

    /// Stop detecting edges and drop a pending one
    ///
    /// Disarming a disarmed latch does nothing.
    pub fn disarm(&self) {
        self.update(|state| *state = LatchState::IDLE);
    }

    pub fn is_armed(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).get().armed)
    }

    /// Record a rising edge observed at `now`
    ///
    /// Returns `true` if the edge was latched.
    pub fn record_edge(&self, now: Instant) -> bool {
        let bounce = self.bounce;
        self.update(|state| {
            if !state.armed {
                return false;
            }
            if let Some(last) = state.last_edge {
                if now.saturating_duration_since(last) < bounce {
                    return false;
                }
            }
            state.pending = true;
            state.last_edge = Some(now);
            true
        })
    }

    /// Read and clear the pending edge
    pub fn take(&self) -> bool {
        self.update(|state| core::mem::replace(&mut state.pending, false))
    }

    fn update<R>(&self, f: impl FnOnce(&mut LatchState) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }
}

/// One latch per guest button
pub struct InputLatches {
    latches: [EdgeLatch; 3],
}

impl InputLatches {
    pub const fn new(bounce: Duration) -> Self {
        Self {
            latches: [
                EdgeLatch::new(bounce),
                EdgeLatch::new(bounce),
                EdgeLatch::new(bounce),
            ],
        }
    }

    pub const fn latch(&self, input: Input) -> &EdgeLatch {
        &self.latches[input.index()]
    }

    pub fn arm(&self, input: Input) {
        self.latch(input).arm();
    }

    pub fn disarm(&self, input: Input) {
        self.latch(input).disarm();
    }

    pub fn record_edge(&self, input: Input, now: Instant) -> bool {
        self.latch(input).record_edge(now)
    }

    pub fn take(&self, input: Input) -> bool {
        self.latch(input).take()
    }
}
