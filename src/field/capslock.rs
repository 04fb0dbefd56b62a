//! Caps Lock detection via periodic sampling.
//!
//! Terminals have no push notification for lock-key state, so each shown
//! field samples a [`CapsLockProbe`] on a fixed interval and reports only
//! transitions.
//!
//! # Dependency Injection
//!
//! - [`TerminalLockState`] in production, fed from key events that carry
//!   lock state (Kitty keyboard protocol)
//! - [`MockCapsLock`] in tests, flipped by hand
//! - [`UnsupportedProbe`] where no source exists; the sampler stays silent

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::event::KeyEventState;

/// Default sampling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300;

/// Source of the current Caps Lock state.
///
/// Implementations must be thread-safe (Send + Sync) so one probe can be
/// shared by every field of a form.
pub trait CapsLockProbe: Send + Sync {
    /// Current Caps Lock state, or None if it can not be determined.
    fn caps_lock_on(&self) -> Option<bool>;
}

/// Probe for platforms with no way to read lock state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

impl CapsLockProbe for UnsupportedProbe {
    fn caps_lock_on(&self) -> Option<bool> {
        None
    }
}

const LOCK_UNKNOWN: u8 = 0;
const LOCK_OFF: u8 = 1;
const LOCK_ON: u8 = 2;

/// Lock state as last reported by the terminal.
///
/// The event loop records the `state` of every key event. With the Kitty
/// "report all keys as escape codes" flag the terminal includes
/// `KeyEventState::CAPS_LOCK` whenever Caps Lock is active. Terminals without
/// that protocol never report lock state, so recording is only enabled when
/// keyboard enhancement is supported; otherwise the probe answers None.
#[derive(Debug)]
pub struct TerminalLockState {
    reporting: bool,
    state: AtomicU8,
}

impl TerminalLockState {
    pub fn new(reporting: bool) -> Self {
        Self {
            reporting,
            state: AtomicU8::new(LOCK_UNKNOWN),
        }
    }

    /// Record the lock state carried by a key event.
    pub fn record(&self, state: KeyEventState) {
        if !self.reporting {
            return;
        }
        let value = if state.contains(KeyEventState::CAPS_LOCK) {
            LOCK_ON
        } else {
            LOCK_OFF
        };
        self.state.store(value, Ordering::Relaxed);
    }
}

impl CapsLockProbe for TerminalLockState {
    fn caps_lock_on(&self) -> Option<bool> {
        match self.state.load(Ordering::Relaxed) {
            LOCK_ON => Some(true),
            LOCK_OFF => Some(false),
            _ => None,
        }
    }
}

/// Mock probe for testing.
///
/// Starts with Caps Lock off; flip it with [`MockCapsLock::set`].
#[derive(Debug)]
pub struct MockCapsLock {
    state: Mutex<Option<bool>>,
}

impl MockCapsLock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Some(false)),
        }
    }

    /// A probe that can never answer.
    pub fn unsupported() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    pub fn set(&self, on: bool) {
        if let Ok(mut state) = self.state.lock() {
            *state = Some(on);
        }
    }
}

impl Default for MockCapsLock {
    fn default() -> Self {
        Self::new()
    }
}

impl CapsLockProbe for MockCapsLock {
    fn caps_lock_on(&self) -> Option<bool> {
        self.state.lock().ok().and_then(|state| *state)
    }
}

/// Periodic Caps Lock sampler owned by one field.
///
/// The sampler is a deadline, not a thread: the owner calls
/// [`CapsLockSampler::poll`] from its event loop and the sampler decides
/// whether a sample is due. Stopping it is synchronous, so no transition can
/// be reported after [`CapsLockSampler::stop`] returns.
#[derive(Debug, Clone)]
pub struct CapsLockSampler {
    interval: Duration,
    /// Last observed state; transitions are measured against it
    last_state: bool,
    /// Next sample deadline; None while stopped
    next_sample: Option<Instant>,
}

impl CapsLockSampler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_state: false,
            next_sample: None,
        }
    }

    /// Start sampling. The first sample is due immediately.
    ///
    /// Starting a running sampler keeps its current schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_sample.is_none() {
            self.next_sample = Some(now);
        }
    }

    /// Stop sampling and forget the last observed state.
    pub fn stop(&mut self) {
        self.next_sample = None;
        self.last_state = false;
    }

    pub fn is_running(&self) -> bool {
        self.next_sample.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take a sample if one is due.
    ///
    /// Returns `Some(on)` only when the probe reports a state different from
    /// the last observed one. An unanswerable probe never produces a
    /// transition.
    pub fn poll(&mut self, now: Instant, probe: &dyn CapsLockProbe) -> Option<bool> {
        let due = self.next_sample?;
        if now < due {
            return None;
        }
        // Schedule from `now` so a stalled loop does not replay missed samples
        self.next_sample = Some(now + self.interval);

        let on = probe.caps_lock_on()?;
        if on == self.last_state {
            return None;
        }
        self.last_state = on;
        Some(on)
    }
}

impl Default for CapsLockSampler {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }
}
