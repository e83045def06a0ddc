// Shared test device that records every on/off call.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use minefield::Switch;

#[derive(Default)]
pub struct RecordingSwitch {
    lit: AtomicBool,
    ons: AtomicUsize,
    offs: AtomicUsize,
    threads: Mutex<HashSet<ThreadId>>,
}

impl RecordingSwitch {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn is_on(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }

    pub fn ons(&self) -> usize {
        self.ons.load(Ordering::SeqCst)
    }

    pub fn offs(&self) -> usize {
        self.offs.load(Ordering::SeqCst)
    }

    /// Distinct threads that switched this device on.
    pub fn driving_threads(&self) -> usize {
        self.threads.lock().unwrap().len()
    }
}

impl Switch for RecordingSwitch {
    fn on(&self) {
        self.lit.store(true, Ordering::SeqCst);
        self.ons.fetch_add(1, Ordering::SeqCst);
        self.threads.lock().unwrap().insert(thread::current().id());
    }

    fn off(&self) {
        self.lit.store(false, Ordering::SeqCst);
        self.offs.fetch_add(1, Ordering::SeqCst);
    }
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}
