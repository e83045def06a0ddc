//! On/off output devices driven by the detector: a buzzer and four lights.
//!
//! Devices take `&self` so a single device can be shared between the
//! controlling thread and the background render loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait Switch: Send + Sync {
    fn on(&self);
    fn off(&self);

    fn set(&self, on: bool) {
        if on {
            self.on();
        } else {
            self.off();
        }
    }
}

impl<S: Switch + ?Sized> Switch for Arc<S> {
    fn on(&self) {
        (**self).on();
    }
    fn off(&self) {
        (**self).off();
    }
}

/// Simulated device that only logs its transitions.
#[derive(Debug)]
pub struct LogSwitch {
    name: String,
    lit: AtomicBool,
}

impl LogSwitch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lit: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_on(&self) -> bool {
        self.lit.load(Ordering::Relaxed)
    }
}

impl Switch for LogSwitch {
    fn on(&self) {
        if !self.lit.swap(true, Ordering::Relaxed) {
            log::debug!("{} on", self.name);
        }
    }

    fn off(&self) {
        if self.lit.swap(false, Ordering::Relaxed) {
            log::debug!("{} off", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_switch_tracks_state() {
        let s = LogSwitch::new("red");
        assert_eq!(s.name(), "red");
        assert!(!s.is_on());
        s.on();
        assert!(s.is_on());
        s.set(false);
        assert!(!s.is_on());
    }

    #[test]
    fn arc_forwards_to_inner_device() {
        let inner = Arc::new(LogSwitch::new("buzzer"));
        let shared: Arc<dyn Switch> = inner.clone();
        shared.on();
        assert!(inner.is_on());
        shared.off();
        assert!(!inner.is_on());
    }
}
