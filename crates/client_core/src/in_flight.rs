//! Shared "request pending" flag.
//!
//! Forms and lists are driven through `&mut self`, so their owner cannot look
//! at them while a call is suspended. A front end keeps a clone of the
//! [`InFlight`] handle instead and reads it from its render loop to disable
//! the submit control or show a spinner.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<AtomicBool>,
}

impl InFlight {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the flag until the guard drops, including when the pending
    /// future is dropped halfway.
    pub(crate) fn start(&self) -> InFlightGuard {
        self.active.store(true, Ordering::Release);
        InFlightGuard {
            active: Arc::clone(&self.active),
        }
    }
}

pub(crate) struct InFlightGuard {
    active: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_flag_for_every_clone() {
        let flag = InFlight::default();
        let observer = flag.clone();
        assert!(!observer.is_active());

        let guard = flag.start();
        assert!(observer.is_active());
        drop(guard);
        assert!(!observer.is_active());
    }
}
