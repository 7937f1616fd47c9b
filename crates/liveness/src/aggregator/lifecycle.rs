//! Two-state monitoring lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Whether a pass is currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Idle,
    Checking,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Idle => write!(f, "idle"),
            LifecycleState::Checking => write!(f, "checking"),
        }
    }
}

/// `idle -> checking` through [`Lifecycle::start`], back through
/// [`PassGuard::finish`] or by dropping the guard.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    checking: Arc<AtomicBool>,
}

impl Lifecycle {
    pub(crate) fn state(&self) -> LifecycleState {
        if self.checking.load(Ordering::Acquire) {
            LifecycleState::Checking
        } else {
            LifecycleState::Idle
        }
    }

    /// Returns `None` when a pass is already checking
    pub(crate) fn start(&self) -> Option<PassGuard> {
        self.checking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PassGuard { checking: Arc::clone(&self.checking) })
    }
}

/// Proof that the holder owns the single in-flight pass
#[derive(Debug)]
pub(crate) struct PassGuard {
    checking: Arc<AtomicBool>,
}

impl PassGuard {
    pub(crate) fn finish(self) {
        drop(self);
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.checking.store(false, Ordering::Release);
    }
}
