//! Session view types and the single-flight guard.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ChatError;

/// Which screen the UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Identity,
    Chat,
}

/// Header line for the chat screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatMeta {
    pub email: String,
    /// Session id reported by the server; empty until the first reply.
    pub session_id: String,
}

impl fmt::Display for ChatMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email: {}", self.email)?;
        if !self.session_id.is_empty() {
            write!(f, " · Session: {}", self.session_id)?;
        }
        Ok(())
    }
}

/// Read-only view of a session's busy state, for disabling input.
#[derive(Debug, Clone)]
pub struct BusyFlag(pub(crate) Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    /// Attempt to acquire the busy lock. Returns `Err` if already busy.
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, ChatError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ChatError::busy());
        }
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
