//! In-flight tracking for state-changing operations.
//!
//! A second state-changing operation is rejected rather than queued, so a
//! double-clicked deploy never creates two contracts.

use std::sync::Mutex;

use crate::session::error::{Operation, SessionError, SessionResult};

/// Marker for the one state-changing operation currently running.
#[derive(Debug, Default)]
pub struct InFlight {
    current: Mutex<Option<Operation>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the marker for `op`, or report what holds it.
    pub fn begin(&self, op: Operation) -> SessionResult<InFlightGuard<'_>> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(in_flight) = *current {
            return Err(SessionError::Busy {
                requested: op,
                in_flight,
            });
        }
        *current = Some(op);
        Ok(InFlightGuard { owner: self })
    }

    /// The operation currently running, if any.
    pub fn current(&self) -> Option<Operation> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Releases the marker on drop, including when the operation's future is dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.owner.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
