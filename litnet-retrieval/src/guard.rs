//! Per-selection build guard.
//!
//! At most one index build may be in flight for a given selection id. A
//! concurrent second request is rejected, not queued: the caller already
//! has a build running and joining it would hand two sessions the same
//! index.

use dashmap::DashSet;

use litnet_core::errors::RetrievalError;

#[derive(Default)]
pub struct BuildGuard {
    in_flight: DashSet<String>,
}

impl BuildGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the build slot for a selection. The permit releases the slot
    /// on drop, success or failure.
    pub fn acquire(&self, selection_id: &str) -> Result<BuildPermit<'_>, RetrievalError> {
        if !self.in_flight.insert(selection_id.to_string()) {
            return Err(RetrievalError::BuildInFlight {
                selection_id: selection_id.to_string(),
            });
        }
        Ok(BuildPermit {
            guard: self,
            selection_id: selection_id.to_string(),
        })
    }
}

pub struct BuildPermit<'a> {
    guard: &'a BuildGuard,
    selection_id: String,
}

impl Drop for BuildPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.remove(&self.selection_id);
    }
}
