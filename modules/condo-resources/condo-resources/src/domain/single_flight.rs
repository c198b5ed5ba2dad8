//! At most one in-flight mutation per resource id within a process.

use std::sync::Arc;

use dashmap::DashSet;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct SingleFlight {
    in_flight: Arc<DashSet<Uuid>>,
}

impl SingleFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. Returns `None` if another mutation on `id` is running.
    #[must_use]
    pub fn try_acquire(&self, id: Uuid) -> Option<FlightGuard> {
        self.in_flight.insert(id).then(|| FlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            id,
        })
    }

    #[must_use]
    pub fn is_in_flight(&self, id: Uuid) -> bool {
        self.in_flight.contains(&id)
    }
}

/// Releases the claim on drop, including on early return or panic.
pub struct FlightGuard {
    in_flight: Arc<DashSet<Uuid>>,
    id: Uuid,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.id);
    }
}
