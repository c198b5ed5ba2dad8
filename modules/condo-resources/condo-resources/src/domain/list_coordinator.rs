//! Last-request-wins bookkeeping for `list` calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use condo_resources_sdk::ResourceKind;
use dashmap::DashMap;
use uuid::Uuid;

type Key = (Uuid, ResourceKind);

/// Hands out a generation number per (principal, kind). A ticket is current
/// only while no newer ticket for the same key has been issued.
///
/// The entry for a key is dropped together with its current ticket, so idle
/// principals leave nothing behind.
#[derive(Default)]
pub struct ListCoordinator {
    generations: Arc<DashMap<Key, Arc<AtomicU64>>>,
}

impl ListCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn begin(&self, subject: Uuid, kind: ResourceKind) -> ListTicket {
        let key = (subject, kind);
        // Bumped under the shard lock so it cannot race with eviction.
        let entry = self
            .generations
            .entry(key)
            .or_insert_with(|| Arc::new(AtomicU64::new(0)));
        let generation = entry.value().fetch_add(1, Ordering::AcqRel) + 1;
        let counter = Arc::clone(entry.value());
        drop(entry);

        ListTicket {
            generations: Arc::clone(&self.generations),
            key,
            counter,
            generation,
        }
    }

    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.generations.len()
    }
}

pub struct ListTicket {
    generations: Arc<DashMap<Key, Arc<AtomicU64>>>,
    key: Key,
    counter: Arc<AtomicU64>,
    generation: u64,
}

impl ListTicket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.generation
    }
}

impl Drop for ListTicket {
    fn drop(&mut self) {
        self.generations.remove_if(&self.key, |_, counter| {
            Arc::ptr_eq(counter, &self.counter)
                && counter.load(Ordering::Acquire) == self.generation
        });
    }
}
