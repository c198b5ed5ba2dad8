//! Fan-out of mutation events to views that need to re-run `list`.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use super::events::ResourceEvent;
use super::ports::EventPublisher;

/// What a subscriber should refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResyncSignal {
    /// A single resource changed.
    Resource(ResourceEvent),
    /// Events were missed; re-fetch everything.
    Full,
}

/// Broadcast hub. Sending never blocks; slow subscribers are told to fully
/// re-sync instead of replaying what they missed.
#[derive(Clone)]
pub struct ResyncHub {
    tx: broadcast::Sender<ResourceEvent>,
}

impl ResyncHub {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> ResyncSubscription {
        ResyncSubscription {
            rx: self.tx.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventPublisher<ResourceEvent> for ResyncHub {
    fn publish(&self, event: &ResourceEvent) {
        // No subscribers is not an error.
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!(kind = %event.kind(), id = %event.id(), "no resync subscribers");
        }
    }
}

pub struct ResyncSubscription {
    rx: broadcast::Receiver<ResourceEvent>,
}

impl ResyncSubscription {
    /// Wait for the next signal. `None` once the hub is dropped.
    pub async fn next(&mut self) -> Option<ResyncSignal> {
        match self.rx.recv().await {
            Ok(event) => Some(ResyncSignal::Resource(event)),
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "resync subscriber lagged; requesting full re-sync");
                self.drain();
                Some(ResyncSignal::Full)
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// Discard whatever is still buffered; a full re-sync covers it.
    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}
