#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use condo_db::migration_runner::run_migrations_for_testing;
use condo_db::{ConnectOpts, Db, DbError, connect_db};
use condo_resources_sdk::{
    NewIncident, NewPayment, NewReservation, NewResource, Resource, ResourceKind, Unit,
};
use condo_security::{AccessScope, Role, SecurityContext};
use parking_lot::Mutex;
use sea_orm_migration::MigratorTrait;
use time::macros::date;
use time::{Duration as TimeDuration, OffsetDateTime};
use tokio::sync::{Barrier, Notify};
use uuid::Uuid;

use crate::config::CondoResourcesConfig;
use crate::domain::events::ResourceEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::registry::SchemaRegistry;
use crate::domain::repo::{ResourceRepository, StatusUpdate, UnitDirectory};
use crate::domain::service::ResourceController;
use crate::infra::storage::InMemoryStore;

#[must_use]
pub fn ctx_admin() -> SecurityContext {
    SecurityContext::principal(Uuid::new_v4(), Role::Admin)
}

#[must_use]
pub fn ctx_as(subject: Uuid, role: Role) -> SecurityContext {
    SecurityContext::principal(subject, role)
}

/// Captures published events for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ResourceEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<ResourceEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher<ResourceEvent> for RecordingPublisher {
    fn publish(&self, event: &ResourceEvent) {
        self.events.lock().push(event.clone());
    }
}

pub struct Harness<R: ResourceRepository> {
    pub store: Arc<InMemoryStore>,
    pub repo: Arc<R>,
    pub events: Arc<RecordingPublisher>,
    pub controller: ResourceController<R>,
}

pub fn controller_over<R: ResourceRepository>(
    repo: Arc<R>,
    units: Arc<InMemoryStore>,
    config: &CondoResourcesConfig,
) -> (Arc<RecordingPublisher>, ResourceController<R>) {
    let events = Arc::new(RecordingPublisher::default());
    let controller = ResourceController::new(
        repo,
        units,
        Arc::new(SchemaRegistry::default()),
        events.clone(),
        config,
    );
    (events, controller)
}

/// Controller over a fresh in-memory store.
pub fn memory_harness() -> Harness<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    let (events, controller) =
        controller_over(Arc::clone(&store), Arc::clone(&store), &CondoResourcesConfig::default());
    Harness {
        repo: Arc::clone(&store),
        store,
        events,
        controller,
    }
}

/// Controller over a [`GatedStore`] wrapping a fresh in-memory store.
pub fn gated_harness(config: &CondoResourcesConfig) -> Harness<GatedStore> {
    let store = Arc::new(InMemoryStore::new());
    let repo = Arc::new(GatedStore::new(Arc::clone(&store)));
    let (events, controller) = controller_over(Arc::clone(&repo), Arc::clone(&store), config);
    Harness {
        store,
        repo,
        events,
        controller,
    }
}

pub async fn seed_unit(units: &dyn UnitDirectory, resident: Option<Uuid>) -> Unit {
    let unit = Unit {
        id: Uuid::new_v4(),
        name: format!("Unit {}", &Uuid::new_v4().simple().to_string()[..4]),
        resident_id: resident,
        monthly_fee_cents: 25_000,
    };
    units.put_unit(&unit).await.unwrap();
    unit
}

#[must_use]
pub fn new_payment(unit_id: Uuid) -> NewResource {
    NewResource::Payment(NewPayment {
        unit_id,
        amount_cents: 10_000,
        due_date: date!(2025 - 06 - 30),
        receipt_url: None,
    })
}

#[must_use]
pub fn new_reservation() -> NewResource {
    let start = OffsetDateTime::now_utc() + TimeDuration::days(2);
    NewResource::Reservation(NewReservation {
        area_id: Uuid::new_v4(),
        start_time: start,
        end_time: start + TimeDuration::hours(3),
        notes: Some("Cumpleaños".to_owned()),
    })
}

#[must_use]
pub fn new_incident(unit_id: Option<Uuid>) -> NewResource {
    NewResource::Incident(NewIncident {
        unit_id,
        title: "Fuga en el baño".to_owned(),
        description: "Gotea desde el techo".to_owned(),
        image_url: None,
    })
}

/// Pauses a store call until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Repository wrapper that lets tests force interleavings and failures.
pub struct GatedStore {
    inner: Arc<InMemoryStore>,
    list_gates: Mutex<VecDeque<Arc<Gate>>>,
    update_gates: Mutex<VecDeque<Arc<Gate>>>,
    get_barrier: Mutex<Option<Arc<Barrier>>>,
    failing_lists: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl GatedStore {
    pub fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            list_gates: Mutex::default(),
            update_gates: Mutex::default(),
            get_barrier: Mutex::default(),
            failing_lists: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }

    /// The next `list` call waits on the returned gate.
    pub fn gate_next_list(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.list_gates.lock().push_back(Arc::clone(&gate));
        gate
    }

    /// The next `update_status` call waits on the returned gate.
    pub fn gate_next_update(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.update_gates.lock().push_back(Arc::clone(&gate));
        gate
    }

    /// Every `get` waits on `barrier` after reading.
    pub fn sync_gets(&self, barrier: Arc<Barrier>) {
        *self.get_barrier.lock() = Some(barrier);
    }

    /// The next `n` list calls fail with a timeout.
    pub fn fail_next_lists(&self, n: usize) {
        self.failing_lists.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceRepository for GatedStore {
    async fn list(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
    ) -> Result<Vec<Resource>, DbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failing_lists
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(DbError::Timeout(Duration::from_millis(1)));
        }
        let gate = self.list_gates.lock().pop_front();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.inner.list(kind, scope).await
    }

    async fn get(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<Resource>, DbError> {
        let found = self.inner.get(kind, scope, id).await?;
        let barrier = self.get_barrier.lock().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        Ok(found)
    }

    async fn insert(&self, resource: &Resource) -> Result<(), DbError> {
        self.inner.insert(resource).await
    }

    async fn update_status(
        &self,
        scope: &AccessScope,
        update: &StatusUpdate,
    ) -> Result<bool, DbError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.update_gates.lock().pop_front();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.inner.update_status(scope, update).await
    }
}

/// In-memory `SQLite` with the module's migrations applied.
pub async fn inmem_db() -> Db {
    let opts = ConnectOpts {
        max_conns: Some(1),
        min_conns: Some(1),
        ..Default::default()
    };
    let db = connect_db("sqlite::memory:", opts)
        .await
        .expect("Failed to connect to in-memory database");

    run_migrations_for_testing(
        &db,
        crate::infra::storage::migrations::Migrator::migrations(),
    )
    .await
    .expect("Failed to run migrations");

    db
}
