//! Composition root: store + principal source + config -> client.

use std::sync::Arc;

use condo_db::migration_runner::run_migrations;
use condo_db::{ConnectOpts, DbError, connect_db};
use condo_resources_sdk::CondoResourcesClientV1;
use condo_security::PrincipalSource;
use tracing::info;

use crate::config::CondoResourcesConfig;
use crate::domain::events::ResourceEvent;
use crate::domain::local_client::CondoResourcesLocalClient;
use crate::domain::ports::EventPublisher;
use crate::domain::registry::SchemaRegistry;
use crate::domain::repo::{ResourceRepository, UnitDirectory};
use crate::domain::resync::{ResyncHub, ResyncSubscription};
use crate::domain::service::ResourceController;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{InMemoryStore, SeaOrmStore};

/// A wired condo resources module over store `R`.
pub struct CondoResources<R: ResourceRepository + UnitDirectory + 'static> {
    store: Arc<R>,
    controller: Arc<ResourceController<R>>,
    client: Arc<dyn CondoResourcesClientV1>,
    hub: ResyncHub,
    config: CondoResourcesConfig,
}

impl<R: ResourceRepository + UnitDirectory + 'static> CondoResources<R> {
    #[must_use]
    pub fn new(
        store: Arc<R>,
        principal: Arc<dyn PrincipalSource>,
        config: CondoResourcesConfig,
    ) -> Self {
        let hub = ResyncHub::new(config.resync_capacity);
        let units: Arc<dyn UnitDirectory> = store.clone();
        let events: Arc<dyn EventPublisher<ResourceEvent>> = Arc::new(hub.clone());

        let controller = Arc::new(ResourceController::new(
            Arc::clone(&store),
            units,
            Arc::new(SchemaRegistry::default()),
            events,
            &config,
        ));
        let client: Arc<dyn CondoResourcesClientV1> = Arc::new(CondoResourcesLocalClient::new(
            Arc::clone(&controller),
            principal,
            config.list_retry.clone(),
        ));

        info!(
            store_timeout_ms = config.store_timeout_ms,
            resync_capacity = config.resync_capacity,
            "condo resources module initialized"
        );
        Self {
            store,
            controller,
            client,
            hub,
            config,
        }
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn CondoResourcesClientV1> {
        Arc::clone(&self.client)
    }

    #[must_use]
    pub fn controller(&self) -> &Arc<ResourceController<R>> {
        &self.controller
    }

    #[must_use]
    pub fn store(&self) -> &Arc<R> {
        &self.store
    }

    /// Mutation signals for views that re-run `list`.
    #[must_use]
    pub fn subscribe(&self) -> ResyncSubscription {
        self.hub.subscribe()
    }

    #[must_use]
    pub fn config(&self) -> &CondoResourcesConfig {
        &self.config
    }
}

impl CondoResources<SeaOrmStore> {
    /// Connect to `url`, apply migrations and wire the module.
    ///
    /// # Errors
    /// Returns [`DbError`] if the connection or a migration fails.
    pub async fn connect(
        url: &str,
        principal: Arc<dyn PrincipalSource>,
        config: CondoResourcesConfig,
    ) -> Result<Self, DbError> {
        let opts = if url.starts_with("sqlite::memory:") {
            ConnectOpts {
                max_conns: Some(1),
                min_conns: Some(1),
                ..Default::default()
            }
        } else {
            ConnectOpts::default()
        };
        let db = connect_db(url, opts).await?;
        run_migrations::<Migrator>(&db).await?;
        Ok(Self::new(Arc::new(SeaOrmStore::new(db)), principal, config))
    }
}

impl CondoResources<InMemoryStore> {
    #[must_use]
    pub fn in_memory(principal: Arc<dyn PrincipalSource>, config: CondoResourcesConfig) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), principal, config)
    }
}
