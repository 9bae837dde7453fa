//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    models::{HubClient, Role},
    repository::{HubClientRepository, PgRepository, RoleRepository},
    services::{HubClientService, RoleService},
};

/// Services and resources reachable from every handler
///
/// Built once at startup; cloning is cheap since every field is reference
/// counted.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    db_pool: Option<PgPool>,
    hub_clients: HubClientService,
    roles: RoleService,
}

impl AppState {
    /// Wire Postgres-backed repositories and services over `pool`
    pub fn new(config: Config, pool: PgPool) -> Self {
        let hub_clients = HubClientRepository::new(Arc::new(PgRepository::<HubClient>::new(
            pool.clone(),
        )));
        let roles = RoleRepository::new(Arc::new(PgRepository::<Role>::new(pool.clone())));

        Self {
            config: Arc::new(config),
            db_pool: Some(pool),
            hub_clients: HubClientService::new(hub_clients),
            roles: RoleService::new(roles),
        }
    }

    /// Assemble state from already-built services
    ///
    /// Without a pool, readiness reports no database dependency.
    pub fn from_services(
        config: Config,
        db_pool: Option<PgPool>,
        hub_clients: HubClientService,
        roles: RoleService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            db_pool,
            hub_clients,
            roles,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }

    pub fn hub_clients(&self) -> &HubClientService {
        &self.hub_clients
    }

    pub fn roles(&self) -> &RoleService {
        &self.roles
    }

    /// State over empty in-memory repositories
    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        use crate::repository::memory::MemoryRepository;

        Self::from_services(
            Config::default(),
            None,
            HubClientService::new(HubClientRepository::new(Arc::new(MemoryRepository::new()))),
            RoleService::new(RoleRepository::new(Arc::new(MemoryRepository::new()))),
        )
    }
}
