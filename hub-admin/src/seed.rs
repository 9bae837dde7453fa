//! Fake data for development databases
//!
//! ```rust,ignore
//! let report = Seeder::from_pool(pool).run(10).await?;
//! println!("{} hub clients, {} roles", report.hub_clients, report.roles);
//! ```

use std::sync::Arc;

use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Username;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::PgPool;

use crate::models::{HubClient, Role};
use crate::repository::{
    HubClientRepository, PgRepository, RepositoryErrorKind, RepositoryResult, RoleRepository,
};

const ROLE_FIELD_MAX: usize = 50;

/// A hub client with a company name and a random positive external id
pub fn fake_hub_client() -> HubClient {
    let name: String = CompanyName().fake();
    let external_id: i64 = (1..1_000_000_000_i64).fake();
    HubClient::new(name, external_id)
}

/// A role with a person's name and a username-derived slug
///
/// The slug carries a random suffix so repeated runs rarely collide.
pub fn fake_role() -> Role {
    let name: String = Name().fake();
    let username: String = Username().fake();
    let suffix: u32 = (1000..10_000_u32).fake();

    let slug = format!("{}-{}", username.to_lowercase().replace('.', "-"), suffix);
    Role::new(truncate(&name, ROLE_FIELD_MAX), truncate(&slug, ROLE_FIELD_MAX))
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Records inserted by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub hub_clients: usize,
    pub roles: usize,
    /// Records dropped because a unique value was already taken
    pub skipped: usize,
}

/// Inserts fake hub clients and roles through the repositories
pub struct Seeder {
    hub_clients: HubClientRepository,
    roles: RoleRepository,
}

impl Seeder {
    pub fn new(hub_clients: HubClientRepository, roles: RoleRepository) -> Self {
        Self { hub_clients, roles }
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            HubClientRepository::new(Arc::new(PgRepository::<HubClient>::new(pool.clone()))),
            RoleRepository::new(Arc::new(PgRepository::<Role>::new(pool))),
        )
    }

    /// Insert `count` hub clients and `count` roles
    ///
    /// Unique-value conflicts are logged and skipped; any other failure
    /// stops the run.
    pub async fn run(&self, count: usize) -> RepositoryResult<SeedReport> {
        let mut report = SeedReport::default();

        for _ in 0..count {
            match self.hub_clients.create(&fake_hub_client()).await {
                Ok(_) => report.hub_clients += 1,
                Err(e) if e.kind == RepositoryErrorKind::AlreadyExists => {
                    tracing::warn!(error = %e, "skipping duplicate hub client");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }

            match self.roles.create(&fake_role()).await {
                Ok(_) => report.roles += 1,
                Err(e) if e.kind == RepositoryErrorKind::AlreadyExists => {
                    tracing::warn!(error = %e, "skipping duplicate role");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            hub_clients = report.hub_clients,
            roles = report.roles,
            skipped = report.skipped,
            "seeding finished"
        );
        Ok(report)
    }
}
