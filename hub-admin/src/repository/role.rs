use std::sync::Arc;

use super::query::{ListOptions, Pagination};
use super::traits::{RepositoryResult, SoftDeleteRepository};
use crate::models::Role;

/// Role data access: generic CRUD plus search over `name` OR `slug`
#[derive(Clone)]
pub struct RoleRepository {
    base: Arc<dyn SoftDeleteRepository<Role>>,
}

impl RoleRepository {
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "slug"];

    pub fn new(base: Arc<dyn SoftDeleteRepository<Role>>) -> Self {
        Self { base }
    }

    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Role> {
        self.base.get_by_id(id).await
    }

    pub async fn create(&self, role: &Role) -> RepositoryResult<Role> {
        self.base.create(role).await
    }

    pub async fn update(&self, role: &Role) -> RepositoryResult<Role> {
        self.base.update(role).await
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.base.delete(id).await
    }

    pub async fn soft_delete(&self, role: &Role) -> RepositoryResult<Role> {
        self.base.soft_delete(role).await
    }

    pub async fn list(&self, options: &ListOptions) -> RepositoryResult<Vec<Role>> {
        let filter = options.filter(Self::SEARCH_COLUMNS);
        let order = options.order::<Role>()?;
        self.base.find_all(&filter, Some(order), None).await
    }

    pub async fn paginate(
        &self,
        options: &ListOptions,
        page: u64,
        page_size: u64,
    ) -> RepositoryResult<(Vec<Role>, u64)> {
        let filter = options.filter(Self::SEARCH_COLUMNS);
        let order = options.order::<Role>()?;

        let total = self.base.count(&filter).await?;
        let roles = self
            .base
            .find_all(&filter, Some(order), Some(Pagination::page(page, page_size)))
            .await?;

        Ok((roles, total))
    }
}
