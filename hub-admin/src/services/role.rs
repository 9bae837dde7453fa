use crate::models::{Identifiable, Role};
use crate::repository::{ListOptions, RoleRepository};

use super::error::ApiResult;

#[derive(Clone)]
pub struct RoleService {
    repo: RoleRepository,
}

impl RoleService {
    pub fn new(repo: RoleRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, options: &ListOptions) -> ApiResult<Vec<Role>> {
        Ok(self.repo.list(options).await?)
    }

    pub async fn paginate(
        &self,
        options: &ListOptions,
        page: u64,
        page_size: u64,
    ) -> ApiResult<(Vec<Role>, u64)> {
        Ok(self.repo.paginate(options, page, page_size).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Role> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn create(&self, role: &Role) -> ApiResult<Role> {
        let created = self.repo.create(role).await?;
        tracing::info!(id = created.id(), slug = %created.slug, "role created");
        Ok(created)
    }

    pub async fn update(&self, role: &Role) -> ApiResult<Role> {
        let updated = self.repo.update(role).await?;
        tracing::info!(id = updated.id(), "role updated");
        Ok(updated)
    }

    pub async fn soft_delete(&self, role: &Role) -> ApiResult<Role> {
        let deleted = self.repo.soft_delete(role).await?;
        tracing::info!(id = deleted.id(), "role soft-deleted");
        Ok(deleted)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(id, "role deleted");
        Ok(())
    }
}
