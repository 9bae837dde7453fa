use crate::models::{HubClient, Identifiable};
use crate::repository::{HubClientRepository, ListOptions};

use super::error::ApiResult;

/// Hub client use cases; storage errors leave here as [`super::ApiError`]
#[derive(Clone)]
pub struct HubClientService {
    repo: HubClientRepository,
}

impl HubClientService {
    pub fn new(repo: HubClientRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, options: &ListOptions) -> ApiResult<Vec<HubClient>> {
        Ok(self.repo.list(options).await?)
    }

    pub async fn paginate(
        &self,
        options: &ListOptions,
        page: u64,
        page_size: u64,
    ) -> ApiResult<(Vec<HubClient>, u64)> {
        Ok(self.repo.paginate(options, page, page_size).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<HubClient> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn create(&self, client: &HubClient) -> ApiResult<HubClient> {
        let created = self.repo.create(client).await?;
        tracing::info!(id = created.id(), external_id = created.external_id, "hub client created");
        Ok(created)
    }

    pub async fn update(&self, client: &HubClient) -> ApiResult<HubClient> {
        let updated = self.repo.update(client).await?;
        tracing::info!(id = updated.id(), "hub client updated");
        Ok(updated)
    }

    pub async fn soft_delete(&self, client: &HubClient) -> ApiResult<HubClient> {
        let deleted = self.repo.soft_delete(client).await?;
        tracing::info!(id = deleted.id(), "hub client soft-deleted");
        Ok(deleted)
    }

    /// Physically remove a hub client
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(id, "hub client deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::repository::memory::MemoryRepository;
    use crate::services::ApiErrorKind;

    fn service() -> HubClientService {
        HubClientService::new(HubClientRepository::new(Arc::new(MemoryRepository::new())))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service.create(&HubClient::new("Acme", 42)).await.unwrap();

        let fetched = service.get_by_id(created.id()).await.unwrap();
        assert_eq!(fetched.name, "Acme");
        assert_eq!(fetched.external_id, 42);
        assert!(fetched.base.active);
        assert!(!fetched.base.is_deleted);
    }

    #[tokio::test]
    async fn test_duplicate_external_id_is_conflict() {
        let service = service();
        service.create(&HubClient::new("Acme", 42)).await.unwrap();

        let err = service.create(&HubClient::new("Other", 42)).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Conflict);
        assert_eq!(err.message, "A record with this value already exists");
    }

    #[tokio::test]
    async fn test_missing_client_is_not_found() {
        let service = service();
        let err = service.get_by_id(99).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);

        let err = service.delete(99).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_client() {
        let service = service();
        let created = service.create(&HubClient::new("Acme", 42)).await.unwrap();

        let deleted = service.soft_delete(&created).await.unwrap();
        assert!(deleted.base.is_deleted);
        assert!(deleted.base.deleted_at.is_some());

        let err = service.get_by_id(created.id()).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_bad_request() {
        let service = service();
        let options = ListOptions {
            sort_field: "colour".to_string(),
            ..ListOptions::default()
        };
        let err = service.list(&options).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
    }
}
