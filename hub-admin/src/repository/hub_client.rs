use std::sync::Arc;

use super::query::{ListOptions, Pagination};
use super::traits::{RepositoryResult, SoftDeleteRepository};
use crate::models::HubClient;

/// Hub client data access: generic CRUD plus search over `name`
#[derive(Clone)]
pub struct HubClientRepository {
    base: Arc<dyn SoftDeleteRepository<HubClient>>,
}

impl HubClientRepository {
    const SEARCH_COLUMNS: &'static [&'static str] = &["name"];

    pub fn new(base: Arc<dyn SoftDeleteRepository<HubClient>>) -> Self {
        Self { base }
    }

    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<HubClient> {
        self.base.get_by_id(id).await
    }

    pub async fn create(&self, client: &HubClient) -> RepositoryResult<HubClient> {
        self.base.create(client).await
    }

    pub async fn update(&self, client: &HubClient) -> RepositoryResult<HubClient> {
        self.base.update(client).await
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.base.delete(id).await
    }

    pub async fn soft_delete(&self, client: &HubClient) -> RepositoryResult<HubClient> {
        self.base.soft_delete(client).await
    }

    /// All matching hub clients, ordered
    pub async fn list(&self, options: &ListOptions) -> RepositoryResult<Vec<HubClient>> {
        let filter = options.filter(Self::SEARCH_COLUMNS);
        let order = options.order::<HubClient>()?;
        self.base.find_all(&filter, Some(order), None).await
    }

    /// One page of matching hub clients and the total match count
    pub async fn paginate(
        &self,
        options: &ListOptions,
        page: u64,
        page_size: u64,
    ) -> RepositoryResult<(Vec<HubClient>, u64)> {
        let filter = options.filter(Self::SEARCH_COLUMNS);
        let order = options.order::<HubClient>()?;

        let total = self.base.count(&filter).await?;
        let clients = self
            .base
            .find_all(&filter, Some(order), Some(Pagination::page(page, page_size)))
            .await?;

        Ok((clients, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identifiable;
    use crate::repository::memory::MemoryRepository;
    use crate::repository::RepositoryErrorKind;

    async fn seeded() -> HubClientRepository {
        let repo = HubClientRepository::new(Arc::new(MemoryRepository::new()));
        for (name, external_id) in [("Acme", 3), ("globex", 1), ("Initech", 2), ("ACME Labs", 4)] {
            repo.create(&HubClient::new(name, external_id)).await.unwrap();
        }
        repo
    }

    fn names(clients: &[HubClient]) -> Vec<&str> {
        clients.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let repo = seeded().await;
        let options = ListOptions {
            search: "acme".to_string(),
            sort_field: "name".to_string(),
            ..ListOptions::default()
        };
        let clients = repo.list(&options).await.unwrap();
        assert_eq!(names(&clients), vec!["ACME Labs", "Acme"]);
    }

    #[tokio::test]
    async fn test_list_sort_desc_and_permissive_fallback() {
        let repo = seeded().await;

        let desc = ListOptions {
            sort_field: "external_id".to_string(),
            sort_order: "desc".to_string(),
            ..ListOptions::default()
        };
        let clients = repo.list(&desc).await.unwrap();
        let ids: Vec<i64> = clients.iter().map(|c| c.external_id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);

        let weird = ListOptions {
            sort_order: "upwards".to_string(),
            ..desc
        };
        let clients = repo.list(&weird).await.unwrap();
        let ids: Vec<i64> = clients.iter().map(|c| c.external_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_list_active_filter() {
        let repo = seeded().await;
        let mut initech = repo.get_by_id(3).await.unwrap();
        initech.base.active = false;
        repo.update(&initech).await.unwrap();

        let inactive = ListOptions {
            active: Some(false),
            ..ListOptions::default()
        };
        assert_eq!(names(&repo.list(&inactive).await.unwrap()), vec!["Initech"]);

        let active = ListOptions {
            active: Some(true),
            ..ListOptions::default()
        };
        assert_eq!(repo.list(&active).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_paginate_pages_sum_to_total() {
        let repo = seeded().await;
        let options = ListOptions {
            sort_field: "id".to_string(),
            ..ListOptions::default()
        };

        let mut seen = Vec::new();
        for page in 1..=3 {
            let (clients, total) = repo.paginate(&options, page, 3).await.unwrap();
            assert_eq!(total, 4);
            assert!(clients.len() <= 3);
            seen.extend(clients.into_iter().map(|c| c.id()));
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_paginate_on_tied_column_visits_every_row_once() {
        let repo = HubClientRepository::new(Arc::new(MemoryRepository::new()));
        for external_id in 1..=25 {
            repo.create(&HubClient::new("Same Name", external_id))
                .await
                .unwrap();
        }

        for sort_order in ["asc", "desc"] {
            let options = ListOptions {
                sort_field: "active".to_string(),
                sort_order: sort_order.to_string(),
                ..ListOptions::default()
            };

            let mut seen = Vec::new();
            for page in 1..=3 {
                let (clients, total) = repo.paginate(&options, page, 10).await.unwrap();
                assert_eq!(total, 25);
                seen.extend(clients.into_iter().map(|c| c.id()));
            }

            let mut expected: Vec<i64> = (1..=25).collect();
            if sort_order == "desc" {
                expected.reverse();
            }
            assert_eq!(seen, expected, "sort_order {sort_order}");
        }
    }

    #[tokio::test]
    async fn test_paginate_excludes_soft_deleted() {
        let repo = seeded().await;
        let acme = repo.get_by_id(1).await.unwrap();
        repo.soft_delete(&acme).await.unwrap();

        let (clients, total) = repo.paginate(&ListOptions::default(), 1, 10).await.unwrap();
        assert_eq!(total, 3);
        assert!(clients.iter().all(|c| c.id() != 1));
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let repo = seeded().await;
        let options = ListOptions {
            sort_field: "slug".to_string(),
            ..ListOptions::default()
        };
        let err = repo.list(&options).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ValidationFailed);
    }
}
