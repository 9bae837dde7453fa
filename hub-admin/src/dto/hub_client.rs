use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::query::{self, QueryMap, DEFAULT_SORT_FIELD};
use super::validation::{one_of, sort_order};
use crate::models::HubClient;
use crate::repository::{Entity, ListOptions};

/// Body of `POST /api/hub_clients`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateHubClient {
    #[validate(required, length(min = 3, max = 100))]
    pub name: Option<String>,
    #[validate(required, range(min = 1))]
    pub external_id: Option<i64>,
}

impl CreateHubClient {
    pub fn into_model(self) -> HubClient {
        HubClient::new(
            self.name.unwrap_or_default(),
            self.external_id.unwrap_or_default(),
        )
    }
}

/// Body of `PUT /api/hub_clients/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHubClient {
    #[validate(length(min = 3, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub external_id: Option<i64>,
    pub active: Option<bool>,
}

impl UpdateHubClient {
    pub fn apply(self, client: &mut HubClient) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(external_id) = self.external_id {
            client.external_id = external_id;
        }
        if let Some(active) = self.active {
            client.base.active = active;
        }
    }
}

/// Search, filter, and sort parameters for hub client listings
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct HubClientListQuery {
    pub search: String,
    pub active: Option<bool>,
    #[validate(custom(function = "hub_client_sort_field"))]
    pub sort_field: String,
    #[validate(custom(function = "sort_order"))]
    pub sort_order: String,
}

impl HubClientListQuery {
    pub fn from_query(params: &QueryMap) -> Self {
        Self {
            search: query::text(params, "search", ""),
            active: query::active(params),
            sort_field: query::text(params, "sort_field", DEFAULT_SORT_FIELD),
            sort_order: query::sort_order(params),
        }
    }

    pub fn into_options(self) -> ListOptions {
        ListOptions {
            search: self.search,
            active: self.active,
            sort_field: self.sort_field,
            sort_order: self.sort_order,
        }
    }
}

fn hub_client_sort_field(value: &str) -> Result<(), ValidationError> {
    one_of(value, HubClient::SORTABLE_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validation::field_errors;

    #[test]
    fn test_create_requires_fields() {
        let errors = CreateHubClient::default().validate().unwrap_err();
        let details = field_errors(&errors);
        let tags: Vec<(&str, &str)> = details
            .iter()
            .map(|d| (d.field.as_str(), d.tag.as_str()))
            .collect();
        assert_eq!(tags, vec![("external_id", "required"), ("name", "required")]);
    }

    #[test]
    fn test_create_name_length_bounds() {
        let short = CreateHubClient {
            name: Some("Ac".to_string()),
            external_id: Some(1),
        };
        assert!(short.validate().is_err());

        let long = CreateHubClient {
            name: Some("x".repeat(101)),
            external_id: Some(1),
        };
        assert!(long.validate().is_err());

        let ok = CreateHubClient {
            name: Some("Acme".to_string()),
            external_id: Some(42),
        };
        assert!(ok.validate().is_ok());
        let client = ok.into_model();
        assert_eq!(client.name, "Acme");
        assert_eq!(client.external_id, 42);
        assert!(client.base.active);
    }

    #[test]
    fn test_create_rejects_zero_external_id() {
        let dto = CreateHubClient {
            name: Some("Acme".to_string()),
            external_id: Some(0),
        };
        let details = field_errors(&dto.validate().unwrap_err());
        assert_eq!(details[0].field, "external_id");
        assert_eq!(details[0].tag, "range");
        assert_eq!(details[0].value, "0");
    }

    #[test]
    fn test_update_is_partial() {
        let mut client = HubClient::new("Acme", 42);
        let dto: UpdateHubClient = serde_json::from_str(r#"{"active": false}"#).unwrap();
        assert!(dto.validate().is_ok());
        dto.apply(&mut client);

        assert_eq!(client.name, "Acme");
        assert_eq!(client.external_id, 42);
        assert!(!client.base.active);
    }

    #[test]
    fn test_list_query_rejects_foreign_sort_field() {
        let params: QueryMap = [("sort_field", "slug")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let query = HubClientListQuery::from_query(&params);
        let details = field_errors(&query.validate().unwrap_err());

        assert_eq!(details[0].field, "sort_field");
        assert_eq!(details[0].tag, "oneof");
        assert_eq!(
            details[0].allowed_values.as_deref().map(<[String]>::len),
            Some(HubClient::SORTABLE_COLUMNS.len())
        );
    }

    #[test]
    fn test_list_query_defaults() {
        let query = HubClientListQuery::from_query(&QueryMap::new());
        assert!(query.validate().is_ok());

        let options = query.into_options();
        assert_eq!(options.sort_field, "id");
        assert_eq!(options.sort_order, "asc");
        assert_eq!(options.active, None);
        assert!(options.search.is_empty());
    }
}
