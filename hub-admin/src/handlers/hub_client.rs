//! `/api/hub_clients` handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::extract::{json_body, parse_id};
use super::response::{Paginated, PaginationMeta};
use crate::dto::{
    ensure_valid, CreateHubClient, HubClientListQuery, PageQuery, QueryMap, UpdateHubClient,
};
use crate::models::HubClient;
use crate::services::ApiResult;
use crate::state::AppState;

/// `GET /api/hub_clients/paginate`
pub async fn paginate(
    State(state): State<AppState>,
    Query(params): Query<QueryMap>,
) -> ApiResult<Json<Paginated<HubClient>>> {
    let query = HubClientListQuery::from_query(&params);
    let page = PageQuery::from_query(&params);
    ensure_valid([query.validate(), page.validate()])?;

    let (clients, total) = state
        .hub_clients()
        .paginate(&query.into_options(), page.page(), page.page_size())
        .await?;

    let meta = PaginationMeta::new(total, page.page(), page.page_size());
    Ok(Json(Paginated::new(clients, meta)))
}

/// `GET /api/hub_clients`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<QueryMap>,
) -> ApiResult<Json<Vec<HubClient>>> {
    let query = HubClientListQuery::from_query(&params);
    ensure_valid([query.validate()])?;

    let clients = state.hub_clients().list(&query.into_options()).await?;
    Ok(Json(clients))
}

/// `GET /api/hub_clients/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<HubClient>> {
    let id = parse_id(&id)?;
    Ok(Json(state.hub_clients().get_by_id(id).await?))
}

/// `POST /api/hub_clients`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateHubClient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HubClient>)> {
    let payload = json_body(payload)?;
    ensure_valid([payload.validate()])?;

    let client = state.hub_clients().create(&payload.into_model()).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// `PUT /api/hub_clients/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateHubClient>, JsonRejection>,
) -> ApiResult<Json<HubClient>> {
    let id = parse_id(&id)?;
    let payload = json_body(payload)?;
    ensure_valid([payload.validate()])?;

    let service = state.hub_clients();
    let mut client = service.get_by_id(id).await?;
    payload.apply(&mut client);

    Ok(Json(service.update(&client).await?))
}

/// `DELETE /api/hub_clients/{id}`: soft delete
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    let service = state.hub_clients();
    let client = service.get_by_id(id).await?;
    service.soft_delete(&client).await?;

    Ok(StatusCode::NO_CONTENT)
}
