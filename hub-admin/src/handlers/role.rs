//! `/api/roles` handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::extract::{json_body, parse_id};
use super::response::{Paginated, PaginationMeta};
use crate::dto::{ensure_valid, CreateRole, PageQuery, QueryMap, RoleListQuery, UpdateRole};
use crate::models::Role;
use crate::services::ApiResult;
use crate::state::AppState;

pub async fn paginate(
    State(state): State<AppState>,
    Query(params): Query<QueryMap>,
) -> ApiResult<Json<Paginated<Role>>> {
    let query = RoleListQuery::from_query(&params);
    let page = PageQuery::from_query(&params);
    ensure_valid([query.validate(), page.validate()])?;

    let (roles, total) = state
        .roles()
        .paginate(&query.into_options(), page.page(), page.page_size())
        .await?;

    let meta = PaginationMeta::new(total, page.page(), page.page_size());
    Ok(Json(Paginated::new(roles, meta)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<QueryMap>,
) -> ApiResult<Json<Vec<Role>>> {
    let query = RoleListQuery::from_query(&params);
    ensure_valid([query.validate()])?;

    Ok(Json(state.roles().list(&query.into_options()).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Role>> {
    let id = parse_id(&id)?;
    Ok(Json(state.roles().get_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateRole>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Role>)> {
    let payload = json_body(payload)?;
    ensure_valid([payload.validate()])?;

    let role = state.roles().create(&payload.into_model()).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRole>, JsonRejection>,
) -> ApiResult<Json<Role>> {
    let id = parse_id(&id)?;
    let payload = json_body(payload)?;
    ensure_valid([payload.validate()])?;

    let service = state.roles();
    let mut role = service.get_by_id(id).await?;
    payload.apply(&mut role);

    Ok(Json(service.update(&role).await?))
}

pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    let service = state.roles();
    let role = service.get_by_id(id).await?;
    service.soft_delete(&role).await?;

    Ok(StatusCode::NO_CONTENT)
}
