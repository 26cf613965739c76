//! Stock item endpoints, always nested under their owning user

use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{require_user, settle_persist};
use crate::db::{StockItemRepo, UnitOfWork};
use crate::dto::{GroceryItemDto, GroceryItemPayload};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::mapper;
use crate::models::GroceryItem;
use crate::state::AppState;

async fn find_item(
    state: &AppState,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<GroceryItem, ApiError> {
    require_user(state, user_id).await?;
    StockItemRepo::new(state.pool())
        .find_by_id(item_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("stock item", item_id))
}

/// GET /users/{id}/stockItems - list a user's items
async fn list_items(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<Uuid>,
) -> Result<Json<Vec<GroceryItemDto>>, ApiError> {
    require_user(&state, user_id).await?;
    let items = StockItemRepo::new(state.pool()).list_for_user(user_id).await?;
    Ok(Json(items.iter().map(GroceryItemDto::from).collect()))
}

/// GET /users/{id}/stockItems/{item_id} - get one item
async fn get_item(
    State(state): State<AppState>,
    ValidPath((user_id, item_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<Json<GroceryItemDto>, ApiError> {
    let item = find_item(&state, user_id, item_id).await?;
    Ok(Json(GroceryItemDto::from(&item)))
}

/// POST /users/{id}/stockItems - add an item to a user's stock
async fn create_item(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<GroceryItemPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<GroceryItemDto>), ApiError> {
    require_user(&state, user_id).await?;
    let item = mapper::item_from_payload(payload, user_id);

    let mut uow = UnitOfWork::begin(state.pool()).await?;
    uow.insert(&item).await?;
    uow.persist().await?;

    tracing::info!(%user_id, item_id = %item.id, name = %item.name, "created stock item");

    Ok((
        StatusCode::CREATED,
        [(
            header::LOCATION,
            format!("/users/{}/stockItems/{}", user_id, item.id),
        )],
        Json(GroceryItemDto::from(&item)),
    ))
}

/// PUT /users/{id}/stockItems/{item_id} - merge payload fields onto the item
async fn update_item(
    State(state): State<AppState>,
    ValidPath((user_id, item_id)): ValidPath<(Uuid, Uuid)>,
    ValidJson(payload): ValidJson<GroceryItemPayload>,
) -> Result<StatusCode, ApiError> {
    let mut item = find_item(&state, user_id, item_id).await?;
    mapper::merge_item(&mut item, payload);

    let mut uow = UnitOfWork::begin(state.pool()).await?;
    uow.update(&mut item).await?;
    settle_persist(
        uow.persist().await,
        StockItemRepo::new(state.pool()).exists(item_id, user_id),
        "stock item",
        item_id,
    )
    .await?;

    tracing::info!(%user_id, %item_id, "updated stock item");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{id}/stockItems/{item_id} - remove an item the user owns
async fn delete_item(
    State(state): State<AppState>,
    ValidPath((user_id, item_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let item = find_item(&state, user_id, item_id).await?;

    let mut uow = UnitOfWork::begin(state.pool()).await?;
    uow.delete(&item).await?;
    settle_persist(
        uow.persist().await,
        StockItemRepo::new(state.pool()).exists(item_id, user_id),
        "stock item",
        item_id,
    )
    .await?;

    tracing::info!(%user_id, %item_id, "deleted stock item");
    Ok(StatusCode::NO_CONTENT)
}

/// Stock item routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{id}/stockItems",
            get(list_items).post(create_item),
        )
        .route(
            "/users/{id}/stockItems/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
