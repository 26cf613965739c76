//! User endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use super::{find_user, settle_persist};
use crate::db::{UnitOfWork, UserRepo};
use crate::dto::{ChangePasswordRequest, CreateUserRequest, UserResponse};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::state::AppState;
use crate::{mapper, password};

/// GET /users - list all users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(state.pool()).list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = find_user(&state, id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<UserResponse>), ApiError> {
    let hash = password::hash_password(&req.password)?;
    let user = mapper::user_from_request(req, hash);

    let mut uow = UnitOfWork::begin(state.pool()).await?;
    uow.insert(&user).await?;
    uow.persist().await?;

    tracing::info!(user_id = %user.id, username = %user.username, "created user");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/users/{}", user.id))],
        Json(UserResponse::from(&user)),
    ))
}

/// PUT /users/{id}/updatePassword - replace the stored password hash
async fn update_password(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let mut user = find_user(&state, id).await?;
    user.password_hash = password::hash_password(&req.password)?;

    let mut uow = UnitOfWork::begin(state.pool()).await?;
    uow.update(&mut user).await?;
    settle_persist(
        uow.persist().await,
        UserRepo::new(state.pool()).exists(id),
        "user",
        id,
    )
    .await?;

    tracing::info!(user_id = %id, "password updated");
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/updatePassword", put(update_password))
}
