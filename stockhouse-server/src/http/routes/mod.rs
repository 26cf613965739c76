//! Route handlers organized by resource

pub mod health;
pub mod stock_items;
pub mod users;

use std::future::Future;

use uuid::Uuid;

use crate::db::{DbError, UserRepo};
use crate::http::error::ApiError;
use crate::models::User;
use crate::state::AppState;

/// Load a user (with items) or answer 404.
pub(crate) async fn find_user(state: &AppState, id: Uuid) -> Result<User, ApiError> {
    UserRepo::new(state.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", id))
}

/// 404 unless the user exists.
pub(crate) async fn require_user(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    if UserRepo::new(state.pool()).exists(id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("user", id))
    }
}

/// Turn the outcome of `persist` into a response error.
///
/// A conflict is checked once more against the store: if the row is gone
/// by now the caller gets 404, otherwise the conflict stays a 500.
pub(crate) async fn settle_persist<F>(
    outcome: Result<(), DbError>,
    still_exists: F,
    resource: &'static str,
    id: Uuid,
) -> Result<(), ApiError>
where
    F: Future<Output = Result<bool, DbError>>,
{
    match outcome {
        Err(conflict @ DbError::Conflict { .. }) => {
            if still_exists.await? {
                Err(ApiError::Database(conflict))
            } else {
                tracing::info!(resource, %id, "write target vanished during update");
                Err(ApiError::not_found(resource, id))
            }
        }
        other => other.map_err(ApiError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;

    fn conflict(id: Uuid) -> DbError {
        DbError::Conflict {
            resource: "stock item",
            id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn conflict_on_vanished_row_is_not_found() {
        let id = Uuid::new_v4();
        let err = settle_persist(Err(conflict(id)), ready(Ok(false)), "stock item", id)
            .await
            .unwrap_err();

        match err {
            ApiError::NotFound { resource, id: missing } => {
                assert_eq!(resource, "stock item");
                assert_eq!(missing, id.to_string());
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_on_surviving_row_stays_a_database_error() {
        let id = Uuid::new_v4();
        let err = settle_persist(Err(conflict(id)), ready(Ok(true)), "stock item", id)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Database(DbError::Conflict { .. })));
    }

    #[tokio::test]
    async fn success_skips_the_recheck() {
        let id = Uuid::new_v4();
        // A failing recheck would surface as an error if it were awaited
        let recheck = ready(Err(DbError::Sqlx(sqlx::Error::PoolClosed)));
        assert!(settle_persist(Ok(()), recheck, "user", id).await.is_ok());
    }

    #[tokio::test]
    async fn other_errors_pass_through() {
        let id = Uuid::new_v4();
        let err = settle_persist(
            Err(DbError::Sqlx(sqlx::Error::PoolClosed)),
            ready(Ok(true)),
            "user",
            id,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Unavailable));
    }
}
