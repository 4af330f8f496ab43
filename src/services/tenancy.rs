//! Tenancy guard: may user U act on condominium C?
//!
//! Membership lives in the `condominium_members` table; a row grants the
//! user full operation rights over the condominium and everything under it
//! (buildings, departments, payments, billing periods).
//!
//! The guard is an explicit collaborator: every core operation and every
//! CRUD handler calls through these functions before touching data, rather
//! than relying on ambient per-request state. A failed check aborts the
//! whole operation before any mutation.

use crate::{db::DbPool, error::AppError, models::building::Building};
use uuid::Uuid;

/// Check that `user_id` is a member of `condominium_id`.
///
/// # Errors
///
/// `Forbidden` if no membership row exists.
pub async fn check_access(
    pool: &DbPool,
    user_id: Uuid,
    condominium_id: Uuid,
) -> Result<(), AppError> {
    let is_member: bool = sqlx::query_scalar(
        "SELECT EXISTS(
            SELECT 1 FROM condominium_members
            WHERE condominium_id = $1 AND user_id = $2
        )",
    )
    .bind(condominium_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    if !is_member {
        return Err(AppError::Forbidden);
    }

    Ok(())
}

/// Check that the condominium exists and the user may act on it.
pub async fn require_condominium_access(
    pool: &DbPool,
    user_id: Uuid,
    condominium_id: Uuid,
) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM condominiums WHERE id = $1)")
        .bind(condominium_id)
        .fetch_one(pool)
        .await?;

    if !exists {
        return Err(AppError::CondominiumNotFound);
    }

    check_access(pool, user_id, condominium_id).await
}

/// Resolve a building and check that the user may act on its condominium.
///
/// Returns the building so callers do not have to fetch it twice.
///
/// # Errors
///
/// - `BuildingNotFound` if the building does not exist
/// - `Forbidden` if the tenancy check fails
pub async fn require_building_access(
    pool: &DbPool,
    user_id: Uuid,
    building_id: Uuid,
) -> Result<Building, AppError> {
    let building = sqlx::query_as::<_, Building>("SELECT * FROM buildings WHERE id = $1")
        .bind(building_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::BuildingNotFound)?;

    check_access(pool, user_id, building.condominium_id).await?;

    Ok(building)
}
