//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the Authorization header
//! 2. Hash it and verify it exists in the database
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401
//!
//! Authentication only establishes WHO is calling. Whether that user may
//! act on a given condominium is the tenancy guard's job
//! (`services::tenancy`), checked per operation.

use crate::{db::DbPool, error::AppError, models::api_key::ApiKey};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; route handlers extract it
/// with `Extension<AuthContext>` to know who made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated user (api_keys.id)
    ///
    /// This is the id matched against `condominium_members` by the tenancy
    /// guard.
    pub user_id: Uuid,

    /// Display name of the administrator making the request
    pub user_name: String,
}

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <key>` header from the request
/// 2. Hash `<key>` with SHA-256
/// 3. Query `api_keys` for a matching hash with `is_active = true`
/// 4. If found: inject `AuthContext`, call the next handler
/// 5. If not found: return 401 Unauthorized
pub async fn auth_middleware(
    State(pool): State<DbPool>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidApiKey)?;

    // Expected format: "Bearer <api_key>"
    let api_key = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidApiKey)?;

    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    let key_hash = hex::encode(hasher.finalize());

    let api_key_record = sqlx::query_as::<_, ApiKey>(
        "SELECT id, key_hash, user_name, created_at, is_active
         FROM api_keys
         WHERE key_hash = $1 AND is_active = true",
    )
    .bind(&key_hash)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::InvalidApiKey)?;

    let auth_context = AuthContext {
        user_id: api_key_record.id,
        user_name: api_key_record.user_name,
    };

    request.extensions_mut().insert(auth_context);

    Ok(next.run(request).await)
}
