//! User management, reachable with an admin session or the
//! provisioning secret header. The secret path exists so deploy
//! tooling can create the first admin before anyone can log in.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::{hash_password, CurrentAdmin, ProvisioningSecret};
use tapeo_core::auth::{is_acceptable_password, is_valid_email, AuthError, Role, User};

use crate::{handlers::error::ApiError, models::CreateUser, state::AppState};

type Rejection = (StatusCode, &'static str);

/// Admit the request when either guard passed. The admin rejection
/// wins the error message because session callers are the common case.
fn require_admin_or_secret(
    admin: Result<CurrentAdmin, Rejection>,
    secret: Result<ProvisioningSecret, Rejection>,
) -> Result<(), ApiError> {
    match (admin, secret) {
        (Ok(_), _) | (_, Ok(_)) => Ok(()),
        (Err((status, message)), Err(_)) => Err(ApiError::denied(status, message)),
    }
}

/// List all users (GET /api/admin/users).
pub async fn list_users(
    State(state): State<AppState>,
    admin: Result<CurrentAdmin, Rejection>,
    secret: Result<ProvisioningSecret, Rejection>,
) -> Result<Json<Vec<User>>, ApiError> {
    require_admin_or_secret(admin, secret)?;

    Ok(Json(state.auth.users.list_users().await?))
}

/// Get a single user by ID (GET /api/admin/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    admin: Result<CurrentAdmin, Rejection>,
    secret: Result<ProvisioningSecret, Rejection>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    require_admin_or_secret(admin, secret)?;

    let user = state
        .auth
        .users
        .get_user(id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(user))
}

/// Create a user (POST /api/admin/users).
///
/// Emails on the admin allowlist always get the admin role, whatever
/// the payload asked for.
pub async fn create_user(
    State(state): State<AppState>,
    admin: Result<CurrentAdmin, Rejection>,
    secret: Result<ProvisioningSecret, Rejection>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin_or_secret(admin, secret)?;

    if !is_valid_email(&payload.email) {
        return Err(AuthError::InvalidEmail.into());
    }
    if !is_acceptable_password(&payload.password) {
        return Err(AuthError::WeakPassword.into());
    }

    let name = payload.display_name();
    let role = if state.auth.config.is_admin_email(&payload.email) {
        Role::Admin
    } else {
        payload.role()
    };
    let password_hash = hash_password(&payload.password)?;

    let user = User::new(payload.email, name, role, password_hash);
    state.auth.users.create_user(&user).await?;

    tracing::info!(user_id = %user.id, email = %user.email, role = %user.role.as_str(), "Created user");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "user": user,
            "message": "Usuario creado correctamente",
        })),
    ))
}

/// Delete a user by ID (DELETE /api/admin/users/{id}).
///
/// The store refuses to remove the last admin, and drops the user's
/// sessions and notifications along with the account.
pub async fn delete_user(
    State(state): State<AppState>,
    admin: Result<CurrentAdmin, Rejection>,
    secret: Result<ProvisioningSecret, Rejection>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin_or_secret(admin, secret)?;

    let user = state
        .auth
        .users
        .get_user(id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    state.auth.users.delete_user(id).await?;

    tracing::info!(user_id = %id, email = %user.email, "Deleted user");

    Ok(Json(json!({
        "success": true,
        "message": "Usuario eliminado correctamente",
    })))
}
