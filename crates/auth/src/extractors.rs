//! Axum extractors for authentication and role checks.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tapeo_core::auth::{is_session_expired, Role, SessionId, User};

use crate::AuthState;

/// Header carrying the shared provisioning secret.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Extractor for authenticated user. Returns 401 if not authenticated.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        // Try Authorization header first (for API clients)
        let session_id = if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
            let header_value = auth_header.to_str().map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    "Cabecera de autorización no válida",
                )
            })?;

            header_value
                .strip_prefix("Bearer ")
                .map(|token| SessionId::new(token.to_string()))
        } else {
            None
        };

        // Fall back to cookie (for web clients)
        let session_id = match session_id {
            Some(id) => id,
            None => {
                let jar = CookieJar::from_headers(&parts.headers);
                let cookie = jar
                    .get(&auth_state.config.cookie_name)
                    .ok_or((StatusCode::UNAUTHORIZED, "Sesión no iniciada"))?;

                SessionId::new(cookie.value().to_string())
            }
        };

        // Look up session
        let session = auth_state
            .sessions
            .get_session(&session_id)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error al consultar la sesión",
                )
            })?
            .ok_or((StatusCode::UNAUTHORIZED, "Sesión no encontrada"))?;

        // Check expiry
        if is_session_expired(&session, Utc::now()) {
            return Err((StatusCode::UNAUTHORIZED, "Sesión caducada"));
        }

        // Look up user
        let mut user = auth_state
            .users
            .get_user(session.user_id)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error al consultar el usuario",
                )
            })?
            .ok_or((StatusCode::UNAUTHORIZED, "Usuario no encontrado"))?;

        // Allowlisted emails act as admins regardless of stored role
        if auth_state.config.is_admin_email(&user.email) {
            user.role = Role::Admin;
        }

        Ok(CurrentUser(user))
    }
}

/// Extractor for optionally authenticated user. Returns None if not authenticated.
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        // Try Authorization header first (for API clients)
        let session_id = if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
            let header_value = match auth_header.to_str() {
                Ok(v) => v,
                Err(_) => return Ok(OptionalUser(None)),
            };

            header_value
                .strip_prefix("Bearer ")
                .map(|token| SessionId::new(token.to_string()))
        } else {
            None
        };

        // Fall back to cookie (for web clients)
        let session_id = match session_id {
            Some(id) => id,
            None => {
                let jar = CookieJar::from_headers(&parts.headers);
                match jar.get(&auth_state.config.cookie_name) {
                    Some(cookie) => SessionId::new(cookie.value().to_string()),
                    None => return Ok(OptionalUser(None)),
                }
            }
        };

        // Look up session
        let session = match auth_state.sessions.get_session(&session_id).await {
            Ok(Some(s)) => s,
            _ => return Ok(OptionalUser(None)),
        };

        // Check expiry
        if is_session_expired(&session, Utc::now()) {
            return Ok(OptionalUser(None));
        }

        let mut user = match auth_state.users.get_user(session.user_id).await {
            Ok(Some(u)) => u,
            _ => return Ok(OptionalUser(None)),
        };

        // Allowlisted emails act as admins regardless of stored role
        if auth_state.config.is_admin_email(&user.email) {
            user.role = Role::Admin;
        }

        Ok(OptionalUser(Some(user)))
    }
}

/// Extractor for editors and admins. Returns 403 for authenticated users
/// whose role cannot access the admin panel.
pub struct CurrentEditor(pub User);

impl<S> FromRequestParts<S> for CurrentEditor
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.role.can_access_admin() {
            return Err((StatusCode::FORBIDDEN, "Acceso restringido"));
        }

        Ok(CurrentEditor(user))
    }
}

/// Extractor for administrators. Returns 403 for everyone else.
pub struct CurrentAdmin(pub User);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.role.can_manage_users() {
            return Err((StatusCode::FORBIDDEN, "Solo administradores"));
        }

        Ok(CurrentAdmin(user))
    }
}

/// Extractor guarding out-of-band provisioning. Accepts the request when
/// the `x-admin-secret` header matches the configured secret.
pub struct ProvisioningSecret;

impl<S> FromRequestParts<S> for ProvisioningSecret
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let expected = auth_state.config.admin_api_secret.as_deref().ok_or((
            StatusCode::UNAUTHORIZED,
            "Aprovisionamiento deshabilitado",
        ))?;

        let provided = parts
            .headers
            .get(ADMIN_SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Secreto de administración requerido",
            ))?;

        if !secrets_match(provided, expected) {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Secreto de administración no válido",
            ));
        }

        Ok(ProvisioningSecret)
    }
}

/// Compares secrets without short-circuiting on the first mismatched byte.
fn secrets_match(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();

    if provided.len() != expected.len() {
        return false;
    }

    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_match_requires_exact_bytes() {
        assert!(secrets_match("cambiame", "cambiame"));
        assert!(!secrets_match("cambiame", "cambiamE"));
        assert!(!secrets_match("cambiame", "cambiame-no"));
        assert!(!secrets_match("", "cambiame"));
    }
}
