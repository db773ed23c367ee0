//! HTTP handlers for auth routes.

use axum::{
    extract::{FromRef, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tapeo_core::auth::{
    calculate_expiry, generate_session_id, validate_return_to, AuthError as CoreAuthError, Session,
    User,
};

use crate::error::AuthError;
use crate::extractors::CurrentUser;
use crate::password::verify_password;
use crate::AuthState;

/// Form body for the login endpoint.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// URL to redirect to after successful authentication. The login
    /// page submits an empty field when none was requested.
    #[serde(default, deserialize_with = "tapeo_core::serde::deserialize_optional_string")]
    pub return_to: Option<String>,
}

/// Creates the auth router with all authentication routes.
///
/// Generic over the application state so the server can merge these
/// routes into its own router; the state only needs to expose an
/// [`AuthState`] via `FromRef`.
///
/// Routes:
/// - `POST /auth/login` - Verify credentials and start a session
/// - `POST /auth/logout` - End current session
/// - `POST /auth/logout-all` - End all sessions for current user
/// - `GET /auth/me` - Get current authenticated user
pub fn auth_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AuthState: FromRef<S>,
{
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/logout-all", post(logout_all))
        .route("/auth/me", get(me))
}

async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AuthError> {
    let email = form.email.trim().to_lowercase();

    let user = state
        .users
        .get_user_by_email(&email)
        .await?
        .ok_or(CoreAuthError::InvalidCredentials)?;

    if !verify_password(&form.password, &user.password_hash)? {
        return Err(CoreAuthError::InvalidCredentials.into());
    }

    // Create session
    let now = Utc::now();
    let session = Session {
        id: generate_session_id(),
        user_id: user.id,
        created_at: now,
        expires_at: calculate_expiry(
            now,
            Duration::seconds(state.config.session_ttl.as_secs() as i64),
        ),
    };
    state.sessions.create_session(&session).await?;

    // Set secure cookie - clone the cookie name to own it
    let cookie_name = state.config.cookie_name.clone();
    let session_value = session.id.to_string();
    let cookie = Cookie::build((cookie_name, session_value))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(
            state.config.session_ttl.as_secs() as i64
        ))
        .build();

    let jar = jar.add(cookie);

    // Validate return_to to prevent open redirects; default to the admin panel
    let redirect_url = form
        .return_to
        .as_deref()
        .and_then(validate_return_to)
        .unwrap_or("/admin")
        .to_string();

    Ok((jar, Redirect::to(&redirect_url)))
}

async fn logout(
    State(state): State<AuthState>,
    CurrentUser(_user): CurrentUser,
    jar: CookieJar,
) -> Result<CookieJar, AuthError> {
    // Get session ID from cookie
    if let Some(cookie) = jar.get(&state.config.cookie_name) {
        let session_id = tapeo_core::auth::SessionId::new(cookie.value().to_string());
        state.sessions.delete_session(&session_id).await?;
    }

    // Remove cookie
    let jar = jar.remove(Cookie::from(state.config.cookie_name.clone()));
    Ok(jar)
}

async fn logout_all(
    State(state): State<AuthState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<CookieJar, AuthError> {
    state.sessions.delete_user_sessions(user.id).await?;

    // Remove cookie
    let jar = jar.remove(Cookie::from(state.config.cookie_name.clone()));
    Ok(jar)
}

async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
