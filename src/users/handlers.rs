use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Form, Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
    },
    blogs::repo::Blog,
    error::{ApiError, ApiResult},
    state::AppState,
    users::dto::{LoginForm, RegisterRequest, TokenResponse, UserOut},
    users::repo::User,
};

pub fn token_routes() -> Router<AppState> {
    Router::new().route("/token", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", post(register))
        .route("/users/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> ApiResult<Json<UserOut>> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Friendly pre-check on email; the unique constraints below still
    // backstop both fields against races and duplicate usernames.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &payload.email, &hash)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                warn!(username = %payload.username, "username or email already registered");
                ApiError::Conflict("Username or email already registered".into())
            }
            _ => ApiError::from(e),
        })?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(UserOut::from_user(user, vec![])))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let user = match User::find_by_username(&state.db, &form.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %form.username, "login unknown username");
            return Err(ApiError::Auth("Incorrect username or password".into()));
        }
    };

    if !verify_password(&form.password, &user.password_hash) {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Auth("Incorrect username or password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.username)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> ApiResult<Json<UserOut>> {
    // A valid token whose subject no longer resolves is unauthenticated.
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| {
            warn!(username = %username, "token subject not found");
            ApiError::Auth("Could not validate credentials".into())
        })?;

    let blogs = Blog::list_by_author(&state.db, user.id).await?;
    Ok(Json(UserOut::from_user(user, blogs)))
}
