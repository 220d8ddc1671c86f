use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    app::not_found,
    auth::{
        dto::{ApiResponse, AuthData, LoginRequest, ProfileData, RegisterRequest},
        extractors::CurrentUser,
        jwt::JwtKeys,
        validation::Violation,
    },
    error::ApiError,
    state::AppState,
    users::{password::verify_password, PublicUser, StoreError},
};

const REGISTER_FAILED: &str = "Server error during registration";
const LOGIN_FAILED: &str = "Server error during login";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register).fallback(not_found))
        .route("/auth/login", post(login).fallback(not_found))
        .route("/auth/profile", get(profile).fallback(not_found))
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "request body rejected");
    ApiError::Validation(rejection.body_text())
}

fn invalid(op: &str, v: Violation) -> ApiError {
    warn!(field = ?v.field, reason = v.message, "{op} validation failed");
    ApiError::Validation(v.message.into())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), ApiError> {
    let Json(payload) = payload.map_err(bad_body)?;
    let new_user = payload
        .into_new_user()
        .map_err(|v| invalid("register", v))?;

    // Pre-check only; the store's uniqueness constraint is authoritative.
    match state.users.find_by_email(&new_user.email).await {
        Ok(Some(_)) => {
            warn!(email = %new_user.email, "email already registered");
            return Err(ApiError::DuplicateEmail);
        }
        Ok(None) => {}
        Err(e) => return Err(ApiError::internal(REGISTER_FAILED, e)),
    }

    let user = match state.users.create(new_user).await {
        Ok(u) => u,
        Err(StoreError::DuplicateEmail) => {
            warn!("email registered concurrently");
            return Err(ApiError::DuplicateEmail);
        }
        Err(e) => return Err(ApiError::internal(REGISTER_FAILED, e)),
    };

    let token = JwtKeys::from_ref(&state)
        .issue(user.id)
        .map_err(|e| ApiError::internal(REGISTER_FAILED, e))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            AuthData {
                user: PublicUser::from(user),
                token,
            },
        )),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthData>>, ApiError> {
    let Json(payload) = payload.map_err(bad_body)?;
    let creds = payload
        .into_credentials()
        .map_err(|v| invalid("login", v))?;

    let user = match state.users.find_by_email(&creds.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %creds.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => return Err(ApiError::internal(LOGIN_FAILED, e)),
    };

    let hash = user.password_hash.clone();
    let password = creds.password;
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?;

    if !ok {
        warn!(email = %creds.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state)
        .issue(user.id)
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(ApiResponse::ok(
        "Login successful",
        AuthData {
            user: PublicUser::from(user),
            token,
        },
    )))
}

#[instrument(skip_all)]
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<ApiResponse<ProfileData>> {
    debug!(user_id = %user.id, "profile requested");
    Json(ApiResponse::ok(
        "Profile retrieved successfully",
        ProfileData { user },
    ))
}
