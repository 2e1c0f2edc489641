use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest},
        middleware::{authenticate, CurrentUser},
        password::{hash_password, verify_password},
        repo_types::NewUser,
    },
    error::{ApiError, StoreError},
    state::AppState,
};

const MISSING_FIELDS: &str = "Please add all fields";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .route(
            "/users/me",
            get(me).route_layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        )
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Some(fields) = payload.ok().and_then(|Json(p)| p.validate()) else {
        warn!("signup with missing fields");
        return Err(ApiError::validation(MISSING_FIELDS));
    };

    match state.users.find_by_username(&fields.username).await {
        Ok(Some(_)) => {
            warn!(username = %fields.username, "username already registered");
            return Err(ApiError::Conflict("User already exists".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err(ApiError::rejected("Invalid user data", e));
        }
    }

    let password_hash = hash_password(fields.password).await.map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::rejected("Invalid user data", e)
    })?;

    let user = state
        .users
        .create(NewUser {
            name: fields.name,
            username: fields.username,
            password_hash,
            phone_number: fields.phone_number,
            gender: fields.gender,
            date_of_birth: fields.date_of_birth,
            role: fields.role,
            profile_picture: fields.profile_picture,
            address: fields.address,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => {
                warn!("username taken by a concurrent signup");
                ApiError::Conflict("User already exists".into())
            }
            other => {
                error!(error = %other, "create user failed");
                ApiError::rejected("Invalid user data", other)
            }
        })?;

    let token = state.keys.sign(user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::rejected("Invalid user data", e)
    })?;

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            name: user.name,
            username: user.username,
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (username, password) = match payload {
        Ok(Json(LoginRequest {
            username: Some(u),
            password: Some(p),
        })) => (u, p),
        _ => {
            warn!("login without username or password");
            return Err(ApiError::Auth(INVALID_CREDENTIALS.into()));
        }
    };

    let user = match state.users.find_by_username(&username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %username, "login unknown username");
            return Err(ApiError::Auth(INVALID_CREDENTIALS.into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err(ApiError::Auth(INVALID_CREDENTIALS.into()));
        }
    };

    let ok = verify_password(password, user.password_hash.clone())
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            false
        });
    if !ok {
        warn!(username = %username, user_id = %user.id, "login invalid password");
        return Err(ApiError::Auth(INVALID_CREDENTIALS.into()));
    }

    let token = state.keys.sign(user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Auth(INVALID_CREDENTIALS.into())
    })?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse {
        name: user.name,
        username: user.username,
        token,
    }))
}

#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}
