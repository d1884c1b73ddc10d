use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware::from_fn_with_state, Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use time::OffsetDateTime;

use crate::domain::user::{NewUser, UserResponse, UserUpdate};
use crate::error::ApiError;
use crate::middleware::auth::require_auth;
use crate::security::jwt::Claims;
use crate::security::password;
use crate::state::AppState;

const INVALID_REQUEST_MSG: &str = "Invalid request data";

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/", get(list))
        .route("/me", get(me).layer(from_fn_with_state(state, require_auth)))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    email: String,
    password: String,
    firstname: String,
    lastname: String,
    experience: String,
    #[serde(rename = "type")]
    user_type: String,
    phone_number: String,
    #[serde(with = "time::serde::rfc3339")]
    birthday: OffsetDateTime,
}

async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation(INVALID_REQUEST_MSG))?;
    let required = [
        &payload.email,
        &payload.password,
        &payload.firstname,
        &payload.lastname,
        &payload.experience,
        &payload.user_type,
        &payload.phone_number,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(ApiError::Validation(INVALID_REQUEST_MSG));
    }

    let password_hash = password::hash(&payload.password)
        .map_err(|e| ApiError::internal("Failed to hash password", e))?;

    // No pre-check read: the unique index arbitrates duplicate emails and
    // its rejection surfaces as 409.
    state
        .users
        .insert(NewUser {
            email: payload.email,
            password_hash,
            firstname: payload.firstname,
            lastname: payload.lastname,
            experience: payload.experience,
            user_type: payload.user_type,
            phone_number: payload.phone_number,
            birthday: payload.birthday,
        })
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to register"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registered successfully" })),
    ))
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation(INVALID_REQUEST_MSG))?;

    let user = state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to log in"))?
        .ok_or(ApiError::NotFound("Invalid email"))?;

    let valid = password::verify(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::internal("Failed to verify password", e))?;
    if !valid {
        return Err(ApiError::Unauthorized("Password incorrect"));
    }

    let token = state
        .jwt
        .issue(user.id)
        .map_err(|e| ApiError::internal("Failed to create token", e))?;

    Ok(Json(
        json!({ "token": token, "message": "Login successfully" }),
    ))
}

async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to get users"))?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(json!({ "users": users })))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to get user"))?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(json!({ "user": UserResponse::from(user) })))
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .get(claims.sub)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to get user"))?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(json!({ "user": UserResponse::from(user) })))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let mut user = state
        .users
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update user"))?
        .ok_or(ApiError::NotFound("User not found"))?;

    let Json(update) = payload.map_err(|_| ApiError::Validation(INVALID_REQUEST_MSG))?;
    update.apply(&mut user);

    state
        .users
        .save(&user)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update user"))?;

    Ok(Json(json!({ "message": "User updated successfully" })))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete user"))?;
    if !deleted {
        return Err(ApiError::NotFound("User not found"));
    }
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId("Invalid user ID"))
}
