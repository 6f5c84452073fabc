// src/web/handlers/auth_handlers.rs
use crate::auth::{AuthConfig, AuthError, AuthenticatedUser};
use crate::core::{Database, UserExists};
use crate::web::types::*;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

/// Trimmed value when present and non-blank
fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn database_error(e: anyhow::Error, conversation_id: Option<String>) -> ApiError {
    error!("Database operation failed: {:#}", e);
    api_error(
        Status::InternalServerError,
        "Database error occurred",
        "DATABASE_ERROR",
        &["Try again in a few moments"],
        conversation_id,
    )
}

fn user_exists_error(username: &str, conversation_id: Option<String>) -> ApiError {
    warn!("Signup rejected, user already exists: {}", username);
    api_error(
        Status::Conflict,
        format!("User '{}' already exists", username),
        "USER_EXISTS",
        &["Choose another username", "Log in if this is your account"],
        conversation_id,
    )
}

pub async fn signup_handler(
    request: Json<StandardRequest<SignupRequest>>,
    auth_config: &State<AuthConfig>,
    database: &State<Database>,
) -> Result<Custom<Json<DataResponse<UserInfo>>>, ApiError> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    let (username, email, password) = match (
        required(&data.username),
        required(&data.email),
        data.password.as_deref().filter(|p| !p.is_empty()),
    ) {
        (Some(username), Some(email), Some(password)) => (username, email, password),
        _ => {
            return Err(api_error(
                Status::BadRequest,
                "All fields are required",
                "INVALID_INPUT",
                &["Provide username, email and password"],
                conversation_id,
            ))
        }
    };

    let users = database.users();
    match users.exists(username).await {
        Ok(false) => {}
        Ok(true) => return Err(user_exists_error(username, conversation_id)),
        Err(e) => return Err(database_error(e, conversation_id)),
    }

    let password_hash = match auth_config.hash_password(password).await {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {:#}", e);
            return Err(api_error(
                Status::InternalServerError,
                "Signup failed",
                "INTERNAL_ERROR",
                &["Try again in a few moments"],
                conversation_id,
            ));
        }
    };

    // A concurrent signup may win the race after the existence check
    let user = match users.create(username, email, &password_hash).await {
        Ok(user) => user,
        Err(e) if e.downcast_ref::<UserExists>().is_some() => {
            return Err(user_exists_error(username, conversation_id))
        }
        Err(e) => return Err(database_error(e, conversation_id)),
    };

    info!("New user '{}' registered", user.username);
    Ok(Custom(
        Status::Created,
        Json(DataResponse::success(
            "User registered successfully".to_string(),
            UserInfo::from(&user),
            conversation_id,
        )),
    ))
}

pub async fn login_handler(
    request: Json<StandardRequest<LoginRequest>>,
    auth_config: &State<AuthConfig>,
    database: &State<Database>,
) -> Result<Json<DataResponse<LoginData>>, ApiError> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    let (username, password) = match (
        required(&data.username),
        data.password.as_deref().filter(|p| !p.is_empty()),
    ) {
        (Some(username), Some(password)) => (username, password),
        _ => {
            return Err(api_error(
                Status::BadRequest,
                "Username and password are required",
                "INVALID_INPUT",
                &["Provide username and password"],
                conversation_id,
            ))
        }
    };

    let user = match database.users().find_by_username(username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(api_error(
                Status::NotFound,
                "User not found",
                "USER_NOT_FOUND",
                &["Check the username spelling", "Sign up first"],
                conversation_id,
            ))
        }
        Err(e) => return Err(database_error(e, conversation_id)),
    };

    let verified = auth_config
        .verify_password(password, &user.password_hash)
        .await
        .unwrap_or_else(|e| {
            error!("Password verification failed for {}: {:#}", username, e);
            false
        });

    if !verified {
        warn!("Incorrect password for user: {}", username);
        return Err(api_error(
            Status::Unauthorized,
            "Incorrect password",
            "INVALID_CREDENTIALS",
            &["Check your password"],
            conversation_id,
        ));
    }

    let issued = auth_config.issue_token(&user).map_err(|e| {
        error!("Token signing failed: {:#}", e);
        api_error(
            Status::InternalServerError,
            "Login failed",
            "INTERNAL_ERROR",
            &["Try again in a few moments"],
            conversation_id.clone(),
        )
    })?;

    info!("User '{}' logged in", user.username);
    Ok(Json(DataResponse::success(
        format!("Welcome back, {}!", user.username),
        LoginData {
            user: UserInfo::from(&user),
            token: issued.token,
            expires_at: issued.expires_at.to_rfc3339(),
        },
        conversation_id,
    )))
}

pub async fn current_user_handler(
    auth: Result<AuthenticatedUser, AuthError>,
) -> Result<Json<DataResponse<UserInfo>>, ApiError> {
    match auth {
        Ok(auth) => Ok(Json(DataResponse::success(
            format!("Authenticated as {}", auth.username()),
            UserInfo::from(auth.user()),
            None,
        ))),
        Err(AuthError::DatabaseError) => Err(api_error(
            Status::InternalServerError,
            AuthError::DatabaseError.message(),
            "DATABASE_ERROR",
            &["Try again in a few moments"],
            None,
        )),
        Err(e) => Err(api_error(
            Status::Unauthorized,
            e.message(),
            "UNAUTHORIZED",
            &["Log in and send the token as 'Authorization: Bearer <token>'"],
            None,
        )),
    }
}
