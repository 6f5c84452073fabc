// src/web/handlers/system_handlers.rs
use crate::auth::OptionalAuth;
use crate::core::Database;
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn home_handler() -> &'static str {
    "Resume Builder API is running!"
}

pub async fn health_handler(
    auth: OptionalAuth,
    database: &State<Database>,
) -> Result<Json<TextResponse>, ApiError> {
    info!("Health check by {}", auth.username());

    if let Err(e) = database.health_check().await {
        error!("Health check failed: {:#}", e);
        return Err(api_error(
            Status::ServiceUnavailable,
            "Database unavailable",
            "DATABASE_ERROR",
            &["Check the database file and permissions"],
            None,
        ));
    }

    Ok(Json(TextResponse::success("OK".to_string(), None)))
}
