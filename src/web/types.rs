// src/web/types.rs

use rocket::http::{ContentType, Status};
use rocket::response::status::Custom;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use std::path::PathBuf;

use crate::core::ScoringClient;
use crate::resume::DOCX_MIME_TYPE;

pub struct DocxResponse {
    pub data: Vec<u8>,
    pub filename: String,
}

impl DocxResponse {
    pub fn with_filename(data: Vec<u8>, filename: String) -> Self {
        Self { data, filename }
    }
}

impl<'r> Responder<'r, 'static> for DocxResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::parse_flexible(DOCX_MIME_TYPE).unwrap_or(ContentType::Binary))
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}

pub struct ServerConfig {
    pub output_dir: PathBuf,
}

/// Scoring collaborator; `None` when no API key is configured
pub struct ScoringService {
    pub client: Option<ScoringClient>,
}

// ===== Requests =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ScoreRequest {
    pub resume_text: Option<String>,
    /// Resume record, used when `resume_text` is absent
    pub resume: Option<serde_json::Value>,
    pub job_description: Option<String>,
}

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

// ===== Response payloads =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<&crate::core::database::User> for UserInfo {
    fn from(user: &crate::core::database::User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginData {
    pub user: UserInfo,
    pub token: String,
    pub expires_at: String,
}

// ===== Standard response envelope =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

/// Error envelope paired with its HTTP status
pub type ApiError = Custom<Json<StandardErrorResponse>>;

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }

    pub fn with_status(self, status: Status) -> ApiError {
        Custom(status, Json(self))
    }
}

/// Shorthand for building an `ApiError`
pub fn api_error(
    status: Status,
    error: impl Into<String>,
    error_code: &str,
    suggestions: &[&str],
    conversation_id: Option<String>,
) -> ApiError {
    StandardErrorResponse::new(
        error.into(),
        error_code.to_string(),
        suggestions.iter().map(|s| s.to_string()).collect(),
        conversation_id,
    )
    .with_status(status)
}
