// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::{AuthConfig, AuthError, AuthenticatedUser, OptionalAuth};
use crate::core::{ConfigManager, Database, ScoringClient};
use crate::types::AtsScore;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use serde_json::Value;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition",
        ));
    }
}

#[get("/")]
pub async fn home() -> &'static str {
    handlers::home_handler().await
}

#[get("/health")]
pub async fn health(
    auth: OptionalAuth,
    database: &State<Database>,
) -> Result<Json<TextResponse>, ApiError> {
    handlers::health_handler(auth, database).await
}

#[post("/signup", data = "<request>")]
pub async fn signup(
    request: Json<StandardRequest<SignupRequest>>,
    auth_config: &State<AuthConfig>,
    database: &State<Database>,
) -> Result<Custom<Json<DataResponse<UserInfo>>>, ApiError> {
    handlers::signup_handler(request, auth_config, database).await
}

#[post("/login", data = "<request>")]
pub async fn login(
    request: Json<StandardRequest<LoginRequest>>,
    auth_config: &State<AuthConfig>,
    database: &State<Database>,
) -> Result<Json<DataResponse<LoginData>>, ApiError> {
    handlers::login_handler(request, auth_config, database).await
}

#[get("/me")]
pub async fn current_user(
    auth: Result<AuthenticatedUser, AuthError>,
) -> Result<Json<DataResponse<UserInfo>>, ApiError> {
    handlers::current_user_handler(auth).await
}

#[post("/generate_resume", data = "<payload>")]
pub async fn generate_resume(
    payload: Option<Json<Value>>,
    auth: OptionalAuth,
    config: &State<ServerConfig>,
) -> Result<DocxResponse, ApiError> {
    handlers::generate_resume_handler(payload, auth, config).await
}

#[post("/generate", data = "<payload>")]
pub async fn generate(
    payload: Option<Json<Value>>,
    auth: OptionalAuth,
    config: &State<ServerConfig>,
) -> Result<DocxResponse, ApiError> {
    handlers::generate_resume_handler(payload, auth, config).await
}

#[post("/ats-score", data = "<request>")]
pub async fn ats_score(
    request: Json<StandardRequest<ScoreRequest>>,
    auth: OptionalAuth,
    scoring: &State<ScoringService>,
) -> Result<Json<DataResponse<AtsScore>>, ApiError> {
    handlers::ats_score_handler(request, auth, scoring).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(401)]
pub fn unauthorized() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Authentication required".to_string(),
        "UNAUTHORIZED".to_string(),
        vec!["Send 'Authorization: Bearer <token>' from /login".to_string()],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body has unexpected field types".to_string(),
        "INVALID_INPUT".to_string(),
        vec!["Send string values for text fields".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Long-lived collaborators handed to every request as managed state
pub struct AppContext {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: Database,
    pub scoring: ScoringService,
}

impl AppContext {
    pub async fn from_config(config: &ConfigManager) -> Result<Self> {
        let database = Database::new(&config.environment.database_path).await?;
        let scoring = ScoringService {
            client: ScoringClient::from_config(&config.scoring)?,
        };

        Ok(Self {
            server: ServerConfig {
                output_dir: config.environment.output_path.clone(),
            },
            auth: AuthConfig::from_settings(&config.auth),
            database,
            scoring,
        })
    }
}

pub fn build_rocket(figment: Figment, context: AppContext) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(context.server)
        .manage(context.auth)
        .manage(context.database)
        .manage(context.scoring)
        .register(
            "/",
            catchers![bad_request, unauthorized, not_found, unprocessable, internal_error],
        )
        .mount(
            "/",
            routes![
                home,
                health,
                signup,
                login,
                current_user,
                generate_resume,
                generate,
                ats_score,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    config.ensure_directories().await?;

    let context = AppContext::from_config(&config).await?;

    info!("Starting Resume Builder API server");
    info!("Database: {}", config.environment.database_path.display());
    info!("Output directory: {}", config.environment.output_path.display());
    info!(
        "ATS scoring: {}",
        if context.scoring.client.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );
    info!("Server: http://0.0.0.0:{}", config.server.port);

    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.server.port));

    build_rocket(figment, context)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
