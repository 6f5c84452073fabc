// src/auth.rs
use crate::core::config_manager::AuthSettings;
use crate::core::database::{Database, User};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub uid: i64,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct IssuedToken {
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
}

pub struct AuthConfig {
    jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, token_ttl_hours: i64, bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.clone(),
            settings.token_ttl_hours,
            settings.bcrypt_cost,
        )
    }

    /// bcrypt is CPU-bound, so it runs off the async workers
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("Password hashing task failed")?
            .context("Failed to hash password")
    }

    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("Password verification task failed")?
            .context("Stored password hash is invalid")
    }

    pub fn issue_token(&self, user: &User) -> Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.token_ttl_hours);

        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .context("Failed to sign session token")?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }
}

/// User resolved from a valid bearer token
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let database = match req.guard::<&State<Database>>().await {
            Outcome::Success(db) => db,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
            None => {
                return Outcome::Error((Status::Unauthorized, AuthError::MissingToken));
            }
        };

        let claims = match auth_config.verify_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Token verification failed: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::TokenVerificationFailed));
            }
        };

        let user = match database.users().find_by_username(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Token for unknown user: {}", claims.sub);
                return Outcome::Error((Status::Unauthorized, AuthError::UnknownUser));
            }
            Err(e) => {
                error!("Database lookup failed: {}", e);
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        info!("User {} authenticated", user.username);
        Outcome::Success(AuthenticatedUser { user })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    UnknownUser,
    DatabaseError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::UnknownUser => "User no longer exists",
            AuthError::DatabaseError => "Database error occurred",
        }
    }
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

impl OptionalAuth {
    pub fn username(&self) -> &str {
        self.user
            .as_ref()
            .map(AuthenticatedUser::username)
            .unwrap_or("anonymous")
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth { user: Some(auth) }),
            _ => Outcome::Success(OptionalAuth { user: None }),
        }
    }
}
