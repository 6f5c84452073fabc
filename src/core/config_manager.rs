// src/core/config_manager.rs
//! Unified configuration management: config.yaml paths plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
    pub database_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        Ok(Self {
            environment: Self::load_environment()?,
            server: Self::load_server()?,
            auth: Self::load_auth()?,
            scoring: Self::load_scoring()?,
        })
    }

    fn environment_name() -> String {
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    }

    /// Paths come from config.yaml when present, otherwise from the base directory
    fn load_environment() -> Result<EnvironmentConfig> {
        let env = Self::environment_name();
        info!("Loading environment configuration for: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        let config_path = PathBuf::from(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", CONFIG_FILE))?;
            Self::parse_environment(&content, &env)?
        } else {
            EnvironmentConfig {
                output_path: PathBuf::from("out"),
                database_path: PathBuf::from("resume_builder.db"),
            }
        };

        Ok(EnvironmentConfig {
            output_path: resolve_path(&base_dir, &config.output_path),
            database_path: resolve_path(&base_dir, &config.database_path),
        })
    }

    fn parse_environment(content: &str, env: &str) -> Result<EnvironmentConfig> {
        let config_file: ConfigFile = serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        Ok(match env {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn load_server() -> Result<ServerSettings> {
        let port = match std::env::var("PORT").or_else(|_| std::env::var("ROCKET_PORT")) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(ServerSettings { port })
    }

    fn load_auth() -> Result<AuthSettings> {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set, tokens will not survive a restart");
                format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
            }
        };

        Ok(AuthSettings {
            jwt_secret,
            token_ttl_hours: env_parse("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?,
            bcrypt_cost: env_parse("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    fn load_scoring() -> Result<ScoringConfig> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("GEMINI_API_KEY not set, ATS scoring is disabled");
        }

        Ok(ScoringConfig {
            api_key,
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            timeout_seconds: env_parse("SCORING_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?,
        })
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.environment.output_path).await?;
        if let Some(db_parent) = self.environment.database_path.parent() {
            FsOps::ensure_dir_exists(db_parent).await?;
        }

        Ok(())
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
