// src/core/mod.rs
//! Core services shared by the web server and the CLI

pub mod config_manager;
pub mod database;
pub mod fs_ops;
pub mod scoring_client;

pub use config_manager::ConfigManager;
pub use database::{Database, UserExists};
pub use fs_ops::FsOps;
pub use scoring_client::ScoringClient;
