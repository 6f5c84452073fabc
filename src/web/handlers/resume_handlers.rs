// src/web/handlers/resume_handlers.rs
//! Resume DOCX generation handler
use crate::auth::OptionalAuth;
use crate::core::FsOps;
use crate::resume::{DocumentAssembler, Normalizer};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;
use tracing::{debug, error, info, info_span, warn, Instrument};

fn generation_error(message: String) -> ApiError {
    api_error(
        Status::InternalServerError,
        message,
        "GENERATION_ERROR",
        &[
            "Check that the output directory is writable",
            "Try again in a few moments",
        ],
        None,
    )
}

pub async fn generate_resume_handler(
    payload: Option<Json<Value>>,
    auth: OptionalAuth,
    config: &State<ServerConfig>,
) -> Result<DocxResponse, ApiError> {
    let raw = match payload {
        Some(Json(raw)) if raw.is_object() => raw,
        Some(_) => {
            return Err(api_error(
                Status::BadRequest,
                "Resume data must be a JSON object",
                "INVALID_INPUT",
                &["Send the resume fields as a JSON object"],
                None,
            ))
        }
        None => {
            return Err(api_error(
                Status::BadRequest,
                "No user data provided",
                "INVALID_INPUT",
                &[
                    "Send the resume as a JSON request body",
                    "Set 'Content-Type: application/json'",
                ],
                None,
            ))
        }
    };

    let span = info_span!("resume_generation", user = %auth.username());
    generate(raw, config.output_dir.clone())
        .instrument(span)
        .await
}

async fn generate(raw: Value, output_dir: std::path::PathBuf) -> Result<DocxResponse, ApiError> {
    let record = Normalizer::normalize(&raw);
    let filename = FsOps::download_filename(&record.full_name);
    debug!("Normalized resume record: {:?}", record);

    if let Err(e) = FsOps::ensure_dir_exists(&output_dir).await {
        error!("Failed to prepare output directory: {:#}", e);
        return Err(generation_error("Failed to prepare output directory".to_string()));
    }

    let output_path = FsOps::unique_output_path(&output_dir);
    let write_path = output_path.clone();
    let written =
        tokio::task::spawn_blocking(move || DocumentAssembler::write(&record, &write_path)).await;

    match written {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            error!("Resume generation failed: {:#}", e);
            if let Err(cleanup) = FsOps::remove_file_if_exists(&output_path).await {
                warn!("Failed to remove partial resume file: {:#}", cleanup);
            }
            return Err(generation_error(format!("Error generating resume: {}", e)));
        }
        Err(e) => {
            error!("Resume generation task failed: {}", e);
            return Err(generation_error("Error generating resume".to_string()));
        }
    }

    let data = FsOps::take_file(&output_path).await.map_err(|e| {
        error!("Failed to read generated resume: {:#}", e);
        generation_error("Failed to read generated resume".to_string())
    })?;

    info!(
        "Resume generated, size: {}, filename: {}",
        data.len(),
        filename
    );
    Ok(DocxResponse::with_filename(data, filename))
}
