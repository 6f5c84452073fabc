// src/web/handlers/scoring_handlers.rs
use crate::auth::OptionalAuth;
use crate::resume::{DocumentAssembler, Normalizer};
use crate::types::AtsScore;
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

/// Resume side of the comparison: explicit text first, else the flattened record
pub fn resolve_resume_text(request: &ScoreRequest) -> Option<String> {
    if let Some(text) = request.resume_text.as_deref().map(str::trim) {
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    let record = Normalizer::normalize(request.resume.as_ref()?);
    let text = DocumentAssembler::assemble(&record).to_plain_text();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub async fn ats_score_handler(
    request: Json<StandardRequest<ScoreRequest>>,
    auth: OptionalAuth,
    scoring: &State<ScoringService>,
) -> Result<Json<DataResponse<AtsScore>>, ApiError> {
    let conversation_id = request.conversation_id();

    let job_description = request
        .data
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|j| !j.is_empty());

    let resume_text = resolve_resume_text(&request.data);
    let (resume_text, job_description) = match (resume_text, job_description) {
        (Some(resume), Some(job)) => (resume, job),
        _ => {
            return Err(api_error(
                Status::BadRequest,
                "Resume and job description are required",
                "INVALID_INPUT",
                &[
                    "Provide 'resume_text' or a 'resume' record",
                    "Provide 'job_description'",
                ],
                conversation_id,
            ))
        }
    };

    let client = match &scoring.client {
        Some(client) => client,
        None => {
            return Err(api_error(
                Status::ServiceUnavailable,
                "ATS scoring is not configured",
                "SCORING_DISABLED",
                &["Set GEMINI_API_KEY on the server"],
                conversation_id,
            ))
        }
    };

    info!(
        "ATS scoring requested by {} with model {}",
        auth.username(),
        client.model()
    );

    match client.score(&resume_text, job_description).await {
        Ok(result) => Ok(Json(DataResponse::success(
            "Resume scored".to_string(),
            result,
            conversation_id,
        ))),
        Err(e) => {
            error!("ATS scoring failed: {:#}", e);
            Err(api_error(
                Status::BadGateway,
                format!("Scoring failed: {}", e),
                "SCORING_SERVICE_ERROR",
                &["Try again in a few moments"],
                conversation_id,
            ))
        }
    }
}
