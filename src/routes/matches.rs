use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{filter_program_year, Matcher};
use crate::models::{ErrorResponse, GenerateMatchRequest, GenerateMatchResponse, HealthResponse, Participant};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub max_roster_size: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/config", web::get().to(get_config))
        .route("/matches/generate", web::post().to(generate_match));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Effective scoring weights
///
/// GET /api/v1/matches/config
async fn get_config(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.matcher.weights())
}

fn validation_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Generate match groups endpoint
///
/// POST /api/v1/matches/generate
///
/// Request body:
/// ```json
/// {
///   "matchName": "string",
///   "participants": [{ "id": "string", "full_name": "string", "role": "Mentee|Mentor", "user_data": {} }],
///   "config": { "majorWorkingFieldMatch": 2 },
///   "programYear": 2025
/// }
/// ```
async fn generate_match(
    state: web::Data<AppState>,
    req: web::Json<GenerateMatchRequest>,
) -> impl Responder {
    let req = req.into_inner();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_match request: {}", errors);
        return validation_error(errors.to_string());
    }

    if req.participants.len() > state.max_roster_size {
        return validation_error(format!(
            "participants: roster of {} exceeds the limit of {}",
            req.participants.len(),
            state.max_roster_size
        ));
    }

    let overrides = req.config.unwrap_or_default();
    if let Err(errors) = overrides.validate() {
        return validation_error(errors.to_string());
    }

    let weights = overrides.merge_over(state.matcher.weights());
    if !weights.is_valid() {
        return validation_error("config: weights must be finite and non-negative".to_string());
    }

    let participants = match Participant::from_profile_rows(req.participants) {
        Ok(participants) => participants,
        Err(e) => {
            tracing::info!("Invalid profile row in generate_match request: {}", e);
            return validation_error(format!("participants: {}", e));
        }
    };

    let roster: Vec<Participant> = match req.program_year {
        Some(year) => filter_program_year(&participants, year),
        None => participants,
    };

    tracing::info!(
        "Generating match {:?} for roster of {} participants",
        req.match_name,
        roster.len()
    );

    let result = match state
        .matcher
        .generate_groups_with(&roster, req.match_name.as_deref(), &overrides)
    {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Match generation rejected: {}", e);
            return HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Cannot generate match".to_string(),
                message: e.to_string(),
                status_code: 422,
            });
        }
    };

    let mentee_count = roster.iter().filter(|p| p.as_mentee().is_some()).count();
    let max_group_size = Matcher::max_group_size(mentee_count, roster.len() - mentee_count);

    let response = GenerateMatchResponse {
        mentorships: result.mentorships(),
        stats: result.stats(),
        max_group_size,
        match_result: result,
    };

    tracing::info!(
        "Returning match '{}' with {} pairs (average rate {:.2})",
        response.match_result.match_name,
        response.stats.total_pairs,
        response.stats.average_match_rate
    );

    HttpResponse::Ok().json(response)
}
