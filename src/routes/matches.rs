use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ActiveStatusResponse, CancelMatchRequest, CancelResponse, ErrorResponse, HealthResponse, JoinMatchRequest,
    MatchStatusQuery, MatchStatusResponse, UserLevelResponse,
};
use crate::routes::{internal_error, AppState};
use crate::services::food_level;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/join", web::post().to(join_match))
        .route("/match/status", web::get().to(match_status))
        .route("/match/cancel", web::delete().to(cancel_match))
        .route("/match/active/{user_id}", web::get().to(active_status))
        .route("/users/{user_id}/level", web::get().to(user_level));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Join matching endpoint
///
/// POST /api/v1/match/join
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "name": "string",
///   "department": "string",
///   "gender": "male|female",
///   "age": 29,
///   "level": "staff",
///   "timeSlot": "12:00",
///   "priceRange": "low|mid|high",
///   "menu": "korean",
///   "preferences": { "similarAge": true, "sameGender": false, "sameLevel": false }
/// }
/// ```
async fn join_match(state: web::Data<AppState>, req: web::Json<JoinMatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for join request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (participant, conditions, preferences) = req.into_inner().into_parts();

    match state
        .engine
        .join_match(participant, conditions, preferences, chrono::Utc::now())
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(MatchStatusResponse::from(outcome)),
        Err(e) => internal_error("Failed to join match", e),
    }
}

/// Status poll endpoint
///
/// GET /api/v1/match/status?matchRequestId={id}&elapsedSeconds={secs}
async fn match_status(state: web::Data<AppState>, query: web::Query<MatchStatusQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .engine
        .match_status(&query.match_request_id, query.elapsed_seconds, chrono::Utc::now())
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(MatchStatusResponse::from(outcome)),
        Err(e) => internal_error("Failed to poll match status", e),
    }
}

/// Cancel endpoint; unknown ids succeed
///
/// DELETE /api/v1/match/cancel
async fn cancel_match(state: web::Data<AppState>, req: web::Json<CancelMatchRequest>) -> impl Responder {
    state.engine.cancel_match(&req.match_request_id).await;
    HttpResponse::Ok().json(CancelResponse { success: true })
}

/// GET /api/v1/match/active/{userId}
async fn active_status(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let status = state.engine.active_status(&path.into_inner(), chrono::Utc::now()).await;
    HttpResponse::Ok().json(ActiveStatusResponse::from(status))
}

/// GET /api/v1/users/{userId}/level
async fn user_level(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    let match_count = state.ledger.match_count(&user_id);

    HttpResponse::Ok().json(UserLevelResponse {
        food_level: food_level(match_count),
        match_count,
        user_id,
    })
}
