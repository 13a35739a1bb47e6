use axum::Json;
use axum::extract::Path;
use axum::routing::{patch, post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::models::*;
use crate::repository;
use crate::state::AppState;

#[derive(Serialize)]
struct OptInResponse {
    updated: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/timetables", get(list_timetables).post(create_timetable))
        .route(
            "/timetables/{id}",
            patch(rename_timetable).delete(delete_timetable),
        )
        .route("/timetables/{id}/select", post(select_timetable))
        .route("/timetables/{id}/schedule", put(replace_schedule))
        .route("/assignments", get(list_assignments).post(create_assignment))
        .route("/assignments/planner", post(add_to_planner))
        .route("/assignments/{id}", patch(update_assignment))
        .route("/assignments/{id}/progress", patch(update_progress))
        .route("/preferences", get(get_preferences).put(save_preferences))
        .route("/recommendations", get(list_recommendations))
        .route("/recommendations/refresh", post(refresh_recommendations))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

// ---- timetables ----

async fn list_timetables(State(state): State<AppState>) -> Result<Json<Vec<Timetable>>, AppError> {
    let timetables = repository::fetch_timetables(&state.db).await?;
    Ok(Json(timetables))
}

async fn create_timetable(
    State(state): State<AppState>,
    Json(req): Json<NewTimetableRequest>,
) -> Result<Json<Timetable>, AppError> {
    let timetable = repository::insert_timetable(&state.db, req.name).await?;
    // The new empty timetable is now current, so recommendations change.
    state.refresher.schedule_refresh().await;
    Ok(Json(timetable))
}

async fn rename_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameTimetableRequest>,
) -> Result<Json<Timetable>, AppError> {
    let timetable = repository::rename_timetable(&state.db, &id, &req.name)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(timetable))
}

async fn delete_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let count = repository::count_timetables(&state.db).await?;
    if count <= 1 {
        return Err(AppError::Conflict(
            "at least one timetable is required".to_string(),
        ));
    }

    let deleted = repository::delete_timetable(&state.db, &id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    repository::ensure_current(&state.db).await?;
    state.refresher.schedule_refresh().await;
    Ok(StatusCode::NO_CONTENT)
}

async fn select_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::set_current_timetable(&state.db, &id).await?;
    if !ok {
        return Err(AppError::NotFound);
    }
    state.refresher.schedule_refresh().await;
    Ok(StatusCode::NO_CONTENT)
}

async fn replace_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceScheduleRequest>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let schedule = repository::replace_schedule(&state.db, &id, &req.schedule)
        .await?
        .ok_or(AppError::NotFound)?;
    state.refresher.schedule_refresh().await;
    Ok(Json(schedule))
}

// ---- assignments ----

async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let assignments = repository::fetch_assignments(&state.db).await?;
    Ok(Json(assignments))
}

async fn create_assignment(
    State(state): State<AppState>,
    Json(req): Json<NewAssignmentRequest>,
) -> Result<Json<Assignment>, AppError> {
    validate_estimated_time(req.estimated_time)?;
    validate_progress(req.progress)?;

    let assignment = repository::insert_assignment(&state.db, req).await?;
    state.refresher.schedule_refresh().await;
    Ok(Json(assignment))
}

async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<Assignment>, AppError> {
    if let Some(estimated_time) = req.estimated_time {
        validate_estimated_time(estimated_time)?;
    }

    let assignment = repository::update_assignment(&state.db, &id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    state.refresher.schedule_refresh().await;
    Ok(Json(assignment))
}

async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ProgressUpdateRequest>,
) -> Result<Json<Assignment>, AppError> {
    validate_progress(Some(req.progress))?;

    let assignment = repository::set_progress(&state.db, &id, req.completed, req.progress)
        .await?
        .ok_or(AppError::NotFound)?;
    state.refresher.schedule_refresh().await;
    Ok(Json(assignment))
}

async fn add_to_planner(
    State(state): State<AppState>,
    Json(req): Json<AddToPlannerRequest>,
) -> Result<Json<OptInResponse>, AppError> {
    let updated = repository::add_to_planner(&state.db, &req.ids).await?;
    state.refresher.schedule_refresh().await;
    Ok(Json(OptInResponse { updated }))
}

// ---- preferences ----

async fn get_preferences(
    State(state): State<AppState>,
) -> Result<Json<Option<Preferences>>, AppError> {
    let preferences = repository::fetch_preferences(&state.db).await?;
    Ok(Json(preferences))
}

async fn save_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    repository::save_preferences(&state.db, &prefs).await?;
    state.refresher.schedule_refresh().await;
    Ok(Json(prefs))
}

// ---- recommendations ----

async fn list_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    Ok(Json(state.refresher.current().await))
}

async fn refresh_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let recommendations = state.refresher.refresh_now().await?;
    Ok(Json(recommendations))
}

// ---- validation ----

fn validate_estimated_time(estimated_time: i64) -> Result<(), AppError> {
    if estimated_time <= 0 {
        return Err(AppError::BadRequest(
            "estimated_time must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_progress(progress: Option<i64>) -> Result<(), AppError> {
    if let Some(progress) = progress {
        if !(0..=100).contains(&progress) {
            return Err(AppError::BadRequest(
                "progress must be between 0 and 100".to_string(),
            ));
        }
    }
    Ok(())
}
