//! Axum route handlers for the Resume API.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::resume::models::{
    CreateExperienceRequest, CreateResumeRequest, CreateSkillRequest, ExperienceCreatedResponse,
    MessageResponse, ResumeAggregate, ResumeCreatedResponse, ResumeUpdatedResponse,
    SkillCreatedResponse, UpdatePersonalInfoRequest,
};
use crate::state::AppState;

/// GET /api/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeAggregate>, AppError> {
    Ok(Json(state.resume.get_resume(None).await?))
}

/// GET /api/resume/:id
pub async fn handle_get_resume_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ResumeAggregate>, AppError> {
    Ok(Json(state.resume.get_resume(Some(id)).await?))
}

/// POST /api/resume
pub async fn handle_create_resume(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeCreatedResponse>), AppError> {
    let personal_info_id = state.resume.create_resume(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeCreatedResponse {
            message: "Resume created successfully".to_string(),
            personal_info_id,
        }),
    ))
}

/// PUT /api/resume/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdatePersonalInfoRequest>,
) -> Result<Json<ResumeUpdatedResponse>, AppError> {
    let updated_personal_info = state.resume.update_personal_info(id, req).await?;
    Ok(Json(ResumeUpdatedResponse {
        message: "Resume updated successfully".to_string(),
        updated_personal_info,
    }))
}

/// DELETE /api/resume/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state.resume.delete_resume(id).await?;
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully".to_string(),
    }))
}

/// POST /api/resume/experiences
pub async fn handle_create_experience(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateExperienceRequest>,
) -> Result<(StatusCode, Json<ExperienceCreatedResponse>), AppError> {
    let experience = state.resume.add_experience(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExperienceCreatedResponse {
            message: "Experience added successfully".to_string(),
            experience,
        }),
    ))
}

/// POST /api/resume/skills
pub async fn handle_create_skill(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSkillRequest>,
) -> Result<(StatusCode, Json<SkillCreatedResponse>), AppError> {
    let skill = state.resume.add_skill(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(SkillCreatedResponse {
            message: "Skill added successfully".to_string(),
            skill,
        }),
    ))
}
