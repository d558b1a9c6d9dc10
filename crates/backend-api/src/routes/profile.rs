use axum::{extract::State, http::HeaderMap, Json};
use tutorhub_classes::TutorForm;

use super::models::{
    OnboardingRequest, OnboardingResponse, TutorFormBody, TutorGateResponse,
};
use crate::{ApiError, AppState};

#[utoipa::path(
    get,
    path = "/api/profile/tutor",
    tag = "Profile",
    responses(
        (status = 200, description = "Tutor gate state with form prefill", body = TutorGateResponse),
        (status = 404, description = "Profile not found", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn tutor_gate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TutorGateResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let gate = state.tutors().load_gate(&caller).await?;
    Ok(Json(TutorGateResponse::new(gate, None)))
}

#[utoipa::path(
    post,
    path = "/api/profile/tutor",
    tag = "Profile",
    request_body = TutorFormBody,
    responses(
        (status = 200, description = "Profile upgraded to tutor", body = TutorGateResponse),
        (status = 400, description = "Bio too short or subjects missing", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn upgrade_to_tutor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TutorFormBody>,
) -> Result<Json<TutorGateResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let tutors = state.tutors();

    let mut gate = tutors.load_gate(&caller).await?;
    let form = TutorForm::from(payload);
    let message = tutors.upgrade(&mut gate, &caller, &form).await?;

    Ok(Json(TutorGateResponse::new(gate, Some(message))))
}

#[utoipa::path(
    post,
    path = "/api/onboarding",
    tag = "Profile",
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Workspace created and profile marked as tutor", body = OnboardingResponse),
        (status = 400, description = "Workspace name missing", body = crate::error::ErrorResponse),
        (status = 500, description = "Workspace created but the profile update failed", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn onboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let outcome = state
        .tutors()
        .onboard(&caller, payload.workspace_name.as_deref())
        .await?;

    Ok(Json(OnboardingResponse {
        workspace: outcome.workspace.into(),
        message: outcome.message,
    }))
}
