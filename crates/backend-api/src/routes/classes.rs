use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tutorhub_classes::{NewClassForm, SessionDraft};

use super::models::{
    requested_role, ChangeRoleRequest, ChangeRoleResponse, ClassDetailResponse,
    ClassDirectoryResponse, CreateClassRequest, CreateClassResponse, CreateSessionRequest,
    CreateSessionResponse, JoinClassRequest, JoinClassResponse, MembershipResponse,
};
use crate::{ApiError, AppState};

#[utoipa::path(
    get,
    path = "/api/classes",
    tag = "Classes",
    responses(
        (status = 200, description = "Classes the caller belongs to, newest first", body = ClassDirectoryResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_classes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ClassDirectoryResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let memberships = state.classes().directory(&caller).await?;

    Ok(Json(ClassDirectoryResponse {
        memberships: memberships
            .into_iter()
            .map(MembershipResponse::from)
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/classes",
    tag = "Classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = CreateClassResponse),
        (status = 400, description = "Invalid class name", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not a tutor yet", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_class(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<CreateClassResponse>), ApiError> {
    let caller = state.caller(&headers).await?;
    let form = NewClassForm {
        name: payload.name,
        description: payload.description,
    };
    let created = state.classes().create_class(&caller, &form).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateClassResponse {
            class: created.class.into(),
            message: created.message,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/classes/join",
    tag = "Classes",
    request_body = JoinClassRequest,
    responses(
        (status = 200, description = "Joined the class", body = JoinClassResponse),
        (status = 400, description = "Missing code or role that cannot be chosen", body = crate::error::ErrorResponse),
        (status = 404, description = "No class with this code", body = crate::error::ErrorResponse),
        (status = 409, description = "Already a member", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn join_class(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<JoinClassRequest>,
) -> Result<Json<JoinClassResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let role = requested_role(&payload.role)?;
    let outcome = state
        .classes()
        .join_by_code(&caller, &payload.class_code, role)
        .await?;

    Ok(Json(JoinClassResponse {
        class: outcome.class.into(),
        role: outcome.role.to_string(),
        message: outcome.message,
        redirect_after_ms: outcome.redirect_after_ms,
    }))
}

#[utoipa::path(
    get,
    path = "/api/classes/{class_id}",
    tag = "Classes",
    params(("class_id" = String, Path, description = "Public class id")),
    responses(
        (status = 200, description = "Class, sessions and the caller's role", body = ClassDetailResponse),
        (status = 404, description = "Class not found", body = crate::error::ErrorResponse)
    ),
    security((), ("bearerAuth" = []))
)]
pub async fn get_class(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_id): Path<String>,
) -> Result<Json<ClassDetailResponse>, ApiError> {
    let caller = state.optional_caller(&headers).await?;
    let detail = state.details().load(caller.as_ref(), &class_id).await?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/api/classes/{class_id}/role",
    tag = "Classes",
    params(("class_id" = String, Path, description = "Public class id")),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed, or nothing to do", body = ChangeRoleResponse),
        (status = 400, description = "Role change not allowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Class not found", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn change_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_id): Path<String>,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<Json<ChangeRoleResponse>, ApiError> {
    let caller = state.caller(&headers).await?;
    let next = requested_role(&payload.role)?;
    let mut detail = state.details().load(Some(&caller), &class_id).await?;

    let confirmed = payload.confirmed;
    let message = state
        .details()
        .change_role(&mut detail, &caller, next, &move |_: &str| confirmed)
        .await?;

    Ok(Json(ChangeRoleResponse {
        changed: message.is_some(),
        my_role: detail.my_role.map(|role| role.to_string()),
        message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/classes/{class_id}/sessions",
    tag = "Classes",
    params(("class_id" = String, Path, description = "Public class id")),
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
        (status = 200, description = "Request token replayed; the original session", body = CreateSessionResponse),
        (status = 400, description = "Invalid session input", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not the class tutor", body = crate::error::ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_id): Path<String>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let caller = state.caller(&headers).await?;
    let mut detail = state.details().load(Some(&caller), &class_id).await?;

    let draft: SessionDraft = payload.into();
    let outcome = state
        .details()
        .create_session(&mut detail, &caller, &draft)
        .await?;

    let status = if outcome.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(CreateSessionResponse::new(outcome, detail))))
}
