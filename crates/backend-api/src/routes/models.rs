use serde::{Deserialize, Serialize};
use tutorhub_classes::{
    messages, ClassDetail, SessionDraft, SessionOutcome, TutorForm, TutorGate,
};
use tutorhub_database::{Class, ClassSession, MemberRole, MembershipWithClass, Workspace};
use utoipa::ToSchema;

use crate::ApiError;

/// Parse a role name sent by a client. Unknown names get the same message the
/// workflows use for a role that cannot be chosen; `tutor` is passed through
/// so the workflow reports it in its own check order.
pub fn requested_role(raw: &str) -> Result<MemberRole, ApiError> {
    MemberRole::parse(raw.trim())
        .ok_or_else(|| ApiError::bad_request(messages::ROLE_NOT_SELECTABLE))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub class_code: String,
    pub created_at: String,
}

impl From<Class> for ClassResponse {
    fn from(class: Class) -> Self {
        Self {
            id: class.public_id,
            name: class.name,
            description: class.description,
            class_code: class.class_code,
            created_at: class.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassSessionResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub start_at: String,
    pub end_at: String,
    pub status: String,
    pub created_at: String,
}

impl From<ClassSession> for ClassSessionResponse {
    fn from(session: ClassSession) -> Self {
        Self {
            id: session.public_id,
            title: session.title,
            note: session.note,
            start_at: session.start_at,
            end_at: session.end_at,
            status: session.status,
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipResponse {
    pub role: String,
    pub joined_at: String,
    /// Absent when the class no longer resolves.
    pub class: Option<ClassResponse>,
}

impl From<MembershipWithClass> for MembershipResponse {
    fn from(membership: MembershipWithClass) -> Self {
        Self {
            role: membership.role.to_string(),
            joined_at: membership.joined_at,
            class: membership.class.map(ClassResponse::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassDirectoryResponse {
    pub memberships: Vec<MembershipResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassDetailResponse {
    pub class: ClassResponse,
    pub sessions: Vec<ClassSessionResponse>,
    /// The caller's role, or absent for a read-only view.
    pub my_role: Option<String>,
}

impl From<ClassDetail> for ClassDetailResponse {
    fn from(detail: ClassDetail) -> Self {
        Self {
            class: detail.class.into(),
            sessions: sessions(detail.sessions),
            my_role: detail.my_role.map(|role| role.to_string()),
        }
    }
}

fn sessions(sessions: Vec<ClassSession>) -> Vec<ClassSessionResponse> {
    sessions.into_iter().map(ClassSessionResponse::from).collect()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClassRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateClassResponse {
    pub class: ClassResponse,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinClassRequest {
    pub class_code: String,
    /// `student` or `parent`.
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JoinClassResponse {
    pub class: ClassResponse,
    pub role: String,
    pub message: String,
    /// Navigate back to the class directory after this many milliseconds.
    pub redirect_after_ms: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    pub role: String,
    /// The user confirmed the change; without it nothing is written.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeRoleResponse {
    pub changed: bool,
    pub my_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub title: String,
    pub start_at: String,
    pub end_at: String,
    /// Client-generated token that makes a retried submit return the same session.
    #[serde(default)]
    pub request_token: Option<String>,
}

impl From<CreateSessionRequest> for SessionDraft {
    fn from(request: CreateSessionRequest) -> Self {
        Self {
            title: request.title,
            start_at: request.start_at,
            end_at: request.end_at,
            request_token: request.request_token,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSessionResponse {
    pub session: ClassSessionResponse,
    pub replayed: bool,
    pub message: String,
    /// Sessions as last loaded; stale when `sessions_error` is set.
    pub sessions: Vec<ClassSessionResponse>,
    /// Why the list could not be refreshed after the insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_error: Option<String>,
}

impl CreateSessionResponse {
    pub fn new(outcome: SessionOutcome, detail: ClassDetail) -> Self {
        Self {
            session: outcome.session.into(),
            replayed: outcome.replayed,
            message: outcome.message,
            sessions: sessions(detail.sessions),
            sessions_error: outcome.sessions_error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TutorFormBody {
    pub bio: String,
    pub subjects: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_detail: String,
}

impl From<TutorForm> for TutorFormBody {
    fn from(form: TutorForm) -> Self {
        Self {
            bio: form.bio,
            subjects: form.subjects,
            payment_method: form.payment_method,
            payment_detail: form.payment_detail,
        }
    }
}

impl From<TutorFormBody> for TutorForm {
    fn from(body: TutorFormBody) -> Self {
        Self {
            bio: body.bio,
            subjects: body.subjects,
            payment_method: body.payment_method,
            payment_detail: body.payment_detail,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TutorGateResponse {
    pub is_tutor: bool,
    pub form: TutorFormBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TutorGateResponse {
    pub fn new(gate: TutorGate, message: Option<String>) -> Self {
        Self {
            is_tutor: gate.is_tutor,
            form: gate.form.into(),
            message,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OnboardingRequest {
    /// Defaults to "My Tutor Workspace".
    #[serde(default)]
    pub workspace_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<Workspace> for WorkspaceResponse {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.public_id,
            name: workspace.name,
            created_at: workspace.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OnboardingResponse {
    pub workspace: WorkspaceResponse,
    pub message: String,
}
