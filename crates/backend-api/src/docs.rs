use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::sign_up,
        crate::routes::auth::sign_in,
        crate::routes::auth::current_user,
        crate::routes::classes::list_classes,
        crate::routes::classes::create_class,
        crate::routes::classes::join_class,
        crate::routes::classes::get_class,
        crate::routes::classes::change_role,
        crate::routes::classes::create_session,
        crate::routes::profile::tutor_gate,
        crate::routes::profile::upgrade_to_tutor,
        crate::routes::profile::onboard
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::auth::CredentialsRequest,
            crate::routes::auth::UserResponse,
            crate::routes::auth::SessionResponse,
            crate::routes::models::ClassResponse,
            crate::routes::models::ClassSessionResponse,
            crate::routes::models::MembershipResponse,
            crate::routes::models::ClassDirectoryResponse,
            crate::routes::models::ClassDetailResponse,
            crate::routes::models::CreateClassRequest,
            crate::routes::models::CreateClassResponse,
            crate::routes::models::JoinClassRequest,
            crate::routes::models::JoinClassResponse,
            crate::routes::models::ChangeRoleRequest,
            crate::routes::models::ChangeRoleResponse,
            crate::routes::models::CreateSessionRequest,
            crate::routes::models::CreateSessionResponse,
            crate::routes::models::TutorFormBody,
            crate::routes::models::TutorGateResponse,
            crate::routes::models::OnboardingRequest,
            crate::routes::models::WorkspaceResponse,
            crate::routes::models::OnboardingResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Auth", description = "Sign-up, sign-in and the current user"),
        (name = "Classes", description = "Class directory, joining, roles and sessions"),
        (name = "Profile", description = "Tutor upgrade and workspace onboarding")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("Bearer".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}
