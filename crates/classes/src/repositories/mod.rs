//! Store abstraction the workflows run against.

mod sqlite_store;

use async_trait::async_trait;
use tutorhub_database::{
    Class, ClassMember, ClassSession, CreateClassRequest, CreateClassSessionRequest,
    DatabaseResult, MemberRole, MembershipWithClass, Profile, TutorDetails, Workspace,
};

pub use sqlite_store::SqliteClassroomStore;

/// Every read and write a workflow issues. Each call is a single store
/// round-trip; sequencing lives in the services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassroomStore: Send + Sync {
    async fn list_memberships(&self, user_id: i64) -> DatabaseResult<Vec<MembershipWithClass>>;

    async fn find_class_by_code(&self, class_code: &str) -> DatabaseResult<Option<Class>>;

    async fn find_class(&self, public_id: &str) -> DatabaseResult<Option<Class>>;

    async fn find_membership(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> DatabaseResult<Option<ClassMember>>;

    async fn insert_membership(
        &self,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> DatabaseResult<ClassMember>;

    async fn update_member_role(
        &self,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> DatabaseResult<()>;

    async fn list_sessions(&self, class_id: i64) -> DatabaseResult<Vec<ClassSession>>;

    async fn find_session_by_token(&self, token: &str) -> DatabaseResult<Option<ClassSession>>;

    async fn insert_session(
        &self,
        request: CreateClassSessionRequest,
    ) -> DatabaseResult<ClassSession>;

    async fn insert_class_with_tutor(&self, request: CreateClassRequest) -> DatabaseResult<Class>;

    async fn find_profile(&self, user_id: i64) -> DatabaseResult<Option<Profile>>;

    async fn upgrade_profile(&self, user_id: i64, details: TutorDetails) -> DatabaseResult<()>;

    async fn insert_workspace(&self, owner_user_id: i64, name: &str) -> DatabaseResult<Workspace>;

    async fn assign_default_workspace(&self, user_id: i64, workspace_id: i64)
        -> DatabaseResult<()>;

    async fn delete_workspace(&self, workspace_id: i64) -> DatabaseResult<()>;
}
