use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tutorhub_database::{
    Class, ClassMember, ClassRepository, ClassSession, ClassSessionRepository, CreateClassRequest,
    CreateClassSessionRequest, DatabaseResult, MemberRepository, MemberRole, MembershipWithClass,
    Profile, ProfileRepository, TutorDetails, Workspace, WorkspaceRepository,
};

use super::ClassroomStore;

/// `ClassroomStore` backed by the SQLite repositories.
#[derive(Clone)]
pub struct SqliteClassroomStore {
    inner: Arc<Repositories>,
}

struct Repositories {
    classes: ClassRepository,
    members: MemberRepository,
    sessions: ClassSessionRepository,
    profiles: ProfileRepository,
    workspaces: WorkspaceRepository,
}

impl SqliteClassroomStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(Repositories {
                classes: ClassRepository::new(pool.clone()),
                members: MemberRepository::new(pool.clone()),
                sessions: ClassSessionRepository::new(pool.clone()),
                profiles: ProfileRepository::new(pool.clone()),
                workspaces: WorkspaceRepository::new(pool),
            }),
        }
    }
}

#[async_trait]
impl ClassroomStore for SqliteClassroomStore {
    async fn list_memberships(&self, user_id: i64) -> DatabaseResult<Vec<MembershipWithClass>> {
        self.inner.members.list_for_user(user_id).await
    }

    async fn find_class_by_code(&self, class_code: &str) -> DatabaseResult<Option<Class>> {
        self.inner.classes.find_by_code(class_code).await
    }

    async fn find_class(&self, public_id: &str) -> DatabaseResult<Option<Class>> {
        self.inner.classes.find_by_public_id(public_id).await
    }

    async fn find_membership(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> DatabaseResult<Option<ClassMember>> {
        self.inner.members.find(class_id, user_id).await
    }

    async fn insert_membership(
        &self,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> DatabaseResult<ClassMember> {
        self.inner.members.create(class_id, user_id, role).await
    }

    async fn update_member_role(
        &self,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> DatabaseResult<()> {
        self.inner.members.update_role(class_id, user_id, role).await
    }

    async fn list_sessions(&self, class_id: i64) -> DatabaseResult<Vec<ClassSession>> {
        self.inner.sessions.list_for_class(class_id).await
    }

    async fn find_session_by_token(&self, token: &str) -> DatabaseResult<Option<ClassSession>> {
        self.inner.sessions.find_by_request_token(token).await
    }

    async fn insert_session(
        &self,
        request: CreateClassSessionRequest,
    ) -> DatabaseResult<ClassSession> {
        self.inner.sessions.create(&request).await
    }

    async fn insert_class_with_tutor(&self, request: CreateClassRequest) -> DatabaseResult<Class> {
        self.inner.classes.create_with_tutor(&request).await
    }

    async fn find_profile(&self, user_id: i64) -> DatabaseResult<Option<Profile>> {
        self.inner.profiles.find_by_user(user_id).await
    }

    async fn upgrade_profile(&self, user_id: i64, details: TutorDetails) -> DatabaseResult<()> {
        self.inner.profiles.upgrade_to_tutor(user_id, &details).await
    }

    async fn insert_workspace(&self, owner_user_id: i64, name: &str) -> DatabaseResult<Workspace> {
        self.inner.workspaces.create(owner_user_id, name).await
    }

    async fn assign_default_workspace(
        &self,
        user_id: i64,
        workspace_id: i64,
    ) -> DatabaseResult<()> {
        self.inner
            .profiles
            .assign_workspace(user_id, workspace_id)
            .await
    }

    async fn delete_workspace(&self, workspace_id: i64) -> DatabaseResult<()> {
        self.inner.workspaces.delete(workspace_id).await
    }
}
