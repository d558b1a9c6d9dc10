use std::sync::Arc;

use axum::http::HeaderMap;
use sqlx::SqlitePool;
use tutorhub_auth::{AuthSession, Authenticator, User};
use tutorhub_classes::{
    Caller, ClassDetailService, ClassService, SqliteClassroomStore, TutorService,
};
use tutorhub_config::WorkflowConfig;

use crate::util::{optional_bearer, require_bearer};
use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    classes: Arc<ClassService<SqliteClassroomStore>>,
    details: Arc<ClassDetailService<SqliteClassroomStore>>,
    tutors: Arc<TutorService<SqliteClassroomStore>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, authenticator: Authenticator, workflow: WorkflowConfig) -> Self {
        let store = SqliteClassroomStore::new(pool);

        Self {
            authenticator,
            classes: Arc::new(ClassService::new(store.clone(), workflow.clone())),
            details: Arc::new(ClassDetailService::new(store.clone(), workflow)),
            tutors: Arc::new(TutorService::new(store)),
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn classes(&self) -> &ClassService<SqliteClassroomStore> {
        &self.classes
    }

    pub fn details(&self) -> &ClassDetailService<SqliteClassroomStore> {
        &self.details
    }

    pub fn tutors(&self) -> &TutorService<SqliteClassroomStore> {
        &self.tutors
    }

    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }

    /// The caller behind a required bearer token.
    pub async fn caller(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        let token = require_bearer(headers)?;
        let (user, _) = self.authenticate(&token).await?;
        Ok(Caller::new(user.id, user.email))
    }

    /// Like [`AppState::caller`], but anonymous requests resolve to `None`.
    pub async fn optional_caller(&self, headers: &HeaderMap) -> Result<Option<Caller>, ApiError> {
        match optional_bearer(headers)? {
            Some(token) => {
                let (user, _) = self.authenticate(&token).await?;
                Ok(Some(Caller::new(user.id, user.email)))
            }
            None => Ok(None),
        }
    }
}
