//! Class detail page: loading, role changes and session scheduling.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use tutorhub_config::WorkflowConfig;
use tutorhub_database::{format_timestamp, ClassSession, CreateClassSessionRequest, MemberRole};

use crate::repositories::ClassroomStore;
use crate::types::{
    messages, Caller, ClassDetail, ClassError, ClassResult, Confirm, SessionDraft,
    SessionOutcome,
};
use crate::utils::Validator;

pub struct ClassDetailService<S> {
    store: S,
    workflow: WorkflowConfig,
}

impl<S: ClassroomStore> ClassDetailService<S> {
    pub fn new(store: S, workflow: WorkflowConfig) -> Self {
        Self { store, workflow }
    }

    /// Load a class, its sessions and the caller's role in it.
    ///
    /// Without a caller, or when the caller is not a member, the detail is
    /// returned read-only with `my_role: None`.
    pub async fn load(&self, caller: Option<&Caller>, public_id: &str) -> ClassResult<ClassDetail> {
        let class = self
            .store
            .find_class(public_id)
            .await?
            .ok_or_else(|| ClassError::not_found(messages::CLASS_NOT_FOUND))?;

        let sessions = self.store.list_sessions(class.id).await?;

        let my_role = match caller {
            Some(caller) => self
                .store
                .find_membership(class.id, caller.user_id)
                .await?
                .map(|member| member.role),
            None => None,
        };

        Ok(ClassDetail {
            class,
            sessions,
            my_role,
        })
    }

    /// Switch the caller between student and parent.
    ///
    /// Returns `Ok(None)` when nothing was written: the role is unchanged or
    /// the confirmation was declined. On a store failure `detail` is left as
    /// it was.
    pub async fn change_role<C>(
        &self,
        detail: &mut ClassDetail,
        caller: &Caller,
        next: MemberRole,
        confirm: &C,
    ) -> ClassResult<Option<String>>
    where
        C: Confirm + Sync + ?Sized,
    {
        let current = detail
            .my_role
            .ok_or_else(|| ClassError::validation(messages::NOT_JOINED))?;

        if current == MemberRole::Tutor {
            return Err(ClassError::validation(messages::TUTOR_ROLE_LOCKED));
        }

        let next = Validator::selectable_role(next)?;
        if next == current {
            return Ok(None);
        }

        if !confirm.confirm(&messages::confirm_role_change(next)) {
            return Ok(None);
        }

        self.store
            .update_member_role(detail.class.id, caller.user_id, next)
            .await?;

        info!(
            class_id = detail.class.id,
            user_id = caller.user_id,
            from = %current,
            to = %next,
            "changed member role"
        );

        detail.my_role = Some(next);
        Ok(Some(messages::role_changed(next)))
    }

    /// Schedule a session in the class. Only tutors may do this.
    ///
    /// A draft carrying a request token that was already used returns the
    /// session it created instead of inserting another one.
    pub async fn create_session(
        &self,
        detail: &mut ClassDetail,
        caller: &Caller,
        draft: &SessionDraft,
    ) -> ClassResult<SessionOutcome> {
        if detail.my_role != Some(MemberRole::Tutor) {
            return Err(ClassError::permission_denied(
                messages::ONLY_TUTORS_CREATE_SESSIONS,
            ));
        }

        let (start_at, end_at) = Validator::session_window(&draft.start_at, &draft.end_at)?;
        let title = Validator::session_title(&draft.title)?;
        let request_token = Validator::optional_text(draft.request_token.as_deref());

        if let Some(token) = request_token.as_deref() {
            if let Some(existing) = self.store.find_session_by_token(token).await? {
                return self.replay(detail.class.id, caller.user_id, existing);
            }
        }

        let request = CreateClassSessionRequest {
            class_id: detail.class.id,
            title,
            start_at: format_timestamp(start_at),
            end_at: format_timestamp(end_at),
            created_by: caller.user_id,
            request_token: request_token.clone(),
        };

        let session = match self.store.insert_session(request).await {
            Ok(session) => session,
            Err(error) if error.is_duplicate() => {
                // Lost a race with a concurrent submit of the same token.
                let existing = match request_token.as_deref() {
                    Some(token) => self.store.find_session_by_token(token).await?,
                    None => None,
                };
                return match existing {
                    Some(existing) => self.replay(detail.class.id, caller.user_id, existing),
                    None => Err(error.into()),
                };
            }
            Err(error) => return Err(error.into()),
        };

        // Always a full refresh; a failed reload leaves the cached list as it was.
        let sessions_error = match self.store.list_sessions(detail.class.id).await {
            Ok(sessions) => {
                detail.sessions = sessions;
                None
            }
            Err(error) => {
                warn!(
                    class_id = detail.class.id,
                    error = %error,
                    "failed to reload sessions after insert"
                );
                Some(ClassError::from(error).to_string())
            }
        };

        Ok(SessionOutcome {
            session,
            replayed: false,
            message: messages::SESSION_CREATED.to_string(),
            sessions_error,
        })
    }

    fn replay(
        &self,
        class_id: i64,
        caller_id: i64,
        existing: ClassSession,
    ) -> ClassResult<SessionOutcome> {
        if existing.class_id != class_id
            || existing.created_by != caller_id
            || !self.within_window(&existing.created_at)
        {
            return Err(ClassError::validation(messages::REQUEST_ALREADY_SUBMITTED));
        }

        info!(session_id = existing.id, class_id, "replayed session request");

        Ok(SessionOutcome {
            session: existing,
            replayed: true,
            message: messages::SESSION_REPLAYED.to_string(),
            sessions_error: None,
        })
    }

    fn within_window(&self, created_at: &str) -> bool {
        let Ok(created_at) = DateTime::parse_from_rfc3339(created_at) else {
            return false;
        };
        let window = i64::try_from(self.workflow.request_token_window_seconds).unwrap_or(i64::MAX);
        let age = Utc::now().signed_duration_since(created_at.with_timezone(&Utc));
        age.num_seconds() <= window
    }
}
