//! Class directory, join-by-code and class creation.

use tracing::{info, warn};
use tutorhub_config::WorkflowConfig;
use tutorhub_database::{CreateClassRequest, MemberRole, MembershipWithClass};

use crate::repositories::ClassroomStore;
use crate::types::{
    messages, Caller, ClassCreated, ClassError, ClassResult, JoinOutcome, NewClassForm,
};
use crate::utils::{generate_class_code, Validator, MAX_CODE_ATTEMPTS};

pub struct ClassService<S> {
    store: S,
    workflow: WorkflowConfig,
}

impl<S: ClassroomStore> ClassService<S> {
    pub fn new(store: S, workflow: WorkflowConfig) -> Self {
        Self { store, workflow }
    }

    /// Classes the caller belongs to, newest membership first. Memberships
    /// whose class no longer resolves are kept with `class: None`.
    pub async fn directory(&self, caller: &Caller) -> ClassResult<Vec<MembershipWithClass>> {
        Ok(self.store.list_memberships(caller.user_id).await?)
    }

    /// Join the class behind a human-entered code.
    pub async fn join_by_code(
        &self,
        caller: &Caller,
        raw_code: &str,
        role: MemberRole,
    ) -> ClassResult<JoinOutcome> {
        let code = Validator::class_code(raw_code)?;
        let role = Validator::selectable_role(role)?;

        // A failed lookup is reported the same way as a miss.
        let class = match self.store.find_class_by_code(&code).await {
            Ok(Some(class)) => class,
            Ok(None) => return Err(ClassError::not_found(messages::CLASS_CODE_NOT_FOUND)),
            Err(error) => {
                warn!(class_code = %code, error = %error, "class code lookup failed");
                return Err(ClassError::not_found(messages::CLASS_CODE_NOT_FOUND));
            }
        };

        match self
            .store
            .insert_membership(class.id, caller.user_id, role)
            .await
        {
            Ok(_) => {}
            Err(error) if error.is_duplicate() => {
                return Err(ClassError::already_joined(messages::ALREADY_JOINED));
            }
            Err(error) => return Err(error.into()),
        }

        info!(class_id = class.id, user_id = caller.user_id, role = %role, "joined class");

        Ok(JoinOutcome {
            message: messages::joined(&class.name, role),
            class,
            role,
            redirect_after_ms: self.workflow.join_redirect_delay_ms,
        })
    }

    /// Create a class owned by a tutor. The creator becomes its tutor member.
    pub async fn create_class(
        &self,
        caller: &Caller,
        form: &NewClassForm,
    ) -> ClassResult<ClassCreated> {
        let profile = self
            .store
            .find_profile(caller.user_id)
            .await?
            .ok_or_else(|| ClassError::not_found(messages::PROFILE_NOT_FOUND))?;

        if !profile.is_tutor {
            return Err(ClassError::permission_denied(messages::UPGRADE_REQUIRED));
        }

        let name = Validator::class_name(&form.name)?;
        let description = Validator::optional_text(form.description.as_deref());

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let class_code = generate_class_code(&mut rand::thread_rng());
            let request = CreateClassRequest {
                name: name.clone(),
                description: description.clone(),
                class_code,
                workspace_id: profile.default_workspace_id,
                created_by: caller.user_id,
            };

            match self.store.insert_class_with_tutor(request).await {
                Ok(class) => {
                    return Ok(ClassCreated {
                        message: messages::class_created(&class.name, &class.class_code),
                        class,
                    });
                }
                Err(error) if error.is_duplicate() => {
                    warn!(attempt, "class code collision, regenerating");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(ClassError::validation(messages::CLASS_CODE_EXHAUSTED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockClassroomStore;
    use tutorhub_database::{Class, ClassMember, DatabaseError, DatabaseResult, Profile};

    fn caller() -> Caller {
        Caller::new(7, "learner@example.com")
    }

    fn class() -> Class {
        Class {
            id: 3,
            public_id: "cls_3".into(),
            name: "N3 Grammar".into(),
            description: None,
            class_code: "AB12CD34".into(),
            workspace_id: None,
            created_by: 1,
            created_at: "2024-05-01T09:00:00.000Z".into(),
        }
    }

    fn member(role: MemberRole) -> ClassMember {
        ClassMember {
            id: 11,
            class_id: 3,
            user_id: 7,
            role,
            joined_at: "2024-05-02T09:00:00.000Z".into(),
        }
    }

    fn service(store: MockClassroomStore) -> ClassService<MockClassroomStore> {
        ClassService::new(store, WorkflowConfig::default())
    }

    #[tokio::test]
    async fn join_normalizes_code_and_reports_redirect() {
        let mut store = MockClassroomStore::new();
        store
            .expect_find_class_by_code()
            .withf(|code| code == "AB12CD34")
            .times(1)
            .returning(|_| Ok(Some(class())));
        store
            .expect_insert_membership()
            .withf(|class_id, user_id, role| {
                *class_id == 3 && *user_id == 7 && *role == MemberRole::Parent
            })
            .times(1)
            .returning(|_, _, role| Ok(member(role)));

        let outcome = service(store)
            .join_by_code(&caller(), "  ab12cd34 ", MemberRole::Parent)
            .await
            .unwrap();

        assert_eq!(outcome.message, "Joined N3 Grammar (role: parent).");
        assert_eq!(outcome.redirect_after_ms, 300);
        assert_eq!(outcome.role, MemberRole::Parent);
    }

    #[tokio::test]
    async fn join_with_blank_code_makes_no_store_call() {
        let mut store = MockClassroomStore::new();
        store.expect_find_class_by_code().never();
        store.expect_insert_membership().never();

        let error = service(store)
            .join_by_code(&caller(), "   ", MemberRole::Student)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), messages::MISSING_CLASS_CODE);
    }

    #[tokio::test]
    async fn join_as_tutor_is_rejected_before_lookup() {
        let mut store = MockClassroomStore::new();
        store.expect_find_class_by_code().never();
        store.expect_insert_membership().never();

        let error = service(store)
            .join_by_code(&caller(), "AB12CD34", MemberRole::Tutor)
            .await
            .unwrap_err();

        assert!(matches!(error, ClassError::Validation { .. }));
        assert_eq!(error.to_string(), messages::ROLE_NOT_SELECTABLE);
    }

    #[tokio::test]
    async fn unknown_code_and_lookup_failure_share_one_message() {
        let lookups: [DatabaseResult<Option<Class>>; 2] = [
            Ok(None),
            Err(DatabaseError::QueryError("no such table: classes".into())),
        ];
        for lookup in lookups {
            let mut store = MockClassroomStore::new();
            store
                .expect_find_class_by_code()
                .times(1)
                .returning(move |_| lookup.clone());
            store.expect_insert_membership().never();

            let error = service(store)
                .join_by_code(&caller(), "ZZZZ9999", MemberRole::Student)
                .await
                .unwrap_err();

            assert!(matches!(error, ClassError::NotFound { .. }));
            assert_eq!(error.to_string(), messages::CLASS_CODE_NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn duplicate_membership_gets_friendly_message() {
        let mut store = MockClassroomStore::new();
        store
            .expect_find_class_by_code()
            .returning(|_| Ok(Some(class())));
        store.expect_insert_membership().times(1).returning(|_, _, _| {
            Err(DatabaseError::Duplicate(
                "UNIQUE constraint failed: class_members.class_id, class_members.user_id".into(),
            ))
        });

        let error = service(store)
            .join_by_code(&caller(), "AB12CD34", MemberRole::Student)
            .await
            .unwrap_err();

        assert!(matches!(error, ClassError::AlreadyJoined { .. }));
        assert_eq!(error.to_string(), messages::ALREADY_JOINED);
    }

    #[tokio::test]
    async fn other_insert_failures_keep_the_raw_message() {
        let mut store = MockClassroomStore::new();
        store
            .expect_find_class_by_code()
            .returning(|_| Ok(Some(class())));
        store
            .expect_insert_membership()
            .returning(|_, _, _| Err(DatabaseError::QueryError("database is locked".into())));

        let error = service(store)
            .join_by_code(&caller(), "AB12CD34", MemberRole::Student)
            .await
            .unwrap_err();

        assert!(matches!(error, ClassError::Store(_)));
        assert_eq!(error.to_string(), "database is locked");
    }

    #[tokio::test]
    async fn create_class_requires_the_tutor_gate() {
        let mut store = MockClassroomStore::new();
        store
            .expect_find_profile()
            .returning(|user_id| Ok(Some(Profile { user_id, ..Profile::default() })));
        store.expect_insert_class_with_tutor().never();

        let form = NewClassForm {
            name: "Kanji".into(),
            description: None,
        };
        let error = service(store)
            .create_class(&caller(), &form)
            .await
            .unwrap_err();

        assert!(matches!(error, ClassError::PermissionDenied { .. }));
        assert_eq!(error.to_string(), messages::UPGRADE_REQUIRED);
    }

    #[tokio::test]
    async fn create_class_regenerates_colliding_codes() {
        let mut store = MockClassroomStore::new();
        store.expect_find_profile().returning(|user_id| {
            Ok(Some(Profile {
                user_id,
                is_tutor: true,
                default_workspace_id: Some(4),
                ..Profile::default()
            }))
        });

        let mut seq = mockall::Sequence::new();
        store
            .expect_insert_class_with_tutor()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(DatabaseError::Duplicate("classes.class_code".into())));
        store
            .expect_insert_class_with_tutor()
            .withf(|request| {
                request.name == "Kanji"
                    && request.description.is_none()
                    && request.workspace_id == Some(4)
                    && request.class_code.len() == 8
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|request| {
                Ok(Class {
                    name: request.name,
                    class_code: request.class_code,
                    workspace_id: request.workspace_id,
                    ..class()
                })
            });

        let form = NewClassForm {
            name: "  Kanji ".into(),
            description: Some("   ".into()),
        };
        let created = service(store).create_class(&caller(), &form).await.unwrap();

        assert_eq!(created.class.name, "Kanji");
        assert!(created.message.contains(&created.class.class_code));
    }

    #[tokio::test]
    async fn create_class_gives_up_after_max_attempts() {
        let mut store = MockClassroomStore::new();
        store.expect_find_profile().returning(|user_id| {
            Ok(Some(Profile {
                user_id,
                is_tutor: true,
                ..Profile::default()
            }))
        });
        store
            .expect_insert_class_with_tutor()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Err(DatabaseError::Duplicate("classes.class_code".into())));

        let form = NewClassForm {
            name: "Kanji".into(),
            description: None,
        };
        let error = service(store)
            .create_class(&caller(), &form)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), messages::CLASS_CODE_EXHAUSTED);
    }
}
