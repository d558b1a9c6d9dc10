//! Tutor upgrade gate and workspace onboarding.

use tracing::{error, info, warn};
use tutorhub_database::{Profile, TutorDetails};

use crate::repositories::ClassroomStore;
use crate::types::{
    messages, Caller, ClassError, ClassResult, OnboardingOutcome, TutorForm, TutorGate,
};
use crate::utils::Validator;

pub struct TutorService<S> {
    store: S,
}

impl<S: ClassroomStore> TutorService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the caller's profile once and build the upgrade form.
    pub async fn load_gate(&self, caller: &Caller) -> ClassResult<TutorGate> {
        let profile = self
            .store
            .find_profile(caller.user_id)
            .await?
            .ok_or_else(|| ClassError::not_found(messages::PROFILE_NOT_FOUND))?;

        Ok(TutorGate {
            is_tutor: profile.is_tutor,
            form: prefill(&profile),
        })
    }

    /// Upgrade the caller to tutor and open `gate` on success.
    pub async fn upgrade(
        &self,
        gate: &mut TutorGate,
        caller: &Caller,
        form: &TutorForm,
    ) -> ClassResult<String> {
        let bio = Validator::tutor_bio(&form.bio)?;
        let subjects = Validator::tutor_subjects(&form.subjects)?;

        let details = TutorDetails {
            bio,
            subjects,
            payment_method: Validator::optional_text(Some(form.payment_method.as_str())),
            payment_detail: Validator::optional_text(Some(form.payment_detail.as_str())),
        };

        self.store
            .upgrade_profile(caller.user_id, details.clone())
            .await?;

        info!(user_id = caller.user_id, "profile upgraded to tutor");

        gate.is_tutor = true;
        gate.form = TutorForm {
            bio: details.bio,
            subjects: details.subjects,
            payment_method: details.payment_method.unwrap_or_default(),
            payment_detail: details.payment_detail.unwrap_or_default(),
        };

        Ok(messages::NOW_A_TUTOR.to_string())
    }

    /// Create a workspace for the caller and make it their default.
    ///
    /// If the profile update fails after the workspace was inserted, the
    /// workspace is deleted again and a `PartialFailure` is returned.
    pub async fn onboard(
        &self,
        caller: &Caller,
        workspace_name: Option<&str>,
    ) -> ClassResult<OnboardingOutcome> {
        let name = Validator::workspace_name(
            workspace_name.unwrap_or(messages::DEFAULT_WORKSPACE_NAME),
        )?;

        let workspace = self.store.insert_workspace(caller.user_id, &name).await?;

        if let Err(cause) = self
            .store
            .assign_default_workspace(caller.user_id, workspace.id)
            .await
        {
            let compensated = match self.store.delete_workspace(workspace.id).await {
                Ok(()) => true,
                Err(delete_error) => {
                    error!(
                        workspace_id = workspace.id,
                        error = %delete_error,
                        "failed to remove orphaned workspace"
                    );
                    false
                }
            };

            warn!(
                workspace_id = workspace.id,
                user_id = caller.user_id,
                compensated,
                "onboarding profile update failed"
            );

            return Err(ClassError::PartialFailure {
                workspace_name: workspace.name,
                cause: cause.to_string(),
                compensated,
            });
        }

        info!(
            workspace_id = workspace.id,
            user_id = caller.user_id,
            "onboarding completed"
        );

        Ok(OnboardingOutcome {
            message: messages::workspace_created(&workspace.name),
            workspace,
        })
    }
}

fn prefill(profile: &Profile) -> TutorForm {
    let stored = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    TutorForm {
        bio: stored(&profile.tutor_bio).unwrap_or_default(),
        subjects: stored(&profile.tutor_subjects)
            .unwrap_or_else(|| messages::DEFAULT_TUTOR_SUBJECTS.to_string()),
        payment_method: stored(&profile.tutor_payment_method)
            .unwrap_or_else(|| messages::DEFAULT_PAYMENT_METHOD.to_string()),
        payment_detail: stored(&profile.tutor_payment_detail).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockClassroomStore;
    use tutorhub_database::{DatabaseError, Workspace};

    fn caller() -> Caller {
        Caller::new(7, "tutor@example.com")
    }

    fn workspace(name: &str) -> Workspace {
        Workspace {
            id: 5,
            public_id: "ws_5".into(),
            owner_user_id: 7,
            name: name.into(),
            created_at: "2024-05-01T09:00:00.000Z".into(),
        }
    }

    fn closed_gate() -> TutorGate {
        TutorGate {
            is_tutor: false,
            form: TutorForm::default(),
        }
    }

    #[tokio::test]
    async fn gate_prefills_defaults_for_a_fresh_profile() {
        let mut store = MockClassroomStore::new();
        store
            .expect_find_profile()
            .times(1)
            .returning(|user_id| Ok(Some(Profile { user_id, ..Profile::default() })));

        let gate = TutorService::new(store).load_gate(&caller()).await.unwrap();

        assert!(!gate.is_tutor);
        assert_eq!(gate.form.bio, "");
        assert_eq!(gate.form.subjects, messages::DEFAULT_TUTOR_SUBJECTS);
        assert_eq!(gate.form.payment_method, messages::DEFAULT_PAYMENT_METHOD);
    }

    #[tokio::test]
    async fn gate_prefers_stored_values() {
        let mut store = MockClassroomStore::new();
        store.expect_find_profile().returning(|user_id| {
            Ok(Some(Profile {
                user_id,
                is_tutor: true,
                tutor_subjects: Some("Kanji".into()),
                tutor_payment_method: Some("Paypal".into()),
                ..Profile::default()
            }))
        });

        let gate = TutorService::new(store).load_gate(&caller()).await.unwrap();

        assert!(gate.is_tutor);
        assert_eq!(gate.form.subjects, "Kanji");
        assert_eq!(gate.form.payment_method, "Paypal");
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let mut store = MockClassroomStore::new();
        store.expect_find_profile().returning(|_| Ok(None));

        let error = TutorService::new(store)
            .load_gate(&caller())
            .await
            .unwrap_err();

        assert!(matches!(error, ClassError::NotFound { .. }));
        assert_eq!(error.to_string(), messages::PROFILE_NOT_FOUND);
    }

    #[tokio::test]
    async fn short_bio_fails_regardless_of_other_fields() {
        let mut store = MockClassroomStore::new();
        store.expect_upgrade_profile().never();
        let mut gate = closed_gate();

        let form = TutorForm {
            bio: "   I teach Japanese  ".into(),
            subjects: "JLPT N3 Grammar".into(),
            payment_method: "Bank".into(),
            payment_detail: "0123".into(),
        };
        let error = TutorService::new(store)
            .upgrade(&mut gate, &caller(), &form)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), messages::BIO_TOO_SHORT);
        assert!(!gate.is_tutor);
    }

    #[tokio::test]
    async fn blank_subjects_are_rejected() {
        let mut store = MockClassroomStore::new();
        store.expect_upgrade_profile().never();
        let mut gate = closed_gate();

        let form = TutorForm {
            bio: "Ten years of teaching Japanese grammar.".into(),
            subjects: "  ".into(),
            ..TutorForm::default()
        };
        let error = TutorService::new(store)
            .upgrade(&mut gate, &caller(), &form)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), messages::MISSING_SUBJECTS);
    }

    #[tokio::test]
    async fn upgrade_trims_fields_and_opens_gate() {
        let mut store = MockClassroomStore::new();
        store
            .expect_upgrade_profile()
            .withf(|user_id, details| {
                *user_id == 7
                    && details.bio == "Ten years of teaching Japanese grammar."
                    && details.subjects == "Kanji"
                    && details.payment_method.is_none()
                    && details.payment_detail.as_deref() == Some("IBAN 42")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let mut gate = closed_gate();

        let form = TutorForm {
            bio: "  Ten years of teaching Japanese grammar. ".into(),
            subjects: " Kanji ".into(),
            payment_method: "   ".into(),
            payment_detail: " IBAN 42 ".into(),
        };
        let message = TutorService::new(store)
            .upgrade(&mut gate, &caller(), &form)
            .await
            .unwrap();

        assert_eq!(message, messages::NOW_A_TUTOR);
        assert!(gate.is_tutor);
        assert_eq!(gate.form.subjects, "Kanji");
    }

    #[tokio::test]
    async fn onboarding_uses_default_name() {
        let mut store = MockClassroomStore::new();
        store
            .expect_insert_workspace()
            .withf(|owner, name| *owner == 7 && name == messages::DEFAULT_WORKSPACE_NAME)
            .times(1)
            .returning(|_, name| Ok(workspace(name)));
        store
            .expect_assign_default_workspace()
            .withf(|user_id, workspace_id| *user_id == 7 && *workspace_id == 5)
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_delete_workspace().never();

        let outcome = TutorService::new(store)
            .onboard(&caller(), None)
            .await
            .unwrap();

        assert_eq!(
            outcome.message,
            "You are now a tutor! Workspace created: My Tutor Workspace"
        );
    }

    #[tokio::test]
    async fn blank_workspace_name_is_rejected() {
        let mut store = MockClassroomStore::new();
        store.expect_insert_workspace().never();

        let error = TutorService::new(store)
            .onboard(&caller(), Some("   "))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), messages::MISSING_WORKSPACE_NAME);
    }

    #[tokio::test]
    async fn failed_workspace_insert_stops_onboarding() {
        let mut store = MockClassroomStore::new();
        store
            .expect_insert_workspace()
            .returning(|_, _| Err(DatabaseError::QueryError("disk I/O error".into())));
        store.expect_assign_default_workspace().never();
        store.expect_delete_workspace().never();

        let error = TutorService::new(store)
            .onboard(&caller(), Some("Kanji Club"))
            .await
            .unwrap_err();

        assert!(matches!(error, ClassError::Store(_)));
    }

    #[tokio::test]
    async fn failed_profile_update_compensates() {
        let mut store = MockClassroomStore::new();
        store
            .expect_insert_workspace()
            .returning(|_, name| Ok(workspace(name)));
        store
            .expect_assign_default_workspace()
            .returning(|_, _| Err(DatabaseError::QueryError("database is locked".into())));
        store
            .expect_delete_workspace()
            .withf(|workspace_id| *workspace_id == 5)
            .times(1)
            .returning(|_| Ok(()));

        let error = TutorService::new(store)
            .onboard(&caller(), Some(" Kanji Club "))
            .await
            .unwrap_err();

        match &error {
            ClassError::PartialFailure {
                workspace_name,
                compensated,
                ..
            } => {
                assert_eq!(workspace_name, "Kanji Club");
                assert!(*compensated);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.to_string().contains("Kanji Club"));
        assert!(error.to_string().contains("database is locked"));
    }

    #[tokio::test]
    async fn failed_compensation_is_reported() {
        let mut store = MockClassroomStore::new();
        store
            .expect_insert_workspace()
            .returning(|_, name| Ok(workspace(name)));
        store
            .expect_assign_default_workspace()
            .returning(|_, _| Err(DatabaseError::QueryError("database is locked".into())));
        store
            .expect_delete_workspace()
            .returning(|_| Err(DatabaseError::QueryError("database is locked".into())));

        let error = TutorService::new(store)
            .onboard(&caller(), Some("Kanji Club"))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ClassError::PartialFailure {
                compensated: false,
                ..
            }
        ));
    }
}
