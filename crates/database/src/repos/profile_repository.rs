//! Repository for profile and workspace data access.

use crate::entities::{Profile, TutorDetails, Workspace};
use crate::types::{now_timestamp, DatabaseError, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: i64) -> DatabaseResult<Option<Profile>> {
        let row = sqlx::query(
            "SELECT user_id, is_tutor, tutor_bio, tutor_subjects, tutor_payment_method,
                    tutor_payment_detail, default_workspace_id
             FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_profile(&row)).transpose()
    }

    /// Mark the profile tutor-capable and store the tutor metadata.
    pub async fn upgrade_to_tutor(&self, user_id: i64, details: &TutorDetails) -> DatabaseResult<()> {
        let result = sqlx::query(
            "UPDATE profiles
             SET is_tutor = 1, tutor_bio = ?, tutor_subjects = ?, tutor_payment_method = ?,
                 tutor_payment_detail = ?, updated_at = ?
             WHERE user_id = ?",
        )
        .bind(&details.bio)
        .bind(&details.subjects)
        .bind(details.payment_method.as_deref())
        .bind(details.payment_detail.as_deref())
        .bind(now_timestamp())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("profile for user {user_id}")));
        }

        info!(user_id, "profile upgraded to tutor");
        Ok(())
    }

    /// Mark the profile tutor-capable with a default workspace.
    pub async fn assign_workspace(&self, user_id: i64, workspace_id: i64) -> DatabaseResult<()> {
        let result = sqlx::query(
            "UPDATE profiles SET is_tutor = 1, default_workspace_id = ?, updated_at = ?
             WHERE user_id = ?",
        )
        .bind(workspace_id)
        .bind(now_timestamp())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("profile for user {user_id}")));
        }

        info!(user_id, workspace_id, "default workspace assigned");
        Ok(())
    }
}

fn map_profile(row: &SqliteRow) -> DatabaseResult<Profile> {
    Ok(Profile {
        user_id: row.try_get("user_id")?,
        is_tutor: row.try_get("is_tutor")?,
        tutor_bio: row.try_get("tutor_bio")?,
        tutor_subjects: row.try_get("tutor_subjects")?,
        tutor_payment_method: row.try_get("tutor_payment_method")?,
        tutor_payment_detail: row.try_get("tutor_payment_detail")?,
        default_workspace_id: row.try_get("default_workspace_id")?,
    })
}

pub struct WorkspaceRepository {
    pool: SqlitePool,
}

impl WorkspaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_user_id: i64, name: &str) -> DatabaseResult<Workspace> {
        let public_id = crate::new_public_id();
        let now = now_timestamp();

        let result = sqlx::query(
            "INSERT INTO workspaces (public_id, owner_user_id, name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(owner_user_id)
        .bind(name)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(workspace_id = id, owner_user_id, name, "workspace created");

        Ok(Workspace {
            id,
            public_id,
            owner_user_id,
            name: name.to_string(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Workspace>> {
        let row = sqlx::query(
            "SELECT id, public_id, owner_user_id, name, created_at FROM workspaces WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_workspace(&row)).transpose()
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("workspace {id}")));
        }

        info!(workspace_id = id, "workspace deleted");
        Ok(())
    }
}

fn map_workspace(row: &SqliteRow) -> DatabaseResult<Workspace> {
    Ok(Workspace {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        owner_user_id: row.try_get("owner_user_id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}
