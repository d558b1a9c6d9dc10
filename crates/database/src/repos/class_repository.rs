//! Repository for class data access operations.

use crate::entities::{Class, CreateClassRequest, MemberRole};
use crate::types::{now_timestamp, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const CLASS_COLUMNS: &str =
    "id, public_id, name, description, class_code, workspace_id, created_by, created_at";

pub struct ClassRepository {
    pool: SqlitePool,
}

impl ClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a class by its join code. The code is compared as stored, so
    /// callers normalise it first.
    pub async fn find_by_code(&self, class_code: &str) -> DatabaseResult<Option<Class>> {
        let row = sqlx::query(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE class_code = ?"
        ))
        .bind(class_code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_class(&row)).transpose()
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Class>> {
        let row = sqlx::query(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_class(&row)).transpose()
    }

    pub async fn list_all(&self) -> DatabaseResult<Vec<Class>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_class).collect()
    }

    /// Insert the class and the creator's tutor membership in one
    /// transaction. A code collision surfaces as `DatabaseError::Duplicate`.
    pub async fn create_with_tutor(&self, request: &CreateClassRequest) -> DatabaseResult<Class> {
        let public_id = crate::new_public_id();
        let now = now_timestamp();

        let mut tx = self.pool.begin().await?;

        let class_id = sqlx::query(
            "INSERT INTO classes (public_id, name, description, class_code, workspace_id, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&request.name)
        .bind(request.description.as_deref())
        .bind(&request.class_code)
        .bind(request.workspace_id)
        .bind(request.created_by)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO class_members (class_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(class_id)
        .bind(request.created_by)
        .bind(MemberRole::Tutor.as_str())
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            class_id,
            class_code = %request.class_code,
            created_by = request.created_by,
            "created class"
        );

        Ok(Class {
            id: class_id,
            public_id,
            name: request.name.clone(),
            description: request.description.clone(),
            class_code: request.class_code.clone(),
            workspace_id: request.workspace_id,
            created_by: request.created_by,
            created_at: now,
        })
    }
}

pub(crate) fn map_class(row: &SqliteRow) -> DatabaseResult<Class> {
    Ok(Class {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        class_code: row.try_get("class_code")?,
        workspace_id: row.try_get("workspace_id")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}
