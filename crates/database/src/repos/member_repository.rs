//! Repository for class membership data access operations.

use crate::entities::{Class, ClassMember, MemberRole, MembershipWithClass};
use crate::types::{now_timestamp, DatabaseError, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, class_id: i64, user_id: i64) -> DatabaseResult<Option<ClassMember>> {
        let row = sqlx::query(
            "SELECT id, class_id, user_id, role, joined_at
             FROM class_members WHERE class_id = ? AND user_id = ?",
        )
        .bind(class_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_member(&row)).transpose()
    }

    /// Memberships of a user, newest first, each with its class embedded.
    /// Rows whose class does not resolve keep `class: None`.
    pub async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<MembershipWithClass>> {
        let rows = sqlx::query(
            "SELECT m.class_id, m.role, m.joined_at,
                    c.id AS c_id, c.public_id AS c_public_id, c.name AS c_name,
                    c.description AS c_description, c.class_code AS c_class_code,
                    c.workspace_id AS c_workspace_id, c.created_by AS c_created_by,
                    c.created_at AS c_created_at
             FROM class_members m
             LEFT JOIN classes c ON c.id = m.class_id
             WHERE m.user_id = ?
             ORDER BY m.joined_at DESC, m.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_membership_with_class).collect()
    }

    pub async fn create(
        &self,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> DatabaseResult<ClassMember> {
        let now = now_timestamp();

        let result = sqlx::query(
            "INSERT INTO class_members (class_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(class_id)
        .bind(user_id)
        .bind(role.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let member_id = result.last_insert_rowid();

        info!(member_id, class_id, user_id, role = %role, "added member to class");

        Ok(ClassMember {
            id: member_id,
            class_id,
            user_id,
            role,
            joined_at: now,
        })
    }

    /// Update the role of the (class, user) membership and nothing else.
    pub async fn update_role(
        &self,
        class_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> DatabaseResult<()> {
        let result =
            sqlx::query("UPDATE class_members SET role = ? WHERE class_id = ? AND user_id = ?")
                .bind(role.as_str())
                .bind(class_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "membership of user {user_id} in class {class_id}"
            )));
        }

        info!(class_id, user_id, new_role = %role, "updated member role");
        Ok(())
    }

    pub async fn count_for_class(&self, class_id: i64) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM class_members WHERE class_id = ?")
            .bind(class_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn parse_role(value: &str) -> DatabaseResult<MemberRole> {
    MemberRole::parse(value)
        .ok_or_else(|| DatabaseError::InternalError(format!("unknown member role {value}")))
}

fn map_member(row: &SqliteRow) -> DatabaseResult<ClassMember> {
    let role: String = row.try_get("role")?;

    Ok(ClassMember {
        id: row.try_get("id")?,
        class_id: row.try_get("class_id")?,
        user_id: row.try_get("user_id")?,
        role: parse_role(&role)?,
        joined_at: row.try_get("joined_at")?,
    })
}

fn map_membership_with_class(row: &SqliteRow) -> DatabaseResult<MembershipWithClass> {
    let role: String = row.try_get("role")?;
    let class_pk: Option<i64> = row.try_get("c_id")?;

    let class = match class_pk {
        Some(id) => Some(Class {
            id,
            public_id: row.try_get("c_public_id")?,
            name: row.try_get("c_name")?,
            description: row.try_get("c_description")?,
            class_code: row.try_get("c_class_code")?,
            workspace_id: row.try_get("c_workspace_id")?,
            created_by: row.try_get("c_created_by")?,
            created_at: row.try_get("c_created_at")?,
        }),
        None => None,
    };

    Ok(MembershipWithClass {
        class_id: row.try_get("class_id")?,
        role: parse_role(&role)?,
        joined_at: row.try_get("joined_at")?,
        class,
    })
}
