//! Repository for scheduled class sessions.

use crate::entities::{ClassSession, CreateClassSessionRequest, SESSION_STATUS_SCHEDULED};
use crate::types::{now_timestamp, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const SESSION_COLUMNS: &str = "id, public_id, class_id, title, note, start_at, end_at, status, \
                               created_by, request_token, created_at";

pub struct ClassSessionRepository {
    pool: SqlitePool,
}

impl ClassSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sessions of a class ordered by start time.
    pub async fn list_for_class(&self, class_id: i64) -> DatabaseResult<Vec<ClassSession>> {
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM class_sessions WHERE class_id = ? ORDER BY start_at ASC, id ASC"
        ))
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_session).collect()
    }

    pub async fn find_by_request_token(&self, token: &str) -> DatabaseResult<Option<ClassSession>> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM class_sessions WHERE request_token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_session(&row)).transpose()
    }

    /// Insert a `scheduled` session without a note. A reused request token
    /// surfaces as `DatabaseError::Duplicate`.
    pub async fn create(&self, request: &CreateClassSessionRequest) -> DatabaseResult<ClassSession> {
        let public_id = crate::new_public_id();
        let now = now_timestamp();

        let id = sqlx::query(
            "INSERT INTO class_sessions
                (public_id, class_id, title, note, start_at, end_at, status, created_by, request_token, created_at)
             VALUES (?, ?, ?, NULL, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(request.class_id)
        .bind(&request.title)
        .bind(&request.start_at)
        .bind(&request.end_at)
        .bind(SESSION_STATUS_SCHEDULED)
        .bind(request.created_by)
        .bind(request.request_token.as_deref())
        .bind(&now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(
            session_id = id,
            class_id = request.class_id,
            created_by = request.created_by,
            "scheduled class session"
        );

        Ok(ClassSession {
            id,
            public_id,
            class_id: request.class_id,
            title: request.title.clone(),
            note: None,
            start_at: request.start_at.clone(),
            end_at: request.end_at.clone(),
            status: SESSION_STATUS_SCHEDULED.to_string(),
            created_by: request.created_by,
            request_token: request.request_token.clone(),
            created_at: now,
        })
    }
}

fn map_session(row: &SqliteRow) -> DatabaseResult<ClassSession> {
    Ok(ClassSession {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        class_id: row.try_get("class_id")?,
        title: row.try_get("title")?,
        note: row.try_get("note")?,
        start_at: row.try_get("start_at")?,
        end_at: row.try_get("end_at")?,
        status: row.try_get("status")?,
        created_by: row.try_get("created_by")?,
        request_token: row.try_get("request_token")?,
        created_at: row.try_get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CreateClassRequest;
    use crate::repos::ClassRepository;
    use crate::test_support::{create_test_pool, insert_user};

    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let tutor = insert_user(pool, "tutor@example.com").await;
        let class = ClassRepository::new(pool.clone())
            .create_with_tutor(&CreateClassRequest {
                name: "Kanji".into(),
                description: None,
                class_code: "KANJI001".into(),
                workspace_id: None,
                created_by: tutor,
            })
            .await
            .unwrap();
        (class.id, tutor)
    }

    fn draft(class_id: i64, tutor: i64, start: &str, end: &str) -> CreateClassSessionRequest {
        CreateClassSessionRequest {
            class_id,
            title: "Lesson".into(),
            start_at: start.into(),
            end_at: end.into(),
            created_by: tutor,
            request_token: None,
        }
    }

    #[tokio::test]
    async fn sessions_are_listed_by_start_time() {
        let (pool, _temp_dir) = create_test_pool().await;
        let (class_id, tutor) = seed(&pool).await;
        let repo = ClassSessionRepository::new(pool);

        repo.create(&draft(class_id, tutor, "2024-05-02T10:00:00.000Z", "2024-05-02T11:00:00.000Z"))
            .await
            .unwrap();
        repo.create(&draft(class_id, tutor, "2024-05-01T10:00:00.000Z", "2024-05-01T11:00:00.000Z"))
            .await
            .unwrap();

        let sessions = repo.list_for_class(class_id).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].start_at, "2024-05-01T10:00:00.000Z");
        assert_eq!(sessions[0].status, SESSION_STATUS_SCHEDULED);
        assert!(sessions.iter().all(|s| s.note.is_none()));
    }

    #[tokio::test]
    async fn request_token_is_unique() {
        let (pool, _temp_dir) = create_test_pool().await;
        let (class_id, tutor) = seed(&pool).await;
        let repo = ClassSessionRepository::new(pool);

        let mut request = draft(class_id, tutor, "2024-05-01T10:00:00.000Z", "2024-05-01T11:00:00.000Z");
        request.request_token = Some("token-1".into());

        let created = repo.create(&request).await.unwrap();
        let error = repo.create(&request).await.unwrap_err();
        assert!(error.is_duplicate());

        let found = repo.find_by_request_token("token-1").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(repo.list_for_class(class_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn end_before_start_violates_check() {
        let (pool, _temp_dir) = create_test_pool().await;
        let (class_id, tutor) = seed(&pool).await;
        let repo = ClassSessionRepository::new(pool);

        let error = repo
            .create(&draft(class_id, tutor, "2024-05-01T11:00:00.000Z", "2024-05-01T10:00:00.000Z"))
            .await
            .unwrap_err();
        assert!(error.is_constraint());
    }
}
