use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool, Sqlite, Transaction};
use tracing::{debug, info};
use tutorhub_config::AuthConfig;
use tutorhub_database::{format_timestamp, new_public_id};

use crate::credentials::{
    ensure_password_strength, hash_password, normalize_email, verify_password, PASSWORD_PROVIDER,
};
use crate::errors::{AuthError, AuthResult};
use crate::tokens::{expiry_from, new_session_token, session_ttl};

/// The signed-in identity every workflow runs as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: i64,
    pub public_id: String,
    pub email: String,
}

impl User {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            email: row.try_get("email")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Password sign-up/sign-in and bearer session lookup over the shared pool.
#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    session_ttl: Duration,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: AuthConfig) -> Self {
        Self {
            pool,
            session_ttl: session_ttl(config.session_ttl_seconds),
        }
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Register a password account. The user row, its identity and an empty
    /// (non-tutor) profile are written in one transaction.
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<User> {
        let email = normalize_email(email)?;
        ensure_password_strength(password)?;

        let mut tx = self.pool.begin().await?;

        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(&email)
            .fetch_one(&mut *tx)
            .await?;
        if taken {
            return Err(AuthError::UserExists);
        }

        let secret = hash_password(password)?;
        let now = format_timestamp(Utc::now());
        let user = insert_account(&mut tx, &email, &secret, &now).await?;

        tx.commit().await?;

        info!(user = %user.public_id, "registered user");
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        // Unknown and malformed addresses fail the same way as a wrong password.
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;

        let row = sqlx::query(
            r#"
            SELECT i.user_id, i.secret
            FROM user_identities i
            JOIN users u ON u.id = i.user_id
            WHERE i.provider = ? AND i.provider_uid = ?
            "#,
        )
        .bind(PASSWORD_PROVIDER)
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        let secret: Option<String> = row.try_get("secret")?;
        verify_password(password, secret.as_deref())?;

        let user_id: i64 = row.try_get("user_id")?;
        self.issue_session(user_id).await
    }

    /// Resolve a bearer token to its user. Expired sessions are removed.
    pub async fn authenticate_token(&self, token: &str) -> AuthResult<(User, AuthSession)> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.public_id, u.email, s.expires_at
            FROM auth_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::SessionNotFound)?;

        let user = User::from_row(&row)?;
        let expires_at: String = row.try_get("expires_at")?;
        let expires_at = DateTime::parse_from_rfc3339(&expires_at)
            .map_err(|_| AuthError::InvalidSession)?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM auth_sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await?;
            debug!(user_id = user.id, "removed expired session");
            return Err(AuthError::SessionExpired);
        }

        let session = AuthSession {
            token: token.to_owned(),
            user_id: user.id,
            expires_at,
        };
        Ok((user, session))
    }

    pub async fn user_profile(&self, user_id: i64) -> AuthResult<User> {
        let row = sqlx::query("SELECT id, public_id, email FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        Ok(User::from_row(&row)?)
    }

    async fn issue_session(&self, user_id: i64) -> AuthResult<AuthSession> {
        let token = new_session_token();
        let now = Utc::now();
        let expires_at = expiry_from(now, self.session_ttl);

        sqlx::query(
            "INSERT INTO auth_sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(format_timestamp(now))
        .bind(format_timestamp(expires_at))
        .execute(&self.pool)
        .await?;

        debug!(user_id, "issued session");

        Ok(AuthSession {
            token,
            user_id,
            expires_at,
        })
    }
}

async fn insert_account(
    tx: &mut Transaction<'_, Sqlite>,
    email: &str,
    secret: &str,
    now: &str,
) -> AuthResult<User> {
    let public_id = new_public_id();

    let id = sqlx::query(
        "INSERT INTO users (public_id, email, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&public_id)
    .bind(email)
    .bind(now)
    .bind(now)
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    sqlx::query(
        r#"
        INSERT INTO user_identities (user_id, provider, provider_uid, secret, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(PASSWORD_PROVIDER)
    .bind(email)
    .bind(secret)
    .bind(now)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    sqlx::query("INSERT INTO profiles (user_id, is_tutor, created_at, updated_at) VALUES (?, 0, ?, ?)")
        .bind(id)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;

    Ok(User {
        id,
        public_id,
        email: email.to_owned(),
    })
}
