//! TutorHub Database Crate
//!
//! Connection management, migrations, entities and repositories for the
//! classes, memberships, sessions, profiles and workspaces tables.

use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use sqlx::SqlitePool;
use tutorhub_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::{run_migrations, MIGRATOR};

pub use repos::{
    ClassRepository, ClassSessionRepository, MemberRepository, ProfileRepository,
    WorkspaceRepository,
};

pub use entities::{
    Class, ClassMember, ClassSession, CreateClassRequest, CreateClassSessionRequest, MemberRole,
    MembershipWithClass, Profile, TutorDetails, Workspace, SESSION_STATUS_SCHEDULED,
};

pub use types::{
    classify_message, format_timestamp, now_timestamp, DatabaseError, DatabaseResult,
};

pub use sqlx::Pool;

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

/// Public identifier used in URLs instead of row ids.
pub fn new_public_id() -> String {
    CUID.create_id()
}

/// Connect and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}


#[cfg(test)]
mod tests {
    use super::test_support::create_test_pool;

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let (pool, _temp_dir) = create_test_pool().await;

        let (enabled,): (bool,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(enabled);
    }

    #[test]
    fn public_ids_are_unique() {
        assert_ne!(super::new_public_id(), super::new_public_id());
    }
}
