use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::{Row, SqlitePool};
use tokio::net::TcpListener;
use tracing::info;
use tutorhub_api::{build_router, AppState};
use tutorhub_config::load as load_config;
use tutorhub_runtime::{telemetry, BackendServices};

#[derive(Parser)]
#[command(name = "tutorhub-server")]
#[command(about = "TutorHub backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Print users, classes, memberships and sessions
    DumpData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Migrate => migrate().await,
        Commands::DumpData => dump_data().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting TutorHub backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = AppState::new(
        services.db_pool.clone(),
        services.authenticator.clone(),
        services.workflow.clone(),
    );
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(tutorhub_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    BackendServices::migrate(&config).await?;
    info!(url = %config.database.url, "migrations applied");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    info!("dumping classroom data from database");

    let config = load_config().context("failed to load configuration")?;
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let mut buffer = Vec::new();
    write_dump(&services.db_pool, &mut buffer).await?;
    std::io::stdout()
        .write_all(&buffer)
        .context("failed to write dump to stdout")?;
    Ok(())
}

fn display_optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "NULL".to_string())
}

async fn write_dump<W: Write>(pool: &SqlitePool, out: &mut W) -> anyhow::Result<()> {
    let users = sqlx::query(
        r#"
        SELECT id, public_id, email, created_at
        FROM users
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch users")?;

    writeln!(out, "=== USERS ===")?;
    if users.is_empty() {
        writeln!(out, "No users found in database")?;
    } else {
        writeln!(out, "Found {} users:", users.len())?;
        writeln!(
            out,
            "{:<5} {:<26} {:<35} {:<25}",
            "ID", "Public ID", "Email", "Created At"
        )?;
        writeln!(out, "{}", "-".repeat(95))?;
        for user in users {
            let id: i64 = user.get("id");
            let public_id: String = user.get("public_id");
            let email: String = user.get("email");
            let created_at: String = user.get("created_at");
            writeln!(
                out,
                "{:<5} {:<26} {:<35} {:<25}",
                id, public_id, email, created_at
            )?;
        }
    }

    let classes = sqlx::query(
        r#"
        SELECT id, public_id, name, class_code, workspace_id, created_by, created_at
        FROM classes
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch classes")?;

    writeln!(out, "\n=== CLASSES ===")?;
    if classes.is_empty() {
        writeln!(out, "No classes found in database")?;
    } else {
        writeln!(out, "Found {} classes:", classes.len())?;
        writeln!(
            out,
            "{:<5} {:<26} {:<30} {:<8} {:<10} {:<10} {:<25}",
            "ID", "Public ID", "Name", "Code", "Workspace", "Creator", "Created At"
        )?;
        writeln!(out, "{}", "-".repeat(120))?;
        for class in classes {
            let id: i64 = class.get("id");
            let public_id: String = class.get("public_id");
            let name: String = class.get("name");
            let class_code: String = class.get("class_code");
            let workspace_id: Option<i64> = class.get("workspace_id");
            let created_by: i64 = class.get("created_by");
            let created_at: String = class.get("created_at");
            writeln!(
                out,
                "{:<5} {:<26} {:<30} {:<8} {:<10} {:<10} {:<25}",
                id,
                public_id,
                name,
                class_code,
                display_optional(workspace_id.map(|id| id.to_string())),
                created_by,
                created_at
            )?;
        }
    }

    let members = sqlx::query(
        r#"
        SELECT id, class_id, user_id, role, joined_at
        FROM class_members
        ORDER BY joined_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch class members")?;

    writeln!(out, "\n=== CLASS MEMBERS ===")?;
    if members.is_empty() {
        writeln!(out, "No class members found in database")?;
    } else {
        writeln!(out, "Found {} class members:", members.len())?;
        writeln!(
            out,
            "{:<5} {:<10} {:<10} {:<10} {:<25}",
            "ID", "Class ID", "User ID", "Role", "Joined At"
        )?;
        writeln!(out, "{}", "-".repeat(65))?;
        for member in members {
            let id: i64 = member.get("id");
            let class_id: i64 = member.get("class_id");
            let user_id: i64 = member.get("user_id");
            let role: String = member.get("role");
            let joined_at: String = member.get("joined_at");
            writeln!(
                out,
                "{:<5} {:<10} {:<10} {:<10} {:<25}",
                id, class_id, user_id, role, joined_at
            )?;
        }
    }

    let sessions = sqlx::query(
        r#"
        SELECT id, public_id, class_id, title, start_at, end_at, status, request_token
        FROM class_sessions
        ORDER BY start_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch class sessions")?;

    writeln!(out, "\n=== CLASS SESSIONS ===")?;
    if sessions.is_empty() {
        writeln!(out, "No class sessions found in database")?;
    } else {
        writeln!(out, "Found {} class sessions:", sessions.len())?;
        writeln!(
            out,
            "{:<5} {:<26} {:<10} {:<30} {:<25} {:<25} {:<10} {:<20}",
            "ID", "Public ID", "Class ID", "Title", "Start", "End", "Status", "Request Token"
        )?;
        writeln!(out, "{}", "-".repeat(160))?;
        for session in sessions {
            let id: i64 = session.get("id");
            let public_id: String = session.get("public_id");
            let class_id: i64 = session.get("class_id");
            let title: String = session.get("title");
            let start_at: String = session.get("start_at");
            let end_at: String = session.get("end_at");
            let status: String = session.get("status");
            let request_token: Option<String> = session.get("request_token");

            let title = if title.chars().count() > 27 {
                format!("{}...", title.chars().take(27).collect::<String>())
            } else {
                title
            };

            writeln!(
                out,
                "{:<5} {:<26} {:<10} {:<30} {:<25} {:<25} {:<10} {:<20}",
                id,
                public_id,
                class_id,
                title,
                start_at,
                end_at,
                status,
                display_optional(request_token)
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
