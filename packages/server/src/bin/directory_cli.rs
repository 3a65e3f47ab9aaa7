//! Maintenance CLI: schema migrations and sample data.
//!
//! Prints one JSON line per command so scripts can parse the outcome.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directory_core::domains::resources::seed::seed_sample_resources;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "directory_cli")]
#[command(about = "Community directory maintenance CLI")]
struct Cli {
    /// Database URL (defaults to DATABASE_URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Insert sample meetups and conferences (skipped if resources exist)
    Seed,
}

#[derive(Serialize)]
struct Response {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let database_url = cli
        .database_url
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => cmd_migrate(&pool).await,
        Commands::Seed => cmd_seed(&pool).await,
    }
}

async fn cmd_migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    output(Response {
        success: true,
        message: "Migrations complete".to_string(),
        count: None,
    })
}

async fn cmd_seed(pool: &PgPool) -> Result<()> {
    let count = seed_sample_resources(pool).await?;

    let message = if count == 0 {
        "Resources already present, nothing seeded".to_string()
    } else {
        format!("Seeded {} resources", count)
    };

    output(Response {
        success: true,
        message,
        count: Some(count),
    })
}
