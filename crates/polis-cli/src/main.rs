use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use polis_cli::seeder::{self, SeedConfig};
use polis_config::{DatabaseConfig, RepositoryKind};
use polis_db::{Repository, RepositoryFactory};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polis-cli")]
#[command(about = "Polis CLI - Seeding and maintenance tools for the Polis registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake teachers, courses, and students
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "5")]
        teachers: usize,

        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "20")]
        courses: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "200")]
        students: usize,
    },
    /// Delete every student, course, and teacher
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let repository = connect().await?;

    match cli.command {
        Commands::Seed {
            teachers,
            courses,
            students,
        } => handle_seed(repository.as_ref(), SeedConfig::new(teachers, courses, students)).await,
        Commands::Clear { yes } => handle_clear(repository.as_ref(), yes).await,
    }
}

async fn connect() -> anyhow::Result<Arc<dyn Repository>> {
    let database = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    RepositoryFactory::create(RepositoryKind::Postgres, Some(&database))
        .await
        .context("Failed to connect to database")
}

async fn handle_seed(repository: &dyn Repository, config: SeedConfig) -> anyhow::Result<()> {
    let report = seeder::seed_all(repository, &config)
        .await
        .context("Error seeding database")?;

    println!("\n✅ Seeding complete!");
    println!("   Teachers: {}", report.teachers);
    println!(
        "   Courses:  {} ({} with a teacher)",
        report.courses, report.courses_assigned
    );
    println!(
        "   Students: {} ({} enrolled)",
        report.students, report.students_enrolled
    );
    Ok(())
}

async fn handle_clear(repository: &dyn Repository, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete every student, course, and teacher?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    seeder::clear_all(repository)
        .await
        .context("Error clearing registry")?;
    println!("\n✅ Registry cleared");
    Ok(())
}
