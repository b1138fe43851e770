use clap::{ArgAction, Parser, Subcommand};
use recipe_seed::config::{Config, ConfigLoader};
use recipe_seed::error::{AppError, AppResult};
use recipe_seed::logging;
use recipe_seed::seed::{SeedPlan, Seeder};
use recipe_seed::store::{DocumentStore, MemoryStore, MongoStore};
use recipe_seed::Dataset;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Seeds the application's document database with its session and recipe collections.",
    long_about = "Declares the 'sessions' and 'recipes' collections and inserts a literal recipe dataset. Intended to run once when the database container starts."
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// MongoDB connection string (overrides configuration).
    #[arg(long, global = true)]
    uri: Option<String>,

    /// Database name (overrides configuration).
    #[arg(long, global = true)]
    database: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Declare the collections and insert the dataset (default).
    Seed {
        /// Dataset to insert.
        #[arg(short, long, value_enum)]
        dataset: Option<Dataset>,

        /// Run against an in-memory store; nothing is persisted.
        #[arg(long)]
        dry_run: bool,
    },
    /// Check collections, counts and record shapes.
    Verify {
        /// Dataset whose shape the stored records should have.
        #[arg(short, long, value_enum)]
        dataset: Option<Dataset>,
    },
    /// Print a dataset as JSON.
    Show {
        #[arg(short, long, value_enum)]
        dataset: Option<Dataset>,
    },
}

// --- Main Application Entry Point ---
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "recipe_seed failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = load_config(&cli)?;
    logging::init(&config.logging, cli.verbose)?;

    let command = cli.command.unwrap_or(Command::Seed {
        dataset: None,
        dry_run: false,
    });

    match command {
        Command::Show { dataset } => {
            let dataset = dataset.unwrap_or(config.seed.dataset);
            println!("{}", serde_json::to_string_pretty(dataset.records())?);
            Ok(())
        }
        Command::Seed { dataset, dry_run } => {
            let plan = plan_for(&config, dataset);
            if dry_run {
                info!("Dry run: seeding an in-memory store");
                seed(MemoryStore::new(&config.database.name), &plan).await
            } else {
                let store = MongoStore::connect(&config.store_options()).await?;
                seed(store, &plan).await
            }
        }
        Command::Verify { dataset } => {
            let plan = plan_for(&config, dataset);
            let store = MongoStore::connect(&config.store_options()).await?;
            verify(store, &plan).await
        }
    }
}

fn load_config(cli: &Cli) -> AppResult<Config> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    let mut config = loader.into_config();

    if let Some(uri) = &cli.uri {
        config.database.uri = uri.clone();
    }
    if let Some(database) = &cli.database {
        config.database.name = database.clone();
    }
    config.validate()?;
    Ok(config)
}

fn plan_for(config: &Config, dataset: Option<Dataset>) -> SeedPlan {
    let mut plan = config.seed_plan();
    if let Some(dataset) = dataset {
        plan.dataset = dataset;
    }
    plan
}

async fn seed<S: DocumentStore>(store: S, plan: &SeedPlan) -> AppResult<()> {
    let report = Seeder::new(store).run(plan).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn verify<S: DocumentStore>(store: S, plan: &SeedPlan) -> AppResult<()> {
    let report = Seeder::new(store).verify(plan).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let problems = report.problems();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::VerificationFailed {
            database: report.database,
            details: problems.join("; "),
        })
    }
}
