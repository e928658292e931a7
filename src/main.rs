use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use total_rewards::application::marketplace::Marketplace;
use total_rewards::application::rewards::RewardsService;
use total_rewards::domain::ports::{EventLogBox, UserBenefitStoreBox};
use total_rewards::infrastructure::in_memory::{InMemoryEventLog, InMemoryUserBenefitStore};
use total_rewards::infrastructure::reference_data::{DEMO_USER_ID, ReferenceData};
use total_rewards::interfaces::csv::action_reader::{ActionReader, ActionType};
use total_rewards::interfaces::csv::catalog_writer::CatalogWriter;
use total_rewards::interfaces::csv::user_benefit_writer::UserBenefitWriter;
use total_rewards::interfaces::http::{self, AppState};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory with benefits_catalog.json, user_profiles.json and
    /// compensation_benefits.json. Defaults to the built-in demo data.
    #[arg(long, global = true, env = "TOTAL_REWARDS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true, env = "TOTAL_REWARDS_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the JSON HTTP API
    Serve {
        #[arg(long, env = "TOTAL_REWARDS_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// User requests act on when they carry no userId
        #[arg(long, env = "TOTAL_REWARDS_DEMO_USER", default_value = DEMO_USER_ID)]
        demo_user: String,
    },
    /// Replay a CSV of request/activate/cancel actions and print the resulting records
    Apply {
        /// Input actions CSV file
        input: PathBuf,
    },
    /// Print the benefits catalog as CSV
    Catalog,
    /// Print a user's total rewards summary as JSON
    Rewards {
        #[arg(long, env = "TOTAL_REWARDS_DEMO_USER", default_value = DEMO_USER_ID)]
        user: String,
    },
}

fn open_stores(db_path: Option<&Path>) -> Result<(UserBenefitStoreBox, EventLogBox)> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            use total_rewards::infrastructure::rocksdb::RocksDBStore;

            let store = RocksDBStore::open(path).into_diagnostic()?;
            info!(path = %path.display(), "using RocksDB storage");
            let records: UserBenefitStoreBox = Box::new(store.clone());
            let events: EventLogBox = Box::new(store);
            Ok((records, events))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "--db-path given but the storage-rocksdb feature is not enabled, falling back to in-memory storage"
            );
            open_stores(None)
        }
        None => {
            let records: UserBenefitStoreBox = Box::new(InMemoryUserBenefitStore::new());
            let events: EventLogBox = Box::new(InMemoryEventLog::new());
            Ok((records, events))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with_writer(io::stderr)
        .init();

    let data = ReferenceData::load(cli.data_dir.as_deref()).into_diagnostic()?;
    info!(
        benefits = data.catalog.len(),
        users = data.profiles.len(),
        "reference data loaded"
    );

    match cli.command {
        Command::Serve { bind, demo_user } => {
            let (records, events) = open_stores(cli.db_path.as_deref())?;
            let rewards = RewardsService::new(Arc::new(data.clone()));
            let marketplace = Marketplace::new(data.catalog, records, events);
            marketplace
                .seed_active_benefits(&demo_user)
                .await
                .into_diagnostic()?;

            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .into_diagnostic()?;
            http::serve(listener, AppState::new(marketplace, rewards, &demo_user))
                .await
                .into_diagnostic()?;
        }
        Command::Apply { input } => {
            let (records, events) = open_stores(cli.db_path.as_deref())?;
            let marketplace = Marketplace::new(data.catalog, records, events);

            let file = File::open(input).into_diagnostic()?;
            for action in ActionReader::new(file).actions() {
                let action = match action {
                    Ok(action) => action,
                    Err(e) => {
                        eprintln!("Error reading action: {}", e);
                        continue;
                    }
                };
                let outcome = match action.action {
                    ActionType::Request => match action.price() {
                        Ok(price) => marketplace
                            .request(&action.user, &action.benefit, price)
                            .await
                            .map(drop),
                        Err(e) => Err(e),
                    },
                    ActionType::Activate => marketplace
                        .activate(&action.user, &action.benefit)
                        .await
                        .map(drop),
                    ActionType::Cancel => marketplace
                        .cancel(&action.user, &action.benefit)
                        .await
                        .map(drop),
                };
                if let Err(e) = outcome {
                    eprintln!("Error processing action: {}", e);
                }
            }

            let records = marketplace.into_records().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = UserBenefitWriter::new(stdout.lock());
            writer.write_records(&records).into_diagnostic()?;
        }
        Command::Catalog => {
            let stdout = io::stdout();
            let mut writer = CatalogWriter::new(stdout.lock());
            writer
                .write_catalog(data.catalog.entries())
                .into_diagnostic()?;
        }
        Command::Rewards { user } => {
            let summary = RewardsService::new(Arc::new(data))
                .summary(&user)
                .into_diagnostic()?;
            let json = serde_json::to_string_pretty(&summary).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
