use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use esports_stats::api::routes::ingest::{validate_results, validate_stats, validate_subscriptions};
use esports_stats::api::routes::leaderboards::{
    player_leaderboard_for, team_leaderboard_for, LeaderboardMetric,
};
use esports_stats::api::state::AppState;
use esports_stats::calculate::{summarize_championship, summarize_player, summarize_team};
use esports_stats::config::AppConfig;
use esports_stats::models::{MatchResult, ParticipantMatchStat, Subscription};
use esports_stats::storage::{Dataset, EntityType, JsonlReader, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "esports-stats")]
#[command(about = "Valorant tournament statistics: summaries and leaderboards")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Append records from a JSONL file to the data store
    Import {
        /// Entity type: stats, results or subscriptions
        #[arg(long)]
        entity: String,

        /// JSONL file to read
        #[arg(long)]
        file: PathBuf,
    },

    /// Print a summary as JSON
    Summary {
        /// Participant id
        #[arg(long, conflicts_with_all = ["team", "championship"])]
        player: Option<String>,

        /// Team id
        #[arg(long, conflicts_with = "championship")]
        team: Option<String>,

        /// Championship id
        #[arg(long)]
        championship: Option<String>,
    },

    /// Print a leaderboard
    Leaderboard {
        /// Player metric: kda, kills or mvps
        #[arg(long, default_value = "kda")]
        by: LeaderboardMetric,

        /// Number of entries
        #[arg(long)]
        limit: Option<usize>,

        /// Restrict to one championship
        #[arg(long)]
        championship: Option<String>,

        /// Rank teams by win rate instead of players
        #[arg(long)]
        teams: bool,
    },
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}

fn load_dataset(storage: &StorageConfig) -> Result<Dataset> {
    let dataset = Dataset::load(storage)?;
    if dataset.is_empty() {
        tracing::warn!("No records found under {:?}", storage.normalized_dir());
    }
    Ok(dataset)
}

fn import_file<T: DeserializeOwned + Serialize>(
    storage: &StorageConfig,
    entity: EntityType,
    file: &Path,
    validate: impl Fn(&[T]) -> Result<(), String>,
) -> Result<usize> {
    let reader = JsonlReader::<T>::new(file.to_path_buf());
    if !reader.exists() {
        bail!("input file not found: {}", reader.path().display());
    }

    let records = reader.read_all()?;
    if let Err(e) = validate(&records) {
        bail!("{}: {}", file.display(), e);
    }

    Ok(JsonlWriter::for_entity(storage, entity).append_batch(&records)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_exists = cli.config.exists();
    let mut config = load_config(&cli.config)?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing on stderr; stdout carries command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting esports-stats v{}", env!("CARGO_PKG_VERSION"));
    if !config_exists {
        tracing::info!("No config file at {}, using defaults", cli.config.display());
    }

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            tracing::info!("Serving data from {:?}", config.data_dir);

            let app = esports_stats::api::build_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Import { entity, file } => {
            let Some(entity_type) = EntityType::parse(&entity) else {
                bail!("Unknown entity: {}. Use 'stats', 'results' or 'subscriptions'.", entity);
            };

            let stored = match entity_type {
                EntityType::MatchStat => import_file::<ParticipantMatchStat>(
                    &storage,
                    entity_type,
                    &file,
                    validate_stats,
                )?,
                EntityType::MatchResult => {
                    import_file::<MatchResult>(&storage, entity_type, &file, validate_results)?
                }
                EntityType::Subscription => import_file::<Subscription>(
                    &storage,
                    entity_type,
                    &file,
                    validate_subscriptions,
                )?,
            };

            println!("\n=== Import Results ===");
            println!("Entity:   {}", entity_type.filename());
            println!("Stored:   {}", stored);
        }
        Commands::Summary {
            player,
            team,
            championship,
        } => {
            let dataset = load_dataset(&storage)?;

            let json = if let Some(id) = player {
                serde_json::to_string_pretty(&summarize_player(&dataset.stats, &id.into()))?
            } else if let Some(id) = team {
                serde_json::to_string_pretty(&summarize_team(&dataset.stats, &id.into()))?
            } else if let Some(id) = championship {
                serde_json::to_string_pretty(&summarize_championship(
                    &dataset.stats,
                    &dataset.results,
                    &dataset.subscriptions,
                    &id.into(),
                ))?
            } else {
                bail!("Pass one of --player, --team or --championship");
            };

            println!("{}", json);
        }
        Commands::Leaderboard {
            by,
            limit,
            championship,
            teams,
        } => {
            let dataset = load_dataset(&storage)?;
            let limit = config.leaderboard.resolve(limit);

            if teams {
                let ranked = team_leaderboard_for(dataset, championship.as_deref(), limit);
                println!("\n=== Team Leaderboard (win rate) ===");
                println!(
                    "{:>4}  {:<20} {:>7} {:>5} {:>6} {:>9}",
                    "#", "Team", "Matches", "Wins", "Losses", "Win rate"
                );
                for entry in &ranked {
                    println!(
                        "{:>4}  {:<20} {:>7} {:>5} {:>6} {:>8.1}%",
                        entry.rank,
                        entry.summary.team_id,
                        entry.summary.match_count,
                        entry.summary.wins,
                        entry.summary.losses,
                        entry.summary.win_rate * 100.0
                    );
                }
            } else {
                let ranked = player_leaderboard_for(dataset, by, championship.as_deref(), limit);
                println!("\n=== Player Leaderboard ({}) ===", by);
                println!(
                    "{:>4}  {:<20} {:>7} {:>5} {:>6} {:>7} {:>4} {:>6}",
                    "#", "Player", "Matches", "K", "D", "A", "MVP", "KDA"
                );
                for entry in &ranked {
                    let s = &entry.summary;
                    println!(
                        "{:>4}  {:<20} {:>7} {:>5} {:>6} {:>7} {:>4} {:>6.2}",
                        entry.rank,
                        s.participant_id,
                        s.match_count,
                        s.total_kills,
                        s.total_deaths,
                        s.total_assists,
                        s.mvp_count,
                        s.kda_ratio
                    );
                }
            }
        }
    }

    Ok(())
}
