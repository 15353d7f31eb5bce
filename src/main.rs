use fantasy_champ_backend::app::{self, AppState};
use fantasy_champ_backend::config::{Cli, Command};
use fantasy_champ_backend::repository::SqliteStore;
use fantasy_champ_backend::services::seed::{self, SeedOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::load();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = SqliteStore::connect(&cli.database_url, cli.db_max_connections)
        .await
        .expect("Could not connect to SQLite");
    store.migrate().await.expect("Could not apply migrations");

    let state = AppState::new(store.clone(), cli.sweep_concurrency);

    match cli.command() {
        Command::Serve => {
            let app = app::router(state);
            let listener = tokio::net::TcpListener::bind(&cli.bind_addr).await.unwrap();
            info!("Started server on {}.", cli.bind_addr);
            axum::serve(listener, app).await.unwrap();
        }
        Command::Recompute => match state.scores.recompute_all().await {
            Ok(report) => info!(
                "Recomputed {} team jornadas across {} teams, {} failures.",
                report.recomputed,
                report.teams,
                report.failures.len()
            ),
            Err(e) => {
                error!("Recompute failed: {}", e);
                std::process::exit(1);
            }
        },
        Command::Seed { jornadas, rng_seed } => {
            let options = SeedOptions { jornadas, rng_seed };
            match seed::seed(&store, &state.rosters, &state.scores, &options).await {
                Ok(summary) => info!(
                    "Seeded {} players, {} teams and {} stat lines into league {}.",
                    summary.players, summary.teams, summary.stats, summary.league_id
                ),
                Err(e) => {
                    error!("Seeding failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
