use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fantasy_champ_backend")]
#[command(about = "Fantasy football team management backend", long_about = None)]
pub struct Cli {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://fantasy.db")]
    pub database_url: String,

    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,

    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: String,

    /// Teams recomputed in parallel during a scoring sweep
    #[arg(long, env = "SWEEP_CONCURRENCY", default_value_t = 4)]
    pub sweep_concurrency: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Recompute every team score for every jornada
    Recompute,
    /// Fill the database with demo clubs, players, stats and teams
    Seed {
        #[arg(long, default_value_t = 4)]
        jornadas: i64,
        /// Fixed seed for reproducible data
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

impl Cli {
    /// Loads `.env` first, so its values act as environment fallbacks.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Cli::parse()
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
