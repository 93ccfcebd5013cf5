use clap::{ArgAction, Parser, Subcommand};
use cinetrack_models::WatchStatus;

mod commands;
mod logging;
mod output;

use commands::{auth, config, movies, watchlist, AppContext};

#[derive(Parser)]
#[command(name = "cinetrack")]
#[command(about = "CineTrack - Discover movies and track your watchlist from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Override the API base URL from the config file
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    #[command(long_about = "Create an account on the backend. Prompts for any credential not passed as a flag. Signing up does not log you in; run `cinetrack login` afterwards.")]
    Signup {
        /// Email address (prompts if omitted)
        #[arg(long)]
        email: Option<String>,

        /// Username (prompts if omitted)
        #[arg(long)]
        username: Option<String>,
    },
    /// Log in and store the session
    Login {
        /// Username (prompts if omitted)
        #[arg(long)]
        username: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the logged-in username
    Whoami,
    /// List popular movies
    Popular,
    /// Search the catalog
    #[command(long_about = "Search the movie catalog. An empty query lists popular movies. Use --pages to fetch and accumulate additional result pages.")]
    Search {
        /// Search term
        query: String,

        /// Number of result pages to fetch and accumulate
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show full detail for one movie, including your watchlist status
    Show {
        /// Movie id
        movie_id: u64,
    },
    /// List recommendations for a movie
    Recommend {
        /// Movie id
        movie_id: u64,
    },
    /// List catalog genres
    Genres,
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Show configuration and paths
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List your watchlist with full movie details
    List,
    /// Add a movie
    Add {
        /// Movie id
        movie_id: u64,

        /// Initial status
        #[arg(long, default_value = "pending")]
        status: WatchStatus,
    },
    /// Remove a movie
    Remove {
        /// Movie id
        movie_id: u64,
    },
    /// Change the status of a saved movie
    SetStatus {
        /// Movie id
        movie_id: u64,

        /// New status (pending, watching, watched, dropped)
        status: WatchStatus,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and file locations
    Show,
    /// Write a config file with the current effective values
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext::build(cli.base_url)
        .map_err(|e| color_eyre::eyre::eyre!("{e:#}"))?;

    let result: anyhow::Result<()> = match cli.command {
        Commands::Signup { email, username } => auth::run_signup(ctx, email, username, &output).await,
        Commands::Login { username } => auth::run_login(ctx, username, &output).await,
        Commands::Logout => auth::run_logout(ctx, &output),
        Commands::Whoami => auth::run_whoami(ctx, &output),
        Commands::Popular => movies::run_popular(ctx, &output).await,
        Commands::Search { query, pages } => movies::run_search(ctx, &query, pages, &output).await,
        Commands::Show { movie_id } => movies::run_show(ctx, movie_id, &output).await,
        Commands::Recommend { movie_id } => movies::run_recommend(ctx, movie_id, &output).await,
        Commands::Genres => movies::run_genres(ctx, &output).await,
        Commands::Watchlist { cmd } => match cmd {
            WatchlistCommands::List => watchlist::run_list(ctx, &output).await,
            WatchlistCommands::Add { movie_id, status } => {
                watchlist::run_add(ctx, movie_id, status, &output).await
            }
            WatchlistCommands::Remove { movie_id } => {
                watchlist::run_remove(ctx, movie_id, &output).await
            }
            WatchlistCommands::SetStatus { movie_id, status } => {
                watchlist::run_set_status(ctx, movie_id, status, &output).await
            }
        },
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => config::run_show(ctx, &output),
            ConfigCommands::Init => config::run_init(ctx, &output),
        },
    };

    result.map_err(|e| color_eyre::eyre::eyre!("{e:#}"))
}
