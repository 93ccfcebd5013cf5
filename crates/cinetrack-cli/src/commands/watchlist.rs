use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

use cinetrack_models::WatchStatus;
use cinetrack_core::WatchlistController;

use crate::commands::AppContext;
use crate::output::Output;

fn controller(ctx: &AppContext) -> WatchlistController {
    WatchlistController::new(ctx.watchlist_client(), ctx.catalog.clone())
}

fn spinner(msg: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Fetch and render the joined watchlist. The join issues one detail
/// request per entry, hence the spinner.
pub async fn run_list(ctx: AppContext, output: &Output) -> Result<()> {
    let mut ctl = controller(&ctx);
    let pb = spinner("Fetching watchlist...");
    let result = ctl.refresh().await;
    pb.finish_and_clear();

    match result {
        Ok(items) => {
            if items.is_empty() {
                output.info("Your watchlist is empty.");
            } else {
                output.watchlist_table(&items);
            }
            Ok(())
        }
        Err(e) => {
            output.error(format!("Could not fetch watchlist: {e}"));
            Err(e)
        }
    }
}

pub async fn run_add(
    ctx: AppContext,
    movie_id: u64,
    status: WatchStatus,
    output: &Output,
) -> Result<()> {
    let mut ctl = controller(&ctx);
    match ctl.add(movie_id, status).await {
        Ok(entry) => {
            output.success(format!("Added movie {} ({})", entry.movie_id, entry.status));
            Ok(())
        }
        Err(e) => {
            output.error(format!("Could not add movie {movie_id}: {e}"));
            Err(e)
        }
    }
}

pub async fn run_remove(ctx: AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let mut ctl = controller(&ctx);
    match ctl.remove(movie_id).await {
        Ok(()) => {
            output.success(format!("Removed movie {movie_id}"));
            Ok(())
        }
        Err(e) => {
            output.error(format!("Could not remove movie {movie_id}: {e}"));
            Err(e)
        }
    }
}

pub async fn run_set_status(
    ctx: AppContext,
    movie_id: u64,
    status: WatchStatus,
    output: &Output,
) -> Result<()> {
    let mut ctl = controller(&ctx);
    match ctl.set_status(movie_id, status).await {
        Ok(entry) => {
            output.success(format!("Movie {} is now {}", entry.movie_id, entry.status));
            Ok(())
        }
        Err(e) => {
            output.error(format!("Could not update movie {movie_id}: {e}"));
            Err(e)
        }
    }
}
