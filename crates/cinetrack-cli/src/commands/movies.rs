use anyhow::Result;
use serde_json::json;

use cinetrack_core::{fetch_detail, BrowseController};

use crate::commands::AppContext;
use crate::output::Output;

pub async fn run_popular(ctx: AppContext, output: &Output) -> Result<()> {
    let mut browse = BrowseController::new(ctx.catalog.clone());
    browse.search("").await?;
    output.movie_table(browse.movies());
    output.info(format!("{} results total", browse.total_results()));
    Ok(())
}

/// Search with pagination accumulation: page 1 first, then up to `pages`
/// appended via load-more, matching the web client's behavior.
pub async fn run_search(ctx: AppContext, query: &str, pages: u32, output: &Output) -> Result<()> {
    let mut browse = BrowseController::new(ctx.catalog.clone());
    browse.search(query).await?;

    let mut fetched = 1;
    while fetched < pages {
        if !browse.load_more().await? {
            break;
        }
        fetched += 1;
    }

    if browse.movies().is_empty() {
        output.warn(format!("No results for \"{query}\""));
        return Ok(());
    }

    output.movie_table(browse.movies());
    output.info(format!(
        "Showing {} of {} results",
        browse.movies().len(),
        browse.total_results()
    ));
    Ok(())
}

pub async fn run_show(ctx: AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let watchlist = ctx.session.is_authenticated().then(|| ctx.watchlist_client());
    let detail = fetch_detail(&ctx.catalog, watchlist.as_ref(), movie_id).await?;

    match output.format() {
        crate::output::OutputFormat::Human => {
            let movie = &detail.movie;
            output.info(format!(
                "{} ({})",
                movie.title,
                movie.year().unwrap_or("unknown")
            ));
            output.info(format!("Rating: {:.1}/10", movie.vote_average));
            if !movie.overview.is_empty() {
                output.info(&movie.overview);
            }
            match &detail.entry {
                Some(entry) => output.info(format!("On your watchlist: {}", entry.status)),
                None if ctx.session.is_authenticated() => {
                    output.info("Not on your watchlist");
                }
                None => output.info("Log in to track this movie"),
            }
        }
        _ => {
            output.json(&json!({
                "movie": detail.movie,
                "entry": detail.entry,
            }));
        }
    }
    Ok(())
}

pub async fn run_recommend(ctx: AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let page = ctx.catalog.recommendations(movie_id).await?;
    output.movie_table(&page.results);
    Ok(())
}

pub async fn run_genres(ctx: AppContext, output: &Output) -> Result<()> {
    let genres = ctx.catalog.genres().await?;
    match output.format() {
        crate::output::OutputFormat::Human => {
            for genre in &genres {
                output.info(format!("{:>5}  {}", genre.id, genre.name));
            }
        }
        _ => output.json(&serde_json::to_value(&genres)?),
    }
    Ok(())
}
