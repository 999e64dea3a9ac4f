//! tvscope - TV show catalog browser CLI.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use crate::tui::state::search::MAX_SEARCH_RESULTS;
use tvscope_api::tmdb::{
    LocalCatalogApi, SIZE_W500, SearchTvParams, TmdbClient, TvShow, image_url,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive catalog browser.
    Browse,
    /// List shows trending this week.
    Trending,
    /// List popular shows.
    Popular,
    /// List top rated shows.
    TopRated,
    /// List shows airing today.
    AiringToday,
    /// Search TV shows by name.
    Search(SearchArgs),
    /// Show details for one TV series.
    Show(ShowArgs),
    /// List episodes of one season.
    Season(SeasonArgs),
    /// Manage configuration.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "breaking bad").
    #[arg(long, required = true)]
    query: String,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `season` subcommand.
#[derive(clap::Args)]
struct SeasonArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number.
    #[arg(long, required = true)]
    season: u32,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file template.
    Init,
}

/// Builds a `TmdbClient` from `TMDB_API_KEY` or `config.toml`.
///
/// The environment variable takes precedence over the config file.
///
/// # Errors
///
/// Returns an error if no API key is configured or the client fails to
/// build.
#[instrument(skip_all)]
fn build_catalog_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let api_key = std::env::var("TMDB_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .or(config.tmdb.api_key)
        .filter(|key| !key.is_empty())
        .context("TMDB API key is required: set TMDB_API_KEY or run `tvscope config init`")?;

    let mut builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(base_url) = config.tmdb.base_url {
        let url = base_url
            .parse()
            .context("invalid tmdb.base_url in config")?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    tui::run_browser(client).await
}

/// Runs the `trending` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_trending(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let shows = client
        .trending()
        .await
        .context("TMDB trending request failed")?;
    print_show_table(&shows);
    Ok(())
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_popular(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let shows = client
        .popular()
        .await
        .context("TMDB popular request failed")?;
    print_show_table(&shows);
    Ok(())
}

/// Runs the `top-rated` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_top_rated(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let shows = client
        .top_rated()
        .await
        .context("TMDB top rated request failed")?;
    print_show_table(&shows);
    Ok(())
}

/// Runs the `airing-today` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_airing_today(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let shows = client
        .airing_today()
        .await
        .context("TMDB airing today request failed")?;
    print_show_table(&shows);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// The table shows at most the first [`MAX_SEARCH_RESULTS`] rows of
/// the page, like the browse overlay. The summary line still reports
/// the full result count.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let params = SearchTvParams::new(&args.query).page(args.page);
    let response = client
        .search_tv(&params)
        .await
        .context("TMDB search/tv request failed")?;

    tracing::info!(
        "Total results: {} (page {} of {})",
        response.total_results,
        response.page,
        response.total_pages
    );
    let mut results = response.results;
    results.truncate(MAX_SEARCH_RESULTS);
    print_show_table(&results);
    Ok(())
}

/// Runs the `show` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_show(args: &ShowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let details = client
        .tv_details(args.id)
        .await
        .context("TMDB tv details request failed")?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Name: {}", details.name);
    if !details.tagline.is_empty() {
        tracing::info!("Tagline: {}", details.tagline);
    }
    tracing::info!(
        "First Air Date: {}",
        details.first_air_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
    tracing::info!("Rating: {:.1}", details.vote_average);
    tracing::info!("Seasons: {}", details.number_of_seasons);
    tracing::info!("Episodes: {}", details.number_of_episodes);
    tracing::info!(
        "Genres: {}",
        details
            .genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Networks: {}",
        details
            .networks
            .iter()
            .map(|network| network.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Created By: {}",
        details
            .created_by
            .iter()
            .map(|creator| creator.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Poster: {}",
        image_url(details.poster_path.as_deref(), SIZE_W500)
    );
    tracing::info!("Overview: {}", details.overview);
    tracing::info!("---");
    for season in &details.seasons {
        tracing::info!(
            "  Season {}: {} episodes (air_date: {})",
            season.season_number,
            season.episode_count,
            season.air_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `season` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_season(args: &SeasonArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let episodes = client
        .season_episodes(args.id, args.season)
        .await
        .context("TMDB tv season request failed")?;

    tracing::info!("Season {}: {} episodes", args.season, episodes.len());
    for episode in &episodes {
        tracing::info!(
            "  E{:02}: {} (air_date: {}, runtime: {}min, rating: {:.1})",
            episode.episode_number,
            episode.name,
            episode.air_date.as_deref().unwrap_or("-"),
            episode
                .runtime
                .map_or_else(|| String::from("-"), |minutes| minutes.to_string()),
            episode.vote_average,
        );
    }

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
#[instrument(skip_all)]
fn run_config_init(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() {
        tracing::info!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let config = AppConfig::default();
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Add your TMDB API key under [tmdb] api_key, or set TMDB_API_KEY.");
    Ok(())
}

/// Prints one line per show with ID, year, rating and name.
fn print_show_table(shows: &[TvShow]) {
    tracing::info!("ID\tYear\tRating\tLang\tName");
    for show in shows {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}\t{}",
            show.id,
            show.first_air_date
                .as_deref()
                .and_then(|date| date.get(..4))
                .unwrap_or("-"),
            show.vote_average,
            show.original_language,
            show.name,
        );
    }
    tracing::info!("Total: {} shows", shows.len());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Trending => run_trending(cli.dir.as_ref()).await,
        Commands::Popular => run_popular(cli.dir.as_ref()).await,
        Commands::TopRated => run_top_rated(cli.dir.as_ref()).await,
        Commands::AiringToday => run_airing_today(cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Show(args) => run_show(&args, cli.dir.as_ref()).await,
        Commands::Season(args) => run_season(&args, cli.dir.as_ref()).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init => run_config_init(cli.dir.as_ref()),
        },
    }
}
