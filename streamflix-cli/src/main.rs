//! `streamflix` binary: browse the catalog, manage the local watchlist and
//! watch the hero carousel rotate in the terminal.

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use streamflix_config::loader::CONFIG_PATH_VAR;
use streamflix_config::{Config, ConfigSource};
use streamflix_core::model::{MediaKind, TimeWindow, WatchlistEntry};
use streamflix_core::pages::{
    MovieTab, MovieView, PersonView, TvTab, TvView,
};
use streamflix_core::{
    CarouselHandle, FaqClient, HeroSlide, HomeFeed, MetadataProvider,
    MoviesPage, ProviderError, ProviderLookup, SearchSession, TmdbProvider,
    TvPage, Watchlist,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "streamflix", version)]
#[command(about = "Browse movies and TV shows, keep a watchlist, preview trailers")]
struct Cli {
    /// Config file (TOML or JSON). Overrides $STREAMFLIX_CONFIG_PATH.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter such as `debug` or `streamflix_core=trace`. Defaults to
    /// $RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hero, trending and popular rows
    Home {
        #[arg(long, default_value = "week")]
        window: TimeWindow,
    },
    /// Movie lists: trending, popular, top_rated
    Movies {
        #[arg(long)]
        tab: Option<MovieTab>,
    },
    /// TV lists: airing_today, on_the_air, popular, top_rated
    Tv {
        #[arg(long)]
        tab: Option<TvTab>,
    },
    /// Multi search across movies, shows and people
    Search {
        query: String,
        /// Number of result pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Movie details
    Movie { id: u64 },
    /// TV show details
    Show { id: u64 },
    /// Person details and best-known credits
    Person { id: u64 },
    /// Local "My List"
    #[command(subcommand)]
    Watchlist(WatchlistCommand),
    /// Frequently asked questions from the FAQ service
    Faq {
        #[arg(long)]
        source: Option<String>,
    },
    /// Run the hero carousel and print each slide as it changes
    Carousel {
        #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
        duration: Duration,
    },
}

#[derive(Debug, Subcommand)]
enum WatchlistCommand {
    List,
    /// Add a title by kind (`movie` or `tv`) and id
    Add { kind: MediaKind, id: u64 },
    /// Remove a title by kind and id
    Remove { kind: MediaKind, id: u64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = load_config(cli.config.as_ref())?;
    let result = run(cli.command, &config).await;
    if let Err(err) = &result
        && is_transient(err)
    {
        warn!("the catalog service is busy or unreachable, try again shortly");
    }
    result
}

/// Whether any cause in the chain is a provider failure worth retrying.
fn is_transient(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ProviderError>()
            .is_some_and(ProviderError::is_transient)
    })
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn,streamflix_core=info".into()),
    };

    // Logs go to stderr so rendered output stays pipeable.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let (config, source) = match path {
        Some(path) => {
            let path = path.display().to_string();
            Config::load_with(|name| {
                if name == CONFIG_PATH_VAR {
                    Some(path.clone())
                } else {
                    std::env::var(name).ok()
                }
            })
        }
        None => Config::load_from_env(),
    }
    .context("failed to load configuration")?;

    match &source {
        ConfigSource::Default => debug!("using default configuration"),
        ConfigSource::EnvPath(path) | ConfigSource::File(path) => {
            info!(path = %path.display(), "configuration loaded from file")
        }
    }
    Ok(config)
}

fn provider(config: &Config) -> anyhow::Result<Arc<TmdbProvider>> {
    let settings = config.tmdb_settings()?;
    let provider =
        TmdbProvider::new(settings).context("failed to build TMDB client")?;
    Ok(Arc::new(provider))
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let images = config.image_urls();

    match command {
        Command::Home { window } => {
            let tmdb = provider(config)?;
            let feed = HomeFeed::load(tmdb.as_ref()).await?;
            if let Some(hero) = feed.hero() {
                println!(
                    "Featured: {} [{}] {}\n",
                    hero.display_title(),
                    feed.hero_kind(),
                    hero.link_path()
                );
            }
            let trending = format!("Trending ({window})");
            print!("{}", render::row(&trending, feed.trending(window)));
            print!("{}", render::row("Popular Movies", &feed.popular_movies));
            print!("{}", render::row("Popular TV Shows", &feed.popular_tv));
        }
        Command::Movies { tab } => {
            let tab = tab.unwrap_or_default();
            let page = MoviesPage::load(provider(config)?.as_ref()).await?;
            print!("{}", render::row(tab.label(), page.tab(tab)));
        }
        Command::Tv { tab } => {
            let tab = tab.unwrap_or_default();
            let page = TvPage::load(provider(config)?.as_ref()).await?;
            print!("{}", render::row(tab.label(), page.tab(tab)));
        }
        Command::Search { query, pages } => {
            let tmdb = provider(config)?;
            let mut session = SearchSession::start(tmdb.as_ref(), &query).await?;
            while session.page() < pages && session.has_more() {
                if session.load_more(tmdb.as_ref()).await? == 0 {
                    break;
                }
            }
            print!("{}", render::search(&session));
        }
        Command::Movie { id } => {
            let view = MovieView::load(provider(config)?.as_ref(), &images, id).await?;
            print!("{}", render::movie(&view));
        }
        Command::Show { id } => {
            let view = TvView::load(provider(config)?.as_ref(), &images, id).await?;
            print!("{}", render::tv(&view));
        }
        Command::Person { id } => {
            let view =
                PersonView::load(provider(config)?.as_ref(), &images, id).await?;
            print!("{}", render::person(&view));
        }
        Command::Watchlist(command) => run_watchlist(command, config).await?,
        Command::Faq { source } => {
            let client = FaqClient::new(config.faq_settings())?;
            let entries = match source {
                Some(source) => client.fetch(&source).await?,
                None => client.fetch_default().await?,
            };
            print!("{}", render::faq(&entries));
        }
        Command::Carousel { duration } => run_carousel(config, duration).await?,
    }
    Ok(())
}

async fn run_watchlist(
    command: WatchlistCommand,
    config: &Config,
) -> anyhow::Result<()> {
    let list = Watchlist::new(config.watchlist_store());

    match command {
        WatchlistCommand::List => {
            print!("{}", render::watchlist(&list.entries()?));
        }
        WatchlistCommand::Add { kind, id } => {
            let tmdb = provider(config)?;
            let item = match kind {
                MediaKind::Movie => tmdb.movie_details(id).await?.to_catalog_item(),
                MediaKind::Tv => tmdb.tv_details(id).await?.to_catalog_item(),
                MediaKind::Person => {
                    anyhow::bail!("people cannot be added to the watchlist")
                }
            };
            let entry = WatchlistEntry::from_catalog(&item);
            if list.add(entry.clone())? {
                println!("Added {} to My List", entry.title);
            } else {
                println!("{} is already in My List", entry.title);
            }
        }
        WatchlistCommand::Remove { kind, id } => {
            if list.remove(id, kind)? {
                println!("Removed {kind} {id} from My List");
            } else {
                println!("{kind} {id} is not in My List");
            }
        }
    }
    Ok(())
}

/// Mounts the hero carousel over the weekly trending titles and prints a
/// slide whenever the index changes or a trailer is revealed.
async fn run_carousel(config: &Config, duration: Duration) -> anyhow::Result<()> {
    let tmdb = provider(config)?;
    let images = config.image_urls();
    let feed = HomeFeed::load(tmdb.as_ref())
        .await
        .context("failed to load trending titles")?;

    let items = feed.carousel_items();
    if items.is_empty() {
        warn!("no trending titles to show");
        return Ok(());
    }

    let lookup = Arc::new(ProviderLookup::new(Arc::clone(&tmdb)));
    let handle = CarouselHandle::spawn(items, config.carousel_config(), lookup);
    let mut updates = handle.subscribe();

    let deadline = tokio::time::sleep(duration);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(deadline, ctrl_c);

    let mut shown: Option<(usize, bool, bool)> = None;
    loop {
        {
            let snapshot = updates.borrow_and_update();
            let key = (
                snapshot.current_index,
                snapshot.preview_revealed,
                snapshot.muted,
            );
            if shown != Some(key) {
                shown = Some(key);
                if let Some(slide) = HeroSlide::render(&snapshot, &images) {
                    println!("{}", render::slide(&slide));
                }
            }
        }

        tokio::select! {
            _ = &mut deadline => break,
            _ = &mut ctrl_c => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    handle.shutdown();
    handle.closed().await;
    Ok(())
}
