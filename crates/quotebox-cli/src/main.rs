use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use quotebox_core::{
    categories::is_known_category,
    export::{Exporter, DEFAULT_EXPORT_FILE},
    models::Quote,
    service::{CategoryPick, DEFAULT_MULTIPLE_LIMIT},
    share::{self, ShareTarget},
    Clock, Config, FavoritesStore, HistoryStore, KeyValueStore, QuoteService, SqliteStore,
    StatsStore, SystemClock, ThemeStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quotebox")]
#[command(version, about = "Browse, collect and share quotes from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show a random quote
    Random,
    /// Show one quote from a category
    Category {
        /// Category name, see `quotebox categories`
        name: String,
    },
    /// List several random quotes without recording them
    Multiple {
        #[arg(short, long, default_value_t = DEFAULT_MULTIPLE_LIMIT)]
        limit: usize,
    },
    /// List the categories
    Categories {
        /// Only the featured ones
        #[arg(long)]
        popular: bool,
    },
    /// Manage favorite quotes
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show or clear viewing history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show usage statistics
    Stats,
    /// Show or flip the light/dark theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Print share text and links for the last viewed quote
    Share {
        /// twitter, facebook or linkedin; all of them when omitted
        #[arg(short, long)]
        target: Option<String>,
        /// Link attached to the post
        #[arg(long, default_value = "https://quotebox.app")]
        url: String,
    },
}

#[derive(clap::Subcommand)]
enum FavoritesAction {
    List,
    /// Star the last viewed quote (or unstar it if already starred)
    Toggle,
    /// Remove by id
    Remove { id: String },
    /// Write favorites to a .json, .csv or .md file
    Export { path: Option<PathBuf> },
}

#[derive(clap::Subcommand)]
enum HistoryAction {
    List,
    Clear,
}

#[derive(clap::Subcommand)]
enum ThemeAction {
    Toggle,
}

/// Everything one run needs, opened once
struct App {
    service: QuoteService,
    history: HistoryStore,
    stats: StatsStore,
    favorites: FavoritesStore,
    theme: ThemeStore,
}

impl App {
    fn open(config: &Config) -> anyhow::Result<Self> {
        let db_path = config.database_path()?;
        let backend: Arc<dyn KeyValueStore> = Arc::new(
            SqliteStore::open(&db_path)
                .with_context(|| format!("Failed to open local storage at {:?}", db_path))?,
        );

        Self::new(QuoteService::from_config(config)?, backend, Arc::new(SystemClock))
    }

    fn new(service: QuoteService, backend: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        Ok(Self {
            service,
            history: HistoryStore::open(backend.clone(), clock.clone()),
            stats: StatsStore::open(backend.clone())?,
            favorites: FavoritesStore::open(backend.clone(), clock),
            theme: ThemeStore::open(backend),
        })
    }

    /// A fresh random quote becomes the current one
    async fn show_random(&mut self) -> anyhow::Result<Option<Quote>> {
        let Some(quote) = self.service.random_quote_tracked().await else {
            return Ok(None);
        };
        self.record_view(&quote)?;
        Ok(Some(quote))
    }

    /// One quote out of the category becomes the current one; a single view
    async fn show_category(&mut self, name: &str) -> anyhow::Result<Option<CategoryPick>> {
        let Some(pick) = self.service.quote_from_category(name).await else {
            return Ok(None);
        };
        self.record_view(&pick.quote)?;
        Ok(Some(pick))
    }

    /// Several quotes to browse; none of them counts as viewed
    async fn browse_multiple(&self, limit: usize) -> Vec<Quote> {
        self.service.multiple_random_quotes(limit).await
    }

    /// What the UI does with every quote it shows
    fn record_view(&mut self, quote: &Quote) -> anyhow::Result<()> {
        self.history.add(quote)?;
        self.stats.update(quote)?;
        Ok(())
    }

    fn last_viewed(&self) -> anyhow::Result<Quote> {
        self.history
            .latest()
            .map(|entry| entry.quote.clone())
            .context("No quote viewed yet. Try `quotebox random` first")
    }
}

fn print_quote(quote: &Quote, is_favorite: bool) {
    let star = if is_favorite { " ★" } else { "" };
    println!("{}{}", share::format_for_sharing(quote), star);
    println!("  id: {}\n", quote.id);
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotebox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let Some(command) = cli.command else {
        println!("No command specified. Try --help");
        return Ok(());
    };

    let mut app = App::open(&config)?;

    match command {
        Commands::Random => {
            if let Some(quote) = app.show_random().await? {
                print_quote(&quote, app.favorites.is_favorite(&quote.id));
            }
        }
        Commands::Category { name } => {
            if !is_known_category(&name) {
                anyhow::bail!("Unknown category '{}'. See `quotebox categories`", name);
            }

            tracing::info!("Fetching category: {}", name);
            if let Some(pick) = app.show_category(&name).await? {
                if !pick.from_category {
                    println!("No quotes found for {}, showing random quote\n", name);
                }
                print_quote(&pick.quote, app.favorites.is_favorite(&pick.quote.id));
            }
        }
        Commands::Multiple { limit } => {
            let quotes = app.browse_multiple(limit).await;
            if quotes.is_empty() {
                println!("Couldn't fetch quotes right now. Please try again later.");
            }
            for quote in &quotes {
                print_quote(quote, app.favorites.is_favorite(&quote.id));
            }
        }
        Commands::Categories { popular } => {
            let list = if popular {
                app.service.popular_categories()
            } else {
                app.service.available_categories()
            };
            println!("{}", list.join(", "));
        }
        Commands::Favorites { action } => match action {
            FavoritesAction::List => {
                if app.favorites.is_empty() {
                    println!("No favorites yet.");
                }
                for fav in app.favorites.list() {
                    println!("[{}]", format_millis(fav.favorited_at));
                    print_quote(&fav.quote, true);
                }
            }
            FavoritesAction::Toggle => {
                let quote = app.last_viewed()?;
                if app.favorites.toggle(&quote)? {
                    println!("Added to favorites: {}", share::share_text(&quote));
                } else {
                    println!("Removed from favorites: {}", share::share_text(&quote));
                }
            }
            FavoritesAction::Remove { id } => {
                let before = app.favorites.len();
                app.favorites.remove(&id)?;
                if app.favorites.len() == before {
                    println!("No favorite with id {}", id);
                } else {
                    println!("Removed {}", id);
                }
            }
            FavoritesAction::Export { path } => {
                let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
                let format = Exporter::export_to_file(app.favorites.list(), &path)?;
                println!(
                    "Exported {} favorites as {} to {}",
                    app.favorites.len(),
                    format.extension(),
                    path.display()
                );
            }
        },
        Commands::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => {
                if app.history.is_empty() {
                    println!("History is empty.");
                }
                for entry in app.history.entries() {
                    println!("{}  {}", format_millis(entry.viewed_at), share::share_text(&entry.quote));
                }
            }
            HistoryAction::Clear => {
                app.history.clear()?;
                println!("History cleared.");
            }
        },
        Commands::Stats => {
            let stats = app.stats.stats();
            println!("Quotes viewed: {}", stats.total_quotes_viewed);
            println!("Sessions:      {}", stats.sessions_count);
            println!("Favorites:     {}", app.favorites.len());
            println!("\nTop categories:");
            for (name, count) in stats.top_categories(5) {
                println!("  {:<20} {}", name, count);
            }
            println!("\nTop authors:");
            for (name, count) in stats.top_authors(5) {
                println!("  {:<20} {}", name, count);
            }
        }
        Commands::Theme { action } => {
            if let Some(ThemeAction::Toggle) = action {
                app.theme.toggle()?;
            }
            println!("Theme: {}", app.theme.theme());
        }
        Commands::Share { target, url } => {
            let quote = app.last_viewed()?;
            let targets = match target {
                Some(name) => vec![ShareTarget::from_name(&name)
                    .with_context(|| format!("Unknown share target: {}", name))?],
                None => ShareTarget::all().to_vec(),
            };

            println!("{}\n", share::share_text(&quote));
            for target in targets {
                println!("{:<9} {}", target.as_str(), share::share_url(target, &quote, &url));
            }
            println!("image     {}", share::image_file_name(&quote));
        }
    }

    Ok(())
}
