mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use citypulse_core::{
    is_bookmarked, local_alerts, AppConfig, BookmarkStore, FileKeyValueStore, NewsClient,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "citypulse", version, about = "City news, bookmarks and local alerts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Latest news for a city
    News {
        #[arg(long)]
        city: Option<String>,
    },
    /// Cities news can be fetched for
    Cities,
    /// Bookmark (or unbookmark) the article at INDEX in the city's news list
    Bookmark {
        #[arg(long)]
        city: Option<String>,
        index: usize,
    },
    /// Saved articles, newest first
    Bookmarks,
    /// Drop a saved article
    Remove { url: String },
    /// Read an article in the system browser
    Open { url: String },
    /// Local alerts
    Alerts,
}

struct App {
    config: AppConfig,
    bookmarks: BookmarkStore,
    news: NewsClient,
}

impl App {
    fn new(config: AppConfig) -> Result<Self> {
        let data_dir = config.resolved_data_dir();
        debug!(data_dir = %data_dir.display(), "opening bookmark store");
        let bookmarks = BookmarkStore::with_store(FileKeyValueStore::new(data_dir));
        let news = NewsClient::new(config.news.clone()).context("failed to build HTTP client")?;
        Ok(Self {
            config,
            bookmarks,
            news,
        })
    }

    fn city(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.config.default_city().to_owned())
    }

    async fn news(&self, city: Option<String>) -> Result<()> {
        let feed = self.news.city_news(&self.city(city)).await;
        let saved = self.bookmarks.get_bookmarks().await;
        println!("{}", render::heading(&format!("News for {}", feed.city)));
        if let Some(notice) = feed.notice {
            println!("{notice}\n");
        }
        for (index, article) in feed.articles.iter().enumerate() {
            println!(
                "{}",
                render::article_line(index, article, is_bookmarked(&saved, article))
            );
        }
        Ok(())
    }

    async fn bookmark(&self, city: Option<String>, index: usize) -> Result<()> {
        let feed = self.news.city_news(&self.city(city)).await;
        let Some(article) = feed.articles.get(index) else {
            bail!(
                "no article #{index} for {} ({} available)",
                feed.city,
                feed.articles.len()
            );
        };
        let updated = self.bookmarks.toggle_bookmark(article).await;
        let verb = if is_bookmarked(&updated, article) {
            "Bookmarked"
        } else {
            "Removed"
        };
        println!("{verb}: {} ({} saved)", article.title, updated.len());
        Ok(())
    }

    async fn list_bookmarks(&self) -> Result<()> {
        let items = self.bookmarks.get_bookmarks().await;
        println!("{}", render::heading("Bookmarked stories"));
        if items.is_empty() {
            println!("No bookmarks yet.");
        }
        for (index, article) in items.iter().enumerate() {
            println!("{}", render::bookmark_line(index, article));
        }
        Ok(())
    }

    async fn remove(&self, url: &str) -> Result<()> {
        let current = self.bookmarks.get_bookmarks().await;
        let Some(article) = current.iter().find(|a| a.url == url) else {
            bail!("{url} is not bookmarked");
        };
        let updated = self.bookmarks.toggle_bookmark(article).await;
        println!("Removed: {} ({} saved)", article.title, updated.len());
        Ok(())
    }

    fn open(&self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            bail!("No article URL provided.");
        }
        webbrowser::open(url).with_context(|| format!("failed to open {url}"))?;
        Ok(())
    }

    fn cities(&self) {
        let default = self.config.default_city();
        for city in &self.config.cities {
            let marker = if city == default { " (default)" } else { "" };
            println!("{city}{marker}");
        }
    }
}

fn alerts() {
    println!("{}", render::heading("Emergency alerts"));
    for alert in local_alerts() {
        println!("{}", render::alert_block(&alert));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let app = App::new(AppConfig::load())?;

    match cli.command {
        Command::News { city } => app.news(city).await,
        Command::Cities => {
            app.cities();
            Ok(())
        }
        Command::Bookmark { city, index } => app.bookmark(city, index).await,
        Command::Bookmarks => app.list_bookmarks().await,
        Command::Remove { url } => app.remove(&url).await,
        Command::Open { url } => app.open(&url),
        Command::Alerts => {
            alerts();
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bookmark_takes_city_and_index() {
        let cli = Cli::try_parse_from(["citypulse", "bookmark", "--city", "Pune", "2"]).unwrap();
        match cli.command {
            Command::Bookmark { city, index } => {
                assert_eq!(city.as_deref(), Some("Pune"));
                assert_eq!(index, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
