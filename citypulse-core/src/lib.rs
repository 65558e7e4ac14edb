pub mod alerts;
pub mod article;
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod kv;
pub mod news;

pub use alerts::{local_alerts, Alert, AlertLevel};
pub use article::NewsArticle;
pub use bookmarks::{is_bookmarked, BookmarkStore, STORAGE_KEY};
pub use config::{AppConfig, NewsConfig};
pub use error::{ConfigError, NewsError, StoreError};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SharedKeyValueStore};
pub use news::{mock_articles, FallbackReason, NewsClient, NewsFeed};
