//! Persisted, url-deduplicated list of bookmarked articles.
//!
//! The whole list lives under a single key and is rewritten on every change.
//! `toggle_bookmark` is a read-modify-write over that key without any lock or
//! version token: two overlapping toggles both start from the same snapshot
//! and the later write wins. Callers are expected to await one toggle before
//! issuing the next, which is what a single user pressing buttons does.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::article::NewsArticle;
use crate::error::StoreError;
use crate::kv::{KeyValueStore, SharedKeyValueStore};

pub const STORAGE_KEY: &str = "@citypulse_bookmarks";

#[derive(Clone)]
pub struct BookmarkStore {
    kv: SharedKeyValueStore,
}

impl BookmarkStore {
    pub fn new(kv: SharedKeyValueStore) -> Self {
        Self { kv }
    }

    pub fn with_store<S: KeyValueStore + 'static>(kv: S) -> Self {
        Self { kv: Arc::new(kv) }
    }

    /// Strict load: tells "no bookmarks yet" apart from "could not load".
    pub async fn load_bookmarks(&self) -> Result<Vec<NewsArticle>, StoreError> {
        let raw = match self.kv.get(STORAGE_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: STORAGE_KEY.to_owned(),
            source,
        })
    }

    /// Current bookmarks, newest first. Load failures yield an empty list.
    pub async fn get_bookmarks(&self) -> Vec<NewsArticle> {
        match self.load_bookmarks().await {
            Ok(items) => items,
            Err(error) => {
                warn!(%error, "failed to load bookmarks");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list. Failures are logged and dropped.
    pub async fn save_bookmarks(&self, items: &[NewsArticle]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %StoreError::Serialize(e), "failed to save bookmarks");
                return;
            }
        };
        if let Err(error) = self.kv.set(STORAGE_KEY, &raw).await {
            warn!(%error, "failed to save bookmarks");
        } else {
            debug!(count = items.len(), "bookmarks saved");
        }
    }

    /// Remove `article` if bookmarked, otherwise put it first. Returns the new list.
    pub async fn toggle_bookmark(&self, article: &NewsArticle) -> Vec<NewsArticle> {
        let mut items = self.get_bookmarks().await;
        if is_bookmarked(&items, article) {
            items.retain(|item| !item.same_article(article));
        } else {
            items.insert(0, article.clone());
        }
        self.save_bookmarks(&items).await;
        items
    }
}

/// Whether `list` holds an article with the same url as `article`.
pub fn is_bookmarked(list: &[NewsArticle], article: &NewsArticle) -> bool {
    list.iter().any(|item| item.same_article(article))
}
