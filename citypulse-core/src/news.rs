use std::fmt;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::article::{NewsArticle, NO_DESCRIPTION, UNTITLED};
use crate::config::NewsConfig;
use crate::error::NewsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingApiKey,
    FetchFailed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::MissingApiKey => {
                f.write_str("Using fallback data. Add an API key for live news.")
            }
            FallbackReason::FetchFailed => {
                f.write_str("Could not fetch latest news. Showing fallback list.")
            }
        }
    }
}

/// Articles to display for a city, plus why they are mock data if they are.
#[derive(Debug, Clone)]
pub struct NewsFeed {
    pub city: String,
    pub articles: Vec<NewsArticle>,
    pub notice: Option<FallbackReason>,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl RawArticle {
    fn into_article(self) -> Option<NewsArticle> {
        let url = self.url.filter(|u| !u.is_empty())?;
        Some(NewsArticle {
            title: self.title.unwrap_or_else(|| UNTITLED.to_owned()),
            description: self.description.unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
            url,
            url_to_image: self.url_to_image,
            published_at: self.published_at,
            source: self.source.and_then(|s| s.name),
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    config: NewsConfig,
}

impl NewsClient {
    pub fn new(config: NewsConfig) -> Result<Self, NewsError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("CityPulse/0.1")
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: NewsConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> Result<Url, NewsError> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/v2/everything"))?)
    }

    /// Latest articles mentioning `city`, url-less entries removed.
    pub async fn fetch_city(&self, city: &str) -> Result<Vec<NewsArticle>, NewsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NewsError::MissingApiKey)?;
        let page_size = self.config.page_size.to_string();
        let response = self
            .client
            .get(self.endpoint()?)
            .query(&[
                ("q", city),
                ("language", self.config.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Status(status.as_u16()));
        }
        let body: EverythingResponse = response.json().await?;
        let articles: Vec<NewsArticle> = body
            .articles
            .into_iter()
            .filter_map(RawArticle::into_article)
            .collect();
        debug!(city, count = articles.len(), "fetched news");
        Ok(articles)
    }

    /// Never fails: falls back to mock articles when live news is unavailable.
    pub async fn city_news(&self, city: &str) -> NewsFeed {
        let (articles, notice) = match self.fetch_city(city).await {
            Ok(articles) if !articles.is_empty() => (articles, None),
            Ok(_) => {
                info!(city, "news source returned nothing usable, showing mock articles");
                (mock_articles(), None)
            }
            Err(NewsError::MissingApiKey) => {
                info!("no news API key configured, showing mock articles");
                (mock_articles(), Some(FallbackReason::MissingApiKey))
            }
            Err(error) => {
                warn!(city, %error, "failed to fetch news");
                (mock_articles(), Some(FallbackReason::FetchFailed))
            }
        };
        NewsFeed {
            city: city.to_owned(),
            articles,
            notice,
        }
    }
}

struct MockArticle {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    image: &'static str,
}

const MOCK: &[MockArticle] = &[
    MockArticle {
        title: "City metro expands to new neighborhoods",
        description: "Daily commute eases as the metro adds three new stops across the city.",
        url: "https://newsapi.mock/city-metro",
        image: "https://images.unsplash.com/photo-1506617420156-8e4536971650?auto=format&fit=crop&w=1200&q=80",
    },
    MockArticle {
        title: "Green drive: Parks to get more trees this monsoon",
        description: "The city council approves a plan to plant 50,000 saplings near public spaces.",
        url: "https://newsapi.mock/green-drive",
        image: "https://images.unsplash.com/photo-1504198453319-5ce911bafcde?auto=format&fit=crop&w=1200&q=80",
    },
    MockArticle {
        title: "Night food streets to open this weekend",
        description: "Vendors prepare to serve late-night diners in the new designated zones.",
        url: "https://newsapi.mock/food-street",
        image: "https://images.unsplash.com/photo-1498654896293-37aacf113fd9?auto=format&fit=crop&w=1200&q=80",
    },
];

/// Offline articles, stamped with the current time.
pub fn mock_articles() -> Vec<NewsArticle> {
    let now = Utc::now().to_rfc3339();
    MOCK.iter()
        .map(|m| NewsArticle {
            title: m.title.to_owned(),
            description: m.description.to_owned(),
            url: m.url.to_owned(),
            url_to_image: Some(m.image.to_owned()),
            published_at: Some(now.clone()),
            source: Some("City Pulse".to_owned()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_article_defaults_and_source_name() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "title": null,
            "url": "https://x/1",
            "source": { "id": null, "name": "Daily" }
        }))
        .unwrap();
        let article = raw.into_article().unwrap();
        assert_eq!(article.title, UNTITLED);
        assert_eq!(article.description, NO_DESCRIPTION);
        assert_eq!(article.source.as_deref(), Some("Daily"));
    }

    #[test]
    fn raw_article_without_url_is_dropped() {
        let raw: RawArticle =
            serde_json::from_value(serde_json::json!({ "title": "T", "url": "" })).unwrap();
        assert!(raw.into_article().is_none());
    }

    #[test]
    fn mock_articles_have_distinct_urls() {
        let mocks = mock_articles();
        assert_eq!(mocks.len(), 3);
        assert!(mocks.iter().all(|a| a.display_date() != "Recently"));
        assert_ne!(mocks[0].url, mocks[1].url);
        assert_ne!(mocks[1].url, mocks[2].url);
    }
}
