use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available.";

/// One article as shown in lists and stored in the bookmark set.
///
/// `url` is the identity of an article: two records with the same url are the
/// same article, whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Stored records may omit display strings or hold `null` for them.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewsArticle {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            url_to_image: None,
            published_at: None,
            source: None,
        }
    }

    pub fn same_article(&self, other: &NewsArticle) -> bool {
        self.url == other.url
    }

    /// Human readable publication date, in local time.
    pub fn display_date(&self) -> String {
        let Some(raw) = self.published_at.as_deref() else {
            return "Just now".to_owned();
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            Err(_) => "Recently".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_use_camel_case_and_are_omitted_when_absent() {
        let mut article = NewsArticle::new("A", "d", "https://x/1");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "A", "description": "d", "url": "https://x/1"})
        );

        article.url_to_image = Some("https://img/1.jpg".into());
        article.published_at = Some("2024-10-21T07:28:00Z".into());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["urlToImage"], "https://img/1.jpg");
        assert_eq!(json["publishedAt"], "2024-10-21T07:28:00Z");
        assert!(json.get("source").is_none());
    }

    #[test]
    fn sparse_records_deserialize_with_empty_strings() {
        let items: Vec<NewsArticle> = serde_json::from_str(
            r#"[{"url":"u1"},{"url":"u2","title":null,"description":"d"}]"#,
        )
        .unwrap();
        assert_eq!(items[0], NewsArticle::new("", "", "u1"));
        assert_eq!(items[1], NewsArticle::new("", "d", "u2"));
    }

    #[test]
    fn display_date_handles_missing_and_garbage() {
        let mut article = NewsArticle::new("A", "d", "https://x/1");
        assert_eq!(article.display_date(), "Just now");

        article.published_at = Some("yesterday-ish".into());
        assert_eq!(article.display_date(), "Recently");

        article.published_at = Some("2024-10-21T07:28:00Z".into());
        let shown = article.display_date();
        assert!(shown.starts_with("2024-10-2"), "unexpected date {shown}");
    }
}
