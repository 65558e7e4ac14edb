use citypulse_core::{Alert, NewsArticle};

const DEFAULT_SOURCE: &str = "City Pulse";

pub fn heading(title: &str) -> String {
    format!("{title}\n{}", "=".repeat(title.chars().count()))
}

pub fn article_line(index: usize, article: &NewsArticle, bookmarked: bool) -> String {
    let marker = if bookmarked { "[Bookmarked]" } else { "[Bookmark]" };
    format!(
        "{index:>2}. {} {marker}\n    {}\n    {} | {}\n    {}",
        article.title,
        article.description,
        article.source.as_deref().unwrap_or(DEFAULT_SOURCE),
        article.display_date(),
        article.url,
    )
}

pub fn bookmark_line(index: usize, article: &NewsArticle) -> String {
    format!(
        "{index:>2}. {}\n    {}\n    {}\n    {}",
        article.title,
        article.description,
        article.source.as_deref().unwrap_or(DEFAULT_SOURCE),
        article.url,
    )
}

pub fn alert_block(alert: &Alert) -> String {
    format!("[{}] {}\n    {}", alert.level, alert.title, alert.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_is_underlined() {
        assert_eq!(heading("Alerts"), "Alerts\n======");
    }

    #[test]
    fn missing_source_shows_default() {
        let article = NewsArticle::new("A", "d", "https://x/1");
        let line = bookmark_line(0, &article);
        assert!(line.contains("City Pulse"));
        assert!(article_line(3, &article, true).starts_with(" 3. A [Bookmarked]"));
        assert!(article_line(3, &article, false).contains("Just now"));
    }
}
