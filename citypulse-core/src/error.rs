use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("stored value under {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("news source answered with status {0}")]
    Status(u16),
    #[error("invalid news endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("no news API key configured")]
    MissingApiKey,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}
