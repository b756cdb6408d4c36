use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No headline at index {index} (front page has {len})")]
    NoSuchHeadline { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn network(url: impl Into<String>, reason: impl ToString) -> Self {
        Error::Network {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        Error::network(url, err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
