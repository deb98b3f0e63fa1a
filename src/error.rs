use std::time::Duration;
use thiserror::Error;

/// Errors produced by the discovery, scraping and merge pipelines
#[derive(Debug, Error)]
pub enum Error {
    /// Could not open a WebDriver session at the given endpoint
    #[error("failed to start WebDriver session at {url}: {source}")]
    Session {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    /// Neither the configured endpoint nor any fallback accepted a session
    #[error("no WebDriver server reachable (tried {0})")]
    NoWebDriver(String),

    /// The browser could not load a page
    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("webdriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// A bounded wait elapsed before the selector matched
    #[error("timed out after {after:?} waiting for `{selector}`")]
    Timeout { selector: String, after: Duration },

    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL path has no segment at the version position
    #[error("url `{0}` has no version segment")]
    MissingVersion(String),

    #[error("invalid css selector `{0}`")]
    Selector(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// True when the error only means a wait elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

/// Parse an absolute URL, keeping the offending input in the error
pub fn parse_url(url: &str) -> Result<url::Url> {
    url::Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
