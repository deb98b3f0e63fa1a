pub mod config;
pub mod crawlers;
pub mod discover;
pub mod error;
pub mod filter;
pub mod merge;
pub mod parsers;
pub mod results;
pub mod scrape;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::PipelineConfig;
pub use crawlers::{Browser, WebDriverBrowser};
pub use error::{Error, Result};
pub use results::{MergeReport, ScrapeReport};

use std::path::Path;

/// Entry point for the discover → scrape → merge pipeline
///
/// Each stage hands off to the next only through the files named in the
/// configuration.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn with_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(PipelineConfig::from_file(path)?))
    }

    /// Override the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Discover documentation links and write the links file
    pub async fn discover(&self) -> Result<Vec<String>> {
        let mut browser = self.connect().await?;
        let outcome = discover::run(&mut browser, &self.config.discover).await;
        release(browser).await;
        outcome
    }

    /// Scrape every link of the links file into per-version text files
    pub async fn scrape(&self) -> Result<ScrapeReport> {
        let mut browser = self.connect().await?;
        let outcome = scrape::run(&mut browser, &self.config.scrape).await;
        release(browser).await;
        outcome
    }

    /// Clean and merge the text files into the corpus file
    pub fn merge(&self) -> Result<MergeReport> {
        merge::run(&self.config.merge)
    }

    /// Run all three stages in order
    pub async fn run_all(&self) -> Result<MergeReport> {
        self.discover().await?;
        self.scrape().await?;
        self.merge()
    }

    async fn connect(&self) -> Result<WebDriverBrowser> {
        ::log::info!("Connecting to WebDriver at {}", self.config.webdriver_url);
        WebDriverBrowser::connect(&self.config.webdriver_url).await
    }
}

/// Close the session; a failed close must not mask the stage outcome
async fn release<B: Browser>(browser: B) {
    if let Err(e) = browser.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }
}
