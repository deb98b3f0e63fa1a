use crate::crawlers::Browser;
use crate::error::{Error, Result};
use crate::parsers::html;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// Common local WebDriver endpoints tried when the configured one fails
const FALLBACK_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A browser session on a WebDriver server
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Connects to the WebDriver instance, falling back to common local ports
    pub async fn connect(webdriver_url: &str) -> Result<Self> {
        match Self::connect_exact(webdriver_url).await {
            Ok(browser) => return Ok(browser),
            Err(e) => ::log::error!("{}", e),
        }

        for url in FALLBACK_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            // Don't log fallback errors to avoid log spam
            if let Ok(browser) = Self::connect_exact(url).await {
                return Ok(browser);
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        let tried = std::iter::once(webdriver_url)
            .chain(FALLBACK_URLS.iter().copied())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::NoWebDriver(tried))
    }

    /// Connects to exactly one WebDriver endpoint
    pub async fn connect_exact(webdriver_url: &str) -> Result<Self> {
        let client = ClientBuilder::native()
            .connect(webdriver_url)
            .await
            .map_err(|source| Error::Session {
                url: webdriver_url.to_string(),
                source,
            })?;
        ::log::debug!("Connected to WebDriver at {}", webdriver_url);
        Ok(Self { client })
    }
}

impl Browser for WebDriverBrowser {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, url))
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(Error::Timeout {
                selector: selector.to_string(),
                after: timeout,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn rendered_html(&mut self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn visible_text(&mut self) -> Result<String> {
        match self.client.find(Locator::Css("body")).await {
            Ok(body) => Ok(body.text().await?),
            Err(e) if e.is_no_such_element() => {
                // Plain documents may have no body; fall back to every text node
                ::log::debug!("No body element, reading text from page source");
                let source = self.client.source().await?;
                Ok(html::document_text(&source))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn click_last(&mut self, selector: &str) -> Result<bool> {
        let mut elements = self.client.find_all(Locator::Css(selector)).await?;
        match elements.pop() {
            Some(last) => {
                last.click().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Maps a failed navigation, flagging lost sessions separately in the log
fn navigation_error(error: CmdError, url: &str) -> Error {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while accessing {}", url);
    }
    Error::Navigation {
        url: url.to_string(),
        reason: error.to_string(),
    }
}
