use crate::crawlers::Browser;
use crate::error::{Error, Result};
use crate::parsers::html;
use std::collections::HashMap;
use std::time::Duration;

/// One canned page served by `FakeBrowser`
#[derive(Debug, Clone, Default)]
pub(crate) struct FakePage {
    pub html: String,
    pub text: String,
    /// HTML served after a successful `click_last`
    pub expanded_html: Option<String>,
    pub fail_text: bool,
    pub fail_click: bool,
}

impl FakePage {
    pub fn html(html: &str) -> Self {
        Self {
            html: html.to_string(),
            ..Self::default()
        }
    }

    pub fn text(text: &str) -> Self {
        Self {
            html: "<html><body></body></html>".to_string(),
            text: text.to_string(),
            ..Self::default()
        }
    }
}

/// In-memory `Browser` serving canned pages and recording every command
#[derive(Debug, Default)]
pub(crate) struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    current: Option<String>,
    pub visits: Vec<String>,
    pub clicks: Vec<String>,
}

impl FakeBrowser {
    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    fn page(&self) -> Result<&FakePage> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .ok_or_else(|| Error::Navigation {
                url: self.current.clone().unwrap_or_default(),
                reason: "no page loaded".to_string(),
            })
    }
}

impl Browser for FakeBrowser {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.visits.push(url.to_string());
        if !self.pages.contains_key(url) {
            self.current = None;
            return Err(Error::Navigation {
                url: url.to_string(),
                reason: "404".to_string(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let page = self.page()?;
        if html::count_matches(&page.html, selector)? > 0 {
            Ok(())
        } else {
            Err(Error::Timeout {
                selector: selector.to_string(),
                after: timeout,
            })
        }
    }

    async fn rendered_html(&mut self) -> Result<String> {
        Ok(self.page()?.html.clone())
    }

    async fn visible_text(&mut self) -> Result<String> {
        let page = self.page()?;
        if page.fail_text {
            return Err(Error::Navigation {
                url: self.current.clone().unwrap_or_default(),
                reason: "renderer crashed".to_string(),
            });
        }
        Ok(page.text.clone())
    }

    async fn click_last(&mut self, selector: &str) -> Result<bool> {
        let url = self.current.clone().unwrap_or_default();
        let page = self.page()?.clone();
        if page.fail_click {
            return Err(Error::Navigation {
                url,
                reason: "element not interactable".to_string(),
            });
        }
        if html::count_matches(&page.html, selector)? == 0 {
            return Ok(false);
        }
        self.clicks.push(url.clone());
        if let Some(expanded) = page.expanded_html {
            if let Some(current) = self.pages.get_mut(&url) {
                current.html = expanded;
            }
        }
        Ok(true)
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}
