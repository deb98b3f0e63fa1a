use crate::error::Result;
use std::time::Duration;

/// The browser session a pipeline drives, one command at a time
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Navigate to `url`
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Suspend until `selector` matches at least one element, or fail with
    /// `Error::Timeout` once `timeout` elapses
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Serialized DOM of the current page
    async fn rendered_html(&mut self) -> Result<String>;

    /// Visible text of the current page
    async fn visible_text(&mut self) -> Result<String>;

    /// Click the last element matching `selector`; `Ok(false)` when none match
    async fn click_last(&mut self, selector: &str) -> Result<bool>;

    /// End the session
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
