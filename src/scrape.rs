//! Content scraping: one text file per documentation version.

use crate::config::ScrapeConfig;
use crate::crawlers::Browser;
use crate::error::{Error, Result};
use crate::results::ScrapeReport;
use crate::utils;
use std::fs;
use std::path::PathBuf;

/// Position of the version segment in `url.split('/')`
///
/// `https://docs.opencv.org/3.4.0/index.html` splits into
/// `["https:", "", "docs.opencv.org", "3.4.0", "index.html"]`.
const VERSION_SEGMENT: usize = 3;

/// Version token of a documentation URL
pub fn version_token(url: &str) -> Result<&str> {
    url.split('/')
        .nth(VERSION_SEGMENT)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| Error::MissingVersion(url.to_string()))
}

/// Text accumulated for the version currently being scraped
#[derive(Debug)]
pub struct VersionBuffer {
    pub version: String,
    pub content: String,
}

impl VersionBuffer {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            content: String::new(),
        }
    }

    pub fn push_page(&mut self, text: &str) {
        self.content.push_str(text);
        self.content.push_str("\n\n");
    }
}

/// Reads `config.links_file` and scrapes every link in it
pub async fn run<B: Browser>(browser: &mut B, config: &ScrapeConfig) -> Result<ScrapeReport> {
    let links = utils::read_lines(&config.links_file)?;
    ::log::info!(
        "Loaded {} links from {}",
        links.len(),
        config.links_file.display()
    );
    scrape(browser, &links, config).await
}

/// Scrapes `links` in order, flushing a version file whenever the version
/// token changes, then writes the error list
pub async fn scrape<B: Browser>(
    browser: &mut B,
    links: &[String],
    config: &ScrapeConfig,
) -> Result<ScrapeReport> {
    fs::create_dir_all(&config.output_dir)?;

    let mut report = ScrapeReport::default();
    let mut current: Option<VersionBuffer> = None;

    for link in links.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        let version = match version_token(link) {
            Ok(version) => version,
            Err(e) => {
                ::log::warn!("{}", e);
                report.error_links.push(link.to_string());
                continue;
            }
        };

        if current.as_ref().map(|b| b.version.as_str()) != Some(version) {
            if let Some(done) = current.take() {
                report.files.push(save_version(&done, config)?);
            }
            current = Some(VersionBuffer::new(version));
        }

        ::log::info!("Scraping {}", link);
        match page_text(browser, link, config).await {
            Ok(text) => {
                if let Some(buffer) = current.as_mut() {
                    buffer.push_page(&text);
                }
                report.pages_scraped += 1;
            }
            Err(e) => {
                ::log::error!("Error scraping {}: {}", link, e);
                report.error_links.push(link.to_string());
            }
        }
    }

    if let Some(done) = current.take() {
        report.files.push(save_version(&done, config)?);
    }

    let error_path = config.output_dir.join(&config.error_file);
    utils::write_lines(&error_path, &report.error_links)?;
    ::log::info!(
        "Scraped {} pages into {} files, {} errors listed in {}",
        report.pages_scraped,
        report.files.len(),
        report.error_links.len(),
        error_path.display()
    );

    Ok(report)
}

async fn page_text<B: Browser>(browser: &mut B, url: &str, config: &ScrapeConfig) -> Result<String> {
    browser.goto(url).await?;
    if let Err(e) = browser.wait_for_selector("body", config.page_timeout()).await {
        if !e.is_timeout() {
            return Err(e);
        }
        ::log::debug!("{} on {}", e, url);
    }
    browser.visible_text().await
}

/// Path of the file holding `version`
pub fn version_path(config: &ScrapeConfig, version: &str) -> PathBuf {
    let name = format!("{}{}.txt", config.file_prefix, version);
    config.output_dir.join(utils::sanitize_filename(&name))
}

fn save_version(buffer: &VersionBuffer, config: &ScrapeConfig) -> Result<PathBuf> {
    let path = version_path(config, &buffer.version);
    fs::write(&path, &buffer.content)?;
    ::log::debug!("Saved version {} to {}", buffer.version, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::fake::{FakeBrowser, FakePage};
    use tempfile::TempDir;

    fn config(tmp: &TempDir) -> ScrapeConfig {
        ScrapeConfig {
            links_file: tmp.path().join("links.txt"),
            output_dir: tmp.path().join("out"),
            page_timeout_ms: 0,
            ..ScrapeConfig::default()
        }
    }

    fn links(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_version_token() {
        assert_eq!(
            version_token("https://docs.opencv.org/3.4.0/index.html").unwrap(),
            "3.4.0"
        );
        assert_eq!(version_token("https://docs.opencv.org/4.x").unwrap(), "4.x");
    }

    #[test]
    fn test_version_token_malformed() {
        for url in ["https://docs.opencv.org", "https://docs.opencv.org/", "not a url"] {
            let err = version_token(url).unwrap_err();
            assert!(matches!(err, Error::MissingVersion(_)), "{}", url);
        }
    }

    #[test]
    fn test_version_path() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        assert_eq!(
            version_path(&config, "3.4.0"),
            tmp.path().join("out").join("opencv_3.4.0.txt")
        );
    }

    #[tokio::test]
    async fn test_pages_grouped_by_version() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        let mut browser = FakeBrowser::default()
            .with_page("https://d.org/3.4.0/a.html", FakePage::text("A"))
            .with_page("https://d.org/3.4.0/b.html", FakePage::text("B"))
            .with_page("https://d.org/4.1.0/c.html", FakePage::text("C"));

        let urls = links(&[
            "https://d.org/3.4.0/a.html",
            "https://d.org/3.4.0/b.html",
            "https://d.org/4.1.0/c.html",
        ]);
        let report = scrape(&mut browser, &urls, &config).await.unwrap();

        assert_eq!(report.pages_scraped, 3);
        assert_eq!(report.files.len(), 2);
        assert_eq!(
            fs::read_to_string(version_path(&config, "3.4.0")).unwrap(),
            "A\n\nB\n\n"
        );
        assert_eq!(
            fs::read_to_string(version_path(&config, "4.1.0")).unwrap(),
            "C\n\n"
        );
        let errors = fs::read_to_string(config.output_dir.join("error_links.txt")).unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_failed_pages_listed_and_excluded() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        let mut browser = FakeBrowser::default()
            .with_page("https://d.org/3.4.0/a.html", FakePage::text("A"))
            .with_page(
                "https://d.org/3.4.0/broken.html",
                FakePage {
                    fail_text: true,
                    ..FakePage::text("never seen")
                },
            );

        let urls = links(&[
            "https://d.org/3.4.0/a.html",
            "https://d.org/3.4.0/broken.html",
            "https://d.org/3.4.0/missing.html",
            "https://d.org",
        ]);
        let report = scrape(&mut browser, &urls, &config).await.unwrap();

        assert_eq!(report.pages_scraped, 1);
        assert_eq!(
            report.error_links,
            vec![
                "https://d.org/3.4.0/broken.html",
                "https://d.org/3.4.0/missing.html",
                "https://d.org",
            ]
        );
        assert_eq!(
            fs::read_to_string(version_path(&config, "3.4.0")).unwrap(),
            "A\n\n"
        );
        assert_eq!(
            fs::read_to_string(config.output_dir.join("error_links.txt")).unwrap(),
            "https://d.org/3.4.0/broken.html\nhttps://d.org/3.4.0/missing.html\nhttps://d.org\n"
        );
    }

    #[tokio::test]
    async fn test_version_with_only_failures_still_writes_empty_file() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        let mut browser = FakeBrowser::default();

        let urls = links(&["https://d.org/4.0.0/gone.html"]);
        let report = scrape(&mut browser, &urls, &config).await.unwrap();

        assert_eq!(report.files, vec![version_path(&config, "4.0.0")]);
        assert_eq!(fs::read_to_string(&report.files[0]).unwrap(), "");
    }

    #[tokio::test]
    async fn test_returning_version_overwrites_earlier_file() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        let mut browser = FakeBrowser::default()
            .with_page("https://d.org/3.4.0/a.html", FakePage::text("first"))
            .with_page("https://d.org/4.1.0/b.html", FakePage::text("B"))
            .with_page("https://d.org/3.4.0/c.html", FakePage::text("second"));

        let urls = links(&[
            "https://d.org/3.4.0/a.html",
            "https://d.org/4.1.0/b.html",
            "https://d.org/3.4.0/c.html",
        ]);
        let report = scrape(&mut browser, &urls, &config).await.unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(
            fs::read_to_string(version_path(&config, "3.4.0")).unwrap(),
            "second\n\n"
        );
    }

    #[tokio::test]
    async fn test_run_reads_links_file_and_skips_blank_lines() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        fs::write(
            &config.links_file,
            "https://d.org/3.4.0/a.html\n\n   \nhttps://d.org/3.4.0/b.html\n",
        )
        .unwrap();
        let mut browser = FakeBrowser::default()
            .with_page("https://d.org/3.4.0/a.html", FakePage::text("A"))
            .with_page("https://d.org/3.4.0/b.html", FakePage::text("B"));

        let report = run(&mut browser, &config).await.unwrap();

        assert_eq!(report.pages_scraped, 2);
        assert_eq!(browser.visits.len(), 2);
    }

    #[tokio::test]
    async fn test_run_missing_links_file_is_fatal() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        let mut browser = FakeBrowser::default();

        let err = run(&mut browser, &config).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_no_links_writes_only_error_file() {
        let tmp = TempDir::new().expect("temp dir should be created");
        let config = config(&tmp);
        let mut browser = FakeBrowser::default();

        let report = scrape(&mut browser, &[], &config).await.unwrap();

        assert!(report.files.is_empty());
        assert!(config.output_dir.join("error_links.txt").exists());
    }
}
