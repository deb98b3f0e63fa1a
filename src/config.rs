use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub discover: DiscoverConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub merge: MergeConfig,
}

/// Configuration for the link discoverer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// Documentation root listing every version
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// File the discovered links are written to
    #[serde(default = "default_links_file")]
    pub links_file: PathBuf,

    /// Anchors on the root page pointing at versions
    #[serde(default = "default_version_link_selector")]
    pub version_link_selector: String,

    /// Anchors of the navigation menu on a version page
    #[serde(default = "default_menu_selector")]
    pub menu_selector: String,

    /// Menu labels (lowercase) worth following
    #[serde(default = "default_menu_sections")]
    pub menu_sections: Vec<String>,

    /// Control that expands the deepest level of a section tree
    #[serde(default = "default_levels_selector")]
    pub levels_selector: String,

    /// Regex patterns for version links to drop
    #[serde(default = "default_version_exclude_patterns")]
    pub version_exclude_patterns: Vec<String>,

    /// Regex patterns for raw section hrefs to drop
    #[serde(default = "default_deep_link_exclude_patterns")]
    pub deep_link_exclude_patterns: Vec<String>,

    /// Bound on the wait for version links on the root page
    #[serde(default = "default_root_timeout_secs")]
    pub root_timeout_secs: u64,

    /// Bound on the wait for a version or section page to render
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// Pause after expanding the levels control
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

/// Configuration for the content scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Newline separated list of URLs to scrape
    #[serde(default = "default_links_file")]
    pub links_file: PathBuf,

    /// Directory receiving per-version files and the error list
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Prefix of every per-version file name
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// File name of the failed URL list inside `output_dir`
    #[serde(default = "default_error_file")]
    pub error_file: String,

    /// Bound on the wait for a page body
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,
}

/// Configuration for the cleaner/merger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Directory holding the `.txt` files to merge
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Merged corpus file
    #[serde(default = "default_merge_output")]
    pub output_file: PathBuf,

    /// Merge in file name order instead of directory listing order
    #[serde(default)]
    pub sort_entries: bool,
}

impl PipelineConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the WebDriver URL with an environment variable if provided
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            discover: DiscoverConfig::default(),
            scrape: ScrapeConfig::default(),
            merge: MergeConfig::default(),
        }
    }
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            links_file: default_links_file(),
            version_link_selector: default_version_link_selector(),
            menu_selector: default_menu_selector(),
            menu_sections: default_menu_sections(),
            levels_selector: default_levels_selector(),
            version_exclude_patterns: default_version_exclude_patterns(),
            deep_link_exclude_patterns: default_deep_link_exclude_patterns(),
            root_timeout_secs: default_root_timeout_secs(),
            render_timeout_secs: default_render_timeout_secs(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl DiscoverConfig {
    pub fn root_timeout(&self) -> Duration {
        Duration::from_secs(self.root_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            links_file: default_links_file(),
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            error_file: default_error_file(),
            page_timeout_ms: default_page_timeout_ms(),
        }
    }
}

impl ScrapeConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_file: default_merge_output(),
            sort_entries: false,
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_root_url() -> String {
    "https://docs.opencv.org/".to_string()
}

fn default_links_file() -> PathBuf {
    PathBuf::from("opencv_links.txt")
}

fn default_version_link_selector() -> String {
    "ul li a".to_string()
}

fn default_menu_selector() -> String {
    "ul#main-menu li a".to_string()
}

fn default_menu_sections() -> Vec<String> {
    ["main page", "related pages", "modules", "namespaces", "classes"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_levels_selector() -> String {
    "div.levels span".to_string()
}

fn default_version_exclude_patterns() -> Vec<String> {
    vec![
        r"\.zip$".to_string(),
        r"\.tar\.xz$".to_string(),
        "java".to_string(),
    ]
}

fn default_deep_link_exclude_patterns() -> Vec<String> {
    vec!["^javascript".to_string(), "globals".to_string()]
}

fn default_root_timeout_secs() -> u64 {
    10
}

fn default_render_timeout_secs() -> u64 {
    5
}

fn default_settle_ms() -> u64 {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_prefix() -> String {
    "opencv_".to_string()
}

fn default_error_file() -> String {
    "error_links.txt".to_string()
}

fn default_page_timeout_ms() -> u64 {
    2000
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("opencv_docs/3.4.x/v1")
}

fn default_merge_output() -> PathBuf {
    PathBuf::from("opencv_docs/opencv_dataset_3_4_x.txt")
}
