use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// A navigation menu entry on a version landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLink {
    /// Lowercased menu label
    pub label: String,

    /// Absolute URL of the section
    pub url: Url,
}

/// Outcome of a content scrape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Pages whose text made it into a version file
    pub pages_scraped: usize,

    /// Version files written, in flush order
    pub files: Vec<PathBuf>,

    /// URLs that could not be scraped, in visit order
    pub error_links: Vec<String>,
}

/// Outcome of a merge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeReport {
    /// Source files merged, in merge order
    pub files: Vec<PathBuf>,

    pub output: PathBuf,
}
