use regex::Regex;
use url::Url;

/// Regex based URL filter; a URL is dropped when any exclude pattern matches
#[derive(Debug)]
pub struct UrlFilter {
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from exclude patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self { exclude_regexes })
    }

    /// Check whether any exclude pattern matches
    pub fn is_excluded(&self, url: &str) -> bool {
        self.exclude_regexes.iter().any(|regex| regex.is_match(url))
    }

    pub fn allows(&self, url: &str) -> bool {
        !self.is_excluded(url)
    }
}

/// Last non-empty path segment of a version URL
///
/// `https://docs.opencv.org/3.4.1/` and `https://docs.opencv.org/3.4.1` both
/// yield `3.4.1`. A URL without path segments yields an empty string.
pub fn version_candidate(url: &Url) -> &str {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("")
}

/// Version gate for documentation trees
///
/// `2.x` is always rejected, `3.x` is accepted from minor 4 on (digits of the
/// minor component only), anything else is accepted.
pub fn is_supported_version(version: &str) -> bool {
    if version.starts_with("2.") {
        return false;
    }

    if version.starts_with("3.") {
        let minor = version.split('.').nth(1).unwrap_or("");
        let digits: String = minor.chars().filter(|c| c.is_ascii_digit()).collect();
        return match digits.parse::<u64>() {
            Ok(minor) => minor >= 4,
            // Only overflow gets here with a non-empty digit string
            Err(_) => !digits.is_empty(),
        };
    }

    true
}

/// Apply the version gate to a candidate version URL
pub fn is_supported_version_url(url: &Url) -> bool {
    is_supported_version(version_candidate(url))
}
