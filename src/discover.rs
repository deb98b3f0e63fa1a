//! Link discovery: root page → version pages → menu sections → deep links.

use crate::config::DiscoverConfig;
use crate::crawlers::Browser;
use crate::error::{Result, parse_url};
use crate::filter::{UrlFilter, is_supported_version_url};
use crate::parsers::html;
use crate::results::SectionLink;
use crate::utils;
use url::Url;

/// Discovers every deep link and writes them to `config.links_file`
pub async fn run<B: Browser>(browser: &mut B, config: &DiscoverConfig) -> Result<Vec<String>> {
    let links = discover(browser, config).await?;
    utils::write_lines(&config.links_file, &links)?;
    ::log::info!(
        "{} links saved in {}",
        links.len(),
        config.links_file.display()
    );
    Ok(links)
}

/// Collects deep links for every supported documentation version
///
/// Failures loading the root or a version page abort the run; failures on a
/// section page only cost that page's links.
pub async fn discover<B: Browser>(browser: &mut B, config: &DiscoverConfig) -> Result<Vec<String>> {
    let root_url = parse_url(&config.root_url)?;
    let version_filter = UrlFilter::new(&config.version_exclude_patterns)?;
    let deep_link_filter = UrlFilter::new(&config.deep_link_exclude_patterns)?;

    let version_urls = version_links(browser, &root_url, config, &version_filter).await?;
    ::log::info!("Found {} supported versions", version_urls.len());

    let mut total_links = Vec::new();
    for version_url in &version_urls {
        ::log::info!("Scraping version: {}", version_url);
        let sections = menu_links(browser, version_url, config).await?;

        for section in sections {
            ::log::info!("Exploring: {} - {}", section.label, section.url);
            let links = deep_links(browser, &section.url, config, &deep_link_filter).await;
            total_links.extend(links);
        }
    }

    Ok(total_links)
}

/// Version landing pages listed on the root page that pass the version gate
pub async fn version_links<B: Browser>(
    browser: &mut B,
    root_url: &Url,
    config: &DiscoverConfig,
    filter: &UrlFilter,
) -> Result<Vec<Url>> {
    browser.goto(root_url.as_str()).await?;
    browser
        .wait_for_selector(&config.version_link_selector, config.root_timeout())
        .await?;

    let page = browser.rendered_html().await?;
    let mut version_urls = Vec::new();
    for href in html::hrefs(&page, &config.version_link_selector)? {
        let Ok(full_url) = root_url.join(&href) else {
            ::log::debug!("Skipping unresolvable href: {}", href);
            continue;
        };
        if filter.is_excluded(full_url.as_str()) {
            ::log::debug!("Excluded version link: {}", full_url);
            continue;
        }
        if is_supported_version_url(&full_url) {
            version_urls.push(full_url);
        } else {
            ::log::debug!("Unsupported version: {}", full_url);
        }
    }

    Ok(version_urls)
}

/// Menu section links of a version landing page
pub async fn menu_links<B: Browser>(
    browser: &mut B,
    version_url: &Url,
    config: &DiscoverConfig,
) -> Result<Vec<SectionLink>> {
    browser.goto(version_url.as_str()).await?;
    match browser
        .wait_for_selector(&config.menu_selector, config.render_timeout())
        .await
    {
        Ok(()) => {}
        Err(e) if e.is_timeout() => ::log::warn!("{} on {}", e, version_url),
        Err(e) => return Err(e),
    }

    let page = browser.rendered_html().await?;
    let base = with_trailing_slash(version_url);

    let mut sections = Vec::new();
    for (label, href) in html::menu_entries(&page, &config.menu_selector, &config.menu_sections)? {
        match base.join(&href) {
            Ok(url) => sections.push(SectionLink { label, url }),
            Err(e) => ::log::debug!("Skipping menu entry {} ({}): {}", label, href, e),
        }
    }

    Ok(sections)
}

/// Every link on a section page; errors are logged and yield no links
pub async fn deep_links<B: Browser>(
    browser: &mut B,
    url: &Url,
    config: &DiscoverConfig,
    filter: &UrlFilter,
) -> Vec<String> {
    match collect_deep_links(browser, url, config, filter).await {
        Ok(links) => {
            ::log::debug!("Found {} links in {}", links.len(), url);
            links
        }
        Err(e) => {
            ::log::error!("Could not collect links from {}: {}", url, e);
            Vec::new()
        }
    }
}

async fn collect_deep_links<B: Browser>(
    browser: &mut B,
    url: &Url,
    config: &DiscoverConfig,
    filter: &UrlFilter,
) -> Result<Vec<String>> {
    browser.goto(url.as_str()).await?;
    if let Err(e) = browser.wait_for_selector("a", config.render_timeout()).await {
        ::log::debug!("Section page not settled: {}", e);
    }

    reveal_last_level(browser, config).await;

    let page = browser.rendered_html().await?;
    let links = html::hrefs(&page, "a")?
        .into_iter()
        .filter(|href| !href.is_empty() && filter.allows(href))
        .filter_map(|href| url.join(&href).ok())
        .map(String::from)
        .collect();

    Ok(links)
}

/// Expands the deepest level of a section tree when the page offers one
async fn reveal_last_level<B: Browser>(browser: &mut B, config: &DiscoverConfig) {
    match browser.click_last(&config.levels_selector).await {
        Ok(true) => tokio::time::sleep(config.settle()).await,
        Ok(false) => {}
        Err(e) => ::log::warn!("Could not open the last level of detail: {}", e),
    }
}

fn with_trailing_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        return url.clone();
    }
    let mut base = url.clone();
    base.set_path(&format!("{}/", url.path()));
    base
}
