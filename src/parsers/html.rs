use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Compile a CSS selector
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| Error::Selector(css.to_string()))
}

/// Number of elements matching `css`
pub fn count_matches(html: &str, css: &str) -> Result<usize> {
    let doc = Html::parse_document(html);
    let selector = selector(css)?;
    Ok(doc.select(&selector).count())
}

/// Raw `href` values of every element matching `css`, in document order
///
/// Elements without an `href` attribute are skipped.
pub fn hrefs(html: &str, css: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let selector = selector(css)?;
    let links = doc
        .select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links for `{}`", links.len(), css);
    Ok(links)
}

/// Menu anchors whose trimmed, lowercased label is one of `sections`
///
/// Returns `(label, href)` pairs in document order.
pub fn menu_entries(html: &str, css: &str, sections: &[String]) -> Result<Vec<(String, String)>> {
    let doc = Html::parse_document(html);
    let selector = selector(css)?;

    let entries = doc
        .select(&selector)
        .filter_map(|anchor| {
            let label = element_text(&anchor).trim().to_lowercase();
            if !sections.iter().any(|s| *s == label) {
                return None;
            }
            let href = anchor.value().attr("href")?;
            Some((label, href.to_string()))
        })
        .collect();

    Ok(entries)
}

/// Every text node of the document concatenated without separators
pub fn document_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    element_text(&doc.root_element())
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
