//! Hyperlink extraction from fetched documents

use scraper::{Html, Selector};

/// Extracts every anchor `href` value from an HTML document.
///
/// All `<a>` elements carrying a non-empty `href` attribute contribute, in
/// document order, duplicates included. Values come back exactly as written
/// in the markup; turning them into absolute addresses is the resolver's
/// job, and out-of-scope targets like `mailto:` fall out at admission.
///
/// # Arguments
///
/// * `html` - The HTML content to scan
///
/// # Examples
///
/// ```
/// use refwalk::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/a">one</a><a href="b.html">two</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/a", "b.html"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| href.to_string())
        .collect()
}
