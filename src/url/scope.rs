use url::Url;

use super::KeyPolicy;

/// Extracts the host that defines an audit's scope
///
/// This function retrieves the host portion of an address and converts it to
/// lowercase. The port is deliberately not part of the scope. Addresses with
/// no host at all (`mailto:`, `data:`, and friends) return None and can never
/// be in scope.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use refwalk::url::scope_host;
///
/// let url = Url::parse("http://Example.COM:8080/path").unwrap();
/// assert_eq!(scope_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:user@example.com").unwrap();
/// assert_eq!(scope_host(&url), None);
/// ```
pub fn scope_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Reduces an address to the identity key the visited registry stores.
///
/// Under [`KeyPolicy::PathOnly`] the key is the path component alone, so the
/// query string and fragment never distinguish pages. Under
/// [`KeyPolicy::PathAndQuery`] the query string is appended and addresses that
/// differ only in their query are audited separately. The fragment is dropped
/// either way.
///
/// Keys keep whatever percent-encoding the parsed address carries, so the
/// same page always reduces to the same key within a run.
pub fn page_key(url: &Url, policy: KeyPolicy) -> String {
    match policy {
        KeyPolicy::PathOnly => url.path().to_string(),
        KeyPolicy::PathAndQuery => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
    }
}

/// Rebuilds a fully qualified address from a stored identity key.
///
/// The key is joined against the seed, which reattaches the seed's scheme,
/// host, and port. Keys always begin with `/`, so the seed's own path never
/// leaks into the result.
pub fn requalify(seed: &Url, key: &str) -> Result<Url, url::ParseError> {
    seed.join(key)
}
