use url::Url;

/// Produces every plausible absolute address for a raw `href` value.
///
/// Two independent readings of the href are attempted:
///
/// 1. Joined against `base`, which covers relative forms (`guide.html`,
///    `/about`, `../up`, `#section`) and also absolute forms, since joining
///    an absolute URL discards the base.
/// 2. Parsed as a standalone absolute URL, which covers hrefs that are
///    already fully qualified.
///
/// Every reading that succeeds is offered to the caller. The two frequently
/// agree, in which case the duplicate is collapsed here; any overlap that
/// survives is absorbed by the visited registry. An href that fails both
/// readings yields an empty vector and drops out of consideration.
///
/// # Arguments
///
/// * `base` - The address of the page the href was found on
/// * `href` - The raw attribute value, exactly as it appeared in the markup
///
/// # Examples
///
/// ```
/// use url::Url;
/// use refwalk::url::resolve_candidates;
///
/// let base = Url::parse("http://example.com/docs/").unwrap();
/// let candidates = resolve_candidates(&base, "guide.html");
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].as_str(), "http://example.com/docs/guide.html");
/// ```
pub fn resolve_candidates(base: &Url, href: &str) -> Vec<Url> {
    let mut candidates = Vec::new();

    // Reading 1: relative to the page the href was found on
    if let Ok(joined) = base.join(href) {
        candidates.push(joined);
    }

    // Reading 2: the href as a fully qualified address in its own right
    if let Ok(absolute) = Url::parse(href) {
        if !candidates.contains(&absolute) {
            candidates.push(absolute);
        }
    }

    candidates
}
