use url::Url;

/// Parses a lookup endpoint, assuming https when no scheme is given.
pub(crate) fn parse_endpoint_url(input: &str) -> Option<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = if trimmed.contains("://") {
        Url::parse(trimmed).ok()?
    } else {
        Url::parse(&format!("https://{trimmed}")).ok()?
    };
    matches!(url.scheme(), "http" | "https").then_some(url)
}
