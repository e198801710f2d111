use crate::config::SecretString;
use crate::data_model::TimeQuery;
use crate::error::{ClockError, NetworkErrorKind};
use curl::Error as CurlError;
use url::{Host, Url};

pub(super) fn map_curl_error(err: &CurlError) -> ClockError {
    let message = err.to_string();

    let kind = if err.is_couldnt_resolve_host() || err.is_couldnt_resolve_proxy() {
        NetworkErrorKind::Dns
    } else if err.is_operation_timedout() {
        NetworkErrorKind::Timeout
    } else if err.is_couldnt_connect() {
        NetworkErrorKind::Connect
    } else if err.is_ssl_connect_error()
        || err.is_ssl_cacert()
        || err.is_ssl_certproblem()
        || err.is_ssl_cipher()
        || err.is_peer_failed_verification()
    {
        NetworkErrorKind::Tls
    } else {
        NetworkErrorKind::Io
    };

    ClockError::network(kind, message)
}

/// Builds `<endpoint>?api_key=..&location=region/city`, keeping any existing query pairs.
pub(super) fn build_request_url(endpoint: &Url, api_key: &SecretString, query: &TimeQuery) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("api_key", api_key.expose())
        .append_pair("location", &query.location());
    url
}

/// Splits `HTTP/1.1 404 Not Found` into its code and reason phrase.
pub(super) fn parse_status_line(line: &str) -> Option<(u16, String)> {
    let line = line.trim_end();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.parse::<u16>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some((code, reason))
}

pub(super) fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

pub(super) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
