use super::TimeLookup;
use super::helpers::{
    build_request_url, is_loopback, is_success, map_curl_error, parse_status_line,
};
use super::response::parse_response_body;
use crate::config::{LookupConfig, MAX_RESPONSE_BYTES};
use crate::data_model::{AuthoritativeTime, TimeQuery};
use crate::error::ClockError;
use curl::Error as CurlError;
use curl::easy::{Easy2, Handler, List, WriteError};
use tracing::{debug, info_span};

const MAX_REDIRECTS: u32 = 5;

#[derive(Default)]
struct ResponseCollector {
    body: Vec<u8>,
    limit: usize,
    limit_reached: bool,
    status: Option<(u16, String)>,
}

impl ResponseCollector {
    fn reset(&mut self, limit: usize) {
        self.body.clear();
        self.limit = limit;
        self.limit_reached = false;
        self.status = None;
    }
}

impl Handler for ResponseCollector {
    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        let remaining = self.limit.saturating_sub(self.body.len());
        let take = data.len().min(remaining);
        self.body.extend_from_slice(&data[..take]);
        if take < data.len() {
            self.limit_reached = true;
        }
        Ok(data.len())
    }

    fn header(&mut self, data: &[u8]) -> bool {
        // Each followed redirect starts a new response; only the last one counts.
        if let Some(status) = parse_status_line(&String::from_utf8_lossy(data)) {
            self.status = Some(status);
            self.body.clear();
            self.limit_reached = false;
        }
        true
    }
}

/// Lookup client for the current-time HTTP service.
pub struct CurlTimeLookup {
    config: LookupConfig,
    easy: Easy2<ResponseCollector>,
}

impl CurlTimeLookup {
    pub fn new(config: LookupConfig) -> Result<Self, CurlError> {
        let mut easy = Easy2::new(ResponseCollector::default());
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.accept_encoding("")?;
        Ok(Self { config, easy })
    }

    fn perform(&mut self, query: &TimeQuery) -> Result<AuthoritativeTime, ClockError> {
        let url = build_request_url(&self.config.endpoint, &self.config.api_key, query);

        self.easy.reset();
        self.easy.get_mut().reset(MAX_RESPONSE_BYTES);
        self.easy.follow_location(true).map_err(|err| map_curl_error(&err))?;
        self.easy
            .max_redirections(MAX_REDIRECTS)
            .map_err(|err| map_curl_error(&err))?;
        self.easy.accept_encoding("").map_err(|err| map_curl_error(&err))?;
        self.easy.get(true).map_err(|err| map_curl_error(&err))?;
        self.easy.url(url.as_str()).map_err(|err| map_curl_error(&err))?;
        if is_loopback(&self.config.endpoint) {
            // A proxy cannot reach this machine's loopback interface.
            self.easy.noproxy("*").map_err(|err| map_curl_error(&err))?;
        }
        if let Some(timeout) = self.config.timeout {
            self.easy.timeout(timeout).map_err(|err| map_curl_error(&err))?;
        }

        let mut headers = List::new();
        headers
            .append("Accept: application/json")
            .map_err(|err| map_curl_error(&err))?;
        self.easy.http_headers(headers).map_err(|err| map_curl_error(&err))?;

        self.easy.perform().map_err(|err| map_curl_error(&err))?;

        let code = self.easy.response_code().map_err(|err| map_curl_error(&err))? as u16;
        let collector = self.easy.get_ref();
        let (status, status_text) = match &collector.status {
            Some((status, text)) => (*status, text.clone()),
            None => (code, String::new()),
        };
        debug!(
            status,
            bytes = collector.body.len(),
            truncated = collector.limit_reached,
            "lookup response received"
        );

        if !is_success(status) {
            return Err(ClockError::Lookup {
                status,
                status_text,
            });
        }
        if collector.limit_reached {
            return Err(ClockError::parse(format!(
                "response body exceeds {MAX_RESPONSE_BYTES} bytes"
            )));
        }

        parse_response_body(&collector.body)
    }
}

impl TimeLookup for CurlTimeLookup {
    fn lookup(&mut self, query: &TimeQuery) -> Result<AuthoritativeTime, ClockError> {
        let span = info_span!("lookup", location = %query.location());
        let _entered = span.enter();
        self.perform(query)
    }
}

#[cfg(test)]
mod tests;
