use super::{CurlTimeLookup, ResponseCollector};
use crate::config::{LookupConfig, SecretString};
use crate::data_model::TimeQuery;
use crate::error::{ClockError, NetworkErrorKind};
use crate::features::lookup::TimeLookup;
use curl::easy::Handler;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use url::Url;

/// Answers a single request with `response` and hands back the request head.
fn serve_once(response: String) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let join = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buf).expect("read");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        stream.write_all(response.as_bytes()).expect("write");
        String::from_utf8_lossy(&request).into_owned()
    });
    let url = Url::parse(&format!("http://{addr}/v1/current_time/")).expect("url");
    (url, join)
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn lookup_for(endpoint: Url) -> CurlTimeLookup {
    CurlTimeLookup::new(LookupConfig {
        endpoint,
        api_key: SecretString::from("test-key"),
        timeout: Some(std::time::Duration::from_secs(5)),
    })
    .expect("curl handle")
}

#[test]
fn collector_keeps_bytes_under_limit() {
    let mut collector = ResponseCollector::default();
    collector.reset(16);
    let wrote = collector.write(b"{\"a\":1}").expect("write");
    assert_eq!(wrote, 7);
    assert_eq!(collector.body, b"{\"a\":1}");
    assert!(!collector.limit_reached);
}

#[test]
fn collector_caps_body_and_flags_limit() {
    let mut collector = ResponseCollector::default();
    collector.reset(5);
    let data = vec![b'x'; 8];
    let wrote = collector.write(&data).expect("write");
    assert_eq!(wrote, data.len());
    assert_eq!(collector.body.len(), 5);
    assert!(collector.limit_reached);
}

#[test]
fn collector_tracks_last_status_line() {
    let mut collector = ResponseCollector::default();
    collector.reset(5);
    assert!(collector.header(b"HTTP/1.1 100 Continue\r\n"));
    assert!(collector.header(b"HTTP/1.1 503 Service Unavailable\r\n"));
    assert!(collector.header(b"Content-Length: 0\r\n"));
    assert_eq!(
        collector.status,
        Some((503, "Service Unavailable".to_string()))
    );

    collector.reset(5);
    assert!(collector.status.is_none());
    assert!(collector.body.is_empty());
}

#[test]
fn collector_drops_body_of_superseded_response() {
    let mut collector = ResponseCollector::default();
    collector.reset(64);
    assert!(collector.header(b"HTTP/1.1 302 Found\r\n"));
    collector.write(b"moved").expect("write");
    assert!(collector.header(b"HTTP/1.1 200 OK\r\n"));
    collector.write(b"{}").expect("write");

    assert_eq!(collector.status, Some((200, "OK".to_string())));
    assert_eq!(collector.body, b"{}");
}

#[test]
fn lookup_follows_redirect_to_final_response() {
    let (target, final_server) = serve_once(http_response(
        "200 OK",
        r#"{"datetime":"2020-05-01 14:33:04"}"#,
    ));
    let (url, redirect_server) = serve_once(format!(
        "HTTP/1.1 302 Found\r\nLocation: {target}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    ));
    let mut lookup = lookup_for(url);

    let time = lookup
        .lookup(&TimeQuery::from_inputs("Europe", "Berlin"))
        .expect("time after redirect");

    assert_eq!(time.local.to_string(), "2020-05-01 14:33:04");
    redirect_server.join().expect("redirect server thread");
    let request = final_server.join().expect("final server thread");
    assert!(request.starts_with("GET /v1/current_time/"));
}

#[test]
fn lookup_parses_successful_response() {
    let (url, server) = serve_once(http_response(
        "200 OK",
        r#"{"datetime":"2020-05-01 14:33:04","timezone_abbreviation":"CEST","gmt_offset":2}"#,
    ));
    let mut lookup = lookup_for(url);

    let time = lookup
        .lookup(&TimeQuery::from_inputs("Europe", "Berlin"))
        .expect("time");

    assert_eq!(time.local.to_string(), "2020-05-01 14:33:04");
    assert_eq!(time.zone.abbreviation.as_deref(), Some("CEST"));

    let request = server.join().expect("server thread");
    let request_line = request.lines().next().unwrap_or_default();
    assert!(
        request_line
            .starts_with("GET /v1/current_time/?api_key=test-key&location=Europe%2FBerlin")
    );
}

#[test]
fn lookup_maps_404_to_lookup_error() {
    let (url, server) = serve_once(http_response("404 Not Found", r#"{"error":"nope"}"#));
    let mut lookup = lookup_for(url);

    let err = lookup
        .lookup(&TimeQuery::from_inputs("Nowhere", "Atlantis"))
        .expect_err("should fail");

    assert_eq!(
        err,
        ClockError::Lookup {
            status: 404,
            status_text: "Not Found".to_string(),
        }
    );
    server.join().expect("server thread");
}

#[test]
fn lookup_maps_missing_datetime_to_parse_error() {
    let (url, server) = serve_once(http_response("200 OK", r#"{"timezone_name":"x"}"#));
    let mut lookup = lookup_for(url);

    let err = lookup
        .lookup(&TimeQuery::from_inputs("Asia", "Tokyo"))
        .expect_err("should fail");

    assert!(matches!(err, ClockError::Parse { .. }));
    server.join().expect("server thread");
}

#[test]
fn lookup_reports_refused_connection_as_network_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };
    let mut lookup = lookup_for(Url::parse(&format!("http://{addr}/")).expect("url"));

    let err = lookup
        .lookup(&TimeQuery::from_inputs("Europe", "Oslo"))
        .expect_err("should fail");

    assert!(matches!(
        err,
        ClockError::Network {
            kind: NetworkErrorKind::Connect,
            ..
        }
    ));
}
