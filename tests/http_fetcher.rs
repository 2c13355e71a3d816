// tests/http_fetcher.rs
//
// HttpFetcher against a tiny loopback HTTP/1.1 server (one response per connection).
//
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;
use sta_crawl::{CrawlError, Fetch, HttpFetcher};

// Loopback only; ignore any proxy settings in the environment.
fn fetcher() -> HttpFetcher {
    HttpFetcher::with_client(reqwest::blocking::Client::builder().no_proxy().build().unwrap())
}

fn respond(stream: TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain headers.
    let mut line = String::new();
    while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) && line != "\r\n" {
        line.clear();
    }
    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = match path {
        "/Things" => ("200 OK", r#"{"value":[{"@iot.id":1}]}"#),
        "/broken" => ("500 Internal Server Error", r#"{"error":"boom"}"#),
        "/html" => ("200 OK", "<html>not json</html>"),
        _ => ("404 Not Found", ""),
    };
    let resp = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = reader.into_inner();
    let _ = stream.write_all(resp.as_bytes());
    let _ = stream.flush();
}

fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            respond(stream);
        }
    });
    format!("http://{addr}")
}

#[test]
fn decodes_json_body() {
    let base = serve();
    let mut f = fetcher();
    let v = f.fetch(&format!("{base}/Things")).unwrap();
    assert_eq!(v, json!({ "value": [{ "@iot.id": 1 }] }));
    assert_eq!(f.requests(), 1);
}

#[test]
fn non_success_status_is_an_error() {
    let base = serve();
    let mut f = fetcher();
    match f.fetch(&format!("{base}/broken")) {
        Err(CrawlError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/broken"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(matches!(f.fetch(&format!("{base}/nope")), Err(CrawlError::Status { status: 404, .. })));
}

#[test]
fn non_json_body_is_a_decode_error() {
    let base = serve();
    let mut f = fetcher();
    assert!(matches!(f.fetch(&format!("{base}/html")), Err(CrawlError::Decode { .. })));
}

#[test]
fn refused_connection_is_a_transport_error() {
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    // Listener dropped; nothing is accepting on that port now.
    let mut f = fetcher();
    assert!(matches!(
        f.fetch(&format!("http://{addr}/Things")),
        Err(CrawlError::Transport { .. })
    ));
}

#[test]
fn pause_applies_before_every_request() {
    let base = serve();
    let mut f = fetcher().with_pause(Some(Duration::from_millis(150)));
    let started = Instant::now();
    f.fetch(&format!("{base}/Things")).unwrap();
    let _ = f.fetch(&format!("{base}/broken"));
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(f.requests(), 2);
}
