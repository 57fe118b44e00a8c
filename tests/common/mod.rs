#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use dlidx::config::Settings;
use dlidx::http::{build_client, HttpClient};

/// Serves canned raw HTTP responses keyed by request path, one per connection.
pub struct TestServer {
    pub base: String,
}

impl TestServer {
    pub fn start(routes: Vec<(&str, Vec<u8>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, Vec<u8>> =
            routes.into_iter().map(|(p, r)| (p.to_string(), r)).collect();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let routes = routes.clone();
                thread::spawn(move || serve(stream, &routes));
            }
        });
        Self { base }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

fn serve(mut stream: TcpStream, routes: &HashMap<String, Vec<u8>>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let response = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| respond("404 Not Found", &[], b"missing", true));
    let _ = stream.write_all(&response);
    let _ = stream.flush();
}

/// Raw response. Without `with_length` the body is delimited by closing the connection.
pub fn respond(status: &str, headers: &[(&str, &str)], body: &[u8], with_length: bool) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {status}\r\nConnection: close\r\n");
    for (k, v) in headers {
        out.push_str(&format!("{k}: {v}\r\n"));
    }
    if with_length {
        out.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    out.push_str("\r\n");
    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// Announces `announced` bytes but only sends `body` before hanging up.
pub fn truncated(body: &[u8], announced: usize) -> Vec<u8> {
    let mut bytes =
        format!("HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Length: {announced}\r\n\r\n").into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

pub fn client() -> HttpClient {
    build_client(&Settings::default()).unwrap()
}
