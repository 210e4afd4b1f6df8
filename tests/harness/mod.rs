//! Mock refresh endpoint for integration testing the probe.
//!
//! Serves canned responses from a background thread and hands every received request
//! back to the test, so tests can assert on what actually went over the wire.

#![allow(dead_code)]

use std::{
    io::{Read, Write},
    path::Path,
    sync::{
        Arc,
        mpsc::{self, Receiver, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tempfile::NamedTempFile;
use tiny_http::{Header, Response, Server};
use url::Url;

pub const REFRESH_PATH: &str = "/api/auth/refresh";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Request as seen by the mock server
#[derive(Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Local HTTP server answering every request with the same status and body.
///
/// The body is served byte for byte, it doesn't need to be valid UTF-8.
///
/// Shuts down when dropped.
pub struct MockRefreshServer {
    server: Arc<Server>,
    url: Url,
    requests: Receiver<RecordedRequest>,
    handle: Option<JoinHandle<()>>,
}

impl MockRefreshServer {
    pub fn start(status: u16, body: impl AsRef<[u8]>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("Unable to bind mock server"));
        let addr = server
            .server_addr()
            .to_ip()
            .expect("Mock server should listen on IP address");
        let url = Url::parse(&format!("http://{addr}{REFRESH_PATH}")).unwrap();

        let (tx, requests) = mpsc::channel();
        let body = body.as_ref().to_vec();
        let handle = thread::spawn({
            let server = Arc::clone(&server);
            move || {
                for mut request in server.incoming_requests() {
                    let content_type = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string());

                    let mut request_body = String::new();
                    request
                        .as_reader()
                        .read_to_string(&mut request_body)
                        .unwrap();

                    let _ = tx.send(RecordedRequest {
                        method: request.method().to_string(),
                        path: request.url().to_string(),
                        content_type,
                        body: request_body,
                    });

                    let response = Response::from_data(body.clone())
                        .with_status_code(status)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            }
        });

        Self {
            server,
            url,
            requests,
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Waits for the next request received by the server.
    pub fn recv_request(&self) -> RecordedRequest {
        self.requests
            .recv_timeout(DEFAULT_TIMEOUT)
            .expect("Mock server should receive a request")
    }

    /// Makes sure no request reached the server.
    pub fn assert_no_requests(&self) {
        match self.requests.recv_timeout(Duration::from_millis(200)) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(r) => panic!("No request expected, got: {r:?}"),
            Err(RecvTimeoutError::Disconnected) => panic!("Mock server thread died"),
        }
    }
}

impl Drop for MockRefreshServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Writes a saved login response carrying `refresh_token`.
pub fn saved_response_with_token(refresh_token: &str) -> NamedTempFile {
    let content = serde_json::json!({
        "success": true,
        "data": {
            "user": { "id": 1, "email": "user@example.com" },
            "tokens": {
                "accessToken": "access-token",
                "refreshToken": refresh_token,
            }
        }
    });
    saved_response(&content.to_string())
}

/// Writes arbitrary content as a saved login response.
pub fn saved_response(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Path inside a fresh temporary directory that doesn't exist.
pub fn missing_file(dir: &Path) -> std::path::PathBuf {
    dir.join("response.json")
}
