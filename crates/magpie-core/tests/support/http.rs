//! Minimal in-process stand-in for the GitHub contents API.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use base64::{Engine as _, engine::general_purpose};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use url::Url;

use magpie_core::config::RepositoryConfig;

pub const OWNER: &str = "magicuidesign";
pub const REPO: &str = "magicui";

/// Canned reply
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StubResponse {
    /// A contents API file body; base64 is wrapped at 60 columns like GitHub does.
    pub fn file(path: &str, text: &str) -> Self {
        let encoded = general_purpose::STANDARD.encode(text.as_bytes());
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        let body = serde_json::json!({
            "type": "file",
            "path": path,
            "encoding": "base64",
            "content": wrapped,
        });
        Self::json(200, &body)
    }

    pub fn directory(entries: &[(&str, &str)]) -> Self {
        let items: Vec<_> = entries
            .iter()
            .map(|(name, kind)| {
                serde_json::json!({
                    "name": name,
                    "path": format!("components/{name}"),
                    "type": kind,
                })
            })
            .collect();
        Self::json(200, &serde_json::Value::Array(items))
    }

    pub fn status(status: u16, message: &str) -> Self {
        Self::json(status, &serde_json::json!({ "message": message }))
    }

    pub fn rate_limited() -> Self {
        Self::status(403, "API rate limit exceeded for 127.0.0.1.")
            .with_header("x-ratelimit-remaining", "0")
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct State {
    routes: HashMap<String, VecDeque<StubResponse>>,
    requests: Vec<Recorded>,
}

/// Serves queued responses per URL path and records every request.
///
/// Each request pops the next queued response for its path; the last one
/// is repeated once the queue is down to a single entry. Unknown paths
/// answer 404.
pub struct GitHubStub {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
}

impl GitHubStub {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State::default()));

        let shared = Arc::clone(&state);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let state = Arc::clone(&shared);
                tokio::spawn(async move {
                    let (read_half, mut write_half) = stream.into_split();
                    let mut reader = BufReader::new(read_half);

                    let mut request_line = String::new();
                    if reader.read_line(&mut request_line).await.unwrap_or(0) == 0 {
                        return;
                    }
                    let path = request_line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();

                    let mut authorization = None;
                    loop {
                        let mut line = String::new();
                        if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                            break;
                        }
                        let line = line.trim_end();
                        if line.is_empty() {
                            break;
                        }
                        if let Some((name, value)) = line.split_once(':') {
                            if name.eq_ignore_ascii_case("authorization") {
                                authorization = Some(value.trim().to_string());
                            }
                        }
                    }

                    let response = {
                        let mut state = state.lock().unwrap();
                        state.requests.push(Recorded {
                            path: path.clone(),
                            authorization,
                        });
                        let next = match state.routes.get_mut(&path) {
                            Some(queue) if queue.len() > 1 => queue.pop_front(),
                            Some(queue) => queue.front().cloned(),
                            None => None,
                        };
                        next.unwrap_or_else(|| StubResponse::status(404, "Not Found"))
                    };

                    let mut head = format!(
                        "HTTP/1.1 {} Stub\r\ncontent-length: {}\r\nconnection: close\r\n",
                        response.status,
                        response.body.len()
                    );
                    for (name, value) in &response.headers {
                        head.push_str(&format!("{name}: {value}\r\n"));
                    }
                    head.push_str("\r\n");

                    let _ = write_half.write_all(head.as_bytes()).await;
                    let _ = write_half.write_all(response.body.as_bytes()).await;
                    let _ = write_half.shutdown().await;
                });
            }
        });

        Self { addr, state }
    }

    /// Queue responses for a repository path (relative to `contents/`)
    pub fn route(&self, repo_path: &str, responses: Vec<StubResponse>) {
        let mut state = self.state.lock().unwrap();
        state
            .routes
            .insert(contents_path(repo_path), responses.into_iter().collect());
    }

    /// Repository coordinates pointing at this stub
    pub fn repository(&self) -> RepositoryConfig {
        RepositoryConfig {
            owner: OWNER.to_string(),
            name: REPO.to_string(),
            api_url: Url::parse(&format!("http://{}/", self.addr)).unwrap(),
            ..RepositoryConfig::default()
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests made for a repository path
    pub fn hits(&self, repo_path: &str) -> usize {
        let full = contents_path(repo_path);
        self.requests().iter().filter(|r| r.path == full).count()
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

pub fn contents_path(repo_path: &str) -> String {
    format!("/repos/{OWNER}/{REPO}/contents/{repo_path}")
}
