#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Closed local port: every request fails at the network level.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/graphql";

/// A self-contained test environment with isolated data and config directories.
pub struct TestEnv {
    pub dir: TempDir,
    pub api_url: String,
}

impl TestEnv {
    /// Environment whose API cannot be reached.
    pub fn offline() -> Self {
        Self::with_api(UNREACHABLE_API)
    }

    pub fn with_api(api_url: &str) -> Self {
        TestEnv {
            dir: TempDir::new().unwrap(),
            api_url: api_url.to_string(),
        }
    }

    pub fn data_home(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_home().join("crmc").join("session.toml")
    }

    /// Pre-seed the stored session token.
    pub fn store_token(&self, token: &str) {
        let path = self.session_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, format!("access_token = \"{}\"\n", token)).unwrap();
    }

    pub fn stored_token(&self) -> Option<String> {
        let content = std::fs::read_to_string(self.session_file()).ok()?;
        let table: toml::Table = toml::from_str(&content).unwrap();
        table
            .get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    /// Get a Command configured to run crmc with this environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.env("CRMC_API_URL", &self.api_url);
        cmd
    }

    /// Like `cmd`, but the API URL comes only from the config file.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo_bin_cmd!("crmc");
        cmd.env("XDG_DATA_HOME", self.data_home());
        cmd.env("XDG_CONFIG_HOME", self.config_home());
        cmd.env_remove("CRMC_API_URL");
        cmd.env_remove("CRMC_LOG");
        // Ensure no color codes pollute test output
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Get a Command with --json flag.
    pub fn cmd_json(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--json");
        cmd
    }
}

/// A request received by [`StubApi`].
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl StubRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn query(&self) -> &str {
        self.body["query"].as_str().unwrap_or_default()
    }
}

type Handler = dyn Fn(&StubRequest) -> Value + Send + Sync;

/// Minimal GraphQL endpoint on a local port. Every response is HTTP 200 JSON.
pub struct StubApi {
    pub url: String,
    requests: Arc<Mutex<Vec<StubRequest>>>,
}

impl StubApi {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&StubRequest) -> Value + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/graphql", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handler: Arc<Handler> = Arc::new(handler);
        let seen = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                if let Some(request) = read_request(&stream) {
                    let body = handler(&request);
                    seen.lock().unwrap().push(request);
                    write_response(stream, &body);
                }
            }
        });

        StubApi { url, requests }
    }

    pub fn requests(&self) -> Vec<StubRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &TcpStream) -> Option<StubRequest> {
    let mut reader = BufReader::new(stream);
    let mut headers = HashMap::new();

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).ok()?;

    Some(StubRequest {
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    })
}

fn write_response(mut stream: TcpStream, body: &Value) {
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
