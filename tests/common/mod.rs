//! Common test utilities for sonar-control tests
//!
//! Spins up a wiremock server that plays both the GG directory service and
//! the Sonar web server, plus a temporary `coreProps.json` pointing at it.

#![allow(dead_code)]

use serde_json::{json, Value};
use sonar_control::{Sonar, SonarConfig, SonarError};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A fake GG install backed by a mock HTTP server
pub struct FakeSonar {
    pub server: MockServer,
    /// Temporary directory holding coreProps.json (auto-cleaned on drop)
    _temp_dir: TempDir,
    pub core_props_path: PathBuf,
}

impl FakeSonar {
    /// Healthy Sonar whose web server is the mock itself
    pub async fn start() -> Self {
        let fake = Self::bare().await;
        let sonar = json!({
            "isEnabled": true,
            "isReady": true,
            "isRunning": true,
            "metadata": { "webServerAddress": fake.server.uri() }
        });
        fake.mount_directory(sonar).await;
        fake
    }

    /// Directory lists the given `sonar` entry verbatim
    pub async fn with_sub_app(sonar: Value) -> Self {
        let fake = Self::bare().await;
        fake.mount_directory(sonar).await;
        fake
    }

    /// Mock server and coreProps.json, nothing mounted
    pub async fn bare() -> Self {
        let server = MockServer::start().await;

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let core_props_path = temp_dir.path().join("coreProps.json");
        let props = json!({
            "address": server.address().to_string(),
            "ggEncryptedAddress": server.address().to_string(),
        });
        std::fs::write(&core_props_path, props.to_string()).expect("write coreProps.json");

        Self {
            server,
            _temp_dir: temp_dir,
            core_props_path,
        }
    }

    async fn mount_directory(&self, sonar: Value) {
        self.respond("GET", "/subApps", 200, json!({ "subApps": { "sonar": sonar } }))
            .await;
    }

    /// Config that reaches the mock over plain HTTP
    pub fn config(&self, streamer_mode: Option<bool>) -> SonarConfig {
        SonarConfig {
            core_props_path: Some(self.core_props_path.clone()),
            streamer_mode,
            discovery_scheme: "http".to_string(),
            ..SonarConfig::default()
        }
    }

    /// Mount a canned JSON response for `verb route`
    pub async fn respond(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Paths (with query) of every request the mock saw, in order
    pub async fn requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|req| {
                let mut line = format!("{} {}", req.method, req.url.path());
                if let Some(query) = req.url.query() {
                    line.push('?');
                    line.push_str(query);
                }
                line
            })
            .collect()
    }
}

/// Connect and run `f` against the client on a blocking thread.
///
/// The blocking reqwest client owns its own runtime and must be created,
/// used and dropped outside the tokio worker threads.
pub async fn with_sonar<T, F>(config: SonarConfig, f: F) -> T
where
    F: FnOnce(Sonar) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let sonar = Sonar::with_config(config).expect("connect to fake Sonar");
        f(sonar)
    })
    .await
    .expect("blocking task panicked")
}

/// Connect, expecting initialization to fail
pub async fn connect_err(config: SonarConfig) -> SonarError {
    tokio::task::spawn_blocking(move || match Sonar::with_config(config) {
        Ok(sonar) => panic!("expected connect to fail, got {:?}", sonar),
        Err(e) => e,
    })
    .await
    .expect("blocking task panicked")
}
