//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;

use hotspot_dashboard::lifecycle::{Bootstrap, Shutdown};
use hotspot_dashboard::AppConfig;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A shell server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<AppConfig>,
    pub handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Bootstrap the dashboard with `config` and serve it in the background.
pub async fn start_server(config: AppConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mounted = Bootstrap::new(config).build().unwrap().mount_on(listener);
    let addr = mounted.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move { mounted.run(config_updates, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        updates,
        handle,
    }
}

/// HTTP client that never goes through a proxy or reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Write view templates into `dir` as `<View>.html`.
#[allow(dead_code)]
pub fn write_views(dir: &Path, views: &[(&str, &str)]) {
    for (name, template) in views {
        std::fs::write(dir.join(format!("{}.html", name)), template).unwrap();
    }
}
