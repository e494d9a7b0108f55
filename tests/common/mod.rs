use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub const USERNAME: &str = "testuser@awesomeinc.com";
pub const PASSWORD: &str = "password";
pub const SECRET_KEY: &str = "integration_secret_key";

/// A server binary running on a free port, killed when dropped.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let hashed_password = bcrypt::hash(PASSWORD, 4).context("failed to hash test password")?;

        // The pool connects lazily, so public and 401 paths work without a
        // reachable database.
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_awesome-api-rust"));
        cmd.env("ADF__USERNAME", USERNAME)
            .env("HASHED__PASSWORD", hashed_password)
            .env("SECRET__KEY", SECRET_KEY)
            .env("DATABASE__HOSTNAME", "127.0.0.1")
            .env("DATABASE__PORT", "5432")
            .env("DATABASE__USERNAME", "awesome")
            .env("DATABASE__PASSWORD", "awesome")
            .env("DATABASE__DB", "awesome")
            .env("API__HOST", "127.0.0.1")
            .env("API__PORT", port.to_string())
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(format!("{}/", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<reqwest::Response> {
    let res = reqwest::Client::new()
        .post(server.url("/token"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await?;
    Ok(res)
}
