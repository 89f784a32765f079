#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use blog_api::config::AppConfig;
use blog_api::{app, AppState};

/// A server running inside the test's runtime with its own in-memory database.
/// It stops when the test's runtime shuts down.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(AppConfig::testing()).await
    }

    pub async fn start_with(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::connect(config).await.context("failed to open test database")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /users with a predictable body derived from `username`
    pub async fn create_user(&self, username: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/users"))
            .json(&user_body(username))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());
        Ok(res.json().await?)
    }

    /// GET /token with the password `user_body` assigns
    pub async fn token_for(&self, username: &str) -> Result<String> {
        let res = self
            .client
            .get(self.url("/token"))
            .basic_auth(username, Some(password_for(username)))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "token request failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from response")
    }

    /// Sign up `username` and return `(user, token)`
    pub async fn signed_in(&self, username: &str) -> Result<(Value, String)> {
        let user = self.create_user(username).await?;
        let token = self.token_for(username).await?;
        Ok((user, token))
    }

    pub async fn create_post(&self, token: &str, title: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/posts"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "body": format!("{} body", title) }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "post failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn create_comment(&self, token: &str, post_id: i64, body: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url(&format!("/posts/{}/comments", post_id)))
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "comment failed: {}", res.status());
        Ok(res.json().await?)
    }
}

pub fn password_for(username: &str) -> String {
    format!("{}-secret", username)
}

pub fn user_body(username: &str) -> Value {
    json!({
        "firstName": "Test",
        "lastName": username,
        "username": username,
        "email": format!("{}@example.com", username),
        "password": password_for(username),
    })
}

pub fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().expect("resource has an integer id")
}

/// Status plus the `"error"` message of a failed call
pub async fn error_of(res: Response) -> Result<(StatusCode, String)> {
    let status = res.status();
    let body: Value = res.json().await?;
    let message = body["error"]
        .as_str()
        .with_context(|| format!("no error message in {}", body))?
        .to_string();
    Ok((status, message))
}
