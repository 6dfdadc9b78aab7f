//! HTTP client for the platform API

use crate::auth::{
    Credentials, LoginState, SessionCookies, TwoFactorChallenge, TwoFactorMethod, VerifyResponse,
    AUTH_COOKIE, TWO_FACTOR_COOKIE,
};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use quickjoin_engine::{ApiResult, PlatformApi};
use quickjoin_types::{
    CurrentUser, Group, GroupId, GroupInstance, ResolvedTarget, User, UserId, World, WorldId,
};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.vrchat.cloud/api/1";

/// User agent sent with every request; the platform rejects anonymous agents.
pub const DEFAULT_USER_AGENT: &str = concat!("QuickJoin/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the platform API
///
/// Session cookies live in a jar owned by the client, so they can be seeded
/// from configuration and read back after login.
pub struct PlatformClient {
    client: Client,
    base_url: String,
    cookie_url: Url,
    jar: Arc<Jar>,
    credentials: Option<Credentials>,
}

impl PlatformClient {
    /// Create a new client for `endpoint`
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        let cookie_url = Url::parse(&base_url)?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            cookie_url,
            jar,
            credentials: None,
        })
    }

    /// Use these credentials for the login request
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========== Session ==========

    /// Seed the cookie jar with cookies saved by an earlier run
    pub fn restore_session(&self, cookies: &SessionCookies) {
        for (name, value) in [
            (AUTH_COOKIE, &cookies.auth),
            (TWO_FACTOR_COOKIE, &cookies.two_factor_auth),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                self.jar
                    .add_cookie_str(&format!("{}={}; Path=/", name, value), &self.cookie_url);
            }
        }
    }

    /// Current session cookies, read straight from the jar
    pub fn session_cookies(&self) -> SessionCookies {
        self.jar
            .cookies(&self.cookie_url)
            .and_then(|header| header.to_str().map(SessionCookies::from_header).ok())
            .unwrap_or_default()
    }

    // ========== Auth API ==========

    /// Request the current user, authenticating with cookies and, when set,
    /// the configured credentials.
    pub async fn login(&self) -> ClientResult<LoginState> {
        let mut request = self.request(reqwest::Method::GET, "/auth/user");
        if let Some(credentials) = &self.credentials {
            request = request.header(AUTHORIZATION, credentials.basic_header());
        }
        let body: serde_json::Value = self.send(request).await?;

        if body.get("requiresTwoFactorAuth").is_some() {
            let challenge: TwoFactorChallenge = serde_json::from_value(body)?;
            let methods: Vec<_> = challenge
                .requires_two_factor_auth
                .iter()
                .filter_map(|m| TwoFactorMethod::parse(m))
                .collect();
            debug!(methods = ?challenge.requires_two_factor_auth, "Second factor required");
            return Ok(LoginState::TwoFactorRequired(methods));
        }

        let user: CurrentUser = serde_json::from_value(body)?;
        Ok(LoginState::LoggedIn(user))
    }

    /// Submit a second factor code. Returns whether it was accepted.
    pub async fn verify_two_factor(&self, method: TwoFactorMethod, code: &str) -> ClientResult<bool> {
        let response: VerifyResponse = self
            .post(method.verify_path(), &serde_json::json!({ "code": code.trim() }))
            .await?;
        Ok(response.verified)
    }

    /// Get the logged in account
    pub async fn current_user(&self) -> ClientResult<CurrentUser> {
        self.get("/auth/user").await
    }

    // ========== Internal HTTP helpers ==========

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(USER_AGENT, DEFAULT_USER_AGENT)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let path = response.url().path().to_string();

        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(path))
        } else if status == StatusCode::UNAUTHORIZED {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Unauthorized(message))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn get_group(&self, id: &GroupId) -> ApiResult<Option<Group>> {
        Ok(self.get_optional(&format!("/groups/{}", id)).await?)
    }

    async fn get_group_instances(&self, id: &GroupId) -> ApiResult<Vec<GroupInstance>> {
        Ok(self.get(&format!("/groups/{}/instances", id)).await?)
    }

    async fn get_world(&self, id: &WorldId) -> ApiResult<Option<World>> {
        Ok(self.get_optional(&format!("/worlds/{}", id)).await?)
    }

    async fn get_user(&self, id: &UserId) -> ApiResult<Option<User>> {
        Ok(self.get_optional(&format!("/users/{}", id)).await?)
    }

    async fn invite_self(&self, target: &ResolvedTarget) -> ApiResult<()> {
        info!(location = %target.location(), "Requesting self-invite");
        let _: serde_json::Value = self
            .post(
                &format!("/invite/myself/to/{}", target.location()),
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }
}
