//! Authentication types: credentials, login state, session cookies

use base64::{engine::general_purpose::STANDARD, Engine as _};
use quickjoin_types::CurrentUser;
use serde::Deserialize;
use std::fmt;
use url::form_urlencoded;

/// Name of the session cookie
pub const AUTH_COOKIE: &str = "auth";
/// Name of the cookie remembering a passed second factor
pub const TWO_FACTOR_COOKIE: &str = "twoFactorAuth";

/// Username and password for basic authentication
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header. Both parts are URI-encoded before
    /// base64, as the platform expects.
    pub fn basic_header(&self) -> String {
        let raw = format!("{}:{}", uri_encode(&self.username), uri_encode(&self.password));
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn uri_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Second factor the platform can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoFactorMethod {
    /// Authenticator app code
    Totp,
    /// Recovery code
    Otp,
    /// Code sent by email
    EmailOtp,
}

impl TwoFactorMethod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "totp" => Some(Self::Totp),
            "otp" => Some(Self::Otp),
            "emailOtp" => Some(Self::EmailOtp),
            _ => None,
        }
    }

    /// Verification endpoint, relative to the API base
    pub fn verify_path(&self) -> &'static str {
        match self {
            Self::Totp => "/auth/twofactorauth/totp/verify",
            Self::Otp => "/auth/twofactorauth/otp/verify",
            Self::EmailOtp => "/auth/twofactorauth/emailotp/verify",
        }
    }
}

impl fmt::Display for TwoFactorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Totp => f.write_str("authenticator code"),
            Self::Otp => f.write_str("recovery code"),
            Self::EmailOtp => f.write_str("email code"),
        }
    }
}

/// Result of the login request
#[derive(Debug, Clone, PartialEq)]
pub enum LoginState {
    /// The session is authenticated
    LoggedIn(CurrentUser),
    /// A second factor has to be verified first; methods in the order the
    /// platform listed them
    TwoFactorRequired(Vec<TwoFactorMethod>),
}

impl LoginState {
    /// The method to use when several are offered: email if offered (the
    /// platform only offers it when it is the only option), then TOTP.
    pub fn preferred_method(methods: &[TwoFactorMethod]) -> Option<TwoFactorMethod> {
        [
            TwoFactorMethod::EmailOtp,
            TwoFactorMethod::Totp,
            TwoFactorMethod::Otp,
        ]
        .into_iter()
        .find(|m| methods.contains(m))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TwoFactorChallenge {
    pub requires_two_factor_auth: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponse {
    #[serde(default)]
    pub verified: bool,
}

/// Session cookie values, persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    pub auth: Option<String>,
    pub two_factor_auth: Option<String>,
}

impl SessionCookies {
    /// Parse a `Cookie` header value (`a=b; c=d`).
    pub fn from_header(header: &str) -> Self {
        let mut cookies = Self::default();
        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            match name {
                AUTH_COOKIE => cookies.auth = Some(value.to_string()),
                TWO_FACTOR_COOKIE => cookies.two_factor_auth = Some(value.to_string()),
                _ => {}
            }
        }
        cookies
    }

    pub fn is_empty(&self) -> bool {
        self.auth.is_none() && self.two_factor_auth.is_none()
    }
}
