//! QuickJoin Client - Platform API access over HTTP
//!
//! Implements [`quickjoin_engine::PlatformApi`] on top of `reqwest`, and
//! carries the authentication session: login, second factor verification
//! and cookie reuse between runs.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{Credentials, LoginState, SessionCookies, TwoFactorMethod};
pub use client::{PlatformClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ClientError, ClientResult};
