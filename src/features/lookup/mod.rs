//! # Feature: Roblox Lookup
//!
//! Resolves a Roblox username to its account via the public users API. Lookup results feed
//! the `/lookup` command, whose reply carries the designate/undesignate buttons.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RobloxUser {
    pub id: u64,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsernameLookupRequest<'a> {
    usernames: [&'a str; 1],
    exclude_banned_users: bool,
}

#[derive(Debug, Deserialize)]
struct UsernameLookupResponse {
    data: Vec<RobloxUser>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("`{0}` is not a valid Roblox username")]
    InvalidUsername(String),
    #[error("no Roblox user named `{0}`")]
    NotFound(String),
    #[error("Roblox API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    base_url: String,
}

impl RobloxClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("warden/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a user by exact username (case-insensitive on Roblox's side)
    pub async fn find_by_username(&self, username: &str) -> Result<RobloxUser, LookupError> {
        if !is_valid_username(username) {
            return Err(LookupError::InvalidUsername(username.to_string()));
        }

        let url = format!("{}/v1/usernames/users", self.base_url);
        debug!("Looking up roblox user {username} via {url}");

        let response: UsernameLookupResponse = self
            .http
            .post(&url)
            .json(&UsernameLookupRequest {
                usernames: [username],
                exclude_banned_users: false,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(username.to_string()))
    }
}

/// Roblox usernames: 3-20 characters, letters, digits and at most one underscore, which
/// may not lead or trail.
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (3..=20).contains(&len)
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && username.matches('_').count() <= 1
        && !username.starts_with('_')
        && !username.ends_with('_')
}
