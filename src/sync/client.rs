//! HTTP client for the profile server.

use crate::config::SyncConfig;
use crate::models::{Exercise, WorkoutEntry};

use super::protocol::{LoadResponse, MeResponse, SyncRequest, SyncResponse};

/// Errors that can occur during sync client operations.
#[derive(Debug)]
pub enum SyncError {
    /// Sync is not configured
    NotConfigured,
    /// Failed to reach the server
    HttpError(String),
    /// Server returned a non-success status
    ServerError(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::NotConfigured => write!(
                f,
                "Sync not configured. Add server_url and api_key to config."
            ),
            SyncError::HttpError(e) => write!(f, "HTTP error: {}", e),
            SyncError::ServerError(e) => write!(f, "Server error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}

/// Client for the profile server's sync, load, and identity endpoints.
#[derive(Debug, Clone)]
pub struct SyncClient {
    server_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl SyncClient {
    /// Creates a sync client from config.
    ///
    /// Returns an error if sync is not configured.
    pub fn from_config(config: &SyncConfig) -> Result<Self, SyncError> {
        let server_url = config
            .server_url
            .clone()
            .ok_or(SyncError::NotConfigured)?;
        let api_key = config.api_key.clone().ok_or(SyncError::NotConfigured)?;
        Ok(Self::new(server_url, api_key))
    }

    /// Creates a sync client with explicit parameters.
    pub fn new(server_url: String, api_key: String) -> Self {
        Self {
            server_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Resolves the user id this API key belongs to via `/me`.
    pub async fn fetch_identity(&self) -> Result<String, SyncError> {
        let response = self
            .http
            .get(self.endpoint("/me"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| SyncError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::ServerError(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        let me: MeResponse = response
            .json()
            .await
            .map_err(|e| SyncError::HttpError(e.to_string()))?;

        Ok(me.user_id)
    }

    /// Pushes both lists to the user's cloud profile.
    ///
    /// Idempotent: pushing the same lists twice yields the same remote
    /// state, with a refreshed sync timestamp.
    pub async fn push(
        &self,
        user_id: &str,
        exercises: &[Exercise],
        workouts: &[WorkoutEntry],
    ) -> Result<bool, SyncError> {
        let body = SyncRequest {
            exercises: exercises.to_vec(),
            workouts: workouts.to_vec(),
            user_id: user_id.to_string(),
        };

        let response = self
            .http
            .post(self.endpoint("/sync"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::ServerError(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        let result: SyncResponse = response
            .json()
            .await
            .map_err(|e| SyncError::HttpError(e.to_string()))?;

        Ok(result.success)
    }

    /// Pulls the user's cloud profile.
    pub async fn pull(&self, user_id: &str) -> Result<LoadResponse, SyncError> {
        let response = self
            .http
            .get(self.endpoint("/load"))
            .query(&[("userId", user_id)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| SyncError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::ServerError(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SyncError::HttpError(e.to_string()))
    }

    /// Builds an HTTP URL for a given path.
    fn endpoint(&self, path: &str) -> String {
        let base_url = if !self.server_url.starts_with("http://")
            && !self.server_url.starts_with("https://")
        {
            format!("http://{}", self.server_url)
        } else {
            self.server_url.clone()
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}
