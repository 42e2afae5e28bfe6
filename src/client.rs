//! Client for the plugin's server-side REST API.

use crate::config::PluginConfig;
use log::debug;
use npscore::net::{HttpClient, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GiveFeedbackResponse {
    pub channel_id: String,
}

pub struct PluginClient {
    http: Arc<dyn HttpClient>,
    url: String,
    csrf_token: Option<String>,
}

impl PluginClient {
    pub fn new(http: Arc<dyn HttpClient>, config: &PluginConfig) -> Self {
        Self {
            http,
            url: config.api_url(),
            csrf_token: config.csrf_token.clone(),
        }
    }

    /// Tells the server a session has started. The response body is ignored.
    pub async fn connected(&self) -> Result<(), ClientError> {
        self.do_fetch("/connected").await.map(|_| ())
    }

    /// Asks the server to open the feedback conversation with the bot.
    pub async fn user_wants_to_give_feedback(&self) -> Result<GiveFeedbackResponse, ClientError> {
        let url = format!("{}/give_feedback", self.url);
        let response = self.do_fetch("/give_feedback").await?;
        decode(&url, &response)
    }

    async fn do_fetch(&self, path: &str) -> Result<HttpResponse, ClientError> {
        let url = format!("{}{}", self.url, path);
        let mut request =
            HttpRequest::post(url.as_str()).with_header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = &self.csrf_token {
            request = request.with_header("X-CSRF-Token", token.as_str());
        }

        debug!("POST {url}");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(ClientError::Status {
                url,
                status: response.status_code,
            });
        }
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: &HttpResponse) -> Result<T, ClientError> {
    serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}
