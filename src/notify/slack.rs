//! Slack direct-message notifier

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{CuratorNotice, Notifier, NotifyError};
use crate::config::SlackConfig;
use crate::constants::NOTIFY_TIMEOUT_SECS;
use crate::utils::retry::FallbackChain;

/// Sends the curator a DM through the Slack Web API.
///
/// Bot tokens form a fallback chain: a revoked or rate-limited token hands
/// over to the next one.
pub struct SlackNotifier {
    http: Client,
    api_base: String,
    tokens: FallbackChain<String>,
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
    user: Option<SlackUser>,
}

#[derive(Debug, Deserialize)]
struct SlackUser {
    id: String,
}

impl SlackNotifier {
    /// `None` when no bot token is configured
    pub fn from_config(config: &SlackConfig) -> Result<Option<Self>, NotifyError> {
        let Some(tokens) = FallbackChain::new(config.bot_tokens.clone()) else {
            return Ok(None);
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()?;

        Ok(Some(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            tokens,
        }))
    }

    async fn call(
        &self,
        token: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<SlackResponse, NotifyError> {
        let response = request.bearer_auth(token).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NotifyError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(NotifyError::Api(format!("HTTP {}", response.status().as_u16())));
        }

        let body: SlackResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Api(e.to_string()))?;

        if body.ok {
            return Ok(body);
        }

        let error = body.error.unwrap_or_else(|| "unknown_error".to_string());
        Err(match error.as_str() {
            "ratelimited" => NotifyError::RateLimited,
            "invalid_auth" | "not_authed" | "token_revoked" | "token_expired"
            | "account_inactive" | "missing_scope" => NotifyError::Auth(error),
            _ => NotifyError::Api(error),
        })
    }

    async fn resolve_recipient(
        &self,
        token: &str,
        notice: &CuratorNotice,
    ) -> Result<String, NotifyError> {
        if let Some(user_id) = notice.slack_user_id.as_deref().filter(|id| !id.is_empty()) {
            return Ok(user_id.to_string());
        }

        let email = notice
            .email
            .as_deref()
            .ok_or_else(|| NotifyError::RecipientNotFound(notice.curator_name.clone()))?;

        let request = self
            .http
            .get(format!("{}/users.lookupByEmail", self.api_base))
            .query(&[("email", email)]);

        match self.call(token, request).await {
            Ok(SlackResponse {
                user: Some(user), ..
            }) => Ok(user.id),
            Ok(_) => Err(NotifyError::RecipientNotFound(email.to_string())),
            Err(NotifyError::Api(code)) if code == "users_not_found" => {
                Err(NotifyError::RecipientNotFound(email.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn send_with(&self, token: &str, notice: &CuratorNotice) -> Result<(), NotifyError> {
        let channel = self.resolve_recipient(token, notice).await?;

        let request = self
            .http
            .post(format!("{}/chat.postMessage", self.api_base))
            .json(&json!({
                "channel": channel,
                "text": notice.message(),
            }));

        self.call(token, request).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify_curator(&self, notice: &CuratorNotice) -> Result<(), NotifyError> {
        self.tokens
            .run(|token| self.send_with(token, notice))
            .await?;

        tracing::info!(curator = %notice.curator_name, "Curator notified on Slack");
        Ok(())
    }
}
