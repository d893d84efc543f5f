//! Google Calendar REST client

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::error::CalendarError;
use super::event::{RemoteEvent, normalize_summary};
use super::source::{CalendarSource, EventQuery, FetchedCalendar};
use crate::config::{CalendarConfig, OAuthRefreshCredentials, ServiceAccountKey};
use crate::constants::{
    GOOGLE_ASSERTION_TTL_SECS, GOOGLE_CALENDAR_API_BASE, GOOGLE_CALENDAR_SCOPE,
    GOOGLE_MAX_PAGE_SIZE, GOOGLE_TOKEN_URL,
};
use crate::utils::retry::FallbackChain;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// One way of obtaining an access token
#[derive(Debug, Clone)]
pub enum GoogleCredential {
    OAuthRefresh(OAuthRefreshCredentials),
    ServiceAccount(ServiceAccountKey),
}

impl GoogleCredential {
    fn kind(&self) -> &'static str {
        match self {
            Self::OAuthRefresh(_) => "oauth_refresh",
            Self::ServiceAccount(_) => "service_account",
        }
    }
}

/// Read-only Google Calendar client
pub struct GoogleCalendarClient {
    http: Client,
    api_base: String,
    token_url: String,
    credentials: FallbackChain<GoogleCredential>,
    service_account_email: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<GoogleEvent>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: Option<String>,
    status: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<GoogleEventTime>,
    end: Option<GoogleEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    date_time: Option<DateTime<FixedOffset>>,
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct CalendarInfo {
    summary: Option<String>,
}

impl GoogleCalendarClient {
    /// Build a client from configuration; `None` when no credential is set.
    ///
    /// OAuth refresh credentials are tried before the service account.
    pub fn from_config(config: &CalendarConfig) -> Result<Option<Self>, CalendarError> {
        let mut credentials = Vec::new();
        if let Some(oauth) = &config.oauth {
            credentials.push(GoogleCredential::OAuthRefresh(oauth.clone()));
        }
        if let Some(key) = &config.service_account {
            credentials.push(GoogleCredential::ServiceAccount(key.clone()));
        }

        Self::with_endpoints(credentials, GOOGLE_CALENDAR_API_BASE, GOOGLE_TOKEN_URL)
    }

    pub fn with_endpoints(
        credentials: Vec<GoogleCredential>,
        api_base: &str,
        token_url: &str,
    ) -> Result<Option<Self>, CalendarError> {
        let service_account_email = credentials.iter().find_map(|c| match c {
            GoogleCredential::ServiceAccount(key) => Some(key.client_email.clone()),
            GoogleCredential::OAuthRefresh(_) => None,
        });

        let Some(credentials) = FallbackChain::new(credentials) else {
            return Ok(None);
        };

        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Some(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token_url: token_url.to_string(),
            credentials,
            service_account_email,
        }))
    }

    async fn access_token(&self, credential: &GoogleCredential) -> Result<String, CalendarError> {
        let request = match credential {
            GoogleCredential::OAuthRefresh(oauth) => self.http.post(&self.token_url).form(&[
                ("grant_type", "refresh_token"),
                ("client_id", oauth.client_id.as_str()),
                ("client_secret", oauth.client_secret.as_str()),
                ("refresh_token", oauth.refresh_token.as_str()),
            ]),
            GoogleCredential::ServiceAccount(key) => {
                let assertion = self.sign_assertion(key)?;
                self.http
                    .post(&self.token_url)
                    .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            }
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Auth(format!(
                "{} token request returned {}: {}",
                credential.kind(),
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    fn sign_assertion(&self, key: &ServiceAccountKey) -> Result<String, CalendarError> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: GOOGLE_CALENDAR_SCOPE,
            aud: &self.token_url,
            iat: now,
            exp: now + GOOGLE_ASSERTION_TTL_SECS,
        };

        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CalendarError::Auth(format!("invalid service account key: {e}")))?;

        encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| CalendarError::Auth(format!("assertion signing failed: {e}")))
    }

    fn calendar_url(&self, calendar_id: &str, events: bool) -> Result<Url, CalendarError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| CalendarError::Transport(format!("invalid API base: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CalendarError::Transport("API base cannot be a base URL".into()))?;
            segments.pop_if_empty().extend(["calendars", calendar_id]);
            if events {
                segments.push("events");
            }
        }
        Ok(url)
    }

    /// Page through a calendar's events, stopping at `max_results`.
    ///
    /// The flag is set when the cap cut the listing short.
    async fn list_events(
        &self,
        token: &str,
        query: &EventQuery,
    ) -> Result<(Vec<GoogleEvent>, bool), CalendarError> {
        let url = self.calendar_url(&query.calendar_id, true)?;
        let time_min = query.time_min.to_rfc3339();
        let time_max = query.time_max.to_rfc3339();
        let cap = query.max_results as usize;

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let remaining = cap.saturating_sub(events.len());
            if remaining == 0 {
                break;
            }
            let page_size = remaining.min(GOOGLE_MAX_PAGE_SIZE as usize).to_string();

            let mut params = vec![
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("maxResults", page_size.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ];
            if let Some(next) = page_token.as_deref() {
                params.push(("pageToken", next));
            }

            let response = self
                .http
                .get(url.clone())
                .bearer_auth(token)
                .query(&params)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CalendarError::from_status(status.as_u16(), body));
            }

            let page: EventsPage = response.json().await?;
            events.extend(page.items);
            page_token = page.next_page_token;

            if page_token.is_none() {
                break;
            }
        }

        let truncated = cap == 0 || page_token.is_some() || events.len() > cap;
        events.truncate(cap);
        Ok((events, truncated))
    }

    /// Calendar display name; failures only cost the name
    async fn calendar_name(&self, token: &str, calendar_id: &str) -> Option<String> {
        let url = self.calendar_url(calendar_id, false).ok()?;
        let result = async {
            let response = self
                .http
                .get(url)
                .bearer_auth(token)
                .send()
                .await?
                .error_for_status()?;
            response.json::<CalendarInfo>().await
        }
        .await;

        match result {
            Ok(info) => info.summary,
            Err(e) => {
                tracing::warn!(calendar_id, error = %e, "Could not fetch calendar name");
                None
            }
        }
    }

    async fn fetch_with(
        &self,
        credential: &GoogleCredential,
        query: &EventQuery,
    ) -> Result<FetchedCalendar, CalendarError> {
        let token = self.access_token(credential).await?;
        let (items, truncated) = self.list_events(&token, query).await?;
        let calendar_name = self.calendar_name(&token, &query.calendar_id).await;

        let events = items
            .into_iter()
            .filter_map(|item| into_remote_event(item, query, calendar_name.as_deref()))
            .collect();

        if truncated {
            tracing::warn!(
                calendar_id = %query.calendar_id,
                max_results = query.max_results,
                "Calendar listing hit the result cap"
            );
        }

        Ok(FetchedCalendar {
            calendar_name,
            events,
            truncated,
        })
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarClient {
    async fn fetch_events(&self, query: &EventQuery) -> Result<FetchedCalendar, CalendarError> {
        self.credentials
            .run(|credential| self.fetch_with(credential, query))
            .await
    }

    fn principal(&self) -> Option<String> {
        self.service_account_email.clone()
    }
}

fn into_remote_event(
    item: GoogleEvent,
    query: &EventQuery,
    calendar_name: Option<&str>,
) -> Option<RemoteEvent> {
    if item.status.as_deref() == Some("cancelled") {
        return None;
    }
    let google_event_id = item.id?;

    let (start_date_time, start_date) = split_time(item.start);
    let (end_date_time, end_date) = split_time(item.end);

    Some(RemoteEvent {
        google_event_id,
        calendar_id: query.calendar_id.clone(),
        calendar_name: calendar_name.map(str::to_string),
        summary: normalize_summary(item.summary.as_deref(), query.out_of_office),
        description: item.description,
        is_all_day: start_date_time.is_none() && start_date.is_some(),
        start_date_time,
        start_date,
        end_date_time,
        end_date,
        location: item.location,
    })
}

fn split_time(time: Option<GoogleEventTime>) -> (Option<DateTime<Utc>>, Option<NaiveDate>) {
    match time {
        Some(t) => (t.date_time.map(|dt| dt.with_timezone(&Utc)), t.date),
        None => (None, None),
    }
}
