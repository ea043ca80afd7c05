use crate::client::{CredibilityApi, Operation};
use crate::error::ApiError;
use crate::models::rating::{CommunityRating, CredibilityRating, UserVote, Vote};
use crate::models::settings::{EffectiveSettings, VoteWireFormat};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://akioweh.com:4269";

/// reqwest-backed client for the CrediCheck REST API. Holds nothing between
/// calls except the base origin and the connection pool.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    vote_format: VoteWireFormat,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_options(base_url, VoteWireFormat::default(), None)
    }

    pub fn from_settings(settings: &EffectiveSettings) -> Result<Self, ApiError> {
        let timeout = (settings.timeout_secs > 0).then(|| Duration::from_secs(settings.timeout_secs));
        Self::with_options(&settings.base_url, settings.vote_wire_format, timeout)
    }

    pub fn with_options(
        base_url: &str,
        vote_format: VoteWireFormat,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        check_base_url(&base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            vote_format,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        operation: Operation,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let url = build_url(&self.base_url, operation.endpoint(), params)
            .map_err(|e| fail(operation, e))?;
        let method = operation.method();
        debug!("{method} {url}");

        let mut request = self.client.request(method, url);
        if operation.sends_json_headers() {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json");
        }

        let response = request
            .send()
            .await
            .map_err(|e| fail(operation, connection_detail(&self.base_url, &e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(operation, format!("request failed with status {status}")));
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(operation, params).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| fail(operation, format!("failed to parse response body: {e}")))
    }
}

#[async_trait]
impl CredibilityApi for HttpApiClient {
    async fn get_credibility_rating(&self, site: &str) -> Result<CredibilityRating, ApiError> {
        self.fetch_json(Operation::GetCredibilityRating, &[("site", site.to_string())])
            .await
    }

    async fn get_community_rating(&self, site: &str) -> Result<CommunityRating, ApiError> {
        self.fetch_json(Operation::GetCommunityRating, &[("site", site.to_string())])
            .await
    }

    async fn cast_user_vote(&self, site: &str, vote: Vote) -> Result<bool, ApiError> {
        self.send(
            Operation::CastUserVote,
            &[("site", site.to_string()), ("vote", vote.to_string())],
        )
        .await?;
        Ok(true)
    }

    async fn remove_user_vote(&self, site: &str) -> Result<bool, ApiError> {
        self.send(Operation::RemoveUserVote, &[("site", site.to_string())])
            .await?;
        Ok(true)
    }

    async fn get_user_votes(&self) -> Result<Vec<UserVote>, ApiError> {
        self.fetch_json(Operation::GetUserVotes, &[]).await
    }

    async fn get_user_vote_for(&self, site: &str) -> Result<Vote, ApiError> {
        let operation = Operation::GetUserVoteFor;
        let body = self
            .send(operation, &[("site", site.to_string())])
            .await?
            .bytes()
            .await
            .map_err(|e| fail(operation, format!("failed to read response body: {e}")))?;
        decode_vote(self.vote_format, &body).map_err(|e| fail(operation, e))
    }
}

/// Endpoint paths are appended to the base as text, so it must be a plain
/// http(s) origin or path with no query or fragment.
pub fn check_base_url(base: &str) -> Result<(), String> {
    let parsed = Url::parse(base).map_err(|e| e.to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("scheme must be http or https".to_string());
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err("must not carry a query string or fragment".to_string());
    }
    Ok(())
}

/// Appends `params` to `base + endpoint` as query pairs, in order.
pub fn build_url(base: &str, endpoint: &str, params: &[(&str, String)]) -> Result<Url, String> {
    let mut url = Url::parse(&format!("{base}{endpoint}")).map_err(|e| e.to_string())?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[derive(Deserialize)]
struct WrappedVote {
    value: Vote,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyVote {
    Bare(Vote),
    Wrapped(WrappedVote),
}

pub fn decode_vote(format: VoteWireFormat, body: &[u8]) -> Result<Vote, String> {
    let decoded = match format {
        VoteWireFormat::Bare => serde_json::from_slice::<Vote>(body).map_err(|e| e.to_string()),
        VoteWireFormat::Wrapped => serde_json::from_slice::<WrappedVote>(body)
            .map(|w| w.value)
            .map_err(|e| e.to_string()),
        VoteWireFormat::Auto => serde_json::from_slice::<AnyVote>(body)
            .map(|any| match any {
                AnyVote::Bare(vote) => vote,
                AnyVote::Wrapped(w) => w.value,
            })
            .map_err(|_| "response is neither a vote integer nor an object with a vote value".to_string()),
    };
    decoded.map_err(|e| format!("failed to parse vote: {e}"))
}

fn fail(operation: Operation, detail: impl ToString) -> ApiError {
    let err = ApiError::request_failed(operation, detail);
    error!("{err}: {}", err.detail());
    err
}

fn connection_detail(base_url: &str, err: &reqwest::Error) -> String {
    if err.is_connect() {
        format!("cannot connect to {base_url}")
    } else if err.is_timeout() {
        format!("request to {base_url} timed out")
    } else {
        format!("request to {base_url} failed: {err}")
    }
}
