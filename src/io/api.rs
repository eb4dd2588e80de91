use reqwest::blocking::{Client, multipart::Form};
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, instrument};

use crate::catalog::LeaderboardId;
use crate::config::ApiConfig;
use crate::error::SourceError;
use crate::model::LeaderboardEntry;
use crate::source::{ResultSource, parse_leaderboard};

const LEADERBOARD_ACCEPT: &str = "application/json, text/plain, */*";
const CLIENT_AGENT: &str = concat!("liftboard/", env!("CARGO_PKG_VERSION"));

/// Live leaderboard source backed by the member API.
///
/// Requests are issued one at a time on a blocking client.
#[derive(Debug, Clone)]
pub struct ApiSource {
    client: Client,
    config: ApiConfig,
}

impl ApiSource {
    /// Creates a source with a default HTTP client.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a source that sends requests through `client`.
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Fetches the raw payload of one leaderboard without decoding it.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_raw(&self, leaderboard: LeaderboardId) -> Result<String, SourceError> {
        let url = self
            .config
            .endpoint(&format!("leaderboard/Exercise/{leaderboard}"));
        let form = Form::new()
            .text("Selected_Type", "Leaderboard")
            .text("Selected_Date", "")
            .text("Selected_Session", "null")
            .text("member_token", self.config.token.expose().to_string());

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, LEADERBOARD_ACCEPT)
            .header(USER_AGENT, CLIENT_AGENT)
            .multipart(form)
            .send()
            .map_err(|err| SourceError::Unavailable(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!(
                "API returned status {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|err| SourceError::Unavailable(format!("failed to read body: {err}")))?;
        debug!(bytes = body.len(), "leaderboard payload received");
        Ok(body)
    }
}

impl ResultSource for ApiSource {
    fn fetch(&mut self, leaderboard: LeaderboardId) -> Result<Vec<LeaderboardEntry>, SourceError> {
        let body = self.fetch_raw(leaderboard)?;
        parse_leaderboard(&body)
    }
}
