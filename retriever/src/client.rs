use serde::{Deserialize, Serialize};

/// Login endpoint, relative to the service base URL.
const LOGIN_PATH: &str = "auth/login";

/// Account credentials for the scenario database service.
///
/// `Debug` keeps the password out of log output.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct TimeseriesQuery<'a> {
    models: &'a [String],
    scenarios: &'a [String],
    /// Restricts the result to the latest iteration of each scenario. The
    /// service applies this; nothing is filtered locally.
    only_default_runs: bool,
}

/// A timeseries selection as returned by the service: one row per
/// observation, with the column set dictated by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeseriesTable {
    pub columns: Vec<String>,
    pub data: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("authentication rejected with status {status}")]
    AuthRejected { status: reqwest::StatusCode },
    #[error("timeseries query failed with status {status}: {body}")]
    QueryFailed {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An authenticated session with the scenario database service.
pub struct ScenarioDbClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl ScenarioDbClient {
    /// Logs in to the service and returns a client holding the session token.
    pub async fn connect(
        base_url: impl Into<String>,
        credentials: &Credentials,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::new();

        let url = format!("{}/{}", base_url, LOGIN_PATH);
        log::debug!("Logging in to {} as {}", url, credentials.username);

        let response = client
            .post(&url)
            .json(&LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::AuthRejected {
                status: response.status(),
            });
        }
        let login: LoginResponse = response.json().await?;

        Ok(Self {
            base_url,
            token: login.token,
            client,
        })
    }

    /// Downloads the timeseries for the latest iteration of each scenario in
    /// `database` that matches both filter lists. One request, one response.
    pub async fn read_timeseries(
        &self,
        database: &str,
        models: &[String],
        scenarios: &[String],
    ) -> Result<TimeseriesTable, ClientError> {
        let url = format!("{}/{}/timeseries", self.base_url, database);
        let query = TimeseriesQuery {
            models,
            scenarios,
            only_default_runs: true,
        };
        log::debug!("Querying {}: {:?}", url, query);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::QueryFailed { status, body });
        }

        let table: TimeseriesTable = response.json().await?;
        log::debug!(
            "Received {} rows across {} columns",
            table.data.len(),
            table.columns.len()
        );
        Ok(table)
    }
}
