use std::time::Duration;

use reqwest::{Client, Url};

use crate::config::Config;
use crate::error::WeatherError;
use crate::model::{UnitSystem, WeatherReport};
use crate::xml::ParsedResponse;
use crate::yql;

/// HTTP client for the YQL weather tables.
///
/// Holds no state between calls besides the connection pool, so one client
/// can serve any number of concurrent lookups.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    endpoint: Url,
}

impl WeatherClient {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_endpoint(yql::DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, WeatherError> {
        Self::build(endpoint.into(), None)
    }

    /// Client honoring the endpoint override and timeout from `config`.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| yql::DEFAULT_ENDPOINT.to_string());
        Self::build(endpoint, config.timeout_secs.map(Duration::from_secs))
    }

    fn build(endpoint: String, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let endpoint = parse_endpoint(endpoint)?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build().map_err(WeatherError::ClientSetup)?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Look up current conditions for `location`.
    ///
    /// Asks the provider where `location` is first, then requests imperial
    /// units for the United States and metric everywhere else.
    pub async fn fetch_weather(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let units = UnitSystem::for_locale(self.probe_is_domestic(location).await?);
        tracing::debug!(location, ?units, "requesting weather");

        let response = self
            .query(location, &yql::weather_query(location, units))
            .await?;
        let report = WeatherReport::from_response(&response);

        tracing::info!(
            location = %report.location(),
            complete = report.is_complete(),
            "fetched weather"
        );
        Ok(report)
    }

    /// Send one YQL query and parse the whole body as XML.
    pub(crate) async fn query(
        &self,
        location: &str,
        yql: &str,
    ) -> Result<ParsedResponse, WeatherError> {
        let request = self
            .http
            .get(self.endpoint.clone())
            .query(&[("q", yql), ("format", "xml")])
            .build()
            .map_err(|source| WeatherError::InvalidRequest {
                location: location.to_string(),
                source,
            })?;
        tracing::debug!(url = %request.url(), "sending YQL query");

        let res = self.http.execute(request).await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(ParsedResponse::parse(&body, yql::namespaces())?)
    }
}

/// Look up current conditions for `location` with a default client.
pub async fn fetch_weather(location: &str) -> Result<WeatherReport, WeatherError> {
    WeatherClient::new()?.fetch_weather(location).await
}

fn parse_endpoint(endpoint: String) -> Result<Url, WeatherError> {
    let reason = match Url::parse(&endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return Ok(url),
        Ok(url) => format!("unsupported scheme {:?}", url.scheme()),
        Err(e) => e.to_string(),
    };
    Err(WeatherError::InvalidEndpoint { endpoint, reason })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
