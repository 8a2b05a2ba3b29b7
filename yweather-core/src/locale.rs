use crate::client::WeatherClient;
use crate::error::WeatherError;
use crate::xml::ParsedResponse;
use crate::yql::{self, fields};

const DOMESTIC_COUNTRY: &str = "United States";

impl WeatherClient {
    /// Whether the provider resolves `location` to somewhere in the United States.
    ///
    /// A response without a country reads as "not domestic"; only transport
    /// and XML failures are errors.
    pub async fn probe_is_domestic(&self, location: &str) -> Result<bool, WeatherError> {
        let response = self.query(location, &yql::locale_query(location)).await?;
        let domestic = is_domestic(&response);
        tracing::debug!(location, domestic, "probed locale");
        Ok(domestic)
    }
}

fn is_domestic(response: &ParsedResponse) -> bool {
    response.select_attribute(&fields::COUNTRY.path()) == Some(DOMESTIC_COUNTRY)
}
