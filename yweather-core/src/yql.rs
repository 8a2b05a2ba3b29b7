//! Yahoo! Query Language requests and the response layout they produce.

use crate::model::UnitSystem;
use crate::xml::Namespaces;

/// Public YQL endpoint; queries go in the `q` parameter.
pub const DEFAULT_ENDPOINT: &str = "https://query.yahooapis.com/v1/public/yql";

/// Namespace of the `yweather:*` elements in forecast responses.
pub const YWEATHER_NS: &str = "http://xml.weather.yahoo.com/ns/rss/1.0";

const PREFIX: &str = "yweather";

/// Bindings needed to evaluate [`Field::path`] lookups.
pub fn namespaces() -> Namespaces {
    Namespaces::new().bind(PREFIX, YWEATHER_NS)
}

fn place_filter(location: &str) -> String {
    format!("woeid in (select woeid from geo.places(1) where text=\"{location}\")")
}

/// Query selecting only the resolved location, used to detect the country.
pub fn locale_query(location: &str) -> String {
    format!(
        "select location from weather.forecast where {}",
        place_filter(location)
    )
}

/// Query selecting the full forecast channel in the given unit system.
pub fn weather_query(location: &str, units: UnitSystem) -> String {
    let query = format!("select * from weather.forecast where {}", place_filter(location));
    match units {
        UnitSystem::Imperial => query,
        UnitSystem::Metric => query + " AND u=\"c\"",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtree {
    Channel,
    Item,
}

impl Subtree {
    fn path(self) -> &'static str {
        match self {
            Subtree::Channel => "/query/results/channel",
            Subtree::Item => "/query/results/channel/item",
        }
    }
}

/// One `yweather:<tag>/@<attribute>` value and what to show when it is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub subtree: Subtree,
    pub tag: &'static str,
    pub attribute: &'static str,
    pub fallback: &'static str,
}

impl Field {
    const fn channel(tag: &'static str, attribute: &'static str, fallback: &'static str) -> Self {
        Self {
            subtree: Subtree::Channel,
            tag,
            attribute,
            fallback,
        }
    }

    const fn item(tag: &'static str, attribute: &'static str, fallback: &'static str) -> Self {
        Self {
            subtree: Subtree::Item,
            tag,
            attribute,
            fallback,
        }
    }

    pub fn path(&self) -> String {
        format!(
            "{}/{PREFIX}:{}/@{}",
            self.subtree.path(),
            self.tag,
            self.attribute
        )
    }
}

/// Sentinel bearing substituted when the wind direction is missing.
pub const NO_BEARING: &str = "-999";

pub mod fields {
    use super::{Field, NO_BEARING};

    pub const CITY: Field = Field::channel("location", "city", "Unknown City");
    pub const REGION: Field = Field::channel("location", "region", "Unknown Region");
    pub const COUNTRY: Field = Field::channel("location", "country", "Unknown Country");

    pub const CONDITIONS: Field = Field::item("condition", "text", "Unknown Conditions");
    pub const TEMPERATURE: Field = Field::item("condition", "temp", "Unknown");
    pub const UPDATED: Field = Field::item("condition", "date", "Unknown Time");

    pub const WIND_SPEED: Field = Field::channel("wind", "speed", "Unknown Speed");
    pub const WIND_DIRECTION: Field = Field::channel("wind", "direction", NO_BEARING);
    pub const WIND_CHILL: Field = Field::channel("wind", "chill", "Unknown");

    pub const PRESSURE: Field = Field::channel("atmosphere", "pressure", "Unknown Pressure");
    pub const PRESSURE_TREND: Field = Field::channel("atmosphere", "rising", "Unknown Stability");
    pub const HUMIDITY: Field = Field::channel("atmosphere", "humidity", "?");
    pub const VISIBILITY: Field = Field::channel("atmosphere", "visibility", "?");

    pub const SUNRISE: Field = Field::channel("astronomy", "sunrise", "Unknown Time");
    pub const SUNSET: Field = Field::channel("astronomy", "sunset", "Unknown Time");

    pub const TEMPERATURE_UNIT: Field = Field::channel("units", "temperature", "Unknown Units");
    pub const SPEED_UNIT: Field = Field::channel("units", "speed", "Unknown Units");
    pub const PRESSURE_UNIT: Field = Field::channel("units", "pressure", "Unknown Units");
    pub const DISTANCE_UNIT: Field = Field::channel("units", "distance", "Unknown Units");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths() {
        assert_eq!(
            fields::COUNTRY.path(),
            "/query/results/channel/yweather:location/@country"
        );
        assert_eq!(
            fields::CONDITIONS.path(),
            "/query/results/channel/item/yweather:condition/@text"
        );
    }

    #[test]
    fn metric_query_carries_unit_selector() {
        let imperial = weather_query("Columbus, OH", UnitSystem::Imperial);
        let metric = weather_query("Columbus, OH", UnitSystem::Metric);

        assert_eq!(
            imperial,
            "select * from weather.forecast where woeid in \
             (select woeid from geo.places(1) where text=\"Columbus, OH\")"
        );
        assert_eq!(metric, format!("{imperial} AND u=\"c\""));
    }

    #[test]
    fn locale_query_selects_only_location() {
        assert!(locale_query("Paris").starts_with("select location from weather.forecast"));
        assert!(locale_query("Paris").ends_with("text=\"Paris\")"));
    }
}
