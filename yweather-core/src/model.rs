use serde::Serialize;

/// Units requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Fahrenheit, mph, inches, miles. The provider's default.
    Imperial,
    /// Celsius, km/h, millibars, kilometres.
    Metric,
}

impl UnitSystem {
    pub fn for_locale(is_domestic: bool) -> Self {
        if is_domestic {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}

/// Current conditions for one location, rendered for display.
///
/// Built in one pass from a provider response. Fields the response lacked are
/// filled with placeholder text and [`is_complete`](Self::is_complete) is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub(crate) location: String,
    pub(crate) conditions: String,
    pub(crate) temperature: String,
    pub(crate) wind_speed: String,
    pub(crate) wind_direction: String,
    pub(crate) wind_chill: String,
    pub(crate) pressure: String,
    pub(crate) humidity: String,
    pub(crate) visibility: String,
    pub(crate) sunrise: String,
    pub(crate) sunset: String,
    pub(crate) time_updated: String,
    pub(crate) is_complete: bool,
}

impl WeatherReport {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn conditions(&self) -> &str {
        &self.conditions
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    /// `"Still"` when there is no wind.
    pub fn wind_speed(&self) -> &str {
        &self.wind_speed
    }

    /// Compass description, empty when the provider gave no usable bearing.
    pub fn wind_direction(&self) -> &str {
        &self.wind_direction
    }

    pub fn wind_chill(&self) -> &str {
        &self.wind_chill
    }

    pub fn pressure(&self) -> &str {
        &self.pressure
    }

    pub fn humidity(&self) -> &str {
        &self.humidity
    }

    pub fn visibility(&self) -> &str {
        &self.visibility
    }

    pub fn sunrise(&self) -> &str {
        &self.sunrise
    }

    pub fn sunset(&self) -> &str {
        &self.sunset
    }

    pub fn time_updated(&self) -> &str {
        &self.time_updated
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}
