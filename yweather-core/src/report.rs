use crate::format;
use crate::model::WeatherReport;
use crate::xml::ParsedResponse;
use crate::yql::{Field, fields};

/// Resolves [`Field`]s against one response and remembers whether any of them
/// had to fall back.
struct Lookup<'a> {
    response: &'a ParsedResponse,
    missing: Vec<String>,
}

impl<'a> Lookup<'a> {
    fn new(response: &'a ParsedResponse) -> Self {
        Self {
            response,
            missing: Vec::new(),
        }
    }

    fn get(&mut self, field: Field) -> &'a str {
        let path = field.path();
        match self.response.select_attribute(&path) {
            Some(value) => value,
            None => {
                self.missing.push(path);
                field.fallback
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl WeatherReport {
    pub(crate) fn from_response(response: &ParsedResponse) -> Self {
        let mut data = Lookup::new(response);

        let location = format::pretty_location(
            data.get(fields::CITY),
            data.get(fields::REGION),
            data.get(fields::COUNTRY),
        );
        let temperature_unit = data.get(fields::TEMPERATURE_UNIT);

        let report = WeatherReport {
            location,
            conditions: data.get(fields::CONDITIONS).to_owned(),
            temperature: format::temperature(data.get(fields::TEMPERATURE), temperature_unit),
            wind_speed: format::wind_speed(data.get(fields::WIND_SPEED), data.get(fields::SPEED_UNIT)),
            wind_direction: format::wind_direction(data.get(fields::WIND_DIRECTION)),
            wind_chill: format::temperature(data.get(fields::WIND_CHILL), temperature_unit),
            pressure: format::pressure(
                data.get(fields::PRESSURE),
                data.get(fields::PRESSURE_UNIT),
                data.get(fields::PRESSURE_TREND),
            ),
            humidity: format::humidity(data.get(fields::HUMIDITY)),
            visibility: format::visibility(
                data.get(fields::VISIBILITY),
                data.get(fields::DISTANCE_UNIT),
            ),
            sunrise: data.get(fields::SUNRISE).to_owned(),
            sunset: data.get(fields::SUNSET).to_owned(),
            time_updated: data.get(fields::UPDATED).to_owned(),
            is_complete: data.is_complete(),
        };

        if !report.is_complete {
            tracing::warn!(
                location = %report.location,
                missing = data.missing.len(),
                "weather response is incomplete"
            );
            tracing::debug!(missing = ?data.missing, "fields replaced by fallbacks");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yql;

    const FULL: &str = include_str!("../tests/fixtures/weather_us.xml");
    const SPARSE: &str = include_str!("../tests/fixtures/weather_sparse.xml");

    fn report(body: &str) -> WeatherReport {
        let response = ParsedResponse::parse(body, yql::namespaces()).unwrap();
        WeatherReport::from_response(&response)
    }

    #[test]
    fn full_response_is_complete() {
        let report = report(FULL);

        assert!(report.is_complete());
        assert_eq!(report.location(), "Columbus, OH, United States");
        assert_eq!(report.conditions(), "Cloudy");
        assert_eq!(report.temperature(), "34° F");
        assert_eq!(report.wind_speed(), "7 mph");
        assert_eq!(report.wind_direction(), "35° North of Northeast");
        assert_eq!(report.wind_chill(), "28° F");
        assert_eq!(report.pressure(), "1021.0 in. and rising");
        assert_eq!(report.humidity(), "56%");
        assert_eq!(report.visibility(), "16.1 mi");
        assert_eq!(report.sunrise(), "6:57 am");
        assert_eq!(report.sunset(), "6:23 pm");
        assert_eq!(report.time_updated(), "Fri, 04 Mar 2016 12:00 PM EST");
    }

    #[test]
    fn missing_fields_fall_back_and_mark_incomplete() {
        let report = report(SPARSE);

        assert!(!report.is_complete());
        assert_eq!(report.location(), "Reykjavik, Unknown Region, Iceland");
        assert_eq!(report.conditions(), "Unknown Conditions");
        assert_eq!(report.temperature(), "Unknown° C");
        assert_eq!(report.wind_speed(), "Still");
        assert_eq!(report.wind_direction(), "");
        assert_eq!(report.wind_chill(), "-3° C");
        assert_eq!(report.pressure(), "Unknown Pressure mb. and Unknown Stability");
        assert_eq!(report.humidity(), "?%");
        assert_eq!(report.visibility(), "? km");
        assert_eq!(report.sunrise(), "Unknown Time");
        assert_eq!(report.sunset(), "Unknown Time");
        assert_eq!(report.time_updated(), "Unknown Time");
    }

    #[test]
    fn one_missing_attribute_is_enough() {
        let body = FULL.replace(r#" sunset="6:23 pm""#, "");
        let report = report(&body);

        assert!(!report.is_complete());
        assert_eq!(report.sunset(), "Unknown Time");
        assert_eq!(report.sunrise(), "6:57 am");
    }

    #[test]
    fn empty_location_parts_leave_no_separators() {
        let body = FULL.replace(r#"region="OH""#, r#"region="""#);
        let report = report(&body);

        assert!(report.is_complete());
        assert_eq!(report.location(), "Columbus, United States");
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_value(report(FULL)).unwrap();

        assert_eq!(json["wind_speed"], "7 mph");
        assert_eq!(json["time_updated"], "Fri, 04 Mar 2016 12:00 PM EST");
        assert_eq!(json["is_complete"], true);
    }

    #[test]
    fn elements_outside_the_provider_namespace_do_not_count() {
        let body = r#"<query><results><channel>
            <location city="Nowhere" region="" country="United States"/>
        </channel></results></query>"#;
        let report = report(body);

        assert!(!report.is_complete());
        assert_eq!(report.location(), "Unknown City, Unknown Region, Unknown Country");
    }
}
