//! Display rules applied to raw provider values.

/// Join city, region and country with `", "`, skipping empty parts so no
/// separator is left dangling.
pub fn pretty_location(city: &str, region: &str, country: &str) -> String {
    let mut name = city.to_owned();
    for part in [region, country] {
        if !name.is_empty() && !part.is_empty() {
            name.push_str(", ");
        }
        name.push_str(part);
    }
    name
}

/// `34` and `F` become `34° F`.
pub fn temperature(value: &str, unit: &str) -> String {
    format!("{value}° {unit}")
}

pub fn wind_speed(speed: &str, unit: &str) -> String {
    if speed == "0" {
        "Still".to_owned()
    } else {
        format!("{speed} {unit}")
    }
}

/// Upper bound of each 45° sector, the point named at that bound, and how a
/// bearing strictly inside the sector is described relative to it.
const COMPASS: [(i32, &str, &str); 8] = [
    (45, "Northeast", "North of Northeast"),
    (90, "East", "East of Northeast"),
    (135, "Southeast", "East of Southeast"),
    (180, "South", "South of Southeast"),
    (225, "Southwest", "South of Southwest"),
    (270, "West", "West of Southwest"),
    (315, "Northwest", "West of Northwest"),
    (360, "North", "North of Northwest"),
];

/// Describe a bearing in degrees, e.g. `10` becomes `35° North of Northeast`.
///
/// Unparseable input, the no-data sentinel and anything outside 0..=360 all
/// describe as the empty string.
pub fn wind_direction(raw: &str) -> String {
    let Ok(bearing) = raw.trim().parse::<i32>() else {
        return String::new();
    };
    if bearing == 0 {
        return "Due North".to_owned();
    }

    for (upper, point, between) in COMPASS {
        if bearing == upper {
            return format!("Due {point}");
        }
        if upper - 45 < bearing && bearing < upper {
            return format!("{}° {between}", upper - bearing);
        }
    }
    String::new()
}

pub fn pressure_trend(raw: &str) -> &str {
    match raw {
        "0" => "stable",
        "1" => "rising",
        "2" => "falling",
        other => other,
    }
}

pub fn pressure(value: &str, unit: &str, trend: &str) -> String {
    format!("{value} {unit}. and {}", pressure_trend(trend))
}

pub fn humidity(value: &str) -> String {
    format!("{value}%")
}

pub fn visibility(value: &str, unit: &str) -> String {
    format!("{value} {unit}")
}
