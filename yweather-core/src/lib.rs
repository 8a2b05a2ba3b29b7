//! Current weather conditions from Yahoo! Weather.
//!
//! This crate defines:
//! - The YQL queries and the provider's response layout
//! - A small namespace-aware XML reader for those responses
//! - Display rules turning raw values into [`WeatherReport`] strings
//! - Configuration handling for callers
//!
//! The entry point is [`fetch_weather`], or [`WeatherClient::fetch_weather`]
//! for a configured client. It is used by `yweather-cli`.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
mod locale;
pub mod model;
mod report;
pub mod xml;
pub mod yql;

pub use client::{WeatherClient, fetch_weather};
pub use config::Config;
pub use error::{WeatherError, XmlError};
pub use model::{UnitSystem, WeatherReport};
pub use xml::{Namespaces, ParsedResponse};
