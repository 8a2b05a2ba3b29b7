use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use yweather_core::{Config, WeatherClient, WeatherReport};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "yweather", version, about = "Current weather from Yahoo! Weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default location and provider endpoint.
    Configure,

    /// Show current weather for a location.
    Show {
        /// City, region, postal code...; defaults to the configured location.
        location: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => show(location, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let location = Text::new("Default location:")
        .with_default(cfg.default_location.as_deref().unwrap_or(""))
        .with_help_message("Used by `yweather show` when no location is given")
        .prompt()
        .context("Failed to read default location")?;
    cfg.default_location = Some(location.trim().to_string()).filter(|l| !l.is_empty());

    let endpoint = Text::new("Provider endpoint (leave empty for the public endpoint):")
        .with_default(cfg.endpoint.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read endpoint")?;
    cfg.endpoint = Some(endpoint.trim().to_string()).filter(|e| !e.is_empty());

    let timeout = CustomType::<u64>::new("Request timeout in seconds (0 for none):")
        .with_default(cfg.timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;
    cfg.timeout_secs = Some(timeout).filter(|t| *t > 0);

    cfg.save()?;
    tracing::debug!(?cfg, "saved configuration");
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(location: Option<String>, json: bool) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let cfg = Config::load_from(&path)?;
    tracing::debug!(config = %path.display(), "loaded configuration");

    let location = cfg.resolve_location(location)?;
    let client = WeatherClient::from_config(&cfg)?;
    tracing::debug!(%location, endpoint = client.endpoint(), "looking up weather");

    let report = client.fetch_weather(&location).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

fn render(report: &WeatherReport) -> String {
    let wind = match report.wind_direction() {
        "" => report.wind_speed().to_string(),
        direction => format!("{}, {direction}", report.wind_speed()),
    };

    let mut out = format!(
        "Weather for {}\n\
         \x20 Conditions:  {}\n\
         \x20 Temperature: {}\n\
         \x20 Wind:        {wind}\n\
         \x20 Wind chill:  {}\n\
         \x20 Pressure:    {}\n\
         \x20 Humidity:    {}\n\
         \x20 Visibility:  {}\n\
         \x20 Sunrise:     {}\n\
         \x20 Sunset:      {}\n\
         \x20 Updated:     {}\n",
        report.location(),
        report.conditions(),
        report.temperature(),
        report.wind_chill(),
        report.pressure(),
        report.humidity(),
        report.visibility(),
        report.sunrise(),
        report.sunset(),
        report.time_updated(),
    );
    if !report.is_complete() {
        out.push_str("(Yahoo! Weather left out some details; placeholders are shown instead.)\n");
    }
    out
}
