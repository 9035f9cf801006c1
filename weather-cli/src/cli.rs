use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use weather_core::{
    Config, HttpWeatherClient, TemperatureUnit, WeatherApi, WeatherRecord, WeatherRequest,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather service CLI")]
pub struct Cli {
    /// Base URL of the weather service; overrides the configured one.
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the weather service URL used by the other commands.
    Configure {
        /// URL to store; prompts interactively when absent.
        url: Option<String>,
    },

    /// Show the weather of a city.
    Show {
        city: String,
    },

    /// Add a record for a city that has none yet.
    Add(RecordArgs),

    /// Replace the record of an existing city.
    Update(RecordArgs),

    /// Delete the record of a city.
    Delete {
        city: String,
    },

    /// Check that the service is up.
    Health,
}

#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub city: String,

    /// Temperature value, e.g. "15".
    #[arg(long)]
    pub temp: String,

    /// "C" or "F".
    #[arg(long, default_value = "C")]
    pub unit: String,

    /// Condition label, e.g. "sunny".
    #[arg(long)]
    pub weather: String,

    /// Observation date as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

impl RecordArgs {
    fn into_request(self, today: NaiveDate) -> Result<WeatherRequest> {
        let unit = TemperatureUnit::try_from(self.unit.as_str())?;
        let date = match self.date {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))?,
            None => today,
        };

        Ok(WeatherRequest {
            city: self.city,
            temp: self.temp,
            unit,
            date,
            weather: self.weather,
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = load_config();
        let base_url = self.server.unwrap_or_else(|| config.client.base_url.clone());
        let client = HttpWeatherClient::new(base_url);
        let today = Local::now().date_naive();

        match self.command {
            Command::Configure { url } => configure(&mut config, url)?,
            Command::Show { city } => {
                let record = client.get(&city).await?;
                println!("{}", format_record(&record));
            }
            Command::Add(args) => {
                let request = args.into_request(today)?;
                client.add(&request).await?;
                println!("Added weather for {}", request.city);
            }
            Command::Update(args) => {
                let request = args.into_request(today)?;
                let record = client.update(&request).await?;
                println!("{}", format_record(&record));
            }
            Command::Delete { city } => {
                client.delete(&city).await?;
                println!("Deleted weather for {city}");
            }
            Command::Health => {
                println!("{}", client.health().await?);
            }
        }

        Ok(())
    }
}

/// Loads the saved config, falling back to defaults when the file is
/// unreadable so `configure` can still repair it and `--server` still works.
fn load_config() -> Config {
    Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Ignoring unusable config file, using defaults");
        Config::default()
    })
}

fn configure(config: &mut Config, url: Option<String>) -> Result<()> {
    let url = match url {
        Some(url) => url,
        None => inquire::Text::new("Weather service URL:")
            .with_default(&config.client.base_url)
            .prompt()
            .context("Failed to read the service URL")?,
    };

    config.set_base_url(&url);
    config.save()?;

    println!(
        "Saved service URL {} to {}",
        config.client.base_url,
        Config::config_file_path()?.display()
    );
    Ok(())
}

fn format_record(record: &WeatherRecord) -> String {
    format!(
        "{}: {}°{}, {} ({})",
        record.city, record.temp, record.unit, record.weather, record.date
    )
}
