use chrono_tz::Tz;
use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;
use std::time;

use crate::lead_client::{LeadEndpoint, TransportMode};

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub lead_client: LeadClientSettings,
    pub spreadsheet: SpreadsheetSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct LeadClientSettings {
    // Whoever knows the endpoint URL can write into the spreadsheet, keep it out of the logs
    pub endpoint_url: Secret<String>,
    #[serde(default)]
    pub transport: TransportMode,
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct SpreadsheetSettings {
    pub directory: PathBuf,
    pub worksheet: String,
    pub timezone: String,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }

    pub fn set_spreadsheet_directory(&mut self, directory: PathBuf) {
        self.spreadsheet.directory = directory;
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }
}

impl LeadClientSettings {
    pub fn get_endpoint(&self) -> LeadEndpoint {
        LeadEndpoint::parse(self.endpoint_url.expose_secret())
    }

    pub fn get_timeout(&self) -> Option<time::Duration> {
        self.timeout_milliseconds.map(time::Duration::from_millis)
    }
}

impl SpreadsheetSettings {
    pub fn get_timezone(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| format!("{} is not a valid timezone: {}", self.timezone, err))
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir().map_err(|err| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", err))
    })?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let environment = Environment::try_from(
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into()),
    )
    .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(environment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_LEAD_CLIENT__ENDPOINT_URL would set Settings.lead_client.endpoint_url
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?;

    tracing::info!("Application environment = {:?}", environment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
