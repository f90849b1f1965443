//! Store application configuration that gets read from disk
use crate::persistence::default_db_path;
use crate::services::{new_geolocation_handler, GeoSource, PositionOptions};
use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::io::prelude::*;
use std::iter::Iterator;
use std::path::PathBuf;
use std::str::FromStr;

static CONFIG_DIR_NAME: &str = "waypoint-tracker";
static CONFIG_FILE_NAME: &str = "config.yml";

/// Defines the allowed keys under the services map
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Geolocation,
}

/// Type alias for clarity
pub type ServiceParameters = HashMap<String, Value>;

/// Build a service instance from its configuration entry
pub trait FromServiceConfig: Sized {
    fn from_config(config: &ServiceConfig) -> Result<Self, Error>;
}

/// Configuration options for a single service of any type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    handler: String,
    #[serde(default)]
    configuration: ServiceParameters,
}

impl ServiceConfig {
    pub fn new(handler: String, configuration: ServiceParameters) -> Self {
        ServiceConfig {
            handler,
            configuration,
        }
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn parameters(&self) -> impl Iterator<Item = &String> + '_ {
        self.configuration.keys()
    }

    pub fn get_parameter(&self, key: &str) -> Option<&Value> {
        self.configuration.get(key)
    }

    fn invalid_value(&self, key: &str, expected: &str, value: &Value) -> Error {
        Error::InvalidConfigurationValue(format!(
            "invalid value for {}.{}, expected {}: {:?}",
            &self.handler, key, expected, value
        ))
    }

    pub fn get_parameter_as_string(&self, key: &str) -> Option<Result<String, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_str()
                .map(|v| v.to_string())
                .ok_or_else(|| self.invalid_value(key, "a string", value))
        })
    }

    pub fn get_parameter_as_i64(&self, key: &str) -> Option<Result<i64, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_i64()
                .ok_or_else(|| self.invalid_value(key, "an integer", value))
        })
    }

    pub fn get_parameter_as_f64(&self, key: &str) -> Option<Result<f64, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_f64()
                .ok_or_else(|| self.invalid_value(key, "a floating point value", value))
        })
    }

    pub fn get_parameter_as_bool(&self, key: &str) -> Option<Result<bool, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_bool()
                .ok_or_else(|| self.invalid_value(key, "a boolean", value))
        })
    }
}

/// Configuration struct that we can create from the config file used
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(
        deserialize_with = "deserialize_level_filter",
        serialize_with = "serialize_level_filter",
        default = "default_level_filter"
    )]
    log_level: LevelFilter,
    #[serde(default)]
    database_path: Option<PathBuf>,
    #[serde(default)]
    position_options: PositionOptions,
    #[serde(default)]
    services: HashMap<ServiceType, ServiceConfig>,
}

impl Config {
    pub fn load<T: Read>(source: &mut T) -> Result<Self, Error> {
        Ok(serde_yaml::from_reader(source)?)
    }

    /// Location of the config file inside the user's config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(PathBuf::new)
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Path of the database holding the persisted track
    pub fn database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(default_db_path)
    }

    pub fn position_options(&self) -> PositionOptions {
        self.position_options
    }

    pub fn get_geolocation_handler(&self) -> Result<Box<dyn GeoSource>, Error> {
        match self.services.get(&ServiceType::Geolocation) {
            Some(cfg) => new_geolocation_handler(cfg),
            None => Err(Error::UnknownServiceHandler(
                "no service configuration defined for geolocation".to_string(),
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_level_filter(),
            database_path: None,
            position_options: PositionOptions::default(),
            services: HashMap::new(),
        }
    }
}

fn deserialize_level_filter<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let buf = String::deserialize(deserializer)?;
    LevelFilter::from_str(&buf)
        .map_err(|_| serde::de::Error::custom(format!("invalid level value: {}", buf)))
}

fn serialize_level_filter<S>(level: &LevelFilter, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&level.to_string())
}

fn default_level_filter() -> LevelFilter {
    LevelFilter::Info
}
