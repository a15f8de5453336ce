//! Store application configuration that gets read from disk
use crate::services::{new_routing_handler, RoutingService};
use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::io::prelude::*;
use std::iter::Iterator;
use std::path::PathBuf;
use std::str::FromStr;

/// Defines the allowed keys under the services map
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Routing,
}

/// Type alias for clarity
pub type ServiceParameters = HashMap<String, Value>;

/// Configuration options for a single service of any type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    handler: String,
    configuration: ServiceParameters,
}

impl ServiceConfig {
    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn parameters(&self) -> impl Iterator<Item = &String> + '_ {
        self.configuration.keys()
    }

    pub fn get_parameter(&self, key: &str) -> Option<&Value> {
        self.configuration.get(key)
    }

    pub fn get_parameter_as_string(&self, key: &str) -> Option<Result<String, Error>> {
        if let Some(value) = self.configuration.get(key) {
            let value = value
                .as_str()
                .ok_or_else(|| Error::InvalidConfigurationValue(format!(
                    "invalid value for {}.{}, expected a string: {:?}",
                    &self.handler, key, value
                )))
                .map(|v| v.to_string());
            Some(value)
        } else {
            None
        }
    }

    pub fn get_parameter_as_i64(&self, key: &str) -> Option<Result<i64, Error>> {
        if let Some(value) = self.configuration.get(key) {
            let value = value
                .as_i64()
                .ok_or_else(|| Error::InvalidConfigurationValue(format!(
                    "invalid value for {}.{}, expected an integer: {:?}",
                    &self.handler, key, value
                )));
            Some(value)
        } else {
            None
        }
    }

    pub fn get_parameter_as_f64(&self, key: &str) -> Option<Result<f64, Error>> {
        if let Some(value) = self.configuration.get(key) {
            let value = value
                .as_f64()
                .ok_or_else(|| Error::InvalidConfigurationValue(format!(
                    "invalid value for {}.{}, expected a floating point value: {:?}",
                    &self.handler, key, value
                )));
            Some(value)
        } else {
            None
        }
    }
}

// TODO: we could probably do this as a derive macro and save the manual effort.

/// Set a string parameter on the service instance from a ServiceConfig instance
#[macro_export]
macro_rules! set_string_param_from_config {
    ($b:expr, $k:ident, $c:expr) => {
        if let Some(val) = $c.get_parameter_as_string(stringify!($k)) {
            $b.$k = val?
        }
    };
}

#[macro_export]
macro_rules! set_int_param_from_config {
    ($b:expr, $k:ident, $c:expr, $o:ident) => {
        if let Some(val) = $c.get_parameter_as_i64(stringify!($k)) {
            $b.$k = val? as $o
        }
    };
}

#[macro_export]
macro_rules! set_float_param_from_config {
    ($b:expr, $k:ident, $c:expr, $o:ident) => {
        if let Some(val) = $c.get_parameter_as_f64(stringify!($k)) {
            $b.$k = val? as $o
        }
    };
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
    /// zoom level plans are evaluated at when no override is given
    #[serde(default = "default_zoom")]
    default_zoom: f64,
    #[serde(default)]
    services: HashMap<ServiceType, ServiceConfig>,
}

impl Config {
    pub fn load<T: Read>(source: &mut T) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(source)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn default_zoom(&self) -> f64 {
        self.default_zoom
    }

    pub fn get_routing_handler(&self) -> Result<Box<dyn RoutingService>, Error> {
        match self.services.get(&ServiceType::Routing) {
            Some(cfg) => new_routing_handler(cfg),
            None => {
                // a locally hosted routing backend is assumed when unconfigured
                new_routing_handler(&ServiceConfig {
                    handler: "rest_api".to_string(),
                    configuration: HashMap::new(),
                })
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_level_filter(),
            default_zoom: default_zoom(),
            services: HashMap::new(),
        }
    }
}

/// Location of the configuration file inside the user's config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or(PathBuf::new())
        .join("transit-map-overlay")
        .join("config.yml")
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

fn default_zoom() -> f64 {
    crate::overlay::INITIAL_ZOOM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let yaml = "
log_level: debug
default_zoom: 13.5
services:
  routing:
    handler: rest_api
    configuration:
      base_url: http://routing.internal:4225
";
        let config = Config::load(&mut yaml.as_bytes()).unwrap();
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.default_zoom(), 13.5);
        assert!(config.get_routing_handler().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = Config::load(&mut "{}".as_bytes()).unwrap();
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.default_zoom(), crate::overlay::INITIAL_ZOOM);
        // the implicit rest_api handler stands in for a missing services table
        assert!(config.get_routing_handler().is_ok());
    }

    #[test]
    fn unknown_routing_handler_is_an_error() {
        let yaml = "
log_level: info
services:
  routing:
    handler: carrier_pigeon
    configuration: {}
";
        let config = Config::load(&mut yaml.as_bytes()).unwrap();
        match config.get_routing_handler() {
            Err(Error::UnknownServiceHandler(msg)) => assert!(msg.contains("carrier_pigeon")),
            other => panic!("expected an unknown handler error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn mistyped_parameters_are_rejected() {
        let yaml = "
handler: rest_api
configuration:
  base_url: 42
";
        let service: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            service.get_parameter_as_string("base_url"),
            Some(Err(Error::InvalidConfigurationValue(_)))
        ));
    }
}
