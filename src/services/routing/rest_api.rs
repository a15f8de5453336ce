//! Fetch computed itineraries from the routing backend's REST API
use super::RoutingService;
use crate::config::ServiceConfig;
use crate::itinerary::Itinerary;
use crate::{set_string_param_from_config, Error};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct RouteRequest<'a> {
    origin: &'a str,
    destination: &'a str,
}

/// Defines the connection parameters for the routing backend
#[derive(Clone, Debug)]
pub struct RestRoutingApi {
    base_url: String,
}

impl RestRoutingApi {
    pub fn new(base_url: String) -> Self {
        RestRoutingApi { base_url }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, Error> {
        let mut base = Self::default();
        for key in config.parameters() {
            match key.as_ref() {
                "base_url" => set_string_param_from_config!(base, base_url, config),
                _ => warn!(
                    "unknown configuration parameter for RestRoutingApi: {}={:?}",
                    key,
                    config.get_parameter(key)
                ),
            }
        }
        Ok(base)
    }

    fn request_url(&self) -> String {
        format!("{}/api/route", self.base_url)
    }
}

impl Default for RestRoutingApi {
    fn default() -> Self {
        RestRoutingApi {
            base_url: "http://localhost:4225".to_string(),
        }
    }
}

impl RoutingService for RestRoutingApi {
    fn plan_journey(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Itinerary, Box<dyn std::error::Error>> {
        let request_url = self.request_url();
        debug!("requesting itinerary from {}", request_url);

        let client = Client::new();
        let resp = client
            .post(&request_url)
            .json(&RouteRequest {
                origin,
                destination,
            })
            .send()?;
        if resp.status().is_success() {
            let itinerary: Itinerary = resp.json()?;
            debug!(
                "routing backend returned {} segments",
                itinerary.segments.len()
            );
            Ok(itinerary)
        } else {
            // parse error response to get reason why the request failed
            let code = resp.status();
            let json: ErrorResponse = resp.json()?;
            Err(Box::new(Error::RoutingRequestError(code, json.error)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_overrides_the_base_url() {
        let yaml = "
handler: rest_api
configuration:
  base_url: http://routing.internal:4225
";
        let service: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        let api = RestRoutingApi::from_config(&service).unwrap();
        assert_eq!(api.request_url(), "http://routing.internal:4225/api/route");
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let yaml = "
handler: rest_api
configuration:
  shoe_size: 42
";
        let service: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        let api = RestRoutingApi::from_config(&service).unwrap();
        assert_eq!(api.request_url(), "http://localhost:4225/api/route");
    }
}
