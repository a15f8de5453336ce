//! Service module that exports interfaces to external applications, APIs, etc.
use crate::config::ServiceConfig;
use crate::Error;

pub mod routing;

// rexport some traits and utilty functions
pub use routing::{RestRoutingApi, RoutingService};

/// Create a routing handler from a service configuration entry
pub fn new_routing_handler(config: &ServiceConfig) -> Result<Box<dyn RoutingService>, Error> {
    match config.handler() {
        "rest_api" => Ok(Box::new(RestRoutingApi::from_config(config)?)),
        _ => Err(Error::UnknownServiceHandler(format!(
            "unknown routing handler: {}",
            config.handler()
        ))),
    }
}
