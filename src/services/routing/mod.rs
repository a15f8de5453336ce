//! Plan journeys between stops by calling an external routing engine
use crate::itinerary::Itinerary;

mod rest_api;
pub use rest_api::RestRoutingApi;

/// trait that defines how an itinerary between two stops gets planned
pub trait RoutingService {
    /// Request a computed itinerary from an origin stop to a destination stop
    fn plan_journey(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Itinerary, Box<dyn std::error::Error>>;
}
