//! Turn computed multi-modal transit itineraries into annotated map overlay
//! plans: polylines to draw, labels to place and a region to frame, ready
//! for a tile-based renderer.
pub mod cli;
pub mod config;
mod error;
pub mod gps;
pub mod itinerary;
pub mod overlay;
pub mod services;

pub use error::Error;
pub use gps::{distance_meters, Bounds, Location};
pub use itinerary::{Itinerary, Mode, Segment, StopCall, TransitLeg, WalkLeg};
pub use overlay::{apply_zoom, build_plan, VisualizationPlan};
