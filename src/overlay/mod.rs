//! Turns a parsed itinerary into a renderer-ready overlay plan
//!
//! The plan is the crate's output contract: polylines to draw, labels to
//! place and a bounding region to frame, serialized as camelCase JSON.
pub mod label;
pub mod stitch;
pub mod summary;
pub mod transfer;
pub mod visibility;

use serde::Serialize;

use crate::gps::{Bounds, Location};
use crate::itinerary::{Itinerary, Segment, TransitLeg};

pub use label::{LabelSpec, ALIGHT_DISTANCE_METERS};
pub use summary::{JourneySummary, LegSummary, StopSummary};
pub use transfer::{detect_transfers, TransferPoint, CLOSE_TRANSFER_METERS};
pub use visibility::{LabelClass, DETAIL_ZOOM};

/// Line colour for walking legs
pub const WALK_COLOR: &str = "#3b82f6";
/// Line colour for transit legs that do not declare one
pub const TRANSIT_COLOR_FALLBACK: &str = "#ef4444";
/// Zoom the plan is first evaluated at, matching the map's initial view
pub const INITIAL_ZOOM: f64 = 11.0;

pub(crate) fn transit_color(leg: &TransitLeg) -> &str {
    leg.line_color.as_deref().unwrap_or(TRANSIT_COLOR_FALLBACK)
}

/// Displayed duration in whole minutes, rounded up and never zero
pub(crate) fn display_minutes(seconds: f64) -> i64 {
    ((seconds / 60.0).ceil() as i64).max(1)
}

/// One route line to draw on the map
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineSpec {
    pub coordinates: Vec<Location>,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub line_cap: String,
    pub line_join: String,
    pub smooth_factor: f64,
}

impl PolylineSpec {
    fn new(coordinates: Vec<Location>, color: String) -> Self {
        PolylineSpec {
            coordinates,
            color,
            weight: 7,
            opacity: 1.0,
            line_cap: "round".to_string(),
            line_join: "round".to_string(),
            smooth_factor: 3.0,
        }
    }
}

/// Everything the rendering collaborator needs to draw one itinerary
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationPlan {
    pub polylines: Vec<PolylineSpec>,
    pub labels: Vec<LabelSpec>,
    /// frame to fit the view to, absent when nothing was drawn
    pub bounding_region: Option<Bounds>,
    pub summary: JourneySummary,
}

/// Assemble the full overlay plan for an itinerary.
///
/// Label visibility is evaluated at [`INITIAL_ZOOM`]; callers re-evaluate
/// with [`apply_zoom`] once the real zoom level is known.
pub fn build_plan(itinerary: &Itinerary) -> VisualizationPlan {
    let segments = &itinerary.segments;

    let mut polylines = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        if let Some(coordinates) = stitch::stitched_coordinates(segments, index) {
            let color = match segment {
                Segment::Walk(_) => WALK_COLOR.to_string(),
                Segment::Transit(leg) => transit_color(leg).to_string(),
            };
            polylines.push(PolylineSpec::new(coordinates, color));
        }
    }

    // an itinerary with nothing to draw gets no labels either
    let labels = if polylines.is_empty() {
        Vec::new()
    } else {
        let transfers = transfer::detect_transfers(segments);
        label::build_labels(segments, &transfers)
    };

    let mut plan = VisualizationPlan {
        bounding_region: bounding_region(&polylines),
        polylines,
        labels,
        summary: summary::summarize(itinerary),
    };
    apply_zoom(&mut plan, INITIAL_ZOOM);
    plan
}

/// Re-evaluate every label's visibility for a new zoom level
pub fn apply_zoom(plan: &mut VisualizationPlan, zoom: f64) {
    for label in &mut plan.labels {
        label.visible = label
            .visibility_class
            .is_visible(zoom, label.is_close_transfer);
    }
}

fn bounding_region(polylines: &[PolylineSpec]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for polyline in polylines {
        for &location in &polyline.coordinates {
            match bounds.as_mut() {
                Some(bounds) => bounds.extend(location),
                None => bounds = Some(Bounds::from_location(location)),
            }
        }
    }
    bounds
}
