//! Journey and per-leg summaries shown alongside the map
use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::itinerary::{Itinerary, Segment, TransitLeg, WalkLeg};
use crate::overlay::{display_minutes, transit_color};

/// Sidebar-style summary of the whole journey
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySummary {
    /// total journey time, e.g. "42 mins"
    pub total_display: String,
    /// arrival clock time, e.g. "17:05"
    pub arrival_display: String,
    pub legs: Vec<LegSummary>,
}

/// One itinerary leg condensed for display
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSummary {
    /// e.g. "Walk", "Take bus N29", "Take Bakerloo" or a rail line name
    pub headline: String,
    /// operating company, split off a compound rail line name
    pub operator: Option<String>,
    /// leg duration, e.g. "4 mins"
    pub duration_display: String,
    /// line colour for transit legs
    pub color: Option<String>,
    /// boarding platform when the router resolved one
    pub platform: Option<String>,
    pub stops: Vec<StopSummary>,
}

/// A stop call with an optional clock time
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSummary {
    pub name: String,
    pub time: Option<String>,
}

/// Condense the itinerary into its display summary
pub fn summarize(itinerary: &Itinerary) -> JourneySummary {
    let total = itinerary.journey_minutes.max(1);
    JourneySummary {
        total_display: format_minutes(total),
        arrival_display: format_clock(itinerary.arrival_time),
        legs: itinerary.segments.iter().map(summarize_leg).collect(),
    }
}

fn summarize_leg(segment: &Segment) -> LegSummary {
    match segment {
        Segment::Walk(leg) => summarize_walk(leg),
        Segment::Transit(leg) => summarize_transit(leg),
    }
}

fn summarize_walk(leg: &WalkLeg) -> LegSummary {
    LegSummary {
        headline: "Walk".to_string(),
        operator: None,
        duration_display: format_minutes(display_minutes(leg.duration_seconds)),
        color: None,
        platform: None,
        stops: vec![
            StopSummary {
                name: leg.from.clone(),
                time: Some(format_clock(leg.start_time)),
            },
            StopSummary {
                name: leg.to.clone(),
                time: Some(format_clock(leg.end_time)),
            },
        ],
    }
}

fn summarize_transit(leg: &TransitLeg) -> LegSummary {
    let (headline, operator) = transit_headline(leg);
    LegSummary {
        headline,
        operator,
        duration_display: format_minutes(display_minutes(leg.duration_seconds)),
        color: Some(transit_color(leg).to_string()),
        platform: leg
            .platform
            .clone()
            .filter(|platform| !platform.is_empty() && platform != "?"),
        stops: transit_stops(leg),
    }
}

/// Rail line names may arrive as an "operator/name" compound; the name is
/// the headline and the operator is kept alongside.
fn transit_headline(leg: &TransitLeg) -> (String, Option<String>) {
    if leg.is_tube() {
        let line = leg.tube_line.as_deref().unwrap_or("tube");
        (format!("Take {}", line), None)
    } else if leg.is_rail() {
        match leg.rail_line.as_deref() {
            Some(compound) => match compound.split_once('/') {
                Some((operator, name)) => (name.to_string(), Some(operator.to_string())),
                None => (compound.to_string(), None),
            },
            None => {
                let route = leg.route.clone().unwrap_or_default();
                (format!("Take {}", route), None)
            }
        }
    } else {
        let route = leg.route.as_deref().map(str::to_uppercase).unwrap_or_default();
        (format!("Take bus {}", route), None)
    }
}

fn transit_stops(leg: &TransitLeg) -> Vec<StopSummary> {
    if leg.stops.is_empty() {
        // no stop calls from the router, fall back to the endpoints
        vec![
            StopSummary {
                name: leg.from.clone(),
                time: None,
            },
            StopSummary {
                name: leg.to.clone(),
                time: None,
            },
        ]
    } else {
        leg.stops
            .iter()
            .map(|stop| StopSummary {
                name: stop.name.clone(),
                time: Some(format_clock(stop.time)),
            })
            .collect()
    }
}

fn format_minutes(minutes: i64) -> String {
    format!("{} min{}", minutes, if minutes == 1 { "" } else { "s" })
}

/// Epoch seconds to a local "HH:MM" clock reading
fn format_clock(epoch_seconds: i64) -> String {
    Local
        .timestamp_opt(epoch_seconds, 0)
        .single()
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}
