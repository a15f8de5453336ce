//! Typed model of a computed itinerary and its JSON wire format
//!
//! The routing collaborator returns loosely shaped segment records whose
//! fields come and go depending on the transport type. They are converted
//! into a tagged `Segment` model here so the rest of the crate never has to
//! do string checks on a `type` field.
use crate::gps::Location;
use serde::{Deserialize, Deserializer};

/// A computed journey as returned by the routing collaborator
#[derive(Clone, Debug, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// total journey time in minutes, as computed by the router
    #[serde(default)]
    pub journey_minutes: i64,
    /// arrival at the destination in epoch seconds
    #[serde(default)]
    pub arrival_time: i64,
}

/// Transport modes the routing backend declares on transit segments
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Bus,
    Tube,
    Rail,
    Tram,
    Dlr,
    Elizabeth,
}

impl Mode {
    /// Parse a free-form mode string case-insensitively, `None` if unrecognized
    pub fn parse(value: &str) -> Option<Mode> {
        match value.to_ascii_lowercase().as_str() {
            "bus" => Some(Mode::Bus),
            "tube" => Some(Mode::Tube),
            "rail" => Some(Mode::Rail),
            "tram" => Some(Mode::Tram),
            "dlr" => Some(Mode::Dlr),
            "elizabeth" => Some(Mode::Elizabeth),
            _ => None,
        }
    }
}

/// One leg of an itinerary, either on foot or riding a single service
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "RawSegment")]
pub enum Segment {
    Walk(WalkLeg),
    Transit(TransitLeg),
}

impl Segment {
    pub fn is_walk(&self) -> bool {
        matches!(self, Segment::Walk(_))
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, Segment::Transit(_))
    }

    pub fn as_transit(&self) -> Option<&TransitLeg> {
        match self {
            Segment::Transit(leg) => Some(leg),
            Segment::Walk(_) => None,
        }
    }

    /// Path geometry for this leg, possibly empty
    pub fn coordinates(&self) -> &[Location] {
        match self {
            Segment::Walk(leg) => &leg.coordinates,
            Segment::Transit(leg) => &leg.coordinates,
        }
    }

    pub fn first_coordinate(&self) -> Option<Location> {
        self.coordinates().first().copied()
    }

    pub fn last_coordinate(&self) -> Option<Location> {
        self.coordinates().last().copied()
    }

    pub fn duration_seconds(&self) -> f64 {
        match self {
            Segment::Walk(leg) => leg.duration_seconds,
            Segment::Transit(leg) => leg.duration_seconds,
        }
    }

    pub fn from_name(&self) -> &str {
        match self {
            Segment::Walk(leg) => &leg.from,
            Segment::Transit(leg) => &leg.from,
        }
    }

    pub fn to_name(&self) -> &str {
        match self {
            Segment::Walk(leg) => &leg.to,
            Segment::Transit(leg) => &leg.to,
        }
    }
}

/// A leg covered on foot
#[derive(Clone, Debug)]
pub struct WalkLeg {
    pub coordinates: Vec<Location>,
    pub duration_seconds: f64,
    pub start_time: i64,
    pub end_time: i64,
    pub from: String,
    pub to: String,
}

/// A leg riding one transit service
#[derive(Clone, Debug)]
pub struct TransitLeg {
    /// mode declared by the router, if it was recognized
    pub mode: Option<Mode>,
    /// short route identifier, e.g. a bus number
    pub route: Option<String>,
    /// display name of an underground line
    pub tube_line: Option<String>,
    /// display name of a rail line; may be an "operator/name" compound
    pub rail_line: Option<String>,
    pub line_color: Option<String>,
    pub coordinates: Vec<Location>,
    pub duration_seconds: f64,
    pub start_time: i64,
    pub end_time: i64,
    pub from: String,
    pub to: String,
    /// boarding platform, "?" when the router could not resolve one
    pub platform: Option<String>,
    pub stops: Vec<StopCall>,
}

impl TransitLeg {
    /// A segment counts as tube when declared so or when it carries a tube line name
    pub fn is_tube(&self) -> bool {
        self.mode == Some(Mode::Tube) || self.tube_line.is_some()
    }

    /// A segment counts as rail when declared so or when it carries a rail line name
    pub fn is_rail(&self) -> bool {
        self.mode == Some(Mode::Rail) || self.rail_line.is_some()
    }

    /// Display name used in labels: tube and rail lines by name, everything
    /// else by uppercased route number. Tube wins over rail wins over bus.
    pub fn line_label(&self) -> String {
        if self.is_tube() {
            self.tube_line
                .clone()
                .unwrap_or_else(|| "Underground".to_string())
        } else if self.is_rail() {
            self.rail_line
                .clone()
                .or_else(|| self.route.clone())
                .unwrap_or_default()
        } else {
            self.route
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_default()
        }
    }
}

/// An intermediate stop call on a transit leg
#[derive(Clone, Debug, Deserialize)]
pub struct StopCall {
    pub name: String,
    /// arrival at this stop in epoch seconds
    pub time: i64,
}

/// Wire shape of a segment before conversion into the tagged model
#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    route: Option<String>,
    #[serde(default)]
    tube_line: Option<String>,
    #[serde(default)]
    rail_line: Option<String>,
    #[serde(default)]
    line_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinates")]
    coordinates: Vec<Location>,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    start_time: i64,
    #[serde(default)]
    end_time: i64,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_stops")]
    stops: Vec<StopCall>,
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Segment {
        // anything the router does not mark as a walk is a transit trip
        if raw.kind == "walk" {
            Segment::Walk(WalkLeg {
                coordinates: raw.coordinates,
                duration_seconds: raw.duration,
                start_time: raw.start_time,
                end_time: raw.end_time,
                from: raw.from,
                to: raw.to,
            })
        } else {
            Segment::Transit(TransitLeg {
                mode: raw.mode.as_deref().and_then(Mode::parse),
                route: raw.route,
                tube_line: raw.tube_line,
                rail_line: raw.rail_line,
                line_color: raw.line_color,
                coordinates: raw.coordinates,
                duration_seconds: raw.duration,
                start_time: raw.start_time,
                end_time: raw.end_time,
                from: raw.from,
                to: raw.to,
                platform: raw.platform,
                stops: raw.stops,
            })
        }
    }
}

/// Missing, null or malformed coordinate lists all mean "no drawable
/// geometry for this segment" and must not fail the whole itinerary.
fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Vec<Location>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let entries = match value {
        Some(serde_json::Value::Array(entries)) => entries,
        _ => return Ok(Vec::new()),
    };
    let mut coordinates = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<[f64; 2]>(entry) {
            Ok(pair) => coordinates.push(Location::from(pair)),
            Err(_) => return Ok(Vec::new()),
        }
    }
    Ok(coordinates)
}

fn lenient_stops<'de, D>(deserializer: D) -> Result<Vec<StopCall>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(value) => Ok(serde_json::from_value(value).unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_and_trip_segments_deserialize_into_variants() {
        let json = r##"{
            "segments": [
                {"type": "walk", "from": "A", "to": "B", "duration": 120.5,
                 "start_time": 1000, "end_time": 1120,
                 "coordinates": [[51.5, -0.1], [51.51, -0.11]]},
                {"type": "trip", "mode": "bus", "route": "73",
                 "from": "B", "to": "C", "duration": 600,
                 "line_color": "#ce1126",
                 "coordinates": [[51.51, -0.11], [51.52, -0.12]]}
            ],
            "journey_minutes": 12,
            "arrival_time": 1754400000
        }"##;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.segments.len(), 2);
        assert!(itinerary.segments[0].is_walk());
        assert!(itinerary.segments[1].is_transit());
        assert_eq!(itinerary.journey_minutes, 12);

        let leg = itinerary.segments[1].as_transit().unwrap();
        assert_eq!(leg.mode, Some(Mode::Bus));
        assert_eq!(leg.route.as_deref(), Some("73"));
        assert_eq!(leg.coordinates.len(), 2);
    }

    #[test]
    fn unknown_type_tags_count_as_transit() {
        let json = r#"{"type": "hovercraft", "from": "A", "to": "B"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert!(segment.is_transit());
    }

    #[test]
    fn null_or_malformed_coordinates_become_empty() {
        let json = r#"{"type": "trip", "coordinates": null}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert!(segment.coordinates().is_empty());

        let json = r#"{"type": "trip", "coordinates": [[51.5], "oops"]}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert!(segment.coordinates().is_empty());
    }

    #[test]
    fn mode_parsing_is_case_insensitive_and_lenient() {
        assert_eq!(Mode::parse("TUBE"), Some(Mode::Tube));
        assert_eq!(Mode::parse("Elizabeth"), Some(Mode::Elizabeth));
        assert_eq!(Mode::parse("dlr"), Some(Mode::Dlr));
        assert_eq!(Mode::parse("teleporter"), None);
    }

    #[test]
    fn line_name_classifies_without_a_declared_mode() {
        let json = r#"{"type": "trip", "tube_line": "Bakerloo", "from": "A", "to": "B"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        let leg = segment.as_transit().unwrap();
        assert!(leg.is_tube());
        assert_eq!(leg.line_label(), "Bakerloo");
    }

    #[test]
    fn tube_precedence_over_rail_and_bus() {
        let json = r#"{"type": "trip", "mode": "tube", "rail_line": "Southeastern/Victoria",
                       "route": "x68", "from": "A", "to": "B"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        let leg = segment.as_transit().unwrap();
        // no tube line name present, falls back to the generic placeholder
        assert_eq!(leg.line_label(), "Underground");
    }

    #[test]
    fn bus_labels_uppercase_the_route() {
        let json = r#"{"type": "trip", "mode": "bus", "route": "n29", "from": "A", "to": "B"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.as_transit().unwrap().line_label(), "N29");
    }

    #[test]
    fn stops_and_platform_survive_deserialization() {
        let json = r#"{"type": "trip", "mode": "rail", "rail_line": "Thameslink/Luton",
                       "platform": "?", "from": "A", "to": "B",
                       "stops": [{"name": "St Albans", "time": 1754400000}]}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        let leg = segment.as_transit().unwrap();
        assert_eq!(leg.platform.as_deref(), Some("?"));
        assert_eq!(leg.stops.len(), 1);
        assert_eq!(leg.stops[0].name, "St Albans");
    }
}
