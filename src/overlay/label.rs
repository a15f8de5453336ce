//! Builds the marker labels layered on top of the route polylines
//!
//! Label content is an HTML fragment handed to the renderer verbatim, with
//! line names wrapped in `transport-badge` spans carrying the line colour.
use serde::Serialize;

use crate::gps::{distance_meters, Location};
use crate::itinerary::{Segment, TransitLeg};
use crate::overlay::transfer::TransferPoint;
use crate::overlay::visibility::LabelClass;
use crate::overlay::{display_minutes, transit_color};

/// Alight labels appear even without a following ride once the next
/// segment starts further away than this
pub const ALIGHT_DISTANCE_METERS: f64 = 5.0;

const WALK_ICON_SVG: &str = r#"<svg width="12" height="12" viewBox="0 0 24 24" fill="white"><path d="M13.5 5.5c1.1 0 2-.9 2-2s-.9-2-2-2-2 .9-2 2 .9 2 2 2zM9.8 8.9L7 23h2.1l1.8-8 2.1 2v6h2v-7.5l-2.1-2 .6-3C14.8 12 16.8 13 19 13v-2c-1.9 0-3.5-1-4.3-2.4l-1-1.6c-.4-.6-1-1-1.7-1-.3 0-.5.1-.8.1L6 8.3V13h2V9.6l1.8-.7"/></svg>"#;

/// A positioned label on the overlay
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSpec {
    pub anchor: Location,
    /// HTML fragment shown by the renderer
    pub content: String,
    pub visibility_class: LabelClass,
    pub is_close_transfer: bool,
    pub visible: bool,
}

impl LabelSpec {
    fn new(
        anchor: Location,
        content: String,
        visibility_class: LabelClass,
        is_close_transfer: bool,
    ) -> Self {
        LabelSpec {
            anchor,
            content,
            visibility_class,
            is_close_transfer,
            // all labels start hidden until a zoom level is applied
            visible: false,
        }
    }
}

/// Generate every label for the itinerary: start/end markers, per-stop
/// board and alight labels, walking-duration labels and the combined
/// transfer labels.
pub fn build_labels(segments: &[Segment], transfers: &[TransferPoint]) -> Vec<LabelSpec> {
    let mut labels = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        if segment.coordinates().is_empty() {
            continue;
        }
        let is_first = index == 0;
        let is_last = index + 1 == segments.len();

        if is_first {
            if let Some(anchor) = segment.first_coordinate() {
                labels.push(LabelSpec::new(
                    anchor,
                    "Start".to_string(),
                    LabelClass::Pinned,
                    false,
                ));
            }
        }

        if is_last {
            if let Some(anchor) = segment.last_coordinate() {
                labels.push(LabelSpec::new(
                    anchor,
                    "End".to_string(),
                    LabelClass::Pinned,
                    false,
                ));
            }
        }

        if !is_last {
            if let Segment::Transit(leg) = segment {
                push_alight_label(&mut labels, segments, index, leg, transfers);
            }
        }

        if let Segment::Walk(leg) = segment {
            if leg.coordinates.len() >= 2 {
                let anchor = leg.coordinates[leg.coordinates.len() / 2];
                let minutes = display_minutes(leg.duration_seconds);
                labels.push(LabelSpec::new(
                    anchor,
                    walk_content(minutes),
                    LabelClass::Walk,
                    false,
                ));
            }
        }

        if !is_first {
            if let Segment::Transit(leg) = segment {
                if let Some(anchor) = segment.first_coordinate() {
                    let close = transfers
                        .iter()
                        .find(|tp| tp.to_index == index)
                        .map(|tp| tp.is_close_transfer)
                        .unwrap_or(false);
                    labels.push(LabelSpec::new(
                        anchor,
                        board_content(leg),
                        LabelClass::Detail,
                        close,
                    ));
                }
            }
        }
    }

    for tp in transfers {
        if let (Some(from_leg), Some(to_leg)) = (
            segments[tp.from_index].as_transit(),
            segments[tp.to_index].as_transit(),
        ) {
            labels.push(LabelSpec::new(
                tp.anchor,
                transfer_content(tp, from_leg, to_leg),
                LabelClass::Transfer,
                tp.is_close_transfer,
            ));
        }
    }

    labels
}

/// An alight label is shown when another ride follows somewhere later on,
/// or when the next segment starts noticeably away from where this one ends.
fn push_alight_label(
    labels: &mut Vec<LabelSpec>,
    segments: &[Segment],
    index: usize,
    leg: &TransitLeg,
    transfers: &[TransferPoint],
) {
    let mut show = segments[index + 1..]
        .iter()
        .any(|s| s.is_transit() && !s.coordinates().is_empty());

    let anchor = match segments[index].last_coordinate() {
        Some(anchor) => anchor,
        None => return,
    };
    if let Some(next_start) = segments[index + 1].first_coordinate() {
        if distance_meters(anchor, next_start) > ALIGHT_DISTANCE_METERS {
            show = true;
        }
    }

    if show {
        let close = transfers
            .iter()
            .find(|tp| tp.from_index == index)
            .map(|tp| tp.is_close_transfer)
            .unwrap_or(false);
        labels.push(LabelSpec::new(
            anchor,
            alight_content(leg),
            LabelClass::Detail,
            close,
        ));
    }
}

fn badge(leg: &TransitLeg) -> String {
    format!(
        "<span class=\"transport-badge\" style=\"background-color: {};\">{}</span>",
        transit_color(leg),
        leg.line_label()
    )
}

fn alight_content(leg: &TransitLeg) -> String {
    if leg.is_tube() || leg.is_rail() {
        format!("Get off {} at {}", badge(leg), leg.to)
    } else {
        format!("Get off bus {} at {}", badge(leg), leg.to)
    }
}

fn board_content(leg: &TransitLeg) -> String {
    if leg.is_tube() || leg.is_rail() {
        format!("Board {} at {}", badge(leg), leg.from)
    } else {
        format!("Board bus {} at {}", badge(leg), leg.from)
    }
}

fn walk_content(minutes: i64) -> String {
    format!(
        "{}Walk {} min{}",
        WALK_ICON_SVG,
        minutes,
        if minutes == 1 { "" } else { "s" }
    )
}

fn transfer_content(tp: &TransferPoint, from: &TransitLeg, to: &TransitLeg) -> String {
    let line = format!("Transfer from {} to {}", badge(from), badge(to));
    if tp.is_close_transfer {
        // the station name of the boarding stop sits above the line
        format!(
            "<div class=\"transfer-close\"><div class=\"transfer-station\">{}</div><div class=\"transfer-line\">{}</div></div>",
            to.from, line
        )
    } else if tp.walk_minutes() > 0 {
        format!("{} ({} min walk)", line, tp.walk_minutes())
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::transfer::detect_transfers;

    fn segment(json: serde_json::Value) -> Segment {
        serde_json::from_value(json).unwrap()
    }

    fn labels_for(segments: &[Segment]) -> Vec<LabelSpec> {
        let transfers = detect_transfers(segments);
        build_labels(segments, &transfers)
    }

    #[test]
    fn walk_only_itinerary_gets_start_end_and_walk_labels() {
        let segments = vec![segment(serde_json::json!({
            "type": "walk", "duration": 240.0, "from": "Home", "to": "Cafe",
            "coordinates": [[51.50, -0.10], [51.501, -0.101], [51.502, -0.102]],
        }))];
        let labels = labels_for(&segments);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].content, "Start");
        assert_eq!(labels[1].content, "End");
        assert_eq!(labels[0].visibility_class, LabelClass::Pinned);
        // midpoint of a 3-point walk is the second coordinate
        assert_eq!(labels[2].anchor, Location::new(51.501, -0.101));
        assert!(labels[2].content.contains("Walk 4 mins"));
        assert!(labels[2].content.starts_with("<svg"));
    }

    #[test]
    fn walk_of_under_a_minute_still_says_one_min() {
        let segments = vec![segment(serde_json::json!({
            "type": "walk", "duration": 20.0,
            "coordinates": [[51.50, -0.10], [51.501, -0.101]],
        }))];
        let labels = labels_for(&segments);
        assert!(labels[2].content.contains("Walk 1 min"));
        assert!(!labels[2].content.contains("mins"));
    }

    #[test]
    fn adjacent_buses_get_alight_board_and_close_transfer_labels() {
        // second bus starts about 3 m from where the first one ends
        let segments = vec![
            segment(serde_json::json!({
                "type": "trip", "mode": "bus", "route": "73", "to": "Angel",
                "line_color": "#ce1126",
                "coordinates": [[51.50, -0.10], [51.532, -0.106]],
            })),
            segment(serde_json::json!({
                "type": "trip", "mode": "bus", "route": "38", "from": "Angel",
                "coordinates": [[51.532, -0.10600432], [51.54, -0.11]],
            })),
        ];
        let labels = labels_for(&segments);
        let contents: Vec<&str> = labels.iter().map(|l| l.content.as_str()).collect();

        let alight = labels
            .iter()
            .find(|l| l.content.contains("Get off bus"))
            .unwrap();
        assert!(alight.content.contains(">73</span> at Angel"));
        assert!(alight.is_close_transfer);
        assert_eq!(alight.visibility_class, LabelClass::Detail);

        let board = labels
            .iter()
            .find(|l| l.content.contains("Board bus"))
            .unwrap();
        assert!(board.content.contains(">38</span> at Angel"));
        assert!(board.is_close_transfer);

        let transfer = labels
            .iter()
            .find(|l| l.visibility_class == LabelClass::Transfer)
            .unwrap();
        assert!(transfer.content.contains("transfer-close"));
        assert!(transfer.content.contains("transfer-station\">Angel"));
        assert!(transfer.is_close_transfer);

        assert!(contents.iter().any(|c| *c == "Start"));
        assert!(contents.iter().any(|c| *c == "End"));
    }

    #[test]
    fn distant_transfer_mentions_the_walk_time() {
        let segments = vec![
            segment(serde_json::json!({
                "type": "trip", "mode": "tube", "tube_line": "Victoria", "to": "Euston",
                "line_color": "#0098d4",
                "coordinates": [[51.50, -0.10], [51.528, -0.133]],
            })),
            segment(serde_json::json!({
                "type": "walk", "duration": 130.0,
                "coordinates": [[51.528, -0.133], [51.529, -0.135]],
            })),
            segment(serde_json::json!({
                "type": "trip", "mode": "rail", "rail_line": "Overground/Suffragette",
                "from": "Euston", "coordinates": [[51.529, -0.1353], [51.55, -0.14]],
            })),
        ];
        let labels = labels_for(&segments);
        let transfer = labels
            .iter()
            .find(|l| l.visibility_class == LabelClass::Transfer)
            .unwrap();
        assert!(transfer.content.contains(">Victoria</span>"));
        assert!(transfer.content.contains(">Overground/Suffragette</span>"));
        assert!(transfer.content.contains("(3 min walk)"));
        assert!(!transfer.is_close_transfer);
    }

    #[test]
    fn tube_without_a_line_name_is_badged_underground() {
        let segments = vec![
            segment(serde_json::json!({
                "type": "walk", "duration": 60.0,
                "coordinates": [[51.49, -0.09], [51.50, -0.10]],
            })),
            segment(serde_json::json!({
                "type": "trip", "mode": "tube", "from": "Bank",
                "coordinates": [[51.50, -0.10], [51.51, -0.11]],
            })),
        ];
        let labels = labels_for(&segments);
        let board = labels.iter().find(|l| l.content.contains("Board")).unwrap();
        assert!(board.content.contains(">Underground</span> at Bank"));
        // default colour fills the badge when the router sent none
        assert!(board.content.contains("background-color: #ef4444"));
    }

    #[test]
    fn last_ride_close_to_destination_gets_no_alight_label() {
        // single ride, next segment is a walk starting at the same stop
        let segments = vec![
            segment(serde_json::json!({
                "type": "trip", "mode": "bus", "route": "12", "to": "Stop B",
                "coordinates": [[51.50, -0.10], [51.51, -0.11]],
            })),
            segment(serde_json::json!({
                "type": "walk", "duration": 60.0,
                "coordinates": [[51.51, -0.11], [51.512, -0.112]],
            })),
        ];
        let labels = labels_for(&segments);
        assert!(!labels.iter().any(|l| l.content.contains("Get off")));
    }

    #[test]
    fn far_final_walk_forces_an_alight_label() {
        // the walk starts about 70 m from the bus stop
        let segments = vec![
            segment(serde_json::json!({
                "type": "trip", "mode": "bus", "route": "12", "to": "Stop B",
                "coordinates": [[51.50, -0.10], [51.51, -0.11]],
            })),
            segment(serde_json::json!({
                "type": "walk", "duration": 60.0,
                "coordinates": [[51.51, -0.111], [51.512, -0.112]],
            })),
        ];
        let labels = labels_for(&segments);
        assert!(labels.iter().any(|l| l.content.contains("Get off bus")));
    }

    #[test]
    fn segments_without_geometry_produce_no_labels() {
        let segments = vec![
            segment(serde_json::json!({"type": "trip", "mode": "bus", "route": "1"})),
            segment(serde_json::json!({
                "type": "trip", "mode": "bus", "route": "2", "from": "Stop",
                "coordinates": [[51.50, -0.10], [51.51, -0.11]],
            })),
        ];
        let labels = labels_for(&segments);
        // the geometry-less first leg contributes nothing, not even Start
        assert!(!labels.iter().any(|l| l.content == "Start"));
        assert!(labels.iter().any(|l| l.content == "End"));
    }
}
