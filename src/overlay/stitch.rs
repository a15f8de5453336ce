//! Joins walking legs onto their neighbours so the drawn route has no gaps
use crate::gps::Location;
use crate::itinerary::Segment;

/// Coordinates to draw for the segment at `index`, or `None` when the
/// segment has too few points to form a line.
///
/// Walking legs are extended with the previous segment's last point and the
/// next segment's first point, so the walk visually connects the stops it
/// runs between. The segment's own coordinate list is never modified and
/// the result does not feed back into later calls.
pub fn stitched_coordinates(segments: &[Segment], index: usize) -> Option<Vec<Location>> {
    let segment = &segments[index];
    if segment.coordinates().len() < 2 {
        return None;
    }
    let mut coords = segment.coordinates().to_vec();
    if segment.is_walk() {
        if index > 0 {
            if let Some(prev_end) = segments[index - 1].last_coordinate() {
                coords.insert(0, prev_end);
            }
        }
        if index + 1 < segments.len() {
            if let Some(next_start) = segments[index + 1].first_coordinate() {
                coords.push(next_start);
            }
        }
    }
    Some(coords)
}
