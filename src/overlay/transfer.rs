//! Locates the points where the rider changes from one service to another
use crate::gps::{distance_meters, Location};
use crate::itinerary::Segment;

/// Stops closer together than this count as the same interchange
pub const CLOSE_TRANSFER_METERS: f64 = 10.0;

/// A change between two transit legs, possibly with walking in between
#[derive(Clone, Debug)]
pub struct TransferPoint {
    /// index of the leg the rider alights from
    pub from_index: usize,
    /// index of the leg the rider boards next
    pub to_index: usize,
    /// total walking time between the two legs in seconds
    pub walk_seconds: f64,
    /// distance between the alighting stop and the boarding stop
    pub distance_meters: f64,
    pub is_close_transfer: bool,
    /// midpoint between the two stops, where the combined label sits
    pub anchor: Location,
}

impl TransferPoint {
    /// Walking time in whole minutes, zero when the rider steps straight
    /// across to the next service
    pub fn walk_minutes(&self) -> i64 {
        if self.walk_seconds > 0.0 {
            ((self.walk_seconds / 60.0).ceil() as i64).max(1)
        } else {
            0
        }
    }
}

/// Pair every transit leg that has geometry with the next one the rider
/// boards, accumulating any walking done in between.
///
/// Transit legs without coordinates are scanned past without contributing
/// walk time; each leg pairs with at most one successor.
pub fn detect_transfers(segments: &[Segment]) -> Vec<TransferPoint> {
    let mut transfers = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_walk() || segment.coordinates().is_empty() {
            continue;
        }
        let mut walk_seconds = 0.0;
        for (j, candidate) in segments.iter().enumerate().skip(i + 1) {
            if candidate.is_walk() {
                walk_seconds += candidate.duration_seconds();
                continue;
            }
            if candidate.coordinates().is_empty() {
                continue;
            }
            if let (Some(from_end), Some(to_start)) =
                (segment.last_coordinate(), candidate.first_coordinate())
            {
                let distance = distance_meters(from_end, to_start);
                transfers.push(TransferPoint {
                    from_index: i,
                    to_index: j,
                    walk_seconds,
                    distance_meters: distance,
                    is_close_transfer: distance <= CLOSE_TRANSFER_METERS,
                    anchor: from_end.midpoint(&to_start),
                });
            }
            break;
        }
    }
    transfers
}
