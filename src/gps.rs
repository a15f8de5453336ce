//! Module with GPS specific structures and geometry helpers
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, matches the value used by the routing frontend
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Stores a single geospatial point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Location {
    /// latitude coordinate in degrees
    latitude: f64,
    /// longitude coordinate in degrees
    longitude: f64,
}

impl Location {
    /// Create a location from coordinates provided in degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    /// Return latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Return longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Return the coordinate halfway between this location and another
    pub fn midpoint(&self, other: &Location) -> Location {
        Location {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }
}

// locations travel over the wire as [lat, lng] pairs
impl From<[f64; 2]> for Location {
    fn from(pair: [f64; 2]) -> Location {
        Location::new(pair[0], pair[1])
    }
}

impl From<Location> for [f64; 2] {
    fn from(loc: Location) -> [f64; 2] {
        [loc.latitude, loc.longitude]
    }
}

/// Great-circle distance between two locations in meters using the Haversine formula
pub fn distance_meters(a: Location, b: Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Minimal coordinate rectangle enclosing a set of locations
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    min_lat: f64,
    min_lng: f64,
    max_lat: f64,
    max_lng: f64,
}

impl Bounds {
    /// Create a degenerate rectangle containing a single location
    pub fn from_location(loc: Location) -> Self {
        Bounds {
            min_lat: loc.latitude(),
            min_lng: loc.longitude(),
            max_lat: loc.latitude(),
            max_lng: loc.longitude(),
        }
    }

    /// Grow the rectangle to contain the given location
    pub fn extend(&mut self, loc: Location) {
        if loc.latitude() < self.min_lat {
            self.min_lat = loc.latitude();
        }
        if loc.latitude() > self.max_lat {
            self.max_lat = loc.latitude();
        }
        if loc.longitude() < self.min_lng {
            self.min_lng = loc.longitude();
        }
        if loc.longitude() > self.max_lng {
            self.max_lng = loc.longitude();
        }
    }

    /// Grow the rectangle to contain another rectangle
    pub fn union(&mut self, other: &Bounds) {
        self.extend(Location::new(other.min_lat, other.min_lng));
        self.extend(Location::new(other.max_lat, other.max_lng));
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn min_lng(&self) -> f64 {
        self.min_lng
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn max_lng(&self) -> f64 {
        self.max_lng
    }
}
