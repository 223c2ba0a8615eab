//! Geographic coordinates and the distance heuristics used by A*.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use geo::{Distance, Haversine, Point};
use serde::Serialize;

use crate::error::{Error, Result};

/// An intersection coordinate: `x` is latitude, `y` is longitude (degrees).
///
/// Equality and hashing are by coordinate value, so two points built from the
/// same numbers always address the same graph vertex.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.x
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.y
    }

    /// A point is usable as a graph key only when both components are finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance(&self, other: &Self) -> f64 {
        Haversine.distance(self.to_point(), other.to_point()) / 1000.0
    }

    /// Planar distance on the raw coordinate components.
    pub fn euclidean_distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.y, self.x)
    }

    // -0.0 and 0.0 compare equal, so they must hash equally too.
    fn key_bits(&self) -> (u64, u64) {
        fn normalise(value: f64) -> u64 {
            if value == 0.0 {
                0.0f64.to_bits()
            } else {
                value.to_bits()
            }
        }
        (normalise(self.x), normalise(self.y))
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key_bits() == other.key_bits()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_bits().hash(state);
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for GeoPoint {
    type Err = Error;

    /// Parse `"<lat>,<lon>"`; surrounding whitespace is ignored.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate {
            input: input.to_string(),
        };
        let (lat, lon) = input.split_once(',').ok_or_else(invalid)?;
        let x: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let y: f64 = lon.trim().parse().map_err(|_| invalid())?;
        let point = GeoPoint::new(x, y);
        if !point.is_valid() {
            return Err(invalid());
        }
        Ok(point)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((x, y): (f64, f64)) -> Self {
        GeoPoint::new(x, y)
    }
}

/// Estimate of the remaining distance from a node to the goal.
///
/// A* only returns optimal routes when the estimate never exceeds the true
/// remaining road distance and satisfies `h(u) <= len(u, v) + h(v)`.
pub trait Heuristic {
    fn estimate(&self, from: &GeoPoint, goal: &GeoPoint) -> f64;
}

/// Great-circle distance in kilometres. Matches edge lengths produced by the
/// road map loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl Heuristic for GreatCircle {
    fn estimate(&self, from: &GeoPoint, goal: &GeoPoint) -> f64 {
        from.distance(goal)
    }
}

/// Straight-line distance on raw coordinates, for graphs whose edge lengths
/// are expressed in coordinate units.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn estimate(&self, from: &GeoPoint, goal: &GeoPoint) -> f64 {
        from.euclidean_distance(goal)
    }
}

impl<F> Heuristic for F
where
    F: Fn(&GeoPoint, &GeoPoint) -> f64,
{
    fn estimate(&self, from: &GeoPoint, goal: &GeoPoint) -> f64 {
        self(from, goal)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equal_coordinates_share_a_hash_slot() {
        let mut set = HashSet::new();
        set.insert(GeoPoint::new(0.0, 1.5));
        assert!(set.contains(&GeoPoint::new(-0.0, 1.5)));
        assert!(!set.contains(&GeoPoint::new(0.0, 1.25)));
    }

    #[test]
    fn great_circle_distance_is_symmetric() {
        let san_diego = GeoPoint::new(32.8648772, -117.2254046);
        let utc = GeoPoint::new(32.8660691, -117.217393);
        let there = san_diego.distance(&utc);
        let back = utc.distance(&san_diego);
        assert!((there - back).abs() < 1e-9);
        // Roughly 760 metres apart.
        assert!(there > 0.7 && there < 0.8, "unexpected distance {there}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = GeoPoint::new(0.0, 0.0).distance(&GeoPoint::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.1, "unexpected distance {d}");
    }

    #[test]
    fn parses_lat_lon_pairs() {
        let point: GeoPoint = " 32.5, -117.25 ".parse().expect("valid coordinate");
        assert_eq!(point, GeoPoint::new(32.5, -117.25));

        assert!("32.5".parse::<GeoPoint>().is_err());
        assert!("north,south".parse::<GeoPoint>().is_err());
        assert!("NaN,1".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn closures_act_as_heuristics() {
        let zero = |_: &GeoPoint, _: &GeoPoint| 0.0;
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert_eq!(zero.estimate(&a, &b), 0.0);
        assert_eq!(Euclidean.estimate(&a, &b), 5.0);
    }
}
