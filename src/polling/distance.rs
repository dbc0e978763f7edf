use geo::{HaversineDistance, Point};

/// Great-circle distance between two points in metres.
///
/// Uses the haversine formula on a sphere with the mean earth radius
/// (6,371,008.8 m). Points are `(longitude, latitude)`.
pub fn distance_m(a: &Point<f64>, b: &Point<f64>) -> f64 {
    a.haversine_distance(b)
}
