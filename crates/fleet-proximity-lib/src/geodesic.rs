//! Ellipsoidal distance between two coordinates.
//!
//! Uses Karney's geodesic algorithm on the WGS-84 ellipsoid via the `geo`
//! crate, accurate to a few nanometres for any pair of points.

use geo::{point, GeodesicDistance};
use tracing::debug;

use crate::model::Coordinate;

/// Distance in metres between `a` and `b`.
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let p1 = point!(x: a.longitude.value, y: a.latitude.value);
    let p2 = point!(x: b.longitude.value, y: b.latitude.value);
    let meters = p1.geodesic_distance(&p2);
    debug!(distance_m = meters, "computed geodesic distance");
    meters
}
