//! Great-circle distance scoring.

use super::point::{Point, Task};
use crate::sa::Score;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: &Point, b: &Point) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Scores a task by the total length of its legs, in kilometres.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distance;

impl Score<Task> for Distance {
    fn score(&self, task: &Task) -> f64 {
        task.turnpoints
            .windows(2)
            .map(|leg| haversine_km(&leg[0], &leg[1]))
            .sum()
    }
}
