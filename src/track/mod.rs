//! Reference collaborators: a track of geographic points, candidates
//! selecting ordered points from it, and a distance score.
//!
//! A [`PointCandidate`] picks `n` turnpoints from a [`Track`] in flight
//! order. [`Distance`] scores the resulting [`Task`] by its great-circle
//! length, so annealing over these types searches for the longest
//! `n`-point route along the track.

mod candidate;
mod point;
mod score;

pub use candidate::PointCandidate;
pub use point::{Point, Task, Track};
pub use score::{haversine_km, Distance, EARTH_RADIUS_KM};
