//! Simulated annealing over a track of spatial points.
//!
//! The crate provides a single optimizer:
//!
//! - **Simulated Annealing (SA)**: single-solution trajectory search with
//!   geometric cooling, a best-so-far retention policy and a per-iteration
//!   run log.
//!
//! The optimizer knows nothing about tracks or scoring rules. It consumes
//! three collaborators through traits:
//!
//! - a `Track`, the opaque data source a candidate places points over,
//! - a [`Candidate`](sa::Candidate), which can be generated at random and
//!   mutated into a neighbour,
//! - a [`Score`](sa::Score), mapping a candidate's task to a fitness where
//!   higher is better.
//!
//! The [`track`] module ships simple reference collaborators (points,
//! ordered index candidates and a great-circle distance score).
//!
//! # Example
//!
//! ```
//! use track_anneal::sa::{AnnealConfig, Annealer};
//! use track_anneal::track::{Distance, Point, PointCandidate, Track};
//!
//! let track = Track::new(vec![
//!     Point::new(46.0, 7.0),
//!     Point::new(46.1, 7.2),
//!     Point::new(46.3, 7.1),
//!     Point::new(46.2, 6.9),
//! ]);
//! let config = AnnealConfig::default()
//!     .with_start_temperature(10.0)
//!     .with_min_temperature(1.0)
//!     .with_alpha(0.1)
//!     .with_seed(7)
//!     .with_run_log_dump(false);
//!
//! let mut annealer = Annealer::new(config);
//! let task = annealer
//!     .optimize::<PointCandidate, _>(&track, 3, &Distance)
//!     .unwrap();
//! assert_eq!(task.turnpoints.len(), 3);
//! ```

pub mod error;
pub mod sa;
pub mod track;

pub use error::{AnnealError, Result};
