//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. A neighbour of the current position is generated
//! every iteration and the search moves to it with a probability that
//! depends on the score difference and the current temperature. The
//! temperature cools geometrically until it reaches a floor.
//!
//! The best candidate generated is retained independently of the move
//! decisions, so the result is the highest-scoring candidate the search
//! ever produced.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod run_log;
mod runner;
mod types;

pub use config::{AcceptanceRule, AnnealConfig};
pub use run_log::{RunLog, RunLogEntry};
pub use runner::{acceptance_probability, AnnealResult, Annealer};
pub use types::{Candidate, Score};
