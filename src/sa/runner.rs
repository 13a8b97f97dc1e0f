//! Annealing execution loop.
//!
//! # Algorithm
//!
//! 1. Generate a random candidate; it is both the current position and
//!    the best seen so far
//! 2. While `T > T_min`:
//!    a. Generate a neighbour of the current position
//!    b. Move to it if the acceptance probability exceeds a uniform draw
//!    c. Record it as best if it scores strictly higher than the best
//!    d. Cool: `T = T * (1 - alpha)`
//!    e. Append a snapshot to the run log
//! 3. Return the best candidate
//!
//! # Reference
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::config::{AcceptanceRule, AnnealConfig};
use super::run_log::RunLog;
use super::types::{Candidate, Score};
use crate::error::{AnnealError, Result};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<C> {
    /// The best candidate generated during the run.
    pub best: C,

    /// Score of the best candidate.
    pub best_score: f64,

    /// Number of loop iterations.
    pub iterations: usize,

    /// Number of neighbours the search moved to.
    pub accepted_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Per-iteration snapshots.
    pub run_log: RunLog<C>,
}

impl<C: Candidate> AnnealResult<C> {
    /// Consumes the result, returning the best candidate's task.
    pub fn into_task(self) -> C::Task {
        self.best.into_task()
    }
}

/// Probability of moving from a position scoring `current_score` to a
/// neighbour scoring `candidate_score` at `temperature`.
///
/// See [`AcceptanceRule`] for the two formulas. The value is not clamped
/// to `[0, 1]`.
///
/// ```
/// use track_anneal::sa::{acceptance_probability, AcceptanceRule};
///
/// // Neighbour scores lower than the current position.
/// assert_eq!(acceptance_probability(AcceptanceRule::Linear, 5.0, 3.0, 100.0), 1.0);
/// // Equal scores.
/// assert_eq!(acceptance_probability(AcceptanceRule::Linear, 5.0, 5.0, 100.0), 0.0);
/// ```
pub fn acceptance_probability(
    rule: AcceptanceRule,
    current_score: f64,
    candidate_score: f64,
    temperature: f64,
) -> f64 {
    let diff = current_score - candidate_score;
    match rule {
        AcceptanceRule::Linear => {
            if diff > 0.0 {
                1.0
            } else {
                std::f64::consts::E * (diff / temperature)
            }
        }
        AcceptanceRule::Metropolis => {
            if diff <= 0.0 {
                1.0
            } else {
                (-diff / temperature).exp()
            }
        }
    }
}

/// Search state for a single run. Dropped when the run returns.
struct OptimizerState<'a, C: Candidate> {
    temperature: f64,
    min_temperature: f64,
    alpha: f64,
    track: &'a C::Track,
    n_points: usize,
    current: C,
    current_score: f64,
    best: C,
    best_score: f64,
}

impl<'a, C: Candidate> OptimizerState<'a, C> {
    fn initialize<S, R>(
        config: &AnnealConfig,
        track: &'a C::Track,
        n_points: usize,
        score: &S,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: Score<C::Task> + ?Sized,
        R: Rng,
    {
        let current = C::random(n_points, track, rng)?;
        let current_score = checked_score(score, current.task(), "initial candidate")?;
        Ok(Self {
            temperature: config.start_temperature,
            min_temperature: config.min_temperature,
            alpha: config.alpha,
            track,
            n_points,
            best: current.clone(),
            best_score: current_score,
            current,
            current_score,
        })
    }

    fn is_hot(&self) -> bool {
        self.temperature > self.min_temperature
    }

    fn cool(&mut self) {
        self.temperature *= 1.0 - self.alpha;
    }
}

fn checked_score<T, S>(score: &S, task: &T, what: &str) -> Result<f64>
where
    T: ?Sized,
    S: Score<T> + ?Sized,
{
    let value = score.score(task);
    if value.is_nan() {
        return Err(AnnealError::DegenerateCandidate(format!("{what} scored NaN")));
    }
    Ok(value)
}

/// Upper bound on run-log entries reserved up front.
const RUN_LOG_RESERVE: usize = 1 << 16;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| seed_from_nanos(d.as_nanos()))
        .unwrap_or_else(|_| rand::random())
}

/// Keeps the low 64 bits of a nanosecond timestamp.
fn seed_from_nanos(nanos: u128) -> u64 {
    (nanos & u128::from(u64::MAX)) as u64
}

/// Simulated annealing optimizer.
///
/// Owns the configuration and one random generator. The generator is
/// seeded once at construction and feeds every draw of every run: initial
/// candidates, neighbours and acceptance decisions. Two annealers built
/// with the same config and seed produce identical runs.
///
/// Each run starts from fresh search state; only the random stream carries
/// over between runs on the same annealer.
///
/// # Examples
///
/// ```
/// use track_anneal::sa::Annealer;
/// use track_anneal::track::{Distance, Point, PointCandidate, Track};
///
/// let track = Track::new(vec![Point::new(45.0, 6.0), Point::new(45.5, 6.5)]);
/// let mut annealer = Annealer::with_params(100.0, 1.0, 0.05, 42);
/// let result = annealer
///     .run::<PointCandidate, _>(&track, 2, &Distance)
///     .unwrap();
/// assert_eq!(result.run_log.len(), result.iterations + 1);
/// ```
#[derive(Debug, Clone)]
pub struct Annealer {
    config: AnnealConfig,
    rng: StdRng,
}

impl Default for Annealer {
    /// Default temperatures, seeded from the clock.
    fn default() -> Self {
        Self::new(AnnealConfig::default())
    }
}

impl Annealer {
    /// Creates an annealer. A config without a seed is seeded from the
    /// current time in nanoseconds.
    pub fn new(config: AnnealConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates an annealer from the four classic annealing parameters.
    pub fn with_params(start_temperature: f64, min_temperature: f64, alpha: f64, seed: u64) -> Self {
        Self::new(AnnealConfig::new(start_temperature, min_temperature, alpha, seed))
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Runs the search and returns the best task found.
    pub fn optimize<C, S>(&mut self, track: &C::Track, n_points: usize, score: &S) -> Result<C::Task>
    where
        C: Candidate + Serialize,
        S: Score<C::Task> + ?Sized,
    {
        self.run::<C, S>(track, n_points, score)
            .map(AnnealResult::into_task)
    }

    /// Runs the search and returns the best candidate with run statistics
    /// and the run log.
    ///
    /// # Errors
    ///
    /// - [`AnnealError::InvalidParameters`] if the config fails validation.
    /// - [`AnnealError::DegenerateCandidate`] if a candidate cannot be
    ///   generated or a task scores `NaN`. The run stops at the first
    ///   failure.
    pub fn run<C, S>(
        &mut self,
        track: &C::Track,
        n_points: usize,
        score: &S,
    ) -> Result<AnnealResult<C>>
    where
        C: Candidate + Serialize,
        S: Score<C::Task> + ?Sized,
    {
        self.config.validate()?;
        let rule = self.config.acceptance;

        debug!(
            "annealing {} points: T0={}, Tmin={}, alpha={}, rule={:?}",
            n_points,
            self.config.start_temperature,
            self.config.min_temperature,
            self.config.alpha,
            rule
        );

        let mut state = OptimizerState::<C>::initialize(
            &self.config,
            track,
            n_points,
            score,
            &mut self.rng,
        )?;
        let mut run_log =
            RunLog::with_capacity(self.config.iteration_count().min(RUN_LOG_RESERVE));
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;

        while state.is_hot() {
            let candidate = state.current.neighbour(state.track, &mut self.rng)?;
            let candidate_score = checked_score(score, candidate.task(), "neighbour")?;

            let probability = acceptance_probability(
                rule,
                state.current_score,
                candidate_score,
                state.temperature,
            );
            let draw: f64 = self.rng.random();
            let accepted = probability > draw;

            if candidate_score > state.best_score {
                state.best = candidate.clone();
                state.best_score = candidate_score;
            }
            if accepted {
                state.current = candidate;
                state.current_score = candidate_score;
                accepted_moves += 1;
            }

            state.cool();
            iterations += 1;

            trace!(
                "iteration {}: T={:.6}, p={:.6}, accepted={}, current={}, best={}",
                iterations,
                state.temperature,
                probability,
                accepted,
                state.current_score,
                state.best_score
            );
            run_log.record(state.current.clone(), state.best.clone(), state.temperature);
        }

        info!(
            "annealing finished after {} iterations: best score {}, {} moves accepted, n_points={}",
            iterations, state.best_score, accepted_moves, state.n_points
        );

        if self.config.dump_run_log {
            let stdout = std::io::stdout();
            if let Err(err) = run_log.write_pretty(stdout.lock()) {
                warn!("failed to write run log: {err}");
            }
        }

        Ok(AnnealResult {
            best: state.best,
            best_score: state.best_score,
            iterations,
            accepted_moves,
            final_temperature: state.temperature,
            run_log,
        })
    }
}
