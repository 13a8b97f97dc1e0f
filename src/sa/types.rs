//! Collaborator traits consumed by the annealer.

use rand::Rng;

use crate::error::Result;

/// A tentative solution wrapping a task.
///
/// The annealer never inspects the task. It only asks for a random
/// starting candidate, asks each candidate for a neighbour, and hands tasks
/// to a [`Score`].
///
/// The track is threaded into both constructors so a candidate can stay a
/// plain owned value. Every random draw must come from the supplied `rng`;
/// runs are only reproducible per seed if candidates respect this.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use track_anneal::sa::Candidate;
///
/// #[derive(Clone, serde::Serialize)]
/// struct Offsets(Vec<i64>);
///
/// impl Candidate for Offsets {
///     type Track = i64;
///     type Task = Vec<i64>;
///
///     fn random<R: Rng>(n_points: usize, track: &i64, rng: &mut R) -> track_anneal::Result<Self> {
///         Ok(Offsets((0..n_points).map(|_| rng.random_range(0..*track)).collect()))
///     }
///
///     fn neighbour<R: Rng>(&self, track: &i64, rng: &mut R) -> track_anneal::Result<Self> {
///         let mut next = self.0.clone();
///         let i = rng.random_range(0..next.len());
///         next[i] = rng.random_range(0..*track);
///         Ok(Offsets(next))
///     }
///
///     fn task(&self) -> &Vec<i64> {
///         &self.0
///     }
///
///     fn into_task(self) -> Vec<i64> {
///         self.0
///     }
/// }
/// ```
pub trait Candidate: Clone + Sized {
    /// Data source the candidate places its points over.
    type Track: ?Sized;

    /// Payload evaluated by the score function.
    type Task;

    /// Generates a random candidate with `n_points` points over `track`.
    fn random<R: Rng>(n_points: usize, track: &Self::Track, rng: &mut R) -> Result<Self>;

    /// Generates a candidate one mutation step away from `self`.
    fn neighbour<R: Rng>(&self, track: &Self::Track, rng: &mut R) -> Result<Self>;

    /// Borrows the wrapped task.
    fn task(&self) -> &Self::Task;

    /// Consumes the candidate, returning its task.
    fn into_task(self) -> Self::Task;
}

/// Fitness of a task. Higher is better.
///
/// Must be deterministic for a fixed task. A `NaN` score aborts the run.
/// Implemented for every `Fn(&T) -> f64`.
pub trait Score<T: ?Sized> {
    fn score(&self, task: &T) -> f64;
}

impl<T: ?Sized, F> Score<T> for F
where
    F: Fn(&T) -> f64,
{
    fn score(&self, task: &T) -> f64 {
        self(task)
    }
}
