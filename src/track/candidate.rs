//! Candidates selecting ordered turnpoints from a track.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::point::{Task, Track};
use crate::error::{AnnealError, Result};
use crate::sa::Candidate;

/// `n` non-decreasing indices into a track and the task they select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCandidate {
    pub indices: Vec<usize>,
    pub task: Task,
}

impl PointCandidate {
    /// Builds a candidate from explicit indices.
    ///
    /// Indices are sorted so the task follows flight order.
    pub fn from_indices(mut indices: Vec<usize>, track: &Track) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= track.len()) {
            return Err(AnnealError::DegenerateCandidate(format!(
                "index {bad} out of range for track of {} points",
                track.len()
            )));
        }
        indices.sort_unstable();
        let turnpoints = indices.iter().map(|&i| track.points[i]).collect();
        Ok(Self {
            indices,
            task: Task { turnpoints },
        })
    }
}

impl Candidate for PointCandidate {
    type Track = Track;
    type Task = Task;

    fn random<R: Rng>(n_points: usize, track: &Track, rng: &mut R) -> Result<Self> {
        if n_points == 0 {
            return Err(AnnealError::DegenerateCandidate(
                "a candidate needs at least one point".into(),
            ));
        }
        if track.is_empty() {
            return Err(AnnealError::DegenerateCandidate("track has no points".into()));
        }
        let indices = (0..n_points)
            .map(|_| rng.random_range(0..track.len()))
            .collect();
        Self::from_indices(indices, track)
    }

    /// Moves one index to a random position between its neighbours, so
    /// the selection stays in flight order.
    fn neighbour<R: Rng>(&self, track: &Track, rng: &mut R) -> Result<Self> {
        if self.indices.is_empty() || track.is_empty() {
            return Err(AnnealError::DegenerateCandidate(
                "cannot mutate an empty selection".into(),
            ));
        }
        let i = rng.random_range(0..self.indices.len());
        let lo = if i == 0 { 0 } else { self.indices[i - 1] };
        let hi = self
            .indices
            .get(i + 1)
            .copied()
            .unwrap_or(track.len() - 1);
        if lo > hi || hi >= track.len() {
            return Err(AnnealError::DegenerateCandidate(format!(
                "selection {:?} does not fit a track of {} points",
                self.indices,
                track.len()
            )));
        }

        let mut indices = self.indices.clone();
        indices[i] = rng.random_range(lo..=hi);
        Self::from_indices(indices, track)
    }

    fn task(&self) -> &Task {
        &self.task
    }

    fn into_task(self) -> Task {
        self.task
    }
}
