//! Per-iteration diagnostics for an annealing run.

use std::io::Write;

use serde::Serialize;

/// Snapshot taken after one iteration.
///
/// `candidate` is the current position after the move decision, not the
/// neighbour that was generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLogEntry<C> {
    pub candidate: Option<C>,
    pub best: Option<C>,
    pub temperature: f64,
}

/// Ordered snapshots of a run.
///
/// The first entry is a placeholder with no candidates and a temperature
/// of `0.0`, so a run of `n` iterations holds `n + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLog<C> {
    entries: Vec<RunLogEntry<C>>,
}

impl<C> RunLog<C> {
    pub(crate) fn with_capacity(iterations: usize) -> Self {
        let mut entries = Vec::with_capacity(iterations + 1);
        entries.push(RunLogEntry {
            candidate: None,
            best: None,
            temperature: 0.0,
        });
        Self { entries }
    }

    pub(crate) fn record(&mut self, candidate: C, best: C, temperature: f64) {
        self.entries.push(RunLogEntry {
            candidate: Some(candidate),
            best: Some(best),
            temperature,
        });
    }

    pub fn entries(&self) -> &[RunLogEntry<C>] {
        &self.entries
    }

    /// Number of entries, placeholder included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iteration snapshots, placeholder skipped.
    pub fn iterations(&self) -> impl Iterator<Item = &RunLogEntry<C>> {
        self.entries.iter().skip(1)
    }
}

impl<C: Serialize> RunLog<C> {
    /// Writes the log as indented JSON followed by a newline.
    pub fn write_pretty<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)
    }
}
