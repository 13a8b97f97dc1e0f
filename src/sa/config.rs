//! Annealing configuration and acceptance rules.

use serde::{Deserialize, Serialize};

use crate::error::{AnnealError, Result};

/// Rule turning a score difference into an acceptance probability.
///
/// Both rules compare the current candidate against its freshly generated
/// neighbour. The returned value is compared against a uniform draw in
/// `[0, 1)`; values are not clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptanceRule {
    /// `diff = score(current) - score(candidate)`. Returns `1.0` when
    /// `diff > 0`, otherwise `e * diff / T`.
    ///
    /// Note the polarity: a neighbour that scores *lower* than the current
    /// position is always accepted, while a neighbour that scores higher
    /// yields a negative value and is almost always rejected. Best-so-far
    /// tracking is independent of this decision, so the search still
    /// records every improvement it generates. The behaviour is kept as-is
    /// for compatibility with existing runs; use [`AcceptanceRule::Metropolis`]
    /// for the textbook criterion.
    #[default]
    Linear,

    /// Metropolis criterion for maximization. Returns `1.0` for neighbours
    /// scoring at least as high as the current position, otherwise
    /// `exp(-(score(current) - score(candidate)) / T)`.
    Metropolis,
}

/// Configuration for the annealing loop.
///
/// # Examples
///
/// ```
/// use track_anneal::sa::{AcceptanceRule, AnnealConfig};
///
/// let config = AnnealConfig::default()
///     .with_start_temperature(500.0)
///     .with_min_temperature(0.5)
///     .with_alpha(0.01)
///     .with_acceptance(AcceptanceRule::Linear)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealConfig {
    /// Temperature at the start of a run.
    pub start_temperature: f64,

    /// Temperature floor. The loop runs while `T > min_temperature`.
    pub min_temperature: f64,

    /// Cooling fraction in (0, 1): `T_{k+1} = T_k * (1 - alpha)`.
    pub alpha: f64,

    /// Random seed for reproducibility. `None` seeds from the clock.
    pub seed: Option<u64>,

    /// Acceptance rule for move decisions.
    #[serde(default)]
    pub acceptance: AcceptanceRule,

    /// Whether to print the run log to stdout when a run finishes.
    #[serde(default = "default_dump")]
    pub dump_run_log: bool,
}

fn default_dump() -> bool {
    true
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            start_temperature: 1000.0,
            min_temperature: 1.0,
            alpha: 0.003,
            seed: None,
            acceptance: AcceptanceRule::default(),
            dump_run_log: true,
        }
    }
}

impl AnnealConfig {
    /// Builds a config from the four classic annealing parameters.
    pub fn new(start_temperature: f64, min_temperature: f64, alpha: f64, seed: u64) -> Self {
        Self {
            start_temperature,
            min_temperature,
            alpha,
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_start_temperature(mut self, t: f64) -> Self {
        self.start_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_acceptance(mut self, acceptance: AcceptanceRule) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Enables or disables printing the run log at the end of a run.
    pub fn with_run_log_dump(mut self, dump: bool) -> Self {
        self.dump_run_log = dump;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.start_temperature.is_finite() || self.start_temperature <= 0.0 {
            return Err(AnnealError::InvalidParameters(format!(
                "start_temperature must be positive and finite, got {}",
                self.start_temperature
            )));
        }
        // Subnormal floors would let the cooling product round back to T.
        if !self.min_temperature.is_normal() || self.min_temperature < 0.0 {
            return Err(AnnealError::InvalidParameters(format!(
                "min_temperature must be a positive normal number, got {}",
                self.min_temperature
            )));
        }
        if self.start_temperature <= self.min_temperature {
            return Err(AnnealError::InvalidParameters(format!(
                "start_temperature ({}) must exceed min_temperature ({})",
                self.start_temperature, self.min_temperature
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnnealError::InvalidParameters(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.start_temperature * (1.0 - self.alpha) >= self.start_temperature {
            return Err(AnnealError::InvalidParameters(format!(
                "alpha {} is too small to lower the temperature",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Number of loop iterations a run performs with these temperatures.
    ///
    /// Replays the cooling steps `T *= 1 - alpha` so the count matches the
    /// loop exactly; analytically it is close to
    /// `ceil(ln(min / start) / ln(1 - alpha))` but rounding can differ by
    /// one. The count depends only on the temperature parameters, never on
    /// the seed. Returns 0 for configurations that fail validation.
    pub fn iteration_count(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut temperature = self.start_temperature;
        let mut steps = 0usize;
        while temperature > self.min_temperature {
            temperature *= 1.0 - self.alpha;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert!((config.start_temperature - 1000.0).abs() < 1e-10);
        assert!((config.min_temperature - 1.0).abs() < 1e-10);
        assert!((config.alpha - 0.003).abs() < 1e-15);
        assert_eq!(config.seed, None);
        assert_eq!(config.acceptance, AcceptanceRule::Linear);
        assert!(config.dump_run_log);
    }

    #[test]
    fn test_new_sets_seed() {
        let config = AnnealConfig::new(10.0, 9.0, 0.5, 42);
        assert_eq!(config.seed, Some(42));
        assert!((config.alpha - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_start_temperature() {
        let config = AnnealConfig::default().with_start_temperature(-1.0);
        assert!(matches!(config.validate(), Err(AnnealError::InvalidParameters(_))));
    }

    #[test]
    fn test_validate_bad_min_temperature() {
        let config = AnnealConfig::default().with_min_temperature(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_start() {
        let config = AnnealConfig::default()
            .with_start_temperature(10.0)
            .with_min_temperature(10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        for alpha in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
            let config = AnnealConfig::default().with_alpha(alpha);
            assert!(config.validate().is_err(), "alpha {alpha} should be rejected");
        }
    }

    #[test]
    fn test_validate_alpha_below_rounding() {
        // 1.0 - 1e-17 == 1.0 in f64, so the temperature would never drop.
        let config = AnnealConfig::new(10.0, 1.0, 1e-17, 1);
        assert!(matches!(config.validate(), Err(AnnealError::InvalidParameters(_))));
        assert_eq!(config.iteration_count(), 0);
    }

    #[test]
    fn test_validate_subnormal_min_temperature() {
        let config = AnnealConfig::default().with_min_temperature(f64::MIN_POSITIVE / 4.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_iteration_count_follows_float_rounding() {
        // The closed form rounds (3, 1, 2/3) up to 2 steps; the product
        // 3 * (1 - 2/3) already lands on the floor after one.
        let config = AnnealConfig::new(3.0, 1.0, 2.0 / 3.0, 1);
        let mut t = 3.0f64;
        let mut replayed = 0;
        while t > 1.0 {
            t *= 1.0 - 2.0 / 3.0;
            replayed += 1;
        }
        assert_eq!(config.iteration_count(), replayed);
    }

    #[test]
    fn test_validate_non_finite_temperature() {
        let config = AnnealConfig::default().with_start_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_iteration_count_defaults() {
        // ln(0.001) / ln(0.997) = 2299.08...
        assert_eq!(AnnealConfig::default().iteration_count(), 2300);
    }

    #[test]
    fn test_iteration_count_single_step() {
        assert_eq!(AnnealConfig::new(10.0, 9.0, 0.5, 42).iteration_count(), 1);
    }

    #[test]
    fn test_iteration_count_invalid_is_zero() {
        assert_eq!(AnnealConfig::new(1.0, 2.0, 0.5, 42).iteration_count(), 0);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"start_temperature": 50.0, "min_temperature": 0.5, "alpha": 0.1, "seed": 3}"#;
        let config: AnnealConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.acceptance, AcceptanceRule::Linear);
        assert!(config.dump_run_log);
    }
}
