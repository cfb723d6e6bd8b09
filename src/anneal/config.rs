//! Annealer configuration.

/// Configuration for the annealing optimizer.
///
/// # Examples
///
/// ```
/// use crossgrid::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.98)
///     .with_max_iterations(2000)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Initial temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1), applied once per iteration.
    pub cooling_rate: f64,

    /// Hard iteration budget. Exhausting it is not an error; the run
    /// returns its best-effort state.
    pub max_iterations: usize,

    /// Half-width of the square from which random move offsets are drawn.
    pub move_radius: i32,

    /// Candidate positions tried per move before giving up with a no-op.
    pub move_attempts: usize,

    /// Minimum Euclidean distance a candidate must keep from every other
    /// vertex.
    pub min_separation: f64,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            max_iterations: 5000,
            move_radius: 10,
            move_attempts: 10,
            min_separation: 0.1,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_move_radius(mut self, radius: i32) -> Self {
        self.move_radius = radius;
        self
    }

    pub fn with_move_attempts(mut self, n: usize) -> Self {
        self.move_attempts = n;
        self
    }

    pub fn with_min_separation(mut self, d: f64) -> Self {
        self.min_separation = d;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.move_radius < 1 {
            return Err(format!("move_radius must be at least 1, got {}", self.move_radius));
        }
        if self.move_attempts == 0 {
            return Err("move_attempts must be at least 1".into());
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(format!(
                "min_separation must be finite and non-negative, got {}",
                self.min_separation
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.95).abs() < 1e-10);
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.move_radius, 10);
        assert_eq!(config.move_attempts, 10);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealConfig::default().with_initial_temperature(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(AnnealConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(AnnealConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_move_radius() {
        let config = AnnealConfig::default().with_move_radius(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_separation() {
        let config = AnnealConfig::default().with_min_separation(f64::NAN);
        assert!(config.validate().is_err());
    }
}
