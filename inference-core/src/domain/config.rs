use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::Result;

// ===== Experiment Constants =====

pub const POPULATION_SIZE: usize = 10_000;
pub const SAMPLE_SIZE: usize = 100;
pub const POPULATION_MEAN: f64 = 2000.0;
pub const POPULATION_STD_DEV: f64 = 500.0;
pub const TESTED_VALUE: f64 = 2000.0;
pub const CONFIDENCE_LEVEL: f64 = 0.95;
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
pub const RANDOM_SEED: u64 = 42;
pub const POPULATION_BINS: usize = 50;
pub const SAMPLE_BINS: usize = 20;

// ===== Experiment Configuration =====

/// Fixed parameters of a single inference run.
///
/// The defaults are the constants above; nothing in the binary overrides them.
/// Tests build other configurations to exercise edge cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_experiment"))]
pub struct ExperimentConfig {
    #[validate(range(min = 1))]
    pub population_size: usize,
    #[validate(range(min = 2))]
    pub sample_size: usize,
    pub population_mean: f64,
    #[validate(range(min = 0.0))]
    pub population_std_dev: f64,
    pub tested_value: f64,
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub confidence_level: f64,
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub alpha: f64,
    pub seed: u64,
    #[validate(range(min = 1))]
    pub population_bins: usize,
    #[validate(range(min = 1))]
    pub sample_bins: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            sample_size: SAMPLE_SIZE,
            population_mean: POPULATION_MEAN,
            population_std_dev: POPULATION_STD_DEV,
            tested_value: TESTED_VALUE,
            confidence_level: CONFIDENCE_LEVEL,
            alpha: SIGNIFICANCE_LEVEL,
            seed: RANDOM_SEED,
            population_bins: POPULATION_BINS,
            sample_bins: SAMPLE_BINS,
        }
    }
}

impl ExperimentConfig {
    /// Validate and convert field errors into [`crate::InferenceError::Validation`].
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }

    /// Parameters of the normal distribution the population is drawn from.
    pub fn population_spec(&self) -> PopulationSpec {
        PopulationSpec {
            mean: self.population_mean,
            std_dev: self.population_std_dev,
            size: self.population_size,
        }
    }
}

fn validate_experiment(config: &ExperimentConfig) -> std::result::Result<(), ValidationError> {
    if config.sample_size > config.population_size {
        return Err(ValidationError::new("sample_size_exceeds_population"));
    }
    if !config.population_mean.is_finite() || !config.population_std_dev.is_finite() {
        return Err(ValidationError::new("non_finite_distribution_parameter"));
    }
    if !config.tested_value.is_finite() {
        return Err(ValidationError::new("non_finite_tested_value"));
    }
    Ok(())
}

// ===== Population Parameters =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PopulationSpec {
    pub mean: f64,
    pub std_dev: f64,
    pub size: usize,
}
