use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Point Estimates =====

/// Delta degrees of freedom used for the variance divisor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Ddof {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1` (Bessel's correction).
    Sample,
}

impl Ddof {
    pub fn delta(&self) -> usize {
        match self {
            Self::Population => 0,
            Self::Sample => 1,
        }
    }

    /// Smallest number of observations for which the standard deviation is defined.
    pub fn min_count(&self) -> usize {
        self.delta() + 1
    }
}

impl fmt::Display for Ddof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ddof={}", self.delta())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
    pub ddof: Ddof,
}

impl SummaryStatistics {
    /// Standard error of the mean, `std_dev / sqrt(n)`.
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }
}

// ===== Interval Estimates =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    pub degrees_of_freedom: f64,
    pub t_critical: f64,
    pub margin_of_error: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

// ===== Hypothesis Testing =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HypothesisTestResult {
    pub tested_value: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: f64,
    pub effect_size: f64,
    pub alpha: f64,
    pub rejected: bool,
    pub conclusion_text: String,
}
