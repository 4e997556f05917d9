use inference_core::{
    ConfidenceInterval, Ddof, HypothesisTestResult, InferenceError, Result, SummaryStatistics,
};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Mean and standard deviation of `values` using the given divisor.
    ///
    /// A constant input yields exactly that value as mean and a standard
    /// deviation of exactly zero, whatever rounding the running sums pick up.
    pub fn summarize(values: &[f64], ddof: Ddof) -> Result<SummaryStatistics> {
        if values.len() < ddof.min_count() {
            return Err(InferenceError::InsufficientData {
                required: ddof.min_count(),
                actual: values.len(),
            });
        }

        let (mean, std_dev) = match constant_value(values) {
            Some(value) => (value, 0.0),
            None => {
                let std_dev = match ddof {
                    Ddof::Population => values.iter().population_std_dev(),
                    Ddof::Sample => values.iter().std_dev(),
                };
                (values.iter().mean(), std_dev)
            }
        };

        Ok(SummaryStatistics {
            mean,
            std_dev,
            count: values.len(),
            ddof,
        })
    }

    /// Student-t confidence interval for the mean at the given confidence level.
    ///
    /// `stats` must be Bessel-corrected sample statistics over at least two values.
    pub fn confidence_interval(
        stats: &SummaryStatistics,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(InferenceError::InvalidParameter(format!(
                "confidence level must lie in (0, 1), got {}",
                confidence_level
            )));
        }
        if stats.ddof != Ddof::Sample {
            return Err(InferenceError::InvalidParameter(format!(
                "confidence interval needs sample statistics, got {}",
                stats.ddof
            )));
        }
        if stats.count < 2 {
            return Err(InferenceError::InsufficientData {
                required: 2,
                actual: stats.count,
            });
        }

        let df = (stats.count - 1) as f64;
        let t_critical = Self::t_critical(confidence_level, df)?;
        let margin = t_critical * stats.standard_error();

        Ok(ConfidenceInterval {
            lower: stats.mean - margin,
            upper: stats.mean + margin,
            confidence_level,
            degrees_of_freedom: df,
            t_critical,
            margin_of_error: margin,
        })
    }

    /// Two-tailed critical value of Student's t with `df` degrees of freedom.
    pub fn t_critical(confidence_level: f64, df: f64) -> Result<f64> {
        let t_dist = Self::students_t(df)?;
        Ok(t_dist.inverse_cdf((1.0 + confidence_level) / 2.0))
    }

    /// Two-sided one-sample t-test of `H0: mean == reference`.
    pub fn one_sample_t_test(values: &[f64], reference: f64, alpha: f64) -> Result<HypothesisTestResult> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(InferenceError::InvalidParameter(format!(
                "significance level must lie in (0, 1), got {}",
                alpha
            )));
        }
        if !reference.is_finite() {
            return Err(InferenceError::InvalidParameter(format!(
                "tested value must be finite, got {}",
                reference
            )));
        }

        let stats = Self::summarize(values, Ddof::Sample)?;
        let df = (stats.count - 1) as f64;
        let difference = stats.mean - reference;

        let (t_statistic, p_value) = if stats.std_dev == 0.0 {
            // All observations identical: the statistic degenerates to 0 or ±inf.
            if difference == 0.0 {
                (0.0, 1.0)
            } else {
                (difference.signum() * f64::INFINITY, 0.0)
            }
        } else {
            let t = difference / stats.standard_error();
            let t_dist = Self::students_t(df)?;
            (t, (2.0 * t_dist.sf(t.abs())).clamp(0.0, 1.0))
        };

        let effect_size = if stats.std_dev == 0.0 {
            0.0
        } else {
            difference / stats.std_dev
        };

        let rejected = p_value < alpha;

        Ok(HypothesisTestResult {
            tested_value: reference,
            t_statistic,
            p_value,
            degrees_of_freedom: df,
            effect_size,
            alpha,
            rejected,
            conclusion_text: Self::conclusion(rejected, reference),
        })
    }

    /// Sentence describing the outcome of a test against `reference`.
    pub fn conclusion(rejected: bool, reference: f64) -> String {
        if rejected {
            format!(
                "On rejette H0. Il y a une différence significative entre la moyenne de l'échantillon et {:.2}.",
                reference
            )
        } else {
            format!(
                "On ne rejette pas H0. Il n'y a pas de preuve statistique que la moyenne réelle est différente de {:.2}.",
                reference
            )
        }
    }

    fn students_t(df: f64) -> Result<StudentsT> {
        StudentsT::new(0.0, 1.0, df).map_err(|e| InferenceError::Distribution(e.to_string()))
    }
}

/// The shared value when every element of `values` is identical.
fn constant_value(values: &[f64]) -> Option<f64> {
    let (&first, rest) = values.split_first()?;
    rest.iter().all(|&x| x == first).then_some(first)
}
