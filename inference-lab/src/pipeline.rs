use inference_core::{
    ConfidenceInterval, Ddof, ExperimentConfig, HypothesisTestResult, Population, Result, Sample,
    SummaryStatistics,
};
use inference_metrics::{RandomStream, StatisticalAnalyzer};
use serde::Serialize;

/// Everything one run of the pipeline produces.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InferenceReport {
    pub config: ExperimentConfig,
    pub population: Population,
    pub sample: Sample,
    pub population_stats: SummaryStatistics,
    pub sample_stats: SummaryStatistics,
    pub confidence_interval: ConfidenceInterval,
    pub hypothesis_test: HypothesisTestResult,
}

/// Run generation, sampling, estimation and the hypothesis test, in that order.
pub fn run(config: &ExperimentConfig) -> Result<InferenceReport> {
    config.ensure_valid()?;
    tracing::debug!(?config, "Starting inference pipeline");

    let (population, sampling) =
        RandomStream::seeded(config.seed).draw_population(&config.population_spec())?;
    let population_stats = StatisticalAnalyzer::summarize(&population, Ddof::Population)?;
    tracing::info!(
        size = population.len(),
        mean = population_stats.mean,
        std_dev = population_stats.std_dev,
        "Population generated"
    );

    let sample = sampling.draw_sample(&population, config.sample_size)?;
    let sample_stats = StatisticalAnalyzer::summarize(&sample, Ddof::Sample)?;
    tracing::info!(
        size = sample.len(),
        mean = sample_stats.mean,
        std_dev = sample_stats.std_dev,
        "Sample drawn"
    );

    let confidence_interval =
        StatisticalAnalyzer::confidence_interval(&sample_stats, config.confidence_level)?;
    tracing::info!(
        lower = confidence_interval.lower,
        upper = confidence_interval.upper,
        level = confidence_interval.confidence_level,
        "Confidence interval computed"
    );

    let hypothesis_test =
        StatisticalAnalyzer::one_sample_t_test(&sample, config.tested_value, config.alpha)?;
    tracing::info!(
        t_statistic = hypothesis_test.t_statistic,
        p_value = hypothesis_test.p_value,
        rejected = hypothesis_test.rejected,
        "Hypothesis test completed"
    );

    Ok(InferenceReport {
        config: config.clone(),
        population,
        sample,
        population_stats,
        sample_stats,
        confidence_interval,
        hypothesis_test,
    })
}
