//! Population generation and sampling without replacement.
//!
//! Both stages share one seeded random stream. The population is always drawn
//! first and the sample second; [`RandomStream`] and [`SamplingStream`] make any
//! other order unrepresentable.

use inference_core::{InferenceError, Population, PopulationSpec, Result, Sample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Draw `spec.size` independent values from `Normal(spec.mean, spec.std_dev)`.
pub fn generate_population<R: Rng + ?Sized>(rng: &mut R, spec: &PopulationSpec) -> Result<Population> {
    if !spec.mean.is_finite() {
        return Err(InferenceError::InvalidParameter(format!(
            "population mean must be finite, got {}",
            spec.mean
        )));
    }
    if !spec.std_dev.is_finite() || spec.std_dev < 0.0 {
        return Err(InferenceError::InvalidParameter(format!(
            "population standard deviation must be finite and non-negative, got {}",
            spec.std_dev
        )));
    }

    let normal = Normal::new(spec.mean, spec.std_dev)
        .map_err(|e| InferenceError::Distribution(e.to_string()))?;

    let values: Vec<f64> = (0..spec.size).map(|_| normal.sample(rng)).collect();

    tracing::debug!(
        size = spec.size,
        mean = spec.mean,
        std_dev = spec.std_dev,
        "Generated population"
    );

    Ok(Population::new(values))
}

/// Draw `sample_size` distinct positions of `population` uniformly at random.
///
/// `sample_size == population.len()` yields a permutation; `0` yields an empty sample.
pub fn draw_sample<R: Rng + ?Sized>(
    rng: &mut R,
    population: &Population,
    sample_size: usize,
) -> Result<Sample> {
    if sample_size > population.len() {
        return Err(InferenceError::SampleTooLarge {
            requested: sample_size,
            available: population.len(),
        });
    }

    let indices = rand::seq::index::sample(rng, population.len(), sample_size).into_vec();

    tracing::debug!(sample_size, population_size = population.len(), "Drew sample");

    Sample::from_indices(population, indices).ok_or_else(|| {
        InferenceError::InvalidParameter("sampled index outside the population".to_string())
    })
}

/// Seeded generator positioned before the population draw.
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: StdRng,
}

impl RandomStream {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate the population and hand the stream on to the sampling stage.
    pub fn draw_population(mut self, spec: &PopulationSpec) -> Result<(Population, SamplingStream)> {
        let population = generate_population(&mut self.rng, spec)?;
        Ok((population, SamplingStream { rng: self.rng }))
    }
}

/// Seeded generator positioned after the population draw.
#[derive(Debug, Clone)]
pub struct SamplingStream {
    rng: StdRng,
}

impl SamplingStream {
    pub fn draw_sample(mut self, population: &Population, sample_size: usize) -> Result<Sample> {
        draw_sample(&mut self.rng, population, sample_size)
    }
}
