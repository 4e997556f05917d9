use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Synthetic ground-truth dataset, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Population(Vec<f64>);

impl Population {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for Population {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<f64>> for Population {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Values drawn without replacement from a [`Population`].
///
/// `indices[i]` is the population position `values[i]` was taken from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample by picking `indices` out of `population`.
    ///
    /// Returns `None` if any index is out of range.
    pub fn from_indices(population: &Population, indices: Vec<usize>) -> Option<Self> {
        let values = indices
            .iter()
            .map(|&i| population.get(i).copied())
            .collect::<Option<Vec<f64>>>()?;
        Some(Self { indices, values })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for Sample {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}
