use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
    /// Share of all values falling in this bin.
    pub frequency: f64,
    /// `frequency / bin width`; the bars of a density histogram integrate to 1.
    pub density: f64,
}

impl Histogram {
    pub fn empty() -> Self {
        Self {
            bins: vec![],
            total_count: 0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn max_density(&self) -> f64 {
        self.bins.iter().map(|b| b.density).fold(0.0, f64::max)
    }

    /// `(lowest lower bound, highest upper bound)`, or `None` for an empty histogram.
    pub fn range(&self) -> Option<(f64, f64)> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        Some((first.lower_bound, last.upper_bound))
    }
}

pub struct MetricAggregator;

impl MetricAggregator {
    /// Generate histogram with `num_bins` equal-width bins spanning the data.
    ///
    /// The maximum falls in the last bin. When every value is identical the
    /// range is widened to `value ± 0.5` so the single bin has unit width.
    pub fn histogram(values: &[f64], num_bins: usize) -> Histogram {
        if values.is_empty() || num_bins == 0 {
            return Histogram::empty();
        }

        let mut min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let bin_width = (max - min) / num_bins as f64;
        let mut bins = vec![0usize; num_bins];

        for &value in values {
            let mut bin_index = ((value - min) / bin_width).floor() as usize;
            if bin_index >= num_bins {
                bin_index = num_bins - 1;
            }
            bins[bin_index] += 1;
        }

        let total = values.len();
        let histogram_bins: Vec<HistogramBin> = bins
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let lower_bound = min + (i as f64 * bin_width);
                let upper_bound = lower_bound + bin_width;
                let frequency = count as f64 / total as f64;
                HistogramBin {
                    lower_bound,
                    upper_bound,
                    count,
                    frequency,
                    density: frequency / bin_width,
                }
            })
            .collect();

        Histogram {
            bins: histogram_bins,
            total_count: total,
        }
    }
}
