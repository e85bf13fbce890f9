//! Fixed-width histogram of predicted scores.

use serde::{Deserialize, Serialize};

/// Default bin count for score histograms.
pub const DEFAULT_BINS: usize = 100;

/// Equal-width bins over `[low, high]`.
///
/// The last bin is closed, so a value equal to `high` is counted in it.
/// Values outside the range go to `underflow` / `overflow`; NaN is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub low: f64,
    pub high: f64,
    pub counts: Vec<u64>,
    pub underflow: u64,
    pub overflow: u64,
}

impl Histogram {
    /// Empty histogram. `n_bins` is raised to 1 and an inverted range is swapped.
    pub fn new(n_bins: usize, low: f64, high: f64) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            low,
            high,
            counts: vec![0; n_bins.max(1)],
            underflow: 0,
            overflow: 0,
        }
    }

    /// Histogram of probabilities over `[0, 1]`.
    pub fn of_scores<'a>(scores: impl IntoIterator<Item = &'a f64>, n_bins: usize) -> Self {
        let mut hist = Self::new(n_bins, 0.0, 1.0);
        for &s in scores {
            hist.fill(s);
        }
        hist
    }

    pub fn fill(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        if value < self.low {
            self.underflow += 1;
        } else if value > self.high {
            self.overflow += 1;
        } else {
            let bin = self.bin_index(value);
            self.counts[bin] += 1;
        }
    }

    fn bin_index(&self, value: f64) -> usize {
        let n = self.counts.len();
        let width = self.high - self.low;
        if width <= 0.0 {
            return 0;
        }
        let idx = ((value - self.low) / width * n as f64) as usize;
        idx.min(n - 1)
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Entries inside the range.
    pub fn n_entries(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `n_bins + 1` bin edges from `low` to `high`.
    pub fn bin_edges(&self) -> Vec<f64> {
        let n = self.counts.len();
        let width = self.high - self.low;
        (0..=n).map(|i| self.low + width * i as f64 / n as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_expected_bins() {
        let hist = Histogram::of_scores(&[0.0, 0.005, 0.011, 0.5, 0.999, 1.0], DEFAULT_BINS);
        assert_eq!(hist.n_bins(), 100);
        assert_eq!(hist.counts[0], 2);
        assert_eq!(hist.counts[1], 1);
        assert_eq!(hist.counts[50], 1);
        assert_eq!(hist.counts[99], 2);
        assert_eq!(hist.n_entries(), 6);
    }

    #[test]
    fn out_of_range_values() {
        let hist = Histogram::of_scores(&[-0.1, 1.5, f64::NAN, 0.3], 10);
        assert_eq!(hist.underflow, 1);
        assert_eq!(hist.overflow, 1);
        assert_eq!(hist.n_entries(), 1);
        assert_eq!(hist.counts[3], 1);
    }

    #[test]
    fn edges_span_range() {
        let hist = Histogram::new(4, 0.0, 1.0);
        assert_eq!(hist.bin_edges(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
