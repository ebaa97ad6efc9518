
use std::ops::AddAssign;

/// Recall, precision, and F1 derived from a set of counts
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricScores {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64
}

/// Computes recall, precision, and F1 from raw counts.
/// Any ratio with a zero denominator is reported as 0.0.
/// # Arguments
/// * `tp_count` - number of detected calls matching the reference
/// * `fp_count` - number of detected calls without a reference match
/// * `fn_count` - number of reference calls without a detected match
pub fn metrics(tp_count: u64, fp_count: u64, fn_count: u64) -> MetricScores {
    SummaryMetrics::new(tp_count, fp_count, fn_count).scores()
}

/// Counts of TP, FP, and FN for one tool (or several, when accumulated)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummaryMetrics {
    /// Number of detected calls that match the reference
    pub true_positives: u64,
    /// Number of detected calls that do not match the reference
    pub false_positives: u64,
    /// Number of reference calls that were not detected
    pub false_negatives: u64
}

impl AddAssign for SummaryMetrics {
    // Enables += with stats
    fn add_assign(&mut self, rhs: Self) {
        self.true_positives += rhs.true_positives;
        self.false_positives += rhs.false_positives;
        self.false_negatives += rhs.false_negatives;
    }
}

impl SummaryMetrics {
    /// Constructor
    pub fn new(true_positives: u64, false_positives: u64, false_negatives: u64) -> Self {
        Self {
            true_positives, false_positives, false_negatives
        }
    }

    /// Recall = TP / (TP + FN), or 0.0 if there is nothing to recall
    pub fn recall(&self) -> f64 {
        let denom = self.true_positives + self.false_negatives;
        if denom > 0 {
            self.true_positives as f64 / denom as f64
        } else {
            0.0
        }
    }

    /// Precision = TP / (TP + FP), or 0.0 if nothing was called
    pub fn precision(&self) -> f64 {
        let denom = self.true_positives + self.false_positives;
        if denom > 0 {
            self.true_positives as f64 / denom as f64
        } else {
            0.0
        }
    }

    /// Harmonic mean of recall and precision, or 0.0 if both are 0.0
    pub fn f1(&self) -> f64 {
        let recall = self.recall();
        let precision = self.precision();
        if recall + precision > 0.0 {
            2.0 * recall * precision / (recall + precision)
        } else {
            0.0
        }
    }

    /// All three scores at once
    pub fn scores(&self) -> MetricScores {
        MetricScores {
            recall: self.recall(),
            precision: self.precision(),
            f1: self.f1()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_scores() {
        let scores = metrics(8, 2, 0);
        assert_approx_eq!(scores.recall, 1.0);
        assert_approx_eq!(scores.precision, 0.8);
        assert_approx_eq!(scores.f1, 2.0 * 0.8 / 1.8);
        assert!((scores.f1 - 0.8889).abs() < 1e-4);

        let summary = SummaryMetrics::new(10, 5, 2);
        assert_approx_eq!(summary.recall(), 10.0 / 12.0);
        assert_approx_eq!(summary.precision(), 10.0 / 15.0);
        assert_approx_eq!(summary.f1(), 2.0 * (10.0 / 12.0) * (10.0 / 15.0) / (10.0 / 12.0 + 10.0 / 15.0));
    }

    #[test]
    fn test_zero_guards() {
        assert_eq!(metrics(0, 0, 0), MetricScores { recall: 0.0, precision: 0.0, f1: 0.0 });

        // nothing matched, but both denominators are non-zero
        assert_eq!(metrics(0, 3, 4), MetricScores { recall: 0.0, precision: 0.0, f1: 0.0 });

        // only precision is defined
        let scores = metrics(2, 2, 0);
        assert_eq!(scores.recall, 1.0);
        assert_eq!(scores.precision, 0.5);
    }

    #[test]
    fn test_add_assign() {
        let mut summary = SummaryMetrics::new(10, 2, 3);
        summary += SummaryMetrics::new(3, 1, 10);
        assert_eq!(summary, SummaryMetrics::new(13, 3, 13));
    }
}
