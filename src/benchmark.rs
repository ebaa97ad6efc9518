/*!
# Benchmark
Ties the classifier, the false-negative finder, and the metrics together for one or more tools scored against a gold standard.

## Example usage
```rust
use cnvbench::benchmark::{benchmark_tool, MatchConfigBuilder};
use cnvbench::data_types::chromosome::Chromosome;
use cnvbench::data_types::cnv_record::CnvRecord;
use cnvbench::data_types::cnv_table::CnvTable;

let chr1 = Chromosome::from(1);
let gold = CnvTable::new("gold".to_string(), vec![
    CnvRecord::from_coordinates("gold", 0, chr1.clone(), 1_000, 2_000),
    CnvRecord::from_coordinates("gold", 1, chr1.clone(), 900_000, 1_000_000),
]);
let tool = CnvTable::new("tool".to_string(), vec![
    CnvRecord::from_coordinates("tool", 0, chr1.clone(), 1_200, 1_800),
    CnvRecord::from_coordinates("tool", 1, chr1.clone(), 5_000_000, 5_100_000),
]);

let config = MatchConfigBuilder::default().build().unwrap();
let result = benchmark_tool(&tool, &gold, config);
assert_eq!(result.metrics().true_positives, 1);
assert_eq!(result.metrics().false_positives, 1);
assert_eq!(result.metrics().false_negatives, 1);
```
*/
use derive_builder::Builder;

use crate::classifier::{classify, ClassifiedCalls};
use crate::data_types::cnv_table::CnvTable;
use crate::data_types::summary_metrics::SummaryMetrics;
use crate::false_negatives::find_false_negatives;
use crate::overlap::{DEFAULT_MIN_FRACTION, DEFAULT_TOLERANCE};

/// Controls the matching thresholds
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Boundary expansion in bp for tolerance matching (set comparisons and false negatives)
    #[builder(default = "DEFAULT_TOLERANCE")]
    tolerance: u64,
    /// Minimum covered fraction of a detected call to count as a TP
    #[builder(default = "DEFAULT_MIN_FRACTION")]
    min_fraction: f64
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_fraction: DEFAULT_MIN_FRACTION
        }
    }
}

impl MatchConfig {
    // getters
    pub fn tolerance(&self) -> u64 {
        self.tolerance
    }

    pub fn min_fraction(&self) -> f64 {
        self.min_fraction
    }
}

/// Scoring of a single tool against the gold standard
#[derive(Clone, Debug)]
pub struct ToolBenchmark {
    /// TP / FP / excluded calls from the tool
    classified: ClassifiedCalls,
    /// Gold-standard calls this tool missed
    false_negatives: CnvTable,
    /// Counts derived from the above
    metrics: SummaryMetrics
}

impl ToolBenchmark {
    // getters
    pub fn label(&self) -> &str {
        self.classified.label()
    }

    pub fn classified(&self) -> &ClassifiedCalls {
        &self.classified
    }

    pub fn false_negatives(&self) -> &CnvTable {
        &self.false_negatives
    }

    pub fn metrics(&self) -> &SummaryMetrics {
        &self.metrics
    }
}

/// Classifies one tool's calls and finds the gold-standard calls it missed.
/// # Arguments
/// * `detected` - the tool calls
/// * `reference` - the gold-standard calls
/// * `config` - matching thresholds
pub fn benchmark_tool(detected: &CnvTable, reference: &CnvTable, config: MatchConfig) -> ToolBenchmark {
    let classified = classify(detected, reference, config.min_fraction());
    let false_negatives = find_false_negatives(reference, std::slice::from_ref(detected), config.tolerance());
    let metrics = SummaryMetrics::new(
        classified.true_positives().len() as u64,
        classified.false_positives().len() as u64,
        false_negatives.len() as u64
    );
    ToolBenchmark {
        classified, false_negatives, metrics
    }
}

/// Combined scoring across all tools.
/// TP and FP are summed over the tools, while FN are the gold-standard calls missed by every tool.
/// # Arguments
/// * `tool_results` - the per-tool results from `benchmark_tool`
/// * `union_false_negatives` - output of `find_false_negatives` with all tools at once
pub fn joint_metrics(tool_results: &[ToolBenchmark], union_false_negatives: &CnvTable) -> SummaryMetrics {
    let mut joint = SummaryMetrics::default();
    for result in tool_results.iter() {
        joint += *result.metrics();
    }
    // per-tool FN are replaced by the gold-standard calls every tool missed
    joint.false_negatives = union_false_negatives.len() as u64;
    joint
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use crate::data_types::chromosome::Chromosome;
    use crate::data_types::cnv_record::CnvRecord;

    fn record(label: &str, row: usize, chrom: u32, start: u64, end: u64) -> CnvRecord {
        CnvRecord::from_coordinates(label, row, Chromosome::from(chrom), start, end)
    }

    #[test]
    fn test_config_builder() {
        let config = MatchConfigBuilder::default().build().unwrap();
        assert_eq!(config, MatchConfig::default());
        assert_eq!(config.tolerance(), 50_000);
        assert_eq!(config.min_fraction(), 0.5);

        let config = MatchConfigBuilder::default()
            .tolerance(0)
            .min_fraction(0.8)
            .build().unwrap();
        assert_eq!(config.tolerance(), 0);
        assert_eq!(config.min_fraction(), 0.8);
    }

    #[test]
    fn test_two_tools() {
        let gold = CnvTable::new("gold".to_string(), vec![
            record("gold", 0, 1, 1_000_000, 2_000_000),
            record("gold", 1, 5, 10_000_000, 10_500_000),
            record("gold", 2, 9, 300_000, 400_000),
        ]);
        let gs = CnvTable::new("gs".to_string(), vec![
            record("gs", 0, 1, 1_100_000, 1_900_000),
            record("gs", 1, 1, 1_950_000, 2_500_000),
        ]);
        let nx = CnvTable::new("nx".to_string(), vec![
            record("nx", 0, 5, 10_000_000, 10_400_000),
        ]);

        let config = MatchConfig::default();
        let results: Vec<ToolBenchmark> = [&gs, &nx].iter()
            .map(|t| benchmark_tool(t, &gold, config))
            .collect();

        // gs row 1 only overlaps the gold call by 50kb of 550kb
        assert_eq!(results[0].label(), "gs");
        assert_eq!(results[0].metrics(), &SummaryMetrics::new(1, 1, 2));
        assert_eq!(results[1].metrics(), &SummaryMetrics::new(1, 0, 2));
        assert_approx_eq!(results[1].metrics().precision(), 1.0);
        assert_approx_eq!(results[1].metrics().recall(), 1.0 / 3.0);

        let union_fn = find_false_negatives(&gold, &[gs, nx], config.tolerance());
        let joint = joint_metrics(&results, &union_fn);
        // TP / FP add up, FN is the union miss count rather than 2 + 2
        assert_eq!(joint, SummaryMetrics::new(2, 1, 1));
    }
}
