
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::benchmark::ToolBenchmark;
use crate::data_types::summary_metrics::SummaryMetrics;

/// Label used for the row combining all tools
pub const JOINT_LABEL: &str = "JOINT";

/// This is a wrapper for writing out benchmark stats to a file
#[derive(Default)]
pub struct SummaryWriter {
    /// Total number of gold-standard calls, including those without coordinates
    truth_total: u64,
    /// One entry per row, in insertion order
    rows: Vec<SummaryRow>
}

/// Contains all the data written to each row of our stats file
#[derive(Clone, Debug, PartialEq, Serialize)]
struct SummaryRow {
    /// Tool label, or JOINT for the combined row
    label: String,
    /// Total number of gold-standard calls
    truth_total: u64,
    /// Total number of calls from the tool(s)
    query_total: u64,
    /// Calls matching the gold standard
    tp: u64,
    /// Calls not matching the gold standard
    fp: u64,
    /// Gold-standard calls that were missed
    #[serde(rename = "fn")]
    false_negatives: u64,
    /// Calls without coordinates, which are neither TP nor FP
    excluded: u64,
    /// Recall = TP / (TP + FN)
    metric_recall: f64,
    /// Precision = TP / (TP + FP)
    metric_precision: f64,
    /// F1 = combination score of recall and precision
    metric_f1: f64
}

impl SummaryRow {
    /// Creates a new row from labels and summary metrics
    fn new(label: String, truth_total: u64, query_total: u64, excluded: u64, metrics: &SummaryMetrics) -> Self {
        Self {
            label,
            truth_total,
            query_total,
            tp: metrics.true_positives,
            fp: metrics.false_positives,
            false_negatives: metrics.false_negatives,
            excluded,
            metric_recall: metrics.recall(),
            metric_precision: metrics.precision(),
            metric_f1: metrics.f1()
        }
    }
}

impl SummaryWriter {
    /// Creates a new writer to accumulate stats
    /// # Arguments
    /// * `truth_total` - number of calls in the gold standard
    pub fn new(truth_total: u64) -> Self {
        Self {
            truth_total,
            ..Default::default()
        }
    }

    /// Adds the row for one tool
    pub fn add_tool_benchmark(&mut self, benchmark: &ToolBenchmark) {
        let classified = benchmark.classified();
        self.rows.push(SummaryRow::new(
            benchmark.label().to_string(), self.truth_total,
            classified.total() as u64, classified.excluded().len() as u64,
            benchmark.metrics()
        ));
    }

    /// Adds the combined row across all tools
    /// # Arguments
    /// * `tool_benchmarks` - all of the per-tool results, used for the totals
    /// * `joint_metrics` - the combined counts
    pub fn add_joint(&mut self, tool_benchmarks: &[ToolBenchmark], joint_metrics: &SummaryMetrics) {
        let query_total = tool_benchmarks.iter()
            .map(|b| b.classified().total() as u64)
            .sum();
        let excluded = tool_benchmarks.iter()
            .map(|b| b.classified().excluded().len() as u64)
            .sum();
        self.rows.push(SummaryRow::new(
            JOINT_LABEL.to_string(), self.truth_total, query_total, excluded, joint_metrics
        ));
    }

    /// Will write the summary out to the given file path
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv)
    pub fn write_summary(&self, filename: &Path) -> csv::Result<()> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;

        for row in self.rows.iter() {
            csv_writer.serialize(row)?;
        }

        // save everything
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{benchmark_tool, joint_metrics, MatchConfig};
    use crate::data_types::chromosome::Chromosome;
    use crate::data_types::cnv_record::CnvRecord;
    use crate::data_types::cnv_table::CnvTable;
    use crate::false_negatives::find_false_negatives;

    #[test]
    fn test_write_summary() {
        let chr1 = Chromosome::from(1);
        let gold = CnvTable::new("gold".to_string(), vec![
            CnvRecord::from_coordinates("gold", 0, chr1.clone(), 1_000, 2_000),
            CnvRecord::from_coordinates("gold", 1, chr1.clone(), 900_000, 1_000_000),
        ]);
        let tool = CnvTable::new("tool".to_string(), vec![
            CnvRecord::from_coordinates("tool", 0, chr1.clone(), 1_200, 1_800),
        ]);

        let config = MatchConfig::default();
        let benchmarks = vec![benchmark_tool(&tool, &gold, config)];
        let union_fn = find_false_negatives(&gold, &[tool], config.tolerance());
        let joint = joint_metrics(&benchmarks, &union_fn);

        let mut writer = SummaryWriter::new(gold.len() as u64);
        writer.add_tool_benchmark(&benchmarks[0]);
        writer.add_joint(&benchmarks, &joint);
        assert_eq!(writer.rows.len(), 2);
        assert_eq!(writer.rows[0].label, "tool");
        assert_eq!(writer.rows[1].label, JOINT_LABEL);
        assert_eq!(writer.rows[1].query_total, 1);
        assert_eq!(writer.rows[1].false_negatives, 1);

        let out_fn = std::env::temp_dir().join(format!("cnvbench_summary_{}.csv", std::process::id()));
        writer.write_summary(&out_fn).unwrap();
        let text = std::fs::read_to_string(&out_fn).unwrap();
        std::fs::remove_file(&out_fn).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "label,truth_total,query_total,tp,fp,fn,excluded,metric_recall,metric_precision,metric_f1");
        assert_eq!(lines[1], "tool,2,1,1,0,1,0,0.5,1.0,0.6666666666666666");
        assert_eq!(lines.len(), 3);
    }
}
