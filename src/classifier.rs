/*!
# Fraction-based classifier
Labels every detected call as a true positive (TP) or false positive (FP) relative to a reference set.
A call is a TP if at least `min_fraction` of *its own* length is covered by any single reference call.
Only the existence of a match is observable, so the result does not depend on the order of either table.

Calls without coordinates are neither TP nor FP; they are returned separately as excluded.
*/
use rayon::prelude::*;

use crate::data_types::classification::{Classification, ClassifiedRecord};
use crate::data_types::cnv_record::CnvRecord;
use crate::data_types::cnv_table::CnvTable;
use crate::interval_index::IntervalIndex;
use crate::overlap::OverlapPolicy;

/// The disjoint TP / FP / excluded subsets of a detected table
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassifiedCalls {
    true_positives: CnvTable,
    false_positives: CnvTable,
    excluded: CnvTable
}

impl ClassifiedCalls {
    // getters
    pub fn label(&self) -> &str {
        self.true_positives.label()
    }

    pub fn true_positives(&self) -> &CnvTable {
        &self.true_positives
    }

    pub fn false_positives(&self) -> &CnvTable {
        &self.false_positives
    }

    /// Calls without coordinates
    pub fn excluded(&self) -> &CnvTable {
        &self.excluded
    }

    /// Total number of calls that were classified, including the excluded ones
    pub fn total(&self) -> usize {
        self.true_positives.len() + self.false_positives.len() + self.excluded.len()
    }

    /// Copies of every call with the classification attached, in the original row order
    pub fn classified_records(&self) -> Vec<ClassifiedRecord> {
        let mut records: Vec<ClassifiedRecord> = self.true_positives.iter()
            .map(|r| ClassifiedRecord::new(r.clone(), Classification::TruePositive))
            .chain(self.false_positives.iter().map(|r| ClassifiedRecord::new(r.clone(), Classification::FalsePositive)))
            .chain(self.excluded.iter().map(|r| ClassifiedRecord::new(r.clone(), Classification::Unclassified)))
            .collect();
        records.sort_by_key(|cr| cr.record().row_index());
        records
    }
}

/// Classifies every record of `detected` against `reference`.
/// # Arguments
/// * `detected` - the calls to classify; each call is the query of the fraction predicate
/// * `reference` - the gold-standard calls
/// * `min_fraction` - minimum fraction of the call length that must be covered by one reference call
pub fn classify(detected: &CnvTable, reference: &CnvTable, min_fraction: f64) -> ClassifiedCalls {
    let policy = OverlapPolicy::Fraction { min_fraction };
    let reference_index = IntervalIndex::new(reference);

    let labels: Vec<Classification> = detected.records().par_iter()
        .map(|record| match record.region() {
            Some(region) => {
                if reference_index.any_match(policy, region) {
                    Classification::TruePositive
                } else {
                    Classification::FalsePositive
                }
            },
            None => Classification::Unclassified
        })
        .collect();

    let mut true_positives: Vec<CnvRecord> = vec![];
    let mut false_positives: Vec<CnvRecord> = vec![];
    let mut excluded: Vec<CnvRecord> = vec![];
    for (record, label) in detected.iter().zip(labels) {
        let bucket = match label {
            Classification::TruePositive => &mut true_positives,
            Classification::FalsePositive => &mut false_positives,
            Classification::Unclassified => &mut excluded
        };
        bucket.push(record.clone());
    }

    let label = detected.label().to_string();
    ClassifiedCalls {
        true_positives: CnvTable::new(label.clone(), true_positives),
        false_positives: CnvTable::new(label.clone(), false_positives),
        excluded: CnvTable::new(label, excluded)
    }
}
