use rayon::prelude::*;

use crate::data_types::cnv_record::CnvRecord;
use crate::data_types::cnv_table::CnvTable;
use crate::interval_index::IntervalIndex;
use crate::overlap::OverlapPolicy;

/// Returns the reference calls that no detected call matches under the tolerance policy.
/// Every reference call is tested against the union of all detected tables, so a match in any one table removes it.
/// With no detected calls at all, every reference call with coordinates is a false negative.
/// Reference calls without coordinates are never reported.
/// # Arguments
/// * `reference` - the gold-standard calls
/// * `detected_tables` - calls from one or more tools; may be empty
/// * `tolerance` - the boundary expansion in bp
pub fn find_false_negatives(reference: &CnvTable, detected_tables: &[CnvTable], tolerance: u64) -> CnvTable {
    let policy = OverlapPolicy::Tolerance { tolerance };
    let indices: Vec<IntervalIndex> = detected_tables.iter()
        .map(IntervalIndex::new)
        .collect();

    let is_missed: Vec<bool> = reference.records().par_iter()
        .map(|record| match record.region() {
            Some(region) => !indices.iter().any(|index| index.any_match(policy, region)),
            None => false
        })
        .collect();

    let missed: Vec<CnvRecord> = reference.iter().zip(is_missed)
        .filter_map(|(record, missed)| if missed { Some(record.clone()) } else { None })
        .collect();
    CnvTable::new(reference.label().to_string(), missed)
}
