/*!
# Tolerance-based set matcher
For each input table, splits its records into those that agree with *every* other table and those that agree with *no* other table.
Agreement is the tolerance-mode overlap predicate.
Records that agree with some, but not all, other tables are in neither partition.
Records without coordinates are set aside as excluded.

## Example usage
```rust
use cnvbench::data_types::chromosome::Chromosome;
use cnvbench::data_types::cnv_record::CnvRecord;
use cnvbench::data_types::cnv_table::CnvTable;
use cnvbench::set_matcher::match_tolerance;

let chr1 = Chromosome::from(1);
let a = CnvTable::new("a".to_string(), vec![
    CnvRecord::from_coordinates("a", 0, chr1.clone(), 1_000_000, 1_200_000),
    CnvRecord::from_coordinates("a", 1, chr1.clone(), 5_000_000, 5_100_000),
]);
let b = CnvTable::new("b".to_string(), vec![
    CnvRecord::from_coordinates("b", 0, chr1.clone(), 1_220_000, 1_300_000),
]);

let partitions = match_tolerance(&[a, b], 50_000);
assert_eq!(partitions[0].common().len(), 1);
assert_eq!(partitions[0].unique().len(), 1);
assert_eq!(partitions[1].common().len(), 1);
assert!(partitions[1].unique().is_empty());
```
*/
use rayon::prelude::*;

use crate::data_types::cnv_record::CnvRecord;
use crate::data_types::cnv_table::CnvTable;
use crate::interval_index::IntervalIndex;
use crate::overlap::OverlapPolicy;

/// The common/unique view of one input table
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SetPartition {
    /// Records matching every other table
    common: CnvTable,
    /// Records matching no other table
    unique: CnvTable,
    /// Records without coordinates, which are never tested
    excluded: CnvTable
}

impl SetPartition {
    // getters
    pub fn label(&self) -> &str {
        self.common.label()
    }

    pub fn common(&self) -> &CnvTable {
        &self.common
    }

    pub fn unique(&self) -> &CnvTable {
        &self.unique
    }

    pub fn excluded(&self) -> &CnvTable {
        &self.excluded
    }
}

/// Computes the common and unique partitions for every input table.
/// With a single table, the "every other table" condition is vacuous, so each well-formed record is both common and unique.
/// # Arguments
/// * `tables` - all input tables; the output is in the same order
/// * `tolerance` - the boundary expansion in bp
pub fn match_tolerance(tables: &[CnvTable], tolerance: u64) -> Vec<SetPartition> {
    let policy = OverlapPolicy::Tolerance { tolerance };
    let indices: Vec<IntervalIndex> = tables.iter()
        .map(IntervalIndex::new)
        .collect();

    tables.iter().enumerate()
        .map(|(table_index, table)| partition_table(table_index, table, &indices, policy))
        .collect()
}

/// Partitions one table against all the other indices
fn partition_table(table_index: usize, table: &CnvTable, indices: &[IntervalIndex], policy: OverlapPolicy) -> SetPartition {
    let num_others = indices.len() - 1;

    // None means the record has no coordinates
    let hit_counts: Vec<Option<usize>> = table.records().par_iter()
        .map(|record| {
            record.region().map(|region| {
                indices.iter().enumerate()
                    .filter(|&(other_index, other)| other_index != table_index && other.any_match(policy, region))
                    .count()
            })
        })
        .collect();

    let mut common: Vec<CnvRecord> = vec![];
    let mut unique: Vec<CnvRecord> = vec![];
    let mut excluded: Vec<CnvRecord> = vec![];
    for (record, opt_hits) in table.iter().zip(hit_counts) {
        match opt_hits {
            Some(hits) => {
                if hits == num_others {
                    common.push(record.clone());
                }
                if hits == 0 {
                    unique.push(record.clone());
                }
            },
            None => excluded.push(record.clone())
        }
    }

    let label = table.label().to_string();
    SetPartition {
        common: CnvTable::new(label.clone(), common),
        unique: CnvTable::new(label.clone(), unique),
        excluded: CnvTable::new(label, excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::chromosome::Chromosome;
    use crate::data_types::cnv_record::RegionError;

    fn record(label: &str, row: usize, chrom: u32, start: u64, end: u64) -> CnvRecord {
        CnvRecord::from_coordinates(label, row, Chromosome::from(chrom), start, end)
    }

    fn row_indices(table: &CnvTable) -> Vec<usize> {
        table.iter().map(|r| r.row_index()).collect()
    }

    #[test]
    fn test_three_way() {
        let gs = CnvTable::new("gs".to_string(), vec![
            // everywhere
            record("gs", 0, 1, 1_000_000, 1_500_000),
            // only in nx
            record("gs", 1, 2, 3_000_000, 3_100_000),
            // nowhere
            record("gs", 2, 3, 7_000_000, 7_100_000),
            // same coordinates as the first, but a different chromosome
            record("gs", 3, 4, 1_000_000, 1_500_000),
        ]);
        let nx = CnvTable::new("nx".to_string(), vec![
            record("nx", 0, 1, 1_540_000, 1_600_000),
            record("nx", 1, 2, 3_050_000, 3_150_000),
        ]);
        let gold = CnvTable::new("gold".to_string(), vec![
            record("gold", 0, 1, 900_000, 1_500_000),
        ]);

        let partitions = match_tolerance(&[gs, nx, gold], 50_000);
        assert_eq!(partitions.len(), 3);

        assert_eq!(partitions[0].label(), "gs");
        assert_eq!(row_indices(partitions[0].common()), vec![0]);
        assert_eq!(row_indices(partitions[0].unique()), vec![2, 3]);

        assert_eq!(row_indices(partitions[1].common()), vec![0]);
        assert!(partitions[1].unique().is_empty());

        assert_eq!(row_indices(partitions[2].common()), vec![0]);
        assert!(partitions[2].unique().is_empty());
    }

    #[test]
    fn test_excluded_records() {
        let bad = CnvRecord::new(
            "nx".to_string(), 1,
            Err(RegionError::MalformedRegion { raw: "bad-string".to_string() }),
            Default::default()
        );
        let nx = CnvTable::new("nx".to_string(), vec![record("nx", 0, 1, 100, 200), bad]);
        let gs = CnvTable::new("gs".to_string(), vec![record("gs", 0, 1, 100, 200)]);

        let partitions = match_tolerance(&[nx, gs], 0);
        assert_eq!(row_indices(partitions[0].common()), vec![0]);
        assert!(partitions[0].unique().is_empty());
        assert_eq!(row_indices(partitions[0].excluded()), vec![1]);
        assert_eq!(row_indices(partitions[1].common()), vec![0]);
    }

    #[test]
    fn test_empty_tables() {
        let gs = CnvTable::new("gs".to_string(), vec![record("gs", 0, 1, 100, 200)]);
        let empty = CnvTable::empty("nx");

        let partitions = match_tolerance(&[gs.clone(), empty], 50_000);
        assert!(partitions[0].common().is_empty());
        assert_eq!(partitions[0].unique().len(), 1);
        assert!(partitions[1].common().is_empty());
        assert!(partitions[1].unique().is_empty());

        // single table: vacuously common, and trivially unique
        let partitions = match_tolerance(&[gs], 50_000);
        assert_eq!(partitions[0].common().len(), 1);
        assert_eq!(partitions[0].unique().len(), 1);

        assert!(match_tolerance(&[], 50_000).is_empty());
    }

    #[test]
    fn test_duplicates_evaluated_independently() {
        let gs = CnvTable::new("gs".to_string(), vec![
            record("gs", 0, 1, 100, 200),
            record("gs", 1, 1, 100, 200),
        ]);
        let nx = CnvTable::new("nx".to_string(), vec![record("nx", 0, 1, 150, 250)]);
        let partitions = match_tolerance(&[gs, nx], 0);
        assert_eq!(row_indices(partitions[0].common()), vec![0, 1]);
    }
}
