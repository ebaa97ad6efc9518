use coitrees::{COITree, Interval, IntervalTree};
use rustc_hash::FxHashMap as HashMap;

use crate::data_types::chromosome::Chromosome;
use crate::data_types::cnv_record::GenomicRegion;
use crate::data_types::cnv_table::CnvTable;
use crate::overlap::{regions_overlap, OverlapPolicy};

/// Per-chromosome interval trees over the well-formed records of a single table.
/// Trees hold the hull of each region, so lookups return a superset of candidates that is then filtered with the exact predicate.
/// Records with absent coordinates are never indexed.
pub struct IntervalIndex<'a> {
    /// The table being indexed
    table: &'a CnvTable,
    /// Lookup from a chromosome to a COITree, which has 0-based inclusive ranges; metadata is the record index
    lookup_trees: HashMap<Chromosome, COITree<usize, usize>>
}

impl std::fmt::Debug for IntervalIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // COITree does not have Debug, so lets just convert it to a length for simplicity
        let lookup_counts: HashMap<&Chromosome, usize> = self.lookup_trees.iter()
            .map(|(c, t)| (c, t.len()))
            .collect();
        f.debug_struct("IntervalIndex")
            .field("label", &self.table.label())
            .field("lookup_trees_len", &lookup_counts)
            .finish()
    }
}

impl<'a> IntervalIndex<'a> {
    /// Builds the index for a table
    pub fn new(table: &'a CnvTable) -> Self {
        let mut chrom_intervals: HashMap<Chromosome, Vec<Interval<usize>>> = Default::default();
        for (record_index, record) in table.iter().enumerate() {
            if let Some(region) = record.region() {
                let (first, last) = hull(region.start(), region.end());
                chrom_intervals.entry(region.chrom().clone())
                    .or_default()
                    .push(Interval::new(first, last, record_index));
            }
        }

        let lookup_trees = chrom_intervals.into_iter()
            .map(|(chrom, intervals)| (chrom, COITree::new(&intervals)))
            .collect();

        Self {
            table, lookup_trees
        }
    }

    /// Returns true if any indexed record matches `query` under `policy`.
    /// # Arguments
    /// * `policy` - the overlap policy; `query` is the A interval of the predicate
    /// * `query` - the region being looked up
    pub fn any_match(&self, policy: OverlapPolicy, query: &GenomicRegion) -> bool {
        let coi_tree = match self.lookup_trees.get(query.chrom()) {
            Some(t) => t,
            None => return false
        };

        let (low, high) = policy.candidate_window(query);
        let (first, last) = hull(low, high);
        let mut found = false;
        coi_tree.query(first, last, |node| {
            if !found {
                // metadata is `usize` or `&usize` depending on the tree backend
                let record_index: usize = node.metadata.clone();
                // only indexed records have a region, so this always resolves
                if let Some(target) = self.table.records()[record_index].region() {
                    found = regions_overlap(policy, query, target);
                }
            }
        });
        found
    }
}

/// Converts a coordinate pair into an ordered, inclusive COITree range.
/// Values beyond i32 are clamped, which keeps the ordering monotone so candidate sets stay supersets.
fn hull(a: u64, b: u64) -> (i32, i32) {
    let low = clamp_coordinate(a.min(b));
    let high = clamp_coordinate(a.max(b));
    (low, high)
}

fn clamp_coordinate(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
