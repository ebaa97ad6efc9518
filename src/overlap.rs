/*!
# Overlap predicate
Decides whether two CNV intervals "match".
There are two policies:
* `Tolerance` - both boundaries are expanded by a fixed margin, so near-adjacent calls match even with no true overlap
* `Fraction` - the true overlap must cover at least `min_fraction` of the *query* length

The fraction policy is asymmetric: the denominator is always the query interval.
A small call fully inside a large reference call has a fraction of 1.0, while the large call only covers a small fraction of itself.

## Example usage
```rust
use cnvbench::data_types::chromosome::Chromosome;
use cnvbench::data_types::cnv_record::GenomicRegion;
use cnvbench::overlap::{regions_overlap, OverlapPolicy};

let small = GenomicRegion::new(Chromosome::from(1), 100, 200);
let large = GenomicRegion::new(Chromosome::from(1), 100, 1000);
let policy = OverlapPolicy::Fraction { min_fraction: 0.5 };
assert!(regions_overlap(policy, &small, &large));
assert!(!regions_overlap(policy, &large, &small));
```
*/
use crate::data_types::cnv_record::GenomicRegion;

/// Default boundary expansion for tolerance matching, in bp
pub const DEFAULT_TOLERANCE: u64 = 50_000;
/// Default minimum covered fraction of the query for fraction matching
pub const DEFAULT_MIN_FRACTION: f64 = 0.5;

/// Controls how two intervals are compared
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlapPolicy {
    /// Match iff `start_b - tolerance <= end_a` and `end_b + tolerance >= start_a`
    Tolerance { tolerance: u64 },
    /// Match iff the true overlap is positive and covers at least `min_fraction` of the query length
    Fraction { min_fraction: f64 }
}

impl Default for OverlapPolicy {
    fn default() -> Self {
        OverlapPolicy::Tolerance { tolerance: DEFAULT_TOLERANCE }
    }
}

impl OverlapPolicy {
    /// The window (low, high) of coordinates a target must intersect to possibly match the query.
    /// This is used to pre-filter candidates from an interval index; the result is a hull, so the exact predicate must still be applied.
    pub fn candidate_window(&self, query: &GenomicRegion) -> (u64, u64) {
        let (low, high) = match self {
            OverlapPolicy::Tolerance { tolerance } => {
                (query.start().saturating_sub(*tolerance), query.end().saturating_add(*tolerance))
            },
            OverlapPolicy::Fraction { .. } => (query.start(), query.end())
        };
        (low.min(high), low.max(high))
    }
}

/// Returns true if `query` matches `target` under the given policy.
/// Regions on different chromosomes never match.
/// # Arguments
/// * `policy` - the comparison policy
/// * `query` - the interval being tested, A; its length is the denominator in fraction mode
/// * `target` - the interval being tested against, B
pub fn regions_overlap(policy: OverlapPolicy, query: &GenomicRegion, target: &GenomicRegion) -> bool {
    if query.chrom() != target.chrom() {
        return false;
    }

    match policy {
        OverlapPolicy::Tolerance { tolerance } => {
            // start_b - t <= end_a && end_b + t >= start_a, rearranged to stay unsigned
            target.start() <= query.end().saturating_add(tolerance) &&
                target.end().saturating_add(tolerance) >= query.start()
        },
        OverlapPolicy::Fraction { min_fraction } => {
            let query_length = match query.length() {
                Some(l) => l,
                // degenerate queries have no usable denominator
                None => return false
            };

            let overlap_end = query.end().min(target.end());
            let overlap_start = query.start().max(target.start());
            if overlap_end <= overlap_start {
                return false;
            }
            let overlap = overlap_end - overlap_start;
            overlap as f64 / query_length as f64 >= min_fraction
        }
    }
}
