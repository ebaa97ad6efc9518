use lazy_static::lazy_static;
use regex::Regex;

use crate::data_types::chromosome::Chromosome;
use crate::data_types::cnv_record::{GenomicRegion, RegionError};

lazy_static! {
    /// `[chr]<chrom>:<start>-<end>`; coordinates may carry dot (or comma) thousands separators.
    /// The chromosome is a number, X, Y, or M/MT.
    /// Only the start of the string is anchored, trailing annotations are ignored.
    static ref REGION_PATTERN: Regex = Regex::new(
        r"^\s*(?i:chr)?([0-9]+|(?i:x|y|mt?))\s*:\s*([0-9.,]+)\s*-\s*([0-9.,]+)"
    ).expect("region pattern is valid");
}

/// Parses a combined region string such as "chr7:1.234.567-1.400.000".
/// Separators are removed before integer conversion, so "12.345.678" is 12345678 and never a decimal.
/// # Arguments
/// * `raw` - the region string
/// # Errors
/// * `RegionError::MalformedRegion` if the string does not follow the pattern or a coordinate does not fit an integer
pub fn parse_region(raw: &str) -> Result<GenomicRegion, RegionError> {
    let malformed = || RegionError::MalformedRegion { raw: raw.to_string() };

    let captures = REGION_PATTERN.captures(raw).ok_or_else(malformed)?;
    let chrom = Chromosome::parse(&captures[1]).ok_or_else(malformed)?;
    let start = parse_grouped_integer(&captures[2]).ok_or_else(malformed)?;
    let end = parse_grouped_integer(&captures[3]).ok_or_else(malformed)?;
    Ok(GenomicRegion::new(chrom, start, end))
}

/// Strips all group separators and parses the remaining digits
fn parse_grouped_integer(token: &str) -> Option<u64> {
    let digits: String = token.chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
