use indexmap::IndexMap;

use crate::data_types::chromosome::Chromosome;

/// Reasons a record ended up without usable coordinates.
/// These never abort a table; the record is kept with absent coordinates and excluded from every overlap test.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum RegionError {
    #[error("unparseable region string: {raw:?}")]
    MalformedRegion { raw: String },
    #[error("missing value in column {column:?}")]
    MissingValue { column: String },
    #[error("invalid value in column {column:?}: {raw:?}")]
    InvalidValue { column: String, raw: String },
}

/// A chromosome and a pair of coordinates in bp.
/// Coordinates are stored exactly as provided, so a region can be degenerate (end <= start).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GenomicRegion {
    /// Normalized chromosome token
    chrom: Chromosome,
    /// Start coordinate
    start: u64,
    /// End coordinate
    end: u64
}

impl GenomicRegion {
    /// Constructor
    pub fn new(chrom: Chromosome, start: u64, end: u64) -> Self {
        Self { chrom, start, end }
    }

    // getters
    pub fn chrom(&self) -> &Chromosome {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Length of the region, which is only Some for well-formed regions (start < end).
    pub fn length(&self) -> Option<u64> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.end - self.start)
        }
    }

    /// Returns true if end <= start.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

impl std::fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// One CNV call from one source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CnvRecord {
    /// The tool or dataset that produced this call
    source_label: String,
    /// 0-based row in the raw table
    row_index: usize,
    /// The parsed region, or why it could not be parsed
    region: Result<GenomicRegion, RegionError>,
    /// Raw columns that were not consumed by the field mapping, in header order
    fields: IndexMap<String, String>
}

impl CnvRecord {
    /// General constructor
    /// # Arguments
    /// * `source_label` - the source of the call
    /// * `row_index` - row in the raw table
    /// * `region` - the parsed region or the parsing failure
    /// * `fields` - pass-through columns
    pub fn new(
        source_label: String, row_index: usize,
        region: Result<GenomicRegion, RegionError>, fields: IndexMap<String, String>
    ) -> Self {
        Self {
            source_label, row_index, region, fields
        }
    }

    /// Shortcut for a record with coordinates and no extra columns, mostly useful for tests and small tables.
    pub fn from_coordinates(source_label: &str, row_index: usize, chrom: Chromosome, start: u64, end: u64) -> Self {
        Self::new(
            source_label.to_string(), row_index,
            Ok(GenomicRegion::new(chrom, start, end)), Default::default()
        )
    }

    // getters
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// The region, if the coordinates are present
    pub fn region(&self) -> Option<&GenomicRegion> {
        self.region.as_ref().ok()
    }

    /// The reason coordinates are absent, if they are
    pub fn issue(&self) -> Option<&RegionError> {
        self.region.as_ref().err()
    }

    pub fn chromosome(&self) -> Option<&Chromosome> {
        self.region().map(|r| r.chrom())
    }

    pub fn start_pos(&self) -> Option<u64> {
        self.region().map(|r| r.start())
    }

    pub fn end_pos(&self) -> Option<u64> {
        self.region().map(|r| r.end())
    }

    pub fn length(&self) -> Option<u64> {
        self.region().and_then(|r| r.length())
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }
}
