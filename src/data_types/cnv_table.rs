
use crate::data_types::cnv_record::CnvRecord;

/// An ordered collection of CNV calls from one source.
/// Order is insertion order and carries no meaning; duplicate intervals are legal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CnvTable {
    /// Label for the source of this table
    label: String,
    /// All records, including those with absent coordinates
    records: Vec<CnvRecord>
}

impl CnvTable {
    /// Constructor
    pub fn new(label: String, records: Vec<CnvRecord>) -> Self {
        Self { label, records }
    }

    /// Creates an empty table with the given label
    pub fn empty(label: &str) -> Self {
        Self::new(label.to_string(), vec![])
    }

    // getters
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn records(&self) -> &[CnvRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CnvRecord> {
        self.records.iter()
    }

    /// Number of records without usable coordinates
    pub fn absent_count(&self) -> usize {
        self.records.iter()
            .filter(|r| r.region().is_none())
            .count()
    }

    /// Number of records with coordinates where end <= start
    pub fn degenerate_count(&self) -> usize {
        self.records.iter()
            .filter(|r| r.region().is_some_and(|region| region.is_degenerate()))
            .count()
    }
}

impl<'a> IntoIterator for &'a CnvTable {
    type Item = &'a CnvRecord;
    type IntoIter = std::slice::Iter<'a, CnvRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::chromosome::Chromosome;
    use crate::data_types::cnv_record::RegionError;

    #[test]
    fn test_counts() {
        let table = CnvTable::new("gs".to_string(), vec![
            CnvRecord::from_coordinates("gs", 0, Chromosome::from(1), 10, 20),
            CnvRecord::from_coordinates("gs", 1, Chromosome::from(1), 20, 20),
            CnvRecord::new(
                "gs".to_string(), 2,
                Err(RegionError::MissingValue { column: "Start".to_string() }),
                Default::default()
            ),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.absent_count(), 1);
        assert_eq!(table.degenerate_count(), 1);
        assert!(CnvTable::empty("gold").is_empty());
    }
}
