
use crate::data_types::cnv_record::CnvRecord;

/// Each detected call gets a classification relative to the reference set
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, strum_macros::AsRefStr)]
pub enum Classification {
    /// Absent coordinates, never tested
    #[default]
    #[strum(serialize = "UNK")]
    Unclassified=0,
    #[strum(serialize = "TP")]
    TruePositive,
    #[strum(serialize = "FP")]
    FalsePositive
}

/// A copy of a record with its derived classification attached.
/// The shared input table is never modified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassifiedRecord {
    record: CnvRecord,
    classification: Classification
}

impl ClassifiedRecord {
    pub fn new(record: CnvRecord, classification: Classification) -> Self {
        Self { record, classification }
    }

    pub fn record(&self) -> &CnvRecord {
        &self.record
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Classification::TruePositive.as_ref(), "TP");
        assert_eq!(Classification::FalsePositive.as_ref(), "FP");
        assert_eq!(Classification::default().as_ref(), "UNK");
    }
}
