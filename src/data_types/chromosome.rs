
/// A normalized chromosome token.
/// Tools encode chromosomes inconsistently ("chr1", "1", "01", 1.0 from a spreadsheet), so everything is reduced to a single canonical string.
/// Chromosomes are only ever compared for equality; there is intentionally no `Ord` implementation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Chromosome(String);

impl Chromosome {
    /// Parses a raw chromosome value into the canonical token.
    /// Accepted tokens are numbered chromosomes, X, Y, and the mitochondrial M / MT (reported as "MT").
    /// Returns None for anything else, e.g. contigs like "1_random" or words like "chrom7".
    /// # Arguments
    /// * `raw` - the raw value, e.g. "chr7", "7", "07", "7.0", "x"
    /// # Examples
    /// ```rust
    /// use cnvbench::data_types::chromosome::Chromosome;
    /// assert_eq!(Chromosome::parse("chr01"), Chromosome::parse("1"));
    /// assert_eq!(Chromosome::parse("chrx").unwrap().as_str(), "X");
    /// assert!(Chromosome::parse("chr 1").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let mut token = raw.trim();

        // case-insensitive "chr" prefix
        if token.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("chr")) {
            token = &token[3..];
        }

        // integer-valued float cells, e.g. "7.0" from a spreadsheet export
        if let Some(stripped) = token.strip_suffix(".0") {
            if !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit()) {
                token = stripped;
            }
        }

        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = token.trim_start_matches('0');
            return if trimmed.is_empty() {
                None
            } else {
                Some(Self(trimmed.to_string()))
            };
        }

        match token.to_ascii_uppercase().as_str() {
            "X" => Some(Self("X".to_string())),
            "Y" => Some(Self("Y".to_string())),
            "M" | "MT" => Some(Self("MT".to_string())),
            _ => None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for Chromosome {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encodings() {
        let expected = Chromosome::from(1);
        for raw in ["1", "chr1", "CHR1", "Chr01", "01", "1.0", " 1 "] {
            assert_eq!(Chromosome::parse(raw), Some(expected.clone()), "raw = {raw:?}");
        }
        assert_ne!(Chromosome::parse("1"), Chromosome::parse("11"));
        assert_eq!(Chromosome::parse("10").unwrap().as_str(), "10");
    }

    #[test]
    fn test_sex_chromosomes() {
        assert_eq!(Chromosome::parse("x").unwrap().as_str(), "X");
        assert_eq!(Chromosome::parse("chrY").unwrap().as_str(), "Y");
        assert_ne!(Chromosome::parse("X"), Chromosome::parse("Y"));
        assert_eq!(Chromosome::parse("chrMT").unwrap().as_str(), "MT");
        assert_eq!(Chromosome::parse("chrM"), Chromosome::parse("MT"));
    }

    #[test]
    fn test_invalid() {
        assert!(Chromosome::parse("").is_none());
        assert!(Chromosome::parse("chr").is_none());
        assert!(Chromosome::parse("1.5").is_none());
        assert!(Chromosome::parse("chr1_random-2").is_none());
        assert!(Chromosome::parse("0").is_none());
        assert!(Chromosome::parse("chrom7").is_none());
        assert!(Chromosome::parse("OM7").is_none());
        assert!(Chromosome::parse("chrUn").is_none());
    }
}
