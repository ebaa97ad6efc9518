
/// A table as it comes out of a file: a header row and string cells.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawTable {
    /// Column names in file order
    headers: Vec<String>,
    /// Data rows; a row may be shorter than the header
    rows: Vec<Vec<String>>
}

impl RawTable {
    /// Constructor
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    // getters
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Returns a cell, treating cells past the end of a short row as empty
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows.get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        let table = RawTable::new(
            vec!["Chr".to_string(), "Start".to_string(), "End".to_string()],
            vec![
                vec!["1".to_string(), "100".to_string(), "200".to_string()],
                vec!["2".to_string()],
            ]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_index("Start"), Some(1));
        assert_eq!(table.column_index("start"), None);
        assert_eq!(table.cell(0, 2), "200");
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(5, 0), "");
    }
}
