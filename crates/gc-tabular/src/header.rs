//! Header-row location and column mapping.
//!
//! Header detection is not the parser's job: files can start with metadata
//! or comment rows, so the loader scans for a first cell matching an
//! expected keyword instead of assuming row zero.

use std::collections::HashMap;

/// Index of the first row whose first cell equals `keyword`.
pub fn find_header_row(rows: &[Vec<String>], keyword: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.first().is_some_and(|cell| cell == keyword))
}

/// Map from trimmed header-cell text to column index.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn new(header_row: &[String]) -> Self {
        let mut columns = HashMap::new();
        for (index, cell) in header_row.iter().enumerate() {
            let trimmed = cell.trim();
            if !trimmed.is_empty() {
                columns.entry(trimmed.to_string()).or_insert(index);
            }
        }
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Trimmed cell of `row` under the column named `name`, if both exist
    /// and the cell is non-empty.
    pub fn cell<'a>(&self, row: &'a [String], name: &str) -> Option<&'a str> {
        let index = self.column(name)?;
        let cell = row.get(index)?.trim();
        (!cell.is_empty()).then_some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn header_found_past_leading_metadata() {
        let rows = parse("# exported 2024\nsource,GA\nprovider,providerName\ngcp,Google Cloud\n");
        assert_eq!(find_header_row(&rows, "provider"), Some(2));
    }

    #[test]
    fn header_absent() {
        let rows = parse("a,b\nc,d\n");
        assert_eq!(find_header_row(&rows, "provider"), None);
    }

    #[test]
    fn cell_lookup_trims_and_skips_empty() {
        let rows = parse("provider, providerName \naws,\n");
        let map = HeaderMap::new(&rows[0]);
        assert_eq!(map.column("provider"), Some(0));
        assert_eq!(map.column("providerName"), Some(1));
        assert_eq!(map.cell(&rows[1], "provider"), Some("aws"));
        assert_eq!(map.cell(&rows[1], "providerName"), None);
        assert_eq!(map.cell(&rows[1], "missing"), None);
    }
}
