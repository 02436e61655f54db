/// Parsed CSV feed: one header row plus data rows.
///
/// Produced fresh on every feed load and replaced wholesale on refresh;
/// nothing mutates a table after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeedTable {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// The empty-table sentinel handed to the renderer when a fetch fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a CSV document body into a table.
    ///
    /// The reader is strict: rows whose field count differs from the header
    /// are a parse error, so every returned row has exactly one cell per
    /// header.
    ///
    /// # Errors
    ///
    /// Returns the underlying `csv::Error` when the body is not valid CSV.
    pub fn parse(body: &str) -> Result<Self, csv::Error> {
        let mut reader = csv::Reader::from_reader(body.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(ToOwned::to_owned)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(ToOwned::to_owned).collect());
        }

        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header does not count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `column`), trimmed; `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(|c| c.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_headers_and_rows() {
        let body = "store_id,store_name\nS1,Alpha\nS2,Beta\n";
        let table = FeedTable::parse(body).expect("parse");
        assert_eq!(table.headers(), ["store_id", "store_name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), Some("S1"));
        assert_eq!(table.cell(1, 1), Some("Beta"));
    }

    #[test]
    fn parse_handles_quoted_fields_with_commas() {
        let body = "store_id,inactive_dsps\nS1,\"DoorDash, UberEats\"\n";
        let table = FeedTable::parse(body).expect("parse");
        assert_eq!(table.cell(0, 1), Some("DoorDash, UberEats"));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let body = "a,b\n1,2,3\n";
        let result = FeedTable::parse(body);
        assert!(result.is_err(), "expected parse error, got: {result:?}");
    }

    #[test]
    fn parse_of_header_only_body_yields_empty_table() {
        let table = FeedTable::parse("store_id,store_name\n").expect("parse");
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 2);
    }

    #[test]
    fn cell_out_of_bounds_is_none() {
        let table = FeedTable::parse("a\nx\n").expect("parse");
        assert_eq!(table.cell(0, 5), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn cell_trims_surrounding_whitespace() {
        let table = FeedTable::parse("a,b\n x , y\n").expect("parse");
        assert_eq!(table.cell(0, 0), Some("x"));
        assert_eq!(table.cell(0, 1), Some("y"));
    }
}
