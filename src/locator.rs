use crate::models::{cell, RawTable};

/// Case-insensitive comparison after trimming both sides.
pub fn keys_match(candidate: &str, key: &str) -> bool {
    candidate.trim().to_lowercase() == key.trim().to_lowercase()
}

/// First row whose `key_column` cell matches `key`. Duplicate keys resolve to
/// the earliest row. A blank key never matches.
pub fn locate_row<'a>(table: &'a RawTable, key_column: usize, key: &str) -> Option<&'a [String]> {
    if key.trim().is_empty() {
        return None;
    }

    table
        .rows
        .iter()
        .map(Vec::as_slice)
        .find(|row| keys_match(cell(row, key_column), key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            rows.iter()
                .map(|row| row.iter().map(|value| value.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn empty_table_is_not_found() {
        assert!(locate_row(&RawTable::default(), 1, "avery@example.com").is_none());
    }

    #[test]
    fn headers_only_table_is_not_found() {
        let rows = table(&[&["", "", "Wk 1 Monday"], &["", "", "Intro"]]);
        assert!(locate_row(&rows, 1, "avery@example.com").is_none());
    }

    #[test]
    fn matches_ignore_case_and_surrounding_space() {
        let rows = table(&[
            &["Name", "Email"],
            &["Avery Lee", "  Avery.Lee@Example.com "],
        ]);
        let row = locate_row(&rows, 1, "avery.lee@example.com").unwrap();
        assert_eq!(row[0], "Avery Lee");
    }

    #[test]
    fn duplicate_keys_resolve_to_first_row() {
        let rows = table(&[
            &["Jules Moreno", "jules@example.com"],
            &["Jules Moreno (dup)", "jules@example.com"],
        ]);
        let row = locate_row(&rows, 1, "JULES@example.com").unwrap();
        assert_eq!(row[0], "Jules Moreno");
    }

    #[test]
    fn rows_missing_the_key_column_are_skipped() {
        let rows = table(&[&["Kiara Patel"], &["Kiara Patel", "kiara@example.com"]]);
        assert!(locate_row(&rows, 1, "kiara@example.com").is_some());
        assert!(locate_row(&rows, 1, "").is_none());
    }
}
