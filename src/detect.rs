//! Missing-value detection.
//!
//! Detection is read-only: it counts sentinel cells per column and never
//! touches the table.

use indexmap::IndexMap;

use crate::missing::MissingSentinels;
use crate::table::{ColumnarTable, Table};

/// Count missing cells per column, in column order.
///
/// A table with no rows yields zeros sized to the header when there is one,
/// and an empty vector otherwise.
pub fn detect_missing(table: &Table, sentinels: &MissingSentinels) -> Vec<usize> {
    (0..table.width())
        .map(|col| {
            table
                .column(col)
                .filter(|cell| sentinels.is_missing(cell))
                .count()
        })
        .collect()
}

/// Count missing cells per named column of a typed table.
///
/// Column names in a [`ColumnarTable`] are unique, so the map has one entry
/// per column, in column order.
pub fn detect_missing_columns(
    table: &ColumnarTable,
    sentinels: &MissingSentinels,
) -> IndexMap<String, usize> {
    table
        .columns()
        .iter()
        .map(|column| {
            let missing = column
                .cells
                .iter()
                .filter(|cell| sentinels.is_missing(cell))
                .count();
            (column.name.clone(), missing)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use crate::types::ColumnKind;
    use proptest::prelude::*;

    #[test]
    fn test_detect_scenario() {
        let table = Table::from_rows(vec![
            vec!["1", "2", ""],
            vec!["4", "", "6"],
            vec!["7", "8", "9"],
        ])
        .unwrap();

        let counts = detect_missing(&table, &MissingSentinels::default());
        assert_eq!(counts, vec![0, 1, 1]);
    }

    #[test]
    fn test_detect_all_sentinel_spellings() {
        let table = Table::from_rows(vec![
            vec!["", "a"],
            vec!["NULL", "b"],
            vec!["null", "Null"],
        ])
        .unwrap();

        let counts = detect_missing(&table, &MissingSentinels::default());
        assert_eq!(counts, vec![3, 0]);
    }

    #[test]
    fn test_detect_empty_table_without_header() {
        let table = Table::from_rows(Vec::<Vec<String>>::new()).unwrap();
        let counts = detect_missing(&table, &MissingSentinels::default());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_detect_empty_table_with_header() {
        let table = Table::new(Some(vec!["a".into(), "b".into(), "c".into()]), vec![]).unwrap();
        let counts = detect_missing(&table, &MissingSentinels::default());
        assert_eq!(counts, vec![0, 0, 0]);
    }

    #[test]
    fn test_detect_custom_sentinels() {
        let table = Table::from_rows(vec![vec!["NA", ""], vec!["1", "2"]]).unwrap();
        let counts = detect_missing(&table, &MissingSentinels::new(["NA"]));
        assert_eq!(counts, vec![1, 0]);
    }

    #[test]
    fn test_detect_columns_by_name() {
        let table = ColumnarTable::new(vec![
            Column::new("ID", ColumnKind::Numeric, vec!["1".into(), "2".into(), "3".into()]),
            Column::new("Name", ColumnKind::Categorical, vec!["Alice".into(), "".into(), "Eve".into()]),
            Column::new("Age", ColumnKind::Numeric, vec!["25".into(), "null".into(), "".into()]),
        ])
        .unwrap();

        let counts = detect_missing_columns(&table, &MissingSentinels::default());
        let keys: Vec<_> = counts.keys().cloned().collect();
        assert_eq!(keys, vec!["ID", "Name", "Age"]);
        assert_eq!(counts["ID"], 0);
        assert_eq!(counts["Name"], 1);
        assert_eq!(counts["Age"], 2);
    }

    fn cell() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("NULL".to_string()),
            Just("null".to_string()),
            Just("Null".to_string()),
            "[a-z]{1,4}",
            (-1000i32..1000).prop_map(|v| v.to_string()),
        ]
    }

    fn table_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
        (1usize..6, 0usize..12).prop_flat_map(|(width, height)| {
            prop::collection::vec(prop::collection::vec(cell(), width), height)
        })
    }

    fn headed_table_strategy() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
        (1usize..6, 0usize..12).prop_flat_map(|(width, height)| {
            (
                prop::collection::vec(prop_oneof![Just("a"), Just("b"), Just("a_2")], width)
                    .prop_map(|names| names.into_iter().map(String::from).collect()),
                prop::collection::vec(prop::collection::vec(cell(), width), height),
            )
        })
    }

    fn brute_force(rows: &[Vec<String>]) -> usize {
        rows.iter()
            .flatten()
            .filter(|c| c.is_empty() || *c == "NULL" || *c == "null")
            .count()
    }

    #[test]
    fn test_detect_columns_with_repeated_headers() {
        let table = Table::new(
            Some(vec!["a".into(), "a".into()]),
            vec![vec!["".into(), "".into()], vec!["1".into(), "".into()]],
        )
        .unwrap();
        let sentinels = MissingSentinels::default();

        let by_rows = detect_missing(&table, &sentinels);
        let by_columns = detect_missing_columns(&table.to_columnar(&sentinels, 0.5), &sentinels);

        assert_eq!(by_rows, vec![1, 2]);
        assert_eq!(by_columns.len(), 2);
        assert_eq!(by_columns["a"], 1);
        assert_eq!(by_columns["a_2"], 2);
    }

    proptest! {
        #[test]
        fn prop_columnar_total_matches_brute_force((header, rows) in headed_table_strategy()) {
            let sentinels = MissingSentinels::default();
            let table = Table::new(Some(header), rows.clone()).unwrap();
            let view = table.to_columnar(&sentinels, 0.5);
            let counts = detect_missing_columns(&view, &sentinels);

            prop_assert_eq!(counts.len(), table.width());
            prop_assert_eq!(counts.values().sum::<usize>(), brute_force(&rows));
            prop_assert_eq!(
                counts.values().copied().collect::<Vec<_>>(),
                detect_missing(&table, &sentinels)
            );
        }

        #[test]
        fn prop_total_matches_brute_force(rows in table_strategy()) {
            let table = Table::from_rows(rows.clone()).unwrap();
            let counts = detect_missing(&table, &MissingSentinels::default());
            prop_assert_eq!(counts.iter().sum::<usize>(), brute_force(&rows));
        }
    }
}
