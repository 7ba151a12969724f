//! Single-column sorting with a tri-state header toggle.

use std::cmp::Ordering;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::record::{Column, Record, Value};

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orient an ascending comparison result to this direction.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which icon a column header shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// The column can be sorted but is not the active key.
    Unsorted,
    Ascending,
    Descending,
}

/// Current sort key and direction.
///
/// There is no key without a direction: resetting the sort drops both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        key: String,
        direction: SortDirection,
    },
}

impl SortState {
    /// Create an active sort on `key`.
    pub fn sorted(key: impl Into<String>, direction: SortDirection) -> Self {
        SortState::Sorted {
            key: key.into(),
            direction,
        }
    }

    /// The active column key, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { key, .. } => Some(key),
        }
    }

    /// The active direction, if any.
    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { direction, .. } => Some(*direction),
        }
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self, SortState::Sorted { .. })
    }

    /// Compute the state after a header click on `column`.
    ///
    /// Clicking the active column walks ascending, descending, unsorted.
    /// Clicking any other sortable column starts over at ascending.
    /// Non-sortable columns leave the state unchanged.
    pub fn request(&self, column: &Column) -> SortState {
        if !column.sortable {
            trace!("Ignoring sort request on non-sortable column {}", column.key);
            return self.clone();
        }

        match self {
            SortState::Sorted {
                key,
                direction: SortDirection::Ascending,
            } if *key == column.key => SortState::sorted(key.clone(), SortDirection::Descending),
            SortState::Sorted {
                key,
                direction: SortDirection::Descending,
            } if *key == column.key => SortState::Unsorted,
            _ => SortState::sorted(column.key.clone(), SortDirection::Ascending),
        }
    }

    /// Header icon for the column with the given key.
    pub fn indicator(&self, column_key: &str) -> SortIndicator {
        match self {
            SortState::Sorted { key, direction } if key == column_key => match direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }
}

/// Return `records` ordered by `state`.
///
/// The input is never reordered. Ties keep their input order, so re-sorting
/// data that is already sorted by another key does not shuffle equal rows.
/// Records missing the sort field come last whatever the direction.
/// An unsorted state, or a key that names no column, returns the input order.
pub fn sort_records<R: Record>(records: &[R], columns: &[Column], state: &SortState) -> Vec<R> {
    let SortState::Sorted { key, direction } = state else {
        return records.to_vec();
    };
    let Some(column) = columns.iter().find(|c| &c.key == key) else {
        trace!("Sort key {} matches no column, keeping input order", key);
        return records.to_vec();
    };

    // Read each sort value once rather than on every comparison.
    let mut keyed: Vec<(Option<Value>, &R)> = records
        .iter()
        .map(|record| (record.field(&column.data_index), record))
        .collect();

    // Records without the field stay at the bottom in either direction.
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.compare(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Item {
        id: u32,
        v: &'static str,
        n: i64,
    }

    impl Record for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn field(&self, data_index: &str) -> Option<Value> {
            match data_index {
                "id" => Some(self.id.into()),
                "v" => Some(self.v.into()),
                "n" => Some(self.n.into()),
                _ => None,
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, v: "a", n: 30 },
            Item { id: 2, v: "a", n: 10 },
            Item { id: 3, v: "b", n: 20 },
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("v", "V").sortable(),
            Column::new("n", "N").sortable(),
            Column::new("id", "ID"),
        ]
    }

    fn ids(records: &[Item]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_direction_cycle() {
        let cols = columns();
        let k = &cols[0];
        let l = &cols[1];

        let state = SortState::Unsorted.request(k);
        assert_eq!(state, SortState::sorted("v", SortDirection::Ascending));
        let state = state.request(k);
        assert_eq!(state, SortState::sorted("v", SortDirection::Descending));
        assert_eq!(state.request(l), SortState::sorted("n", SortDirection::Ascending));
        assert_eq!(state.request(k), SortState::Unsorted);
    }

    #[test]
    fn test_other_column_from_ascending_starts_ascending() {
        let cols = columns();
        let state = SortState::sorted("v", SortDirection::Ascending);
        assert_eq!(
            state.request(&cols[1]),
            SortState::sorted("n", SortDirection::Ascending)
        );
    }

    #[test]
    fn test_non_sortable_request_is_noop() {
        let cols = columns();
        let state = SortState::sorted("v", SortDirection::Descending);
        assert_eq!(state.request(&cols[2]), state);
        assert_eq!(SortState::Unsorted.request(&cols[2]), SortState::Unsorted);
    }

    #[test]
    fn test_stable_ties() {
        let data = items();
        let cols = columns();

        let asc = sort_records(&data, &cols, &SortState::sorted("v", SortDirection::Ascending));
        assert_eq!(ids(&asc), vec![1, 2, 3]);

        let desc = sort_records(&data, &cols, &SortState::sorted("v", SortDirection::Descending));
        assert_eq!(ids(&desc), vec![3, 1, 2]);
    }

    #[test]
    fn test_numeric_sort() {
        let data = items();
        let cols = columns();
        let asc = sort_records(&data, &cols, &SortState::sorted("n", SortDirection::Ascending));
        assert_eq!(ids(&asc), vec![2, 3, 1]);
    }

    #[test]
    fn test_three_requests_restore_original_order() {
        let data = vec![
            Item { id: 7, v: "c", n: 0 },
            Item { id: 4, v: "a", n: 0 },
            Item { id: 9, v: "b", n: 0 },
        ];
        let cols = columns();
        let mut state = SortState::Unsorted;
        for _ in 0..3 {
            state = state.request(&cols[0]);
        }
        assert_eq!(state, SortState::Unsorted);
        assert_eq!(ids(&sort_records(&data, &cols, &state)), vec![7, 4, 9]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data = items();
        let _ = sort_records(&data, &columns(), &SortState::sorted("n", SortDirection::Ascending));
        assert_eq!(ids(&data), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_key_keeps_order() {
        let data = items();
        let sorted = sort_records(
            &data,
            &columns(),
            &SortState::sorted("missing", SortDirection::Descending),
        );
        assert_eq!(ids(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn test_indicator() {
        let state = SortState::sorted("v", SortDirection::Descending);
        assert_eq!(state.indicator("v"), SortIndicator::Descending);
        assert_eq!(state.indicator("n"), SortIndicator::Unsorted);
        assert_eq!(SortState::Unsorted.indicator("v"), SortIndicator::Unsorted);
    }
    #[derive(Clone, Debug)]
    struct Score {
        id: u32,
        score: Option<Value>,
    }

    impl Record for Score {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn field(&self, data_index: &str) -> Option<Value> {
            match data_index {
                "score" => self.score.clone(),
                _ => None,
            }
        }
    }

    /// Floats with NaN every fifth row, a missing field every seventh and
    /// the odd integer or text, in a scrambled order.
    fn scores() -> Vec<Score> {
        (0..64u32)
            .map(|id| {
                let score = match id {
                    _ if id % 7 == 3 => None,
                    _ if id % 5 == 0 => Some(Value::from(f64::NAN)),
                    _ if id % 11 == 4 => Some(Value::from("n/a")),
                    _ if id % 6 == 1 => Some(Value::from(i64::from(id % 13))),
                    _ => Some(Value::from(f64::from((id * 37) % 64) / 4.0)),
                };
                Score { id, score }
            })
            .collect()
    }

    fn is_ordered(rows: &[Score], direction: SortDirection) -> bool {
        let present: Vec<&Value> = rows.iter().filter_map(|r| r.score.as_ref()).collect();
        let missing_last = rows
            .iter()
            .skip(present.len())
            .all(|r| r.score.is_none());
        missing_last
            && present
                .windows(2)
                .all(|w| direction.apply(w[0].compare(w[1])) != Ordering::Greater)
    }

    #[test]
    fn test_sort_with_nan_mixed_and_missing_values() {
        let data = scores();
        let cols = vec![Column::new("score", "Score").sortable()];

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_records(&data, &cols, &SortState::sorted("score", direction));
            assert_eq!(sorted.len(), data.len());
            assert!(is_ordered(&sorted, direction), "{:?}", direction);
        }

        let asc = sort_records(
            &data,
            &cols,
            &SortState::sorted("score", SortDirection::Ascending),
        );
        let nan_ids: Vec<u32> = asc
            .iter()
            .filter(|r| matches!(r.score, Some(Value::Float(f)) if f.is_nan()))
            .map(|r| r.id)
            .collect();
        // NaN rows are tied, so they keep input order.
        assert!(nan_ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_short_float_column_with_nan() {
        let data = vec![
            Score { id: 1, score: Some(Value::from(3.0)) },
            Score { id: 2, score: Some(Value::from(f64::NAN)) },
            Score { id: 3, score: None },
            Score { id: 4, score: Some(Value::from(1.0)) },
        ];
        let cols = vec![Column::new("score", "Score").sortable()];
        let ids_of = |direction| {
            sort_records(&data, &cols, &SortState::sorted("score", direction))
                .iter()
                .map(|r| r.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids_of(SortDirection::Ascending), vec![4, 1, 2, 3]);
        assert_eq!(ids_of(SortDirection::Descending), vec![2, 1, 4, 3]);
    }
}
