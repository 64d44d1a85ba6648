//! Property-based tests for cleaning and the table model.
//!
//! ```bash
//! cargo test -p surveyprep --test property_tests
//! PROPTEST_CASES=10000 cargo test -p surveyprep --test property_tests
//! ```

use proptest::prelude::*;

use surveyprep::cleaning::{SURVEY_RULES, canonicalize, clean};
use surveyprep::table::{Column, ColumnType, Table, Value, from_json, to_json};
use surveyprep::transform::{MissingMethod, MissingTarget, handle_missing};

// =============================================================================
// Test Strategies
// =============================================================================

/// Answers that look like what respondents type.
fn answer() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Missing),
        "(?i)(yes|no|y|n|maybe|not sure|don't know|male|female|m|f|queer|nope|###|\\?)"
            .prop_map(Value::Text),
        "[a-zA-Z ,'#/\\-]{0,20}".prop_map(Value::Text),
    ]
}

fn age() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Missing),
        (-2000i64..2000).prop_map(Value::Int),
        (-100.0f64..200.0).prop_map(Value::Float),
        "[0-9]{1,3}(\\.[05])?".prop_map(Value::Text),
    ]
}

fn survey_table() -> impl Strategy<Value = Table> {
    (1usize..25).prop_flat_map(|rows| {
        (
            prop::collection::vec(age(), rows),
            prop::collection::vec(answer(), rows),
            prop::collection::vec(answer(), rows),
            prop::collection::vec(answer(), rows),
        )
            .prop_map(|(ages, genders, benefits, comments)| {
                Table::from_columns(vec![
                    Column::new("Age", ColumnType::Text, ages),
                    Column::new("Gender", ColumnType::Text, genders),
                    Column::new("benefits", ColumnType::Text, benefits),
                    Column::new("comments", ColumnType::Text, comments),
                ])
                .unwrap()
            })
    })
}

fn plain_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Missing),
        any::<i32>().prop_map(|i| Value::Int(i as i64)),
        "[a-z]{1,8}".prop_map(Value::Text),
        "20[0-9]{2}-(0[1-9]|1[0-2])-[0-2][1-9]T[01][0-9]:[0-5][0-9]:[0-5][0-9]\\.[0-9]{3}"
            .prop_map(Value::Text),
    ]
}

fn numeric_table() -> impl Strategy<Value = Table> {
    (1usize..30).prop_flat_map(|rows| {
        (
            prop::collection::vec(prop::option::of(-1000i64..1000), rows),
            prop::collection::vec(prop::option::of(-1e6f64..1e6), rows),
        )
            .prop_map(|(ints, floats)| {
                let ints = ints.into_iter().map(|v| v.map_or(Value::Missing, Value::Int));
                let floats = floats.into_iter().map(|v| v.map_or(Value::Missing, Value::float));
                Table::from_columns(vec![
                    Column::integer("count", ints.collect()),
                    Column::new("score", ColumnType::Float, floats.collect()),
                ])
                .unwrap()
            })
    })
}

// =============================================================================
// Canonicalization
// =============================================================================

proptest! {
    #[test]
    fn canonicalize_is_idempotent(table in survey_table()) {
        let once = canonicalize(table);
        let twice = canonicalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonicalize_preserves_shape(table in survey_table()) {
        let names = table.column_names();
        let rows = table.row_count();
        let out = canonicalize(table);
        prop_assert_eq!(out.column_names(), names);
        prop_assert_eq!(out.row_count(), rows);
    }

    #[test]
    fn closed_vocabularies_hold(table in survey_table()) {
        let out = clean(table);
        for name in ["Gender", "benefits"] {
            let labels = SURVEY_RULES.get(name).unwrap().labels();
            for value in &out.column(name).unwrap().values {
                if let Some(text) = value.render() {
                    prop_assert!(labels.contains(&text.as_str()), "{} not in {:?}", text, labels);
                }
            }
        }
        for age in out.column("Age").unwrap().numeric_values() {
            prop_assert!((18.0..=72.0).contains(&age));
        }
    }

    #[test]
    fn unruled_columns_untouched(table in survey_table()) {
        let comments = table.column("comments").unwrap().clone();
        let out = canonicalize(table);
        prop_assert_eq!(out.column("comments").unwrap(), &comments);
    }
}

// =============================================================================
// Wire format
// =============================================================================

proptest! {
    #[test]
    fn wire_round_trip_preserves_values(
        values in prop::collection::vec(plain_value(), 1..20),
        floats in prop::collection::vec(prop::option::of(-1e9f64..1e9), 1..20),
    ) {
        let rows = values.len().min(floats.len());
        let table = Table::from_columns(vec![
            Column::new("mixed", ColumnType::Text, values[..rows].to_vec()),
            Column::new(
                "x",
                ColumnType::Float,
                floats[..rows].iter().map(|v| v.map_or(Value::Missing, Value::float)).collect(),
            ),
        ])
        .unwrap();

        let decoded = from_json(&to_json(&table).unwrap()).unwrap();
        prop_assert_eq!(decoded.index(), table.index());
        prop_assert_eq!(decoded.column_names(), table.column_names());
        for name in table.column_names() {
            let before = &table.column(&name).unwrap().values;
            let after = &decoded.column(&name).unwrap().values;
            for (a, b) in before.iter().zip(after) {
                match (a, b) {
                    (Value::Float(x), Value::Int(y)) => prop_assert_eq!(*x, *y as f64),
                    _ => prop_assert_eq!(a, b),
                }
            }
        }
    }
}

// =============================================================================
// Missing values
// =============================================================================

proptest! {
    #[test]
    fn zero_fill_clears_missing_and_keeps_rows(table in numeric_table()) {
        let rows = table.row_count();
        let outcome = handle_missing(&table, &MissingTarget::All, MissingMethod::Zero, None).unwrap();
        prop_assert_eq!(outcome.table.missing_count(), 0);
        prop_assert_eq!(outcome.table.row_count(), rows);
        for name in table.column_names() {
            let before = &table.column(&name).unwrap().values;
            let after = &outcome.table.column(&name).unwrap().values;
            for (a, b) in before.iter().zip(after) {
                if !a.is_missing() {
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn drop_leaves_no_missing(table in numeric_table()) {
        let outcome = handle_missing(&table, &MissingTarget::All, MissingMethod::Drop, None).unwrap();
        prop_assert_eq!(outcome.table.missing_count(), 0);
        prop_assert!(outcome.table.row_count() <= table.row_count());
    }
}
