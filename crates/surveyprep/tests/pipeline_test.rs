//! End-to-end tests: ingest the sample survey, clean it, run operations.

use std::path::Path;

use surveyprep::cleaning::{CATEGORICAL_COLUMNS, COUNT_COLUMNS};
use surveyprep::profile::{ColumnStats, MissingSummary};
use surveyprep::transform::{EncodeMethod, MissingMethod, NormalizeMethod};
use surveyprep::{
    ColumnType, ErrorKind, Operation, PipelineState, PrepConfig, Report, StatusLevel, SurveyPrep,
    Table, Value,
};

const SAMPLE_ROWS: usize = 12;

fn sample_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/survey_sample.csv"))
}

fn load() -> PipelineState {
    let (state, source) = SurveyPrep::new()
        .ingest_file(sample_path())
        .expect("Failed to ingest sample");
    assert_eq!(source.row_count, SAMPLE_ROWS);
    state
}

fn text(table: &Table, row: usize, column: &str) -> Option<String> {
    table.get(row, column).and_then(|v| v.render())
}

// =============================================================================
// Ingestion and cleaning
// =============================================================================

#[test]
fn test_canonical_types() {
    let state = load();
    let table = &state.table;

    assert_eq!(table.row_count(), SAMPLE_ROWS);
    assert_eq!(table.column("Timestamp").unwrap().kind, ColumnType::Year);
    assert_eq!(table.column("Age").unwrap().kind, ColumnType::NullableInteger);
    for name in CATEGORICAL_COLUMNS {
        assert_eq!(
            table.column(name).unwrap().kind,
            ColumnType::Categorical,
            "{} should be categorical",
            name
        );
    }
    for name in COUNT_COLUMNS {
        assert_eq!(table.column(name).unwrap().kind, ColumnType::NullableInteger);
    }
    assert_eq!(table.column("comments").unwrap().kind, ColumnType::Text);
}

#[test]
fn test_dirty_row_is_canonicalized() {
    let table = load().table;
    let row = 10;

    assert_eq!(table.get(row, "Age"), Some(&Value::Missing));
    assert_eq!(text(&table, row, "Gender").as_deref(), Some("Female"));
    assert_eq!(text(&table, row, "Country").as_deref(), Some("Germany"));
    assert_eq!(text(&table, row, "self_employed").as_deref(), Some("Yes"));
    assert_eq!(text(&table, row, "family_history").as_deref(), Some("No"));
    assert_eq!(table.get(row, "work_interfere"), Some(&Value::Missing));
    assert_eq!(text(&table, row, "no_employees").as_deref(), Some("1-5"));
    assert_eq!(text(&table, row, "care_options").as_deref(), Some("Not Sure"));
    assert_eq!(table.get(row, "wellness_program"), Some(&Value::Missing));
    assert_eq!(table.get(row, "leave"), Some(&Value::Missing));
    assert_eq!(text(&table, row, "phys_health_consequence").as_deref(), Some("Maybe"));
    assert_eq!(text(&table, row, "coworkers").as_deref(), Some("Some of them"));
    assert_eq!(text(&table, row, "mental_vs_physical").as_deref(), Some("Don't know"));
    assert_eq!(table.get(row, "obs_consequence"), Some(&Value::Missing));
}

#[test]
fn test_second_dirty_row() {
    let table = load().table;
    let row = 11;

    assert_eq!(table.get(row, "Age"), Some(&Value::Missing));
    assert_eq!(text(&table, row, "Gender").as_deref(), Some("Non-Binary"));
    assert_eq!(text(&table, row, "Country").as_deref(), Some("Bahamas"));
    assert_eq!(text(&table, row, "no_employees").as_deref(), Some("6-25"));
    assert_eq!(text(&table, row, "leave").as_deref(), Some("Very easy"));
    assert_eq!(table.get(row, "anonymity"), Some(&Value::Missing));
    assert_eq!(text(&table, row, "comments").as_deref(), Some("gave up"));
}

#[test]
fn test_counts_and_years() {
    let table = load().table;
    assert_eq!(table.get(0, "Timestamp"), Some(&Value::Int(2014)));
    assert_eq!(table.get(1, "no_employees").and_then(|v| v.render()).as_deref(), Some("1000+"));
    assert_eq!(table.get(3, "Average_Weekly_Hours"), Some(&Value::Int(50)));
    assert_eq!(table.get(2, "Sick_Leave_Days"), Some(&Value::Missing));
}

#[test]
fn test_vocabularies_are_closed() {
    let table = load().table;
    for value in &table.column("Gender").unwrap().values {
        if let Some(label) = value.render() {
            assert!(["Male", "Female", "Non-Binary"].contains(&label.as_str()));
        }
    }
    let ages = table.column("Age").unwrap().numeric_values();
    assert!(ages.iter().all(|a| (18.0..=72.0).contains(a)));
}

#[test]
fn test_raw_ingest_keeps_values() {
    let prep = SurveyPrep::with_config(PrepConfig {
        clean_on_ingest: false,
        ..PrepConfig::default()
    });
    let (state, _) = prep.ingest_file(sample_path()).unwrap();
    assert_eq!(state.table.get(10, "Age"), Some(&Value::Int(-1726)));
    assert_eq!(state.table.column("Gender").unwrap().kind, ColumnType::Text);
}

// =============================================================================
// Operations
// =============================================================================

#[test]
fn test_full_pipeline() {
    let state = load()
        .apply(&Operation::DropColumns {
            columns: vec!["state".into(), "comments".into(), "Timestamp".into()],
        })
        .apply(&Operation::HandleMissing {
            column: "*".into(),
            method: Some(MissingMethod::Mode),
            custom_value: None,
        });
    assert_eq!(state.status.level, StatusLevel::Success);
    assert_eq!(state.table.missing_count(), 0);

    let state = state.apply(&Operation::Discretize {
        column: "Age".into(),
        bin_count: 3,
    });
    assert_eq!(state.status.level, StatusLevel::Success);
    assert!(state.table.has_column("Age_binned"));

    let state = state.apply(&Operation::Normalize {
        method: Some(NormalizeMethod::Zscore),
    });
    let Some(Report::Normalize(params)) = &state.status.report else {
        panic!("expected scaler parameters, got {:?}", state.status);
    };
    assert!(params.columns.iter().any(|c| c.column == "Age"));

    let state = state.apply(&Operation::Encode {
        method: Some(EncodeMethod::Label),
    });
    assert_eq!(state.status.level, StatusLevel::Success);
    assert!(state.table.columns().all(|c| c.is_numeric()));

    let state = state.apply(&Operation::Split {
        test_fraction: 0.25,
        seed: 42,
    });
    let Some(Report::Split(split)) = &state.status.report else {
        panic!("expected split report");
    };
    assert_eq!(split.test_rows, 3);
    assert_eq!(split.train_rows, 9);
    assert_eq!(state.table.row_count(), SAMPLE_ROWS);

    let csv = String::from_utf8(state.export_csv().unwrap()).unwrap();
    assert_eq!(csv.lines().count(), SAMPLE_ROWS + 1);
}

#[test]
fn test_errors_leave_table_unchanged() {
    let state = load();
    let before = state.table.clone();

    let state = state.apply(&Operation::DropColumns {
        columns: vec!["NoSuchColumn".into()],
    });
    assert_eq!(state.status.kind, Some(ErrorKind::Schema));
    assert_eq!(state.table, before);

    let state = state.apply(&Operation::Discretize {
        column: "Age".into(),
        bin_count: 0,
    });
    assert_eq!(state.status.kind, Some(ErrorKind::Parameter));
    assert_eq!(state.table, before);

    let state = state.apply(&Operation::Split {
        test_fraction: 0.5,
        seed: 1,
    });
    assert_eq!(state.status.kind, Some(ErrorKind::Parameter));
    assert_eq!(state.table, before);
}

#[test]
fn test_drop_missing_rows_keeps_identifiers() {
    let state = load().apply(&Operation::HandleMissing {
        column: "Age".into(),
        method: Some(MissingMethod::Drop),
        custom_value: None,
    });
    assert_eq!(state.table.row_count(), SAMPLE_ROWS - 2);
    assert_eq!(state.table.index(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_one_hot_widens_table() {
    let state = load()
        .apply(&Operation::DropColumns {
            columns: vec!["comments".into(), "state".into()],
        })
        .apply(&Operation::Encode {
            method: Some(EncodeMethod::Onehot),
        });
    assert_eq!(state.status.level, StatusLevel::Success);
    assert!(state.table.has_column("Gender_Male"));
    assert!(state.table.has_column("Gender_Non-Binary"));
    assert!(!state.table.has_column("Gender"));
}

// =============================================================================
// Profiling
// =============================================================================

#[test]
fn test_profiles() {
    let table = load().table;

    let missing = MissingSummary::of(&table);
    let sick = missing
        .columns
        .iter()
        .find(|c| c.column == "Sick_Leave_Days")
        .unwrap();
    assert_eq!(sick.missing, 3);
    assert_eq!(sick.percentage, 25.0);

    let ColumnStats::Categorical(gender) = ColumnStats::of(&table, "Gender").unwrap() else {
        panic!("expected categorical stats");
    };
    assert_eq!(gender.most_common.value, "Male");
    assert_eq!(gender.unique, 3);

    let ColumnStats::Numeric(age) = ColumnStats::of(&table, "Age").unwrap() else {
        panic!("expected numeric stats");
    };
    assert_eq!(age.count, 10);
    assert_eq!(age.min, 23.0);
    assert_eq!(age.max, 44.0);
}
