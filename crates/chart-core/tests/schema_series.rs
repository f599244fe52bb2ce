// File: crates/chart-core/tests/schema_series.rs
// Purpose: Schema inference and series reshaping over realistic TSV payloads.

use querychart_core::{build_series, infer_schema, AxisKind, ChartError, ChartType, Table, XValue};

fn tsv(text: &str) -> Table {
    Table::from_tsv(text).expect("valid tsv")
}

#[test]
fn temporal_rows_split_on_gaps() {
    let t = tsv("t\ta\tb\n2020-01-01 00:00:00.000\t1\t2\n2020-01-01 00:01:00.000\t3\tNaN\n");
    let schema = infer_schema(&t).unwrap();
    assert_eq!(schema.x_key, "t");
    assert_eq!(schema.y_keys, ["a", "b"]);
    assert_eq!(schema.axis_kind, AxisKind::Temporal);

    let series = build_series(&schema, &t).unwrap();
    assert_eq!(series.len(), 2);

    let a = series[0].defined_runs();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].len(), 2);

    let b = &series[1];
    assert_eq!(b.values.len(), 2);
    assert_eq!(b.values[1].value, None);
    let runs = b.defined_runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].len(), 1);
    assert_eq!(runs[0][0].1, 2.0);
}

#[test]
fn one_series_per_value_column_in_row_order() {
    let t = tsv("x\tp\tq\tr\n1\t1\t2\t3\n2\t\tnull\t4\n3\t5\t6\tinf\n");
    let schema = infer_schema(&t).unwrap();
    assert_eq!(schema.axis_kind, AxisKind::Numeric);

    let series = build_series(&schema, &t).unwrap();
    assert_eq!(series.len(), 3);
    for s in &series {
        assert_eq!(s.values.len(), t.len());
    }
    let keys: Vec<_> = series[0].values.iter().map(|p| p.key.clone()).collect();
    assert_eq!(keys, [XValue::Number(1.0), XValue::Number(2.0), XValue::Number(3.0)]);

    let q: Vec<_> = series[1].values.iter().map(|p| p.value).collect();
    assert_eq!(q, [Some(2.0), None, Some(6.0)]);
    let r: Vec<_> = series[2].values.iter().map(|p| p.value).collect();
    assert_eq!(r, [Some(3.0), Some(4.0), None]);
}

#[test]
fn free_text_x_is_categorical_and_only_fits_bars() {
    let t = tsv("day\tvisits\nMon\t3\nTue\t5\nWed\t4\n");
    let schema = infer_schema(&t).unwrap();
    assert_eq!(schema.axis_kind, AxisKind::Categorical);
    assert!(schema.check_chart_type(ChartType::Bar).is_ok());
    let err = schema.check_chart_type(ChartType::Line).unwrap_err();
    assert!(matches!(err, ChartError::CategoricalLineAxis { ref key } if key == "day"));
}

#[test]
fn x_values_must_match_the_probed_kind() {
    let t = tsv("t\ta\n2020-01-01 00:00:00\t1\nyesterday\t2\n");
    let schema = infer_schema(&t).unwrap();
    assert_eq!(schema.axis_kind, AxisKind::Temporal);
    let err = build_series(&schema, &t).unwrap_err();
    assert!(matches!(err, ChartError::XValue { row: 1, ref value, kind: AxisKind::Temporal } if value == "yesterday"));
}

#[test]
fn header_only_payload_is_empty() {
    let t = tsv("t\ta\n");
    assert!(matches!(infer_schema(&t), Err(ChartError::EmptyResult)));
}

#[test]
fn duplicate_headers_keep_their_own_columns() {
    let t = tsv("x\tv\tv\n1\t10\t20\n");
    let schema = infer_schema(&t).unwrap();
    let series = build_series(&schema, &t).unwrap();
    assert_eq!(series[0].values[0].value, Some(10.0));
    assert_eq!(series[1].values[0].value, Some(20.0));
}
