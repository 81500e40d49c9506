//! Unit tests for correlation ratio, Pearson correlation and label encoding

use titanic_eda::pipeline::{
    column_correlation_ratio, correlation_ratio, label_encode, pearson_correlation,
    rank_associations, CorrelationError,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn some(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

#[test]
fn test_identical_measurements_give_zero() {
    let categories = vec![Some("a"), Some("b"), Some("c"), Some("a"), Some("b")];
    let measurements = some(&[0.1, 0.1, 0.1, 0.1, 0.1]);

    let eta = correlation_ratio(&categories, &measurements).unwrap();

    assert_eq!(eta, 0.0, "Constant measurements should give exactly 0, got {}", eta);
}

#[test]
fn test_single_category_gives_zero() {
    let categories = vec![Some("only"); 6];
    let measurements = some(&[0.3, 1.7, 2.2, 9.1, 4.4, 0.05]);

    let eta = correlation_ratio(&categories, &measurements).unwrap();

    assert_eq!(eta, 0.0, "A single category explains nothing, got {}", eta);
}

#[test]
fn test_perfect_separation_gives_one() {
    let categories = vec![Some("f"), Some("f"), Some("m"), Some("m")];
    let measurements = some(&[1.0, 1.0, 0.0, 0.0]);

    let eta = correlation_ratio(&categories, &measurements).unwrap();

    assert!((eta - 1.0).abs() < 1e-12, "Expected 1.0, got {}", eta);
}

#[test]
fn test_known_value() {
    // Groups a = {1, 2, 3} (mean 2), b = {5, 7} (mean 6); grand mean 3.6
    // between = 3 * 1.6^2 + 2 * 2.4^2 = 19.2
    // total   = 2.6^2 + 1.6^2 + 0.6^2 + 1.4^2 + 3.4^2 = 23.2
    let categories = vec![Some("a"), Some("a"), Some("a"), Some("b"), Some("b")];
    let measurements = some(&[1.0, 2.0, 3.0, 5.0, 7.0]);

    let eta = correlation_ratio(&categories, &measurements).unwrap();

    assert!((eta - 19.2 / 23.2).abs() < 1e-12, "Expected {}, got {}", 19.2 / 23.2, eta);
}

#[test]
fn test_result_within_unit_interval() {
    let categories: Vec<Option<i64>> = (0..50).map(|i| Some(i % 4)).collect();
    let measurements: Vec<Option<f64>> = (0..50)
        .map(|i| Some(((i * 37) % 11) as f64 + (i % 4) as f64))
        .collect();

    let eta = correlation_ratio(&categories, &measurements).unwrap();

    assert!((0.0..=1.0).contains(&eta), "eta out of range: {}", eta);
}

#[test]
fn test_global_shift_checked_empirically() {
    // Unbalanced groups: 4 / 1 / 2
    let categories = vec![
        Some("a"),
        Some("a"),
        Some("a"),
        Some("a"),
        Some("b"),
        Some("c"),
        Some("c"),
    ];
    let base = [2.0, 3.5, 1.0, 4.0, 9.0, 6.0, 7.5];
    let shifted: Vec<f64> = base.iter().map(|x| x + 1000.0).collect();

    let eta = correlation_ratio(&categories, &some(&base)).unwrap();
    let eta_shifted = correlation_ratio(&categories, &some(&shifted)).unwrap();

    assert!(
        (eta - eta_shifted).abs() < 1e-9,
        "Shifting all measurements changed eta: {} vs {}",
        eta,
        eta_shifted
    );
}

#[test]
fn test_length_mismatch_is_error() {
    let categories = vec![Some("a"), Some("b")];
    let measurements = some(&[1.0]);

    let err = correlation_ratio(&categories, &measurements).unwrap_err();

    assert_eq!(
        err,
        CorrelationError::LengthMismatch {
            categories: 2,
            measurements: 1
        }
    );
}

#[test]
fn test_missing_category_counts_only_in_total() {
    // Grouped rows: a = {0, 0}, b = {2, 2}; grand mean 1, between = 4
    // The ungrouped 1.0 sits on the grand mean, so the total stays 4
    let categories = vec![Some("a"), Some("a"), Some("b"), Some("b"), None];
    let measurements = some(&[0.0, 0.0, 2.0, 2.0, 1.0]);
    assert!((correlation_ratio(&categories, &measurements).unwrap() - 1.0).abs() < 1e-12);

    // Moving the ungrouped row away from the grand mean raises the total only
    let measurements = some(&[0.0, 0.0, 2.0, 2.0, 3.0]);
    let eta = correlation_ratio(&categories, &measurements).unwrap();
    assert!((eta - 4.0 / 8.0).abs() < 1e-12, "Expected 0.5, got {}", eta);
}

#[test]
fn test_missing_measurements_are_ignored() {
    let categories = vec![Some("a"), Some("a"), Some("b"), Some("b"), Some("b")];
    let with_gap = vec![Some(1.0), Some(1.0), Some(3.0), None, Some(3.0)];
    let without = vec![Some(1.0), Some(1.0), Some(3.0), Some(3.0)];
    let categories_without = vec![Some("a"), Some("a"), Some("b"), Some("b")];

    assert_eq!(
        correlation_ratio(&categories, &with_gap).unwrap(),
        correlation_ratio(&categories_without, &without).unwrap()
    );
}

#[test]
fn test_empty_input_gives_zero() {
    let categories: Vec<Option<&str>> = Vec::new();
    assert_eq!(correlation_ratio(&categories, &[]).unwrap(), 0.0);

    let categories: Vec<Option<&str>> = vec![None, None];
    assert_eq!(correlation_ratio(&categories, &some(&[1.0, 2.0])).unwrap(), 0.0);
}

#[test]
fn test_column_sex_separates_survival() {
    let df = common::create_titanic_dataframe();

    let eta = column_correlation_ratio(df.column("Sex").unwrap(), df.column("Survived").unwrap())
        .unwrap();

    assert!((eta - 1.0).abs() < 1e-12, "Sex should explain survival fully, got {}", eta);
}

#[test]
fn test_column_numeric_categories_are_grouped_by_value() {
    let df = df! {
        "Pclass" => [1i64, 1, 2, 2, 3, 3],
        "Fare" => [80.0f64, 90.0, 20.0, 30.0, 7.0, 9.0],
    }
    .unwrap();

    let eta = column_correlation_ratio(df.column("Pclass").unwrap(), df.column("Fare").unwrap())
        .unwrap();

    assert!(eta > 0.9, "Class should explain most of the fare, got {}", eta);
}

#[test]
fn test_column_rejects_text_measurement() {
    let df = common::create_titanic_dataframe();

    let result = column_correlation_ratio(df.column("Survived").unwrap(), df.column("Sex").unwrap());

    assert!(result.is_err(), "Text measurements should be rejected");
}

#[test]
fn test_rank_associations_sorted_descending() {
    let df = common::create_titanic_dataframe();
    let features: Vec<String> = ["Embarked", "Sex", "Pclass", "Survived"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let ranked = rank_associations(&df, "Survived", &features).unwrap();

    assert_eq!(ranked.len(), 3, "Target itself should not be ranked");
    assert_eq!(ranked[0].feature, "Sex");
    for pair in ranked.windows(2) {
        assert!(pair[0].eta >= pair[1].eta, "Not sorted: {:?}", ranked);
    }
}

#[test]
fn test_rank_associations_unknown_feature() {
    let df = common::create_titanic_dataframe();

    let result = rank_associations(&df, "Survived", &["Deck".to_string()]);

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Deck"));
}

#[test]
fn test_label_encode_sorted_codes() {
    let column = Column::new("Embarked".into(), [Some("S"), Some("C"), None, Some("Q"), Some("S")]);

    let encoded = label_encode(&column).unwrap();
    let codes: Vec<Option<i64>> = encoded.i64().unwrap().into_iter().collect();

    assert_eq!(codes, vec![Some(2), Some(0), None, Some(1), Some(2)]);
    assert_eq!(encoded.name().as_str(), "Embarked");
}

#[test]
fn test_label_encode_numeric_order() {
    let column = Column::new("Pclass".into(), [10i64, 2, 1, 2]);

    let encoded = label_encode(&column).unwrap();
    let codes: Vec<Option<i64>> = encoded.i64().unwrap().into_iter().collect();

    assert_eq!(codes, vec![Some(2), Some(1), Some(0), Some(1)]);
}

#[test]
fn test_pearson_perfect_and_inverse() {
    let df = df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "b" => [2.0f64, 4.0, 6.0, 8.0, 10.0],
        "c" => [5.0f64, 4.0, 3.0, 2.0, 1.0],
    }
    .unwrap();

    let ab = pearson_correlation(df.column("a").unwrap(), df.column("b").unwrap())
        .unwrap()
        .unwrap();
    let ac = pearson_correlation(df.column("a").unwrap(), df.column("c").unwrap())
        .unwrap()
        .unwrap();

    assert!((ab - 1.0).abs() < 1e-12, "got {}", ab);
    assert!((ac + 1.0).abs() < 1e-12, "got {}", ac);
}

#[test]
fn test_pearson_skips_incomplete_rows() {
    let df = df! {
        "x" => [Some(1.0f64), Some(2.0), None, Some(3.0)],
        "y" => [Some(1.0f64), Some(2.0), Some(100.0), Some(3.0)],
    }
    .unwrap();

    let r = pearson_correlation(df.column("x").unwrap(), df.column("y").unwrap())
        .unwrap()
        .unwrap();

    assert!((r - 1.0).abs() < 1e-12, "The null row should be skipped, got {}", r);
}

#[test]
fn test_pearson_constant_column_is_undefined() {
    let df = df! {
        "x" => [1.0f64, 1.0, 1.0],
        "y" => [1.0f64, 2.0, 3.0],
    }
    .unwrap();

    let r = pearson_correlation(df.column("x").unwrap(), df.column("y").unwrap()).unwrap();

    assert!(r.is_none());
}

#[test]
fn test_pearson_on_encoded_embarked() {
    let df = common::create_titanic_dataframe();

    let encoded = label_encode(df.column("Embarked").unwrap()).unwrap();
    let r = pearson_correlation(&encoded, df.column("Fare").unwrap())
        .unwrap()
        .unwrap();

    assert!((-1.0..=1.0).contains(&r), "r out of range: {}", r);
}

#[test]
fn test_column_nan_category_joins_no_group() {
    let with_nan = df! {
        "Age" => [Some(f64::NAN), Some(f64::NAN), Some(5.0), Some(5.0), Some(7.0)],
        "Survived" => [1.0f64, 0.0, 1.0, 1.0, 0.0],
    }
    .unwrap();
    let with_null = df! {
        "Age" => [None, None, Some(5.0f64), Some(5.0), Some(7.0)],
        "Survived" => [1.0f64, 0.0, 1.0, 1.0, 0.0],
    }
    .unwrap();

    let eta_nan = column_correlation_ratio(
        with_nan.column("Age").unwrap(),
        with_nan.column("Survived").unwrap(),
    )
    .unwrap();
    let eta_null = column_correlation_ratio(
        with_null.column("Age").unwrap(),
        with_null.column("Survived").unwrap(),
    )
    .unwrap();

    assert_eq!(eta_nan, eta_null, "NaN should behave like a missing category");
    assert!(eta_nan < 1.0, "NaN rows must not form their own groups, got {}", eta_nan);
}

#[test]
fn test_repeated_calls_are_bitwise_identical() {
    let categories: Vec<Option<i64>> = (0..500).map(|i| Some((i * 7919) % 37)).collect();
    let measurements: Vec<Option<f64>> = (0..500)
        .map(|i| Some(((i * 104729) % 1009) as f64 / 13.0 + 0.1 * (i % 37) as f64))
        .collect();

    let first = correlation_ratio(&categories, &measurements).unwrap();

    for _ in 0..50 {
        let again = correlation_ratio(&categories, &measurements).unwrap();
        assert_eq!(again.to_bits(), first.to_bits());
    }
}
