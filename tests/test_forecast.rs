use approx::assert_relative_eq;
use mandi_toolkit::{
    analysis::{forecast::TrendModel, selection::Selection},
    data::loader::DataLoader,
};

#[test]
fn test_load_select_fit_predict() {
    // Load test data
    let (table, report) = DataLoader::load_and_clean("tests/data/sample_prices.csv")
        .expect("Failed to load test data");

    // 8 data rows; the bad-date, empty-market, and bad-modal rows drop.
    assert_eq!(report.rows_read, 8);
    assert_eq!(report.rows_retained, 5);
    assert_eq!(report.rows_dropped(), 3);

    // Narrow to the Bowenpally tomato series.
    let selection = Selection {
        market: Some("Bowenpally".to_string()),
        commodity: Some("Tomato".to_string()),
        ..Selection::default()
    };
    let view = table.select(&selection);
    assert_eq!(view.len(), 4);
    assert_eq!(view.epoch(), Some("2024-01-01".parse().unwrap()));

    // Daily observations rising 50/day from 1000.
    let model = TrendModel::fit(&view).expect("Fit failed");
    assert_relative_eq!(model.slope(), 50.0, max_relative = 1e-9);
    assert_relative_eq!(model.intercept(), 1000.0, max_relative = 1e-9);

    // Ten days after the epoch: 1000 + 50 * 10.
    let predicted = model.predict("2024-01-11".parse().unwrap());
    assert_relative_eq!(predicted, 1500.0, max_relative = 1e-9);
}

#[test]
fn test_selection_too_narrow_for_a_model() {
    let (table, _) = DataLoader::load_and_clean("tests/data/sample_prices.csv")
        .expect("Failed to load test data");

    // Only one onion row survives cleaning: not enough to fit.
    let selection = Selection {
        commodity: Some("Onion".to_string()),
        ..Selection::default()
    };
    let view = table.select(&selection);
    assert_eq!(view.len(), 1);
    assert!(TrendModel::fit(&view).is_err());
}
