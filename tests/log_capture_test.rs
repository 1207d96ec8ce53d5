//! Diagnostic events emitted by the library.

use tracing::Level;

mod common;
use common::log_capture::LogCapture;

use pricesim::core::import::import_articles;
use pricesim::core::pricing::{CostModel, ModelKind, ParamMap};
use pricesim::core::strategy::{WizardSelection, build_configuration};
use pricesim::core::{Session, statistics_by_writer};
use pricesim::test_utils::{make_test_article, make_test_csv, sample_csv};

#[test]
fn clean_import_logs_counts_without_warnings() {
    let capture = LogCapture::start();

    let report = import_articles(sample_csv().as_bytes()).unwrap();
    assert_eq!(report.articles.len(), 5);

    capture.assert_logged(Level::INFO, "Imported articles");
    capture.assert_field("imported", "5");
    capture.assert_field("skipped", "0");
    capture.assert_no_warnings();
}

#[test]
fn skipped_rows_are_debug_events() {
    let capture = LogCapture::start();

    let csv = make_test_csv(&[("Alice", "03/01/2024", "1000"), ("Bob", "03/01/2024", "-4")]);
    let report = import_articles(csv.as_bytes()).unwrap();
    assert_eq!(report.skipped, 1);

    capture.assert_logged(Level::DEBUG, "Skipping malformed row");
    capture.assert_field("row", "3");
}

#[test]
fn unknown_parameter_warns() {
    let capture = LogCapture::start();

    let mut params = ParamMap::new();
    params.insert("cap".to_string(), 4000.0);
    params.insert("floor".to_string(), 10.0);
    let model = CostModel::from_params(ModelKind::CapPlusOverage, &params);

    assert_eq!(
        model,
        CostModel::CapPlusOverage {
            fixed_amount: 0.0,
            cap: 4000.0,
            overage_rate: 0.0,
        }
    );
    capture.assert_logged(Level::WARN, "Ignoring unknown pricing parameter");
    capture.assert_field("key", "floor");
}

#[test]
fn recommended_overrides_are_logged() {
    let capture = LogCapture::start();

    let articles = vec![make_test_article("Alice", 900), make_test_article("Alice", 1100)];
    let selection = WizardSelection {
        recommend_overrides: true,
        ..WizardSelection::default()
    };
    build_configuration(&selection, &statistics_by_writer(&articles)).unwrap();

    capture.assert_logged(Level::DEBUG, "Applied recommended writer overrides");
    capture.assert_field("count", "1");
}

#[test]
fn applying_configuration_is_logged() {
    let capture = LogCapture::start();

    let mut session = Session::default();
    session.import_csv(sample_csv().as_bytes()).unwrap();
    session.apply_configuration(Default::default(), Default::default());

    capture.assert_logged(Level::DEBUG, "Applying configuration");
    capture.assert_field("overrides", "0");
}
