//! End-to-end evaluation of trained models.

use approx::assert_abs_diff_eq;

use logreg::data::synthetic::{gaussian_blobs, threshold_events};
use logreg::data::Table;
use logreg::eval::{ConfusionMatrix, EvaluationReport, ThresholdSweep, DEFAULT_BINS};
use logreg::{LogRegError, LogisticModel, LogisticParams};

fn trained_on_blobs() -> (LogisticModel, logreg::TrainingSet) {
    let data = gaussian_blobs(400, 4, 11);
    let mut model = LogisticModel::new(4);
    model.train(&data, &LogisticParams::default()).unwrap();
    (model, data)
}

#[test]
fn extreme_thresholds() {
    let (model, data) = trained_on_blobs();
    let scores = model.predict_batch(data.features()).unwrap();

    let everything = ConfusionMatrix::at_threshold(scores.view(), data.labels(), 0.0).unwrap();
    assert_eq!(everything.recall(), 1.0);
    assert_eq!(everything.false_negatives, 0);

    let nothing = ConfusionMatrix::at_threshold(scores.view(), data.labels(), 1.0).unwrap();
    assert_eq!(nothing.true_positives + nothing.false_positives, 0);
    assert_eq!(nothing.recall(), 0.0);
    assert_eq!(nothing.fpr(), 0.0);
}

#[test]
fn sweep_is_monotone_in_threshold() {
    let (model, data) = trained_on_blobs();
    let scores = model.predict_batch(data.features()).unwrap();
    let sweep = ThresholdSweep::with_default_thresholds(scores.view(), data.labels()).unwrap();

    assert_eq!(sweep.points().len(), 11);
    for pair in sweep.points().windows(2) {
        assert!(pair[0].tpr() >= pair[1].tpr());
        assert!(pair[0].fpr() >= pair[1].fpr());
    }
    assert!(sweep.roc_auc() > 0.9);
}

#[test]
fn report_for_separable_model() {
    let (model, data) = trained_on_blobs();
    let scores = model.predict_batch(data.features()).unwrap();
    let report = EvaluationReport::compute(scores.view(), data.labels()).unwrap();

    assert_eq!(report.n_samples, 400);
    assert!(report.accuracy > 0.9);
    assert_eq!(report.confusion.total(), 400);
    assert_abs_diff_eq!(report.confusion.threshold, 0.5);
    assert_eq!(report.roc.len(), 11);
    assert_eq!(report.score_histogram.n_bins(), DEFAULT_BINS);
    assert_eq!(report.score_histogram.n_entries(), 400);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["n_samples"], 400);
}

#[test]
fn generate_train_evaluate_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("dataset.lgrg");
    let model_path = dir.path().join("logistic_model.lgrg");
    let report_path = dir.path().join("report.json");

    Table::from_training_set("events", &threshold_events(800, 21))
        .save(&dataset)
        .unwrap();

    let data = Table::load(&dataset).unwrap().to_training_set(4).unwrap();
    let mut model = LogisticModel::new(4);
    model
        .train(
            &data,
            &LogisticParams {
                max_iter: 3000,
                learning_rate: 0.0005,
                ..Default::default()
            },
        )
        .unwrap();
    model.save(&model_path).unwrap();

    let applied = LogisticModel::read(&model_path).unwrap();
    let scores = applied.predict_batch(data.features()).unwrap();
    let report = EvaluationReport::compute(scores.view(), data.labels()).unwrap();
    report.write_json(&report_path).unwrap();

    assert!(report.accuracy > 0.9, "accuracy {}", report.accuracy);
    let written = std::fs::read_to_string(&report_path).unwrap();
    assert!(written.ends_with('\n'));
    assert!(written.contains("\"roc_auc\""));
}

#[test]
fn wider_table_than_model_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("wide.lgrg");
    let model_path = dir.path().join("m4.lgrg");

    Table::from_training_set("wide blobs", &gaussian_blobs(50, 6, 1))
        .save(&dataset)
        .unwrap();
    let (model, _) = trained_on_blobs();
    model.save(&model_path).unwrap();

    let table = Table::load(&dataset).unwrap();
    let model = LogisticModel::read(&model_path).unwrap();
    let err = table.to_training_set(model.n_features()).unwrap_err();
    assert!(matches!(
        err,
        LogRegError::DimensionMismatch {
            expected: 4,
            got: 6,
            ..
        }
    ));
}
