//! logreg CLI: generate datasets, train, apply and evaluate logistic models.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ndarray::{Array1, ArrayView1};

use logreg::data::synthetic::{self, DEFAULT_EVENTS, DEFAULT_FEATURES, DEFAULT_SAMPLES};
use logreg::data::{feature_column_name, Table, TrainingSet, LABEL_COLUMN};
use logreg::eval::{multiclass_accuracy, EvaluationReport};
use logreg::io::{artifact_kind, ArtifactKind};
use logreg::{GradientScaling, LogisticConfig, LogisticModel, OneVsRest, Verbosity};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "logreg")]
#[command(about = "Logistic regression: generate, train, apply, evaluate")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DatasetKind {
    /// Four uniform features in [-5, 5), label = feature1 > 1
    Threshold,
    /// Two Gaussian blobs at +2 / -2
    Blobs,
    /// One Gaussian blob per class; the label column holds the class index
    Multiclass,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scaling {
    /// Plain sum over samples
    Sum,
    /// Sum divided by the sample count
    Mean,
}

impl From<Scaling> for GradientScaling {
    fn from(scaling: Scaling) -> Self {
        match scaling {
            Scaling::Sum => GradientScaling::Sum,
            Scaling::Mean => GradientScaling::Mean,
        }
    }
}

#[derive(Args)]
struct TrainArgs {
    /// Training table; synthetic Gaussian blobs (one per class with
    /// `--classes`) are used when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Synthetic sample count
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Synthetic feature count
    #[arg(long, default_value_t = DEFAULT_FEATURES)]
    features: usize,

    /// Random seed for synthetic data
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Gradient steps
    #[arg(long, default_value_t = 1000)]
    max_iter: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.01)]
    lr: f64,

    /// Gradient scaling over the batch
    #[arg(long, value_enum, default_value = "sum")]
    scaling: Scaling,

    /// Train one-vs-rest over this many classes instead of a binary model
    #[arg(long)]
    classes: Option<usize>,

    /// Output model file
    #[arg(short, long, default_value = "logistic_model.lgrg")]
    output: PathBuf,

    /// Plain-text weight export (binary models only)
    #[arg(long, default_value = "logistic_model.txt")]
    export: PathBuf,

    /// Write the per-iteration loss as JSON
    #[arg(long)]
    loss_curve: Option<PathBuf>,

    /// Print training progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic dataset table
    Generate {
        /// Dataset shape
        #[arg(long, value_enum, default_value = "threshold")]
        kind: DatasetKind,

        /// Number of rows
        #[arg(short = 'n', long, default_value_t = DEFAULT_EVENTS)]
        events: usize,

        /// Number of features (ignored for `threshold`)
        #[arg(long, default_value_t = DEFAULT_FEATURES)]
        features: usize,

        /// Number of classes (only for `multiclass`)
        #[arg(long, default_value_t = 3)]
        classes: usize,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output table file
        #[arg(short, long, default_value = "dataset.lgrg")]
        output: PathBuf,
    },

    /// Train a model and save it
    Train(TrainArgs),

    /// Print the prediction of a model for every row of a table
    Apply {
        /// Model file
        #[arg(short, long, default_value = "logistic_model.lgrg")]
        model: PathBuf,

        /// Table file
        #[arg(short, long, default_value = "dataset.lgrg")]
        data: PathBuf,
    },

    /// Evaluate a model against the labels of a table
    Evaluate {
        /// Model file
        #[arg(short, long, default_value = "logistic_model.lgrg")]
        model: PathBuf,

        /// Table file
        #[arg(short, long, default_value = "dataset.lgrg")]
        data: PathBuf,

        /// Write the full evaluation report as JSON (binary models only)
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            kind,
            events,
            features,
            classes,
            seed,
            output,
        } => cmd_generate(kind, events, features, classes, seed, &output),
        Commands::Train(args) => cmd_train(args),
        Commands::Apply { model, data } => cmd_apply(&model, &data),
        Commands::Evaluate {
            model,
            data,
            report,
        } => cmd_evaluate(&model, &data, report.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_generate(
    kind: DatasetKind,
    events: usize,
    features: usize,
    classes: usize,
    seed: u64,
    output: &Path,
) -> CliResult {
    let table = match kind {
        DatasetKind::Threshold => {
            let data = synthetic::threshold_events(events, seed);
            Table::from_training_set("events with label = feature1 > 1", &data)
        }
        DatasetKind::Blobs => {
            let data = synthetic::gaussian_blobs(events, features, seed);
            Table::from_training_set("gaussian blobs", &data)
        }
        DatasetKind::Multiclass => {
            if classes < 2 {
                return Err(format!("--classes must be at least 2, got {classes}").into());
            }
            let (x, y) = synthetic::multiclass_blobs(events, features, classes, seed);
            let labels = y.mapv(|c| c as f64);
            let data = TrainingSet::new(x, labels)?;
            Table::from_training_set(format!("{classes} gaussian blobs"), &data)
        }
    };

    table.save(output)?;
    println!(
        "Wrote {} rows x {} features to {}",
        table.n_rows(),
        table.n_feature_columns(),
        output.display()
    );
    Ok(())
}

fn load_training_table(path: &Path) -> Result<TrainingSet, Box<dyn Error>> {
    let table = Table::load(path)?;
    let n_features = table.n_feature_columns();
    if n_features == 0 {
        return Err(logreg::LogRegError::MissingColumn(feature_column_name(0)).into());
    }
    Ok(table.to_training_set(n_features)?)
}

fn cmd_train(args: TrainArgs) -> CliResult {
    let verbosity = if args.verbose {
        Verbosity::Info
    } else {
        Verbosity::Warning
    };
    let config = LogisticConfig::builder()
        .max_iter(args.max_iter)
        .learning_rate(args.lr)
        .gradient_scaling(args.scaling.into())
        .record_loss(args.loss_curve.is_some())
        .verbosity(verbosity)
        .build()?;

    let data = match (&args.data, args.classes) {
        (Some(path), _) => load_training_table(path)?,
        (None, Some(k)) if k >= 2 => {
            let (x, y) = synthetic::multiclass_blobs(args.samples, args.features, k, args.seed);
            TrainingSet::new(x, y.mapv(|c| c as f64))?
        }
        (None, _) => synthetic::gaussian_blobs(args.samples, args.features, args.seed),
    };

    match args.classes {
        Some(k) => train_one_vs_rest(&data, k, &config, &args.output),
        None => train_binary(
            &data,
            &config,
            &args.output,
            &args.export,
            args.loss_curve.as_deref(),
        ),
    }
}

fn train_binary(
    data: &TrainingSet,
    config: &LogisticConfig,
    output: &Path,
    export: &Path,
    loss_curve: Option<&Path>,
) -> CliResult {
    println!("Training logistic model");
    println!("=======================");
    println!("Samples:       {}", data.n_samples());
    println!("Features:      {}", data.n_features());
    println!("Iterations:    {}", config.max_iter);
    println!("Learning rate: {}", config.learning_rate);
    println!("Scaling:       {:?}", config.gradient_scaling);
    println!();

    let mut model = LogisticModel::new(data.n_features());
    let report = model.train(data, &config.to_trainer_params())?;

    let scores = model.predict_batch(data.features())?;
    let eval = EvaluationReport::compute(scores.view(), data.labels())?;
    println!("Training accuracy: {:.2}%", 100.0 * eval.accuracy);
    println!("Parameters:        {}", format_values(model.parameters()));

    model.save(output)?;
    model.export_weights(export)?;
    println!("Saved model to {} and weights to {}", output.display(), export.display());

    if let Some(path) = loss_curve {
        report.write_loss_curve(path)?;
        println!("Saved loss curve to {}", path.display());
    }
    Ok(())
}

fn train_one_vs_rest(
    data: &TrainingSet,
    n_classes: usize,
    config: &LogisticConfig,
    output: &Path,
) -> CliResult {
    let classes = class_indices(data.labels())?;

    println!("Training one-vs-rest model");
    println!("==========================");
    println!("Samples:       {}", data.n_samples());
    println!("Features:      {}", data.n_features());
    println!("Classes:       {n_classes}");
    println!();

    let model = OneVsRest::train(
        data.features(),
        classes.view(),
        n_classes,
        &config.to_trainer_params(),
    )?;

    let predicted = model.predict_batch(data.features())?;
    let accuracy = multiclass_accuracy(predicted.view(), classes.view())?;
    println!("Training accuracy: {:.2}%", 100.0 * accuracy);

    model.save(output)?;
    println!("Saved model to {}", output.display());
    Ok(())
}

fn cmd_apply(model_path: &Path, data_path: &Path) -> CliResult {
    let table = Table::load(data_path)?;

    match artifact_kind(model_path)? {
        ArtifactKind::OneVsRest => {
            let model = OneVsRest::load(model_path)?;
            let data = table.to_training_set(model.n_features())?;
            let scores = model.predict_proba_batch(data.features())?;
            let classes = model.predict_batch(data.features())?;
            for (i, (row, class)) in scores.outer_iter().zip(classes.iter()).enumerate() {
                println!("Entry {i}: class = {class}, scores = {}", format_values(row));
            }
        }
        _ => {
            let model = LogisticModel::read(model_path)?;
            let data = table.to_training_set(model.n_features())?;
            let scores = model.predict_batch(data.features())?;
            for (i, p) in scores.iter().enumerate() {
                println!("Entry {i}: P(signal) = {p}");
            }
        }
    }
    Ok(())
}

fn cmd_evaluate(model_path: &Path, data_path: &Path, report_path: Option<&Path>) -> CliResult {
    let table = Table::load(data_path)?;

    if artifact_kind(model_path)? == ArtifactKind::OneVsRest {
        let model = OneVsRest::load(model_path)?;
        let data = table.to_training_set(model.n_features())?;
        let classes = class_indices(data.labels())?;
        let predicted = model.predict_batch(data.features())?;
        let accuracy = multiclass_accuracy(predicted.view(), classes.view())?;
        println!("Samples:  {}", data.n_samples());
        println!("Accuracy: {:.2}%", 100.0 * accuracy);
        return Ok(());
    }

    let model = LogisticModel::read(model_path)?;
    let data = table.to_training_set(model.n_features())?;
    let scores = model.predict_batch(data.features())?;
    let report = EvaluationReport::compute(scores.view(), data.labels())?;

    let cm = &report.confusion;
    println!("Samples:  {}", report.n_samples);
    println!("Accuracy: {:.2}% (threshold {})", 100.0 * report.accuracy, cm.threshold);
    println!("ROC AUC:  {:.4}", report.roc_auc);
    println!();
    println!("                 predicted 1   predicted 0");
    println!("  actual 1       {:>11}   {:>11}", cm.true_positives, cm.false_negatives);
    println!("  actual 0       {:>11}   {:>11}", cm.false_positives, cm.true_negatives);

    if let Some(path) = report_path {
        report.write_json(path)?;
        println!();
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

/// Labels of a multi-class table as class indices.
fn class_indices(labels: ArrayView1<'_, f64>) -> Result<Array1<usize>, Box<dyn Error>> {
    labels
        .iter()
        .enumerate()
        .map(|(row, &y)| -> Result<usize, Box<dyn Error>> {
            if y >= 0.0 && y.fract() == 0.0 {
                Ok(y as usize)
            } else {
                Err(format!("{LABEL_COLUMN} {y} at row {row} is not a class index").into())
            }
        })
        .collect()
}

fn format_values(values: ArrayView1<'_, f64>) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
    format!("[{}]", parts.join(", "))
}
