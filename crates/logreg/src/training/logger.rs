//! Training progress logging.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Verbosity level for training output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Warnings only.
    Warning,
    /// Progress and important information.
    Info,
    /// Per-iteration details.
    Debug,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Silent => "silent",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        })
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "quiet" => Ok(Self::Silent),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("unknown verbosity '{other}'")),
        }
    }
}

/// Prints training progress according to a [`Verbosity`].
///
/// Progress goes to stdout, warnings to stderr.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_iterations: usize,
    started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            n_iterations: 0,
            started: None,
        }
    }

    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    pub fn start_training(&mut self, n_iterations: usize, n_samples: usize, n_features: usize) {
        self.n_iterations = n_iterations;
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            println!(
                "[logreg] training: {n_iterations} iterations, {n_samples} samples, {n_features} features"
            );
        }
    }

    /// Report the loss after `iteration` (1-based) completed updates.
    pub fn log_iteration(&self, iteration: usize, loss: f64) {
        if self.enabled(Verbosity::Info) {
            println!(
                "[logreg] [{iteration:>width$}/{total}] logloss: {loss:.6}",
                width = self.n_iterations.to_string().len(),
                total = self.n_iterations,
            );
        }
    }

    pub fn log_debug(&self, message: impl fmt::Display) {
        if self.enabled(Verbosity::Debug) {
            println!("[logreg] {message}");
        }
    }

    pub fn log_warning(&self, message: impl fmt::Display) {
        if self.enabled(Verbosity::Warning) {
            eprintln!("[logreg] warning: {message}");
        }
    }

    pub fn finish_training(&self, final_loss: Option<f64>) {
        if !self.enabled(Verbosity::Info) {
            return;
        }
        let elapsed = self.started.map(|s| s.elapsed().as_secs_f64()).unwrap_or(0.0);
        match final_loss {
            Some(loss) => println!("[logreg] done in {elapsed:.3}s, final logloss: {loss:.6}"),
            None => println!("[logreg] done in {elapsed:.3}s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_is_ordered() {
        assert!(Verbosity::Silent < Verbosity::Warning);
        assert!(Verbosity::Warning < Verbosity::Info);
        assert!(Verbosity::Info < Verbosity::Debug);
    }

    #[test]
    fn verbosity_parse_and_display() {
        for v in [Verbosity::Silent, Verbosity::Warning, Verbosity::Info, Verbosity::Debug] {
            assert_eq!(v.to_string().parse::<Verbosity>().unwrap(), v);
        }
        assert_eq!("WARN".parse::<Verbosity>().unwrap(), Verbosity::Warning);
        assert!("loud".parse::<Verbosity>().is_err());
    }

    #[test]
    fn enabled_levels() {
        let logger = TrainingLogger::new(Verbosity::Info);
        assert!(logger.enabled(Verbosity::Warning));
        assert!(logger.enabled(Verbosity::Info));
        assert!(!logger.enabled(Verbosity::Debug));
        assert!(!logger.enabled(Verbosity::Silent));

        let silent = TrainingLogger::new(Verbosity::Silent);
        assert!(!silent.enabled(Verbosity::Warning));
    }
}
