//! Fit a line to five points and print the learned parameters.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example fit_line
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use descent_attn::{FitError, LinearFitConfig, LinearFitTrainer, SampleSet, Verbosity};

fn main() -> Result<(), FitError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [5.0, 7.0, 9.0, 11.0, 13.0];
    let samples = SampleSet::from_slices(&x, &y)?;

    for learning_rate in [0.0001, 0.05] {
        let config = LinearFitConfig::builder()
            .iterations(20_000)
            .learning_rate(learning_rate)
            .verbosity(Verbosity::Info)
            .build()?;
        let report = LinearFitTrainer::new(config).fit(&samples);

        println!(
            "lr={learning_rate}: slope={:.6} intercept={:.6} after {} iterations ({:?}, cost={:.3e})",
            report.model.slope(),
            report.model.intercept(),
            report.iterations,
            report.stop_reason,
            report.final_cost,
        );
    }

    Ok(())
}
