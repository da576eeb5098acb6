//! # zstream
//!
//! Command-line interface for rolling Z-score anomaly detection.

mod input;

use std::io;
use std::path::PathBuf;

use anomaly::{
    generate, JsonLinesSink, Monitor, MonitorConfig, StreamSummary, TextSink, VerdictSink,
};
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "zstream")]
#[command(about = "Streaming anomaly detection with a rolling Z-score", long_about = None)]
struct Cli {
    /// TOML configuration file with [detector] and [generator] tables
    #[arg(short, long, global = true, env = "ZSTREAM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic stream and detect anomalies in it
    Simulate {
        #[command(flatten)]
        detector: DetectorArgs,

        /// Number of points to generate
        #[arg(long)]
        steps: Option<usize>,

        /// Period of the seasonal component
        #[arg(long)]
        period: Option<f64>,

        /// Probability of injecting a spike at each step
        #[arg(long)]
        anomaly_prob: Option<f64>,

        /// RNG seed for a reproducible stream
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Detect anomalies in a CSV or JSON data file, in file order
    Detect {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Column name or index for the values
        #[arg(long)]
        column: Option<String>,

        /// Treat the first CSV row as data rather than a header row
        #[arg(long)]
        no_header: bool,

        #[command(flatten)]
        detector: DetectorArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct DetectorArgs {
    /// Rolling window size
    #[arg(short, long)]
    window: Option<usize>,

    /// Z-score threshold
    #[arg(short, long)]
    threshold: Option<f64>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only print anomalous points (text format)
    #[arg(long)]
    anomalies_only: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl DetectorArgs {
    fn apply(&self, config: &mut MonitorConfig) {
        if let Some(window) = self.window {
            config.detector.window_size = window;
        }
        if let Some(threshold) = self.threshold {
            config.detector.z_threshold = threshold;
        }
    }
}

impl OutputArgs {
    fn sink(&self) -> Box<dyn VerdictSink> {
        let stdout = io::stdout().lock();
        match self.format {
            Format::Text => Box::new(TextSink::new(stdout).anomalies_only(self.anomalies_only)),
            Format::Json => Box::new(JsonLinesSink::new(stdout)),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MonitorConfig> {
    match path {
        Some(path) => MonitorConfig::from_file(path)
            .with_context(|| format!("invalid configuration in {}", path.display())),
        None => Ok(MonitorConfig::default()),
    }
}

/// Run the simulate command
fn run_simulate(
    mut config: MonitorConfig,
    steps: Option<usize>,
    period: Option<f64>,
    anomaly_prob: Option<f64>,
    seed: Option<u64>,
    output: &OutputArgs,
) -> anyhow::Result<StreamSummary> {
    if let Some(steps) = steps {
        config.generator.steps = steps;
    }
    if let Some(period) = period {
        config.generator.seasonality_period = period;
    }
    if let Some(p) = anomaly_prob {
        config.generator.anomaly_probability = p;
    }
    if seed.is_some() {
        config.generator.seed = seed;
    }
    config.validate()?;

    let mut monitor = Monitor::from_config(&config)?;
    let stream = generate(&config.generator)?;
    let mut sink = output.sink();
    Ok(monitor.run_values(stream, &mut sink)?)
}

/// Run the detect command
fn run_detect(
    config: MonitorConfig,
    input: PathBuf,
    column: Option<String>,
    has_headers: bool,
    output: &OutputArgs,
) -> anyhow::Result<StreamSummary> {
    config.detector.validate()?;
    let samples = input::load(&input, column.as_deref(), has_headers)?;
    tracing::info!(
        samples = samples.len(),
        file = %input.display(),
        "loaded input"
    );

    let mut monitor = Monitor::from_config(&config)?;
    let mut sink = output.sink();
    Ok(monitor.run(samples, &mut sink)?)
}

fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zstream=info,anomaly_core=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    let summary = match cli.command {
        Commands::Simulate {
            detector,
            steps,
            period,
            anomaly_prob,
            seed,
            output,
        } => {
            detector.apply(&mut config);
            run_simulate(config, steps, period, anomaly_prob, seed, &output)?
        }
        Commands::Detect {
            input,
            column,
            no_header,
            detector,
            output,
        } => {
            detector.apply(&mut config);
            run_detect(config, input, column, !no_header, &output)?
        }
    };

    tracing::debug!(anomalies = ?summary.anomaly_indices(), "done");
    Ok(())
}
