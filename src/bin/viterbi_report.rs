use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hmm_viterbi::report::{CsvReport, JsonReport, TableReport};
use hmm_viterbi::source::{JsonModelSource, SampleModelSource};
use hmm_viterbi::{ModelSource, ReportSink, ViterbiDecoderBuilder};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Decode the most probable hidden-state path of an HMM and write a report.
#[derive(Parser, Debug)]
#[command(name = "viterbi-report", version)]
struct Options {
    /// JSON model file; the built-in three-state sample is used when omitted.
    #[arg(short, long)]
    model: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sum-to-one tolerance, overriding the model file.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Score time steps in parallel from this many states on.
    #[arg(long)]
    parallel_min_states: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let problem = match &options.model {
        Some(path) => {
            let mut source = JsonModelSource::new(path);
            if let Some(tol) = options.tolerance {
                source = source.with_tolerance(tol);
            }
            source.load()?
        }
        None => {
            let mut source = SampleModelSource::new();
            if let Some(tol) = options.tolerance {
                source = source.with_tolerance(tol);
            }
            source.load()?
        }
    };
    info!(
        n_states = problem.model.n_states(),
        n_symbols = problem.model.n_symbols(),
        n_steps = problem.observations.len(),
        "model loaded"
    );

    let mut builder = ViterbiDecoderBuilder::new();
    if let Some(n) = options.parallel_min_states {
        builder = builder.with_parallel_min_states(n);
    }
    let decoding = builder.build().decode(&problem.model, &problem.observations)?;

    let out: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match options.format {
        OutputFormat::Csv => CsvReport::new(out).write_report(&problem, &decoding)?,
        OutputFormat::Table => TableReport::new(out).write_report(&problem, &decoding)?,
        OutputFormat::Json => JsonReport::new(out).write_report(&problem, &decoding)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let options = Options::parse();
    init_tracing(options.verbose);

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("viterbi-report: {err}");
            ExitCode::FAILURE
        }
    }
}
