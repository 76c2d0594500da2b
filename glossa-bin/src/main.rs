use std::path::PathBuf;

use clap::{Parser, Subcommand};

use glossa_core::{
    AnalysisConfig, AnalysisMode, EventSource, RecordSink, TargetField, TranslationEvent,
};
use glossa_io::{FileSource, JsonLineSink};

#[derive(Parser, Debug)]
#[command(name = "glossa", version, about = "Translation-delivery event analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Minute-by-minute moving average of a numeric field over a trailing window
    MovingAverage {
        /// Events file: a JSON array or newline-delimited JSON objects
        #[arg(short, long)]
        input_file: PathBuf,
        /// Look-back window, in minutes
        #[arg(long, default_value_t = glossa_core::DEFAULT_WINDOW_SIZE_MINUTES,
              value_parser = clap::value_parser!(u32).range(1..))]
        window_size: u32,
        /// Field to average: `duration` or `nr_words`
        #[arg(long, default_value = "duration", value_parser = parse_target_field)]
        target_field: TargetField,
        /// Append JSON lines here instead of printing to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delivered-translation counts per client
    Clients {
        #[arg(short, long)]
        input_file: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delivered-translation counts per (source, target) language pair
    Languages {
        #[arg(short, long)]
        input_file: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_target_field(s: &str) -> Result<TargetField, String> {
    s.parse()
}

impl Commands {
    fn into_parts(self) -> (AnalysisConfig, PathBuf, Option<PathBuf>) {
        match self {
            Commands::MovingAverage {
                input_file,
                window_size,
                target_field,
                output,
            } => (
                AnalysisConfig {
                    mode: AnalysisMode::MovingAverage,
                    window_size_minutes: window_size,
                    target_field,
                },
                input_file,
                output,
            ),
            Commands::Clients { input_file, output } => (
                AnalysisConfig {
                    mode: AnalysisMode::ClientsReport,
                    ..AnalysisConfig::default()
                },
                input_file,
                output,
            ),
            Commands::Languages { input_file, output } => (
                AnalysisConfig {
                    mode: AnalysisMode::LanguagesReport,
                    ..AnalysisConfig::default()
                },
                input_file,
                output,
            ),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let (config, input_file, output) = cli.command.into_parts();
    config.validate()?;

    let mut source = FileSource::new(&input_file);
    let raw = source.load().await?;
    let events = raw
        .iter()
        .map(TranslationEvent::from_json)
        .collect::<glossa_core::Result<Vec<_>>>()?;
    tracing::info!(path = %input_file.display(), events = events.len(), "loaded delivery events");

    let rows = glossa_ops::run_analysis(&config, events)?;
    let mut sink = match output {
        Some(path) => JsonLineSink::file(path),
        None => JsonLineSink::stdout(),
    };
    let emitted = rows.len();
    for row in rows {
        sink.emit(row).await?;
    }
    tracing::info!(rows = emitted, "analysis complete");
    Ok(())
}
