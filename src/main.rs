use clap::Parser;
use commission_engine::application::engine::CommissionEngine;
use commission_engine::domain::ports::ConfigSourceBox;
use commission_engine::infrastructure::json_file::JsonFileConfigSource;
use commission_engine::interfaces::csv::context_reader::ContextReader;
use commission_engine::interfaces::csv::earnings_writer::EarningsWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Affiliate contexts CSV file
    input: PathBuf,

    /// Commission configuration document (JSON)
    #[arg(long)]
    config: PathBuf,

    /// Reject configurations with invalid values instead of clamping them to zero
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the result CSV
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source: ConfigSourceBox =
        Box::new(JsonFileConfigSource::new(&cli.config).strict(cli.strict));
    let config = source.load().await.into_diagnostic()?;
    let engine = CommissionEngine::new(&config);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = ContextReader::new(file);

    let stdout = io::stdout();
    let mut writer = EarningsWriter::new(stdout.lock()).into_diagnostic()?;

    for record in reader.records() {
        match record {
            Ok(record) => {
                let (affiliate, context) = record.into_context();
                let result = engine.evaluate(&context);
                writer.write(affiliate, &result).into_diagnostic()?;
            }
            Err(e) => {
                warn!(error = %e, "Error reading context");
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
