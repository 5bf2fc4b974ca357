use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dictionary_exporter::{
    extract_records, preview, read_source, ExportTarget, Exporter, ExporterConfig, KeyingMode,
    LibreTranslateClient, TableEntry, TracingReporter,
};

/// Export a source dictionary into per-language lookup tables.
#[derive(Debug, Parser)]
#[command(name = "dictionary-exporter", version)]
struct Cli {
    /// TOML configuration file (defaults to the first one found in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source dictionary, overrides `export.source_path`
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Target language code to export; repeatable. Exports every configured target when omitted.
    #[arg(short, long = "target")]
    targets: Vec<String>,

    /// Export every configured target
    #[arg(long, conflicts_with = "targets")]
    all: bool,

    /// Print a sample of each identity table instead of writing files
    #[arg(long)]
    preview: bool,

    /// Write an example configuration file and exit
    #[arg(long, value_name = "FILE")]
    init_config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(path) = &cli.init_config {
        ExporterConfig::generate_example_config(path)?;
        tracing::info!("Wrote example configuration to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ExporterConfig::from_file(path)?,
        None => ExporterConfig::load_from_default_locations(),
    };

    let source = cli
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export.source_path));
    let text = read_source(&source)?;
    let records = extract_records(&text);
    tracing::info!("Parsed {} entries.", records.len());

    let targets = select_targets(&config, &cli.targets, cli.all)?;

    if cli.preview {
        for target in &targets {
            if matches!(target.mode, KeyingMode::Translate { .. }) {
                continue;
            }
            let entries: Vec<_> = records
                .iter()
                .filter_map(|r| target.mode.identity_key(r).map(|key| TableEntry::keyed_by(r, key)))
                .collect();
            println!("# {} ({})", target.code, target.output);
            println!("{}\n", preview(&entries, config.export.preview_limit));
        }
        return Ok(());
    }

    let exporter = Exporter::new(LibreTranslateClient::new(config.translation.clone()), &config.export);
    exporter
        .export_all(&targets, &records, &mut TracingReporter)
        .await
        .context("Export failed")?;

    Ok(())
}

fn select_targets(
    config: &ExporterConfig,
    codes: &[String],
    all: bool,
) -> anyhow::Result<Vec<ExportTarget>> {
    if all || codes.is_empty() {
        return Ok(config.targets.clone());
    }

    let mut selected = Vec::with_capacity(codes.len());
    for code in codes {
        match config.target(code) {
            Some(target) => selected.push(target.clone()),
            None => bail!("no export target configured for language code {code:?}"),
        }
    }
    Ok(selected)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
