use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mustc::config::{Config, Language, BUILDER_CONFIGS};
use mustc::corpus::Split;
use mustc::dataset::{dataset_info, ExampleGenerator, ExampleRecord};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "mustc")]
#[command(version, about = "Read examples from the MuST-C speech translation corpus")]
#[command(long_about = "Iterate one split of a manually downloaded MuST-C language pair and print one JSON record per aligned (audio, transcript, translation) example.")]
struct Cli {
    /// Folder holding the extracted en-<lang> directories
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Target language: de, es, fr, it, nl, pt, ro, ru
    #[arg(short, long)]
    language: Option<String>,

    /// Split: train, validation, test
    #[arg(short, long, default_value = "validation")]
    split: String,

    /// Stop after this many records
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Include the decoded sample array in the output
    #[arg(long)]
    with_audio: bool,

    /// Print dataset information and exit
    #[arg(long)]
    info: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    index: usize,
    #[serde(flatten)]
    record: &'a ExampleRecord,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn json_line(index: usize, mut record: ExampleRecord, with_audio: bool) -> serde_json::Result<String> {
    if !with_audio {
        record.audio.array.clear();
    }
    serde_json::to_string(&JsonLine {
        index,
        record: &record,
    })
}

fn info_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "info": dataset_info(),
        "configs": BUILDER_CONFIGS,
    }))
}

/// Config file and environment, with command-line flags taking precedence.
///
/// An environment value shadowed by a flag is never parsed.
fn load_config<F>(cli: &Cli, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::load(|key| match key {
        "MUSTC_LANGUAGE" if cli.language.is_some() => None,
        "MUSTC_DATA_DIR" if cli.data_dir.is_some() => None,
        _ => env(key),
    })
    .context("Failed to load configuration")?;

    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(ref language) = cli.language {
        config.language = language.parse::<Language>()?;
    }
    Ok(config)
}

/// Write records as JSON lines until the examples run out or `cancelled` is set.
///
/// `cancelled` is checked before each record is pulled, so no audio is decoded
/// after an interrupt. Returns the number of records written.
fn write_examples<I, W, F>(
    mut examples: I,
    out: &mut W,
    cancelled: &AtomicBool,
    with_audio: bool,
    mut on_record: F,
) -> Result<u64>
where
    I: Iterator<Item = mustc::Result<(usize, ExampleRecord)>>,
    W: Write,
    F: FnMut(&ExampleRecord),
{
    let mut written = 0;
    while !cancelled.load(Ordering::Relaxed) {
        let Some(item) = examples.next() else {
            return Ok(written);
        };
        let (index, record) = item?;
        on_record(&record);
        writeln!(out, "{}", json_line(index, record, with_audio)?)?;
        written += 1;
    }

    warn!("Interrupted, stopping after {} examples", written);
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.info {
        println!("{}", info_json()?);
        return Ok(());
    }

    let config = load_config(&cli, |key| std::env::var(key).ok())?;

    init_logging(cli.verbose || config.verbose);

    config.validate().context("Configuration validation failed")?;
    let split: Split = cli.split.parse()?;
    let data_dir = config.data_dir.clone().unwrap_or_default();

    info!("Data dir: {}", data_dir.display());
    info!("Language: {}", config.language.pair_dir());
    info!("Split:    {} ({})", split, split.dir_name());

    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = cancelled.clone();
        ctrlc::set_handler(move || cancelled.store(true, Ordering::Relaxed))
            .context("Failed to install Ctrl+C handler")?;
    }

    let generator = ExampleGenerator::open(&data_dir, config.language, split)
        .with_context(|| format!("Failed to open {} split", split))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {pos} examples {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let limit = cli.limit.unwrap_or(usize::MAX);

    let written = write_examples(
        generator.take(limit),
        &mut out,
        &cancelled,
        cli.with_audio,
        |record| {
            pb.set_message(record.doc_id.clone());
            pb.inc(1);
        },
    )?;

    out.flush()?;
    pb.finish_with_message("done");
    info!("Wrote {} examples", written);

    Ok(())
}
