use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sheetpack", version)]
struct Cli {
    /// Log per-stage details (reduction passes, chosen rates).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert every supported animation in a directory.
    Batch(BatchArgs),
    /// Convert a single animation; the input is left in place.
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory to scan for GIF, WebP, and video files.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Output directory for sprite sheets.
    #[arg(long, default_value = "spritesheets")]
    out: PathBuf,

    /// Directory that receives successfully converted originals.
    #[arg(long, default_value = "originals")]
    originals: PathBuf,

    /// Leave converted originals where they are.
    #[arg(long)]
    keep_originals: bool,

    /// Convert inputs concurrently (uses more memory).
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Write a JSON report of every item to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input animation.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for the sprite sheet.
    #[arg(long, default_value = "spritesheets")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Batch(args) => cmd_batch(args),
        Command::Convert(args) => cmd_convert(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let inputs = sheetpack::discover_inputs(&args.dir)?;
    if inputs.is_empty() {
        eprintln!("No supported files found in {}", args.dir.display());
        return Ok(());
    }

    let opts = sheetpack::BatchOptions {
        out_dir: args.out,
        originals_dir: (!args.keep_originals).then_some(args.originals),
        layout: sheetpack::SheetLayout::ENGINE,
        threading: sheetpack::BatchThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    };

    let report = sheetpack::run_batch(&inputs, &opts)?;

    if let Some(path) = &args.report {
        sheetpack::ensure_parent_dir(path)?;
        let f = File::create(path)
            .with_context(|| format!("create report '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), &report)
            .with_context(|| format!("write report '{}'", path.display()))?;
    }

    eprintln!();
    eprintln!("Successfully processed {} files", report.summary);
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let sink = sheetpack::PngDirSink::new(&args.out);
    let output = sheetpack::convert_input(&args.in_path, &sink, &sheetpack::SheetLayout::ENGINE)
        .with_context(|| format!("convert '{}'", args.in_path.display()))?;

    eprintln!(
        "wrote {} ({} of {} frames, {} fps)",
        output.sheet_path.display(),
        output.frame_count,
        output.source_frames,
        output.rate
    );
    Ok(())
}
