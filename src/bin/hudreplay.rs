use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hudreplay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the reconstructed scene state at one point in time.
    State(StateArgs),
    /// Write one JSON frame payload per line for a frame range.
    Frames(FramesArgs),
    /// Summarize a recorded session.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct StateArgs {
    /// Input session recording JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Query time in milliseconds.
    #[arg(long)]
    at: f64,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input session recording JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Replay options JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integer frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Evaluate frames on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// First frame (inclusive). Defaults to 0.
    #[arg(long)]
    start: Option<u64>,

    /// Last frame (exclusive). Defaults to the frame count of the recording.
    #[arg(long)]
    end: Option<u64>,

    /// Output JSONL path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input session recording JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::State(args) => cmd_state(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_state(args: StateArgs) -> anyhow::Result<()> {
    let rec = hudreplay::SessionRecording::from_path(&args.in_path)?;
    let replayer = rec.replayer()?;
    let snapshot = replayer.state_at(args.at);

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &snapshot).context("write snapshot JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let rec = hudreplay::SessionRecording::from_path(&args.in_path)?;

    let mut opts = match &args.config {
        Some(path) => hudreplay::ReplayOpts::from_path(path)?,
        None => hudreplay::ReplayOpts::default(),
    };
    if let Some(fps) = args.fps {
        opts.fps = hudreplay::Fps::new(fps, 1)?;
    }
    if args.parallel {
        opts.parallel = true;
    }
    if args.threads.is_some() {
        opts.threads = args.threads;
    }

    let session = hudreplay::ReplaySession::new(&rec, opts)?;
    let full = session.full_range();
    let range = hudreplay::FrameRange::new(
        hudreplay::FrameIndex(args.start.unwrap_or(full.start.0)),
        hudreplay::FrameIndex(args.end.unwrap_or(full.end.0)),
    )?;
    let (frames, stats) = session.frames(range)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create frames file '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    for payload in &frames {
        serde_json::to_writer(&mut w, payload)
            .with_context(|| format!("write frame {}", payload.frame.0))?;
        writeln!(w)?;
    }
    w.flush()
        .with_context(|| format!("flush '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} frames ({} static) to {}",
        stats.frames_total,
        stats.frames_static,
        args.out.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let rec = hudreplay::SessionRecording::from_path(&args.in_path)?;
    let replayer = rec.replayer()?;

    let mut counts = BTreeMap::<&'static str, usize>::new();
    for e in replayer.events() {
        *counts.entry(e.kind().as_str()).or_default() += 1;
    }

    let summary = serde_json::json!({
        "events": replayer.len(),
        "durationMs": replayer.duration(),
        "kinds": counts,
        "timings": rec.timings.len(),
    });
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &summary).context("write summary JSON")?;
    writeln!(out)?;
    Ok(())
}
