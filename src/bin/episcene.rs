use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use episcene::{Category, DateIndex, Raster, SceneConfig, SceneState, SourcePaths};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "episcene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the scene for one date as JSON.
    Snapshot(SnapshotArgs),
    /// Print the per-date maximum and marker counts over a date range.
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Confirmed-cases CSV.
    #[arg(long)]
    infections: PathBuf,

    /// Recovered CSV.
    #[arg(long)]
    recovered: PathBuf,

    /// Deaths CSV.
    #[arg(long)]
    deaths: PathBuf,

    /// Country centroid CSV (needed for `--flows`).
    #[arg(long)]
    centroids: Option<PathBuf>,

    /// Directory of per-destination migration CSVs.
    #[arg(long, requires = "centroids")]
    flows: Option<PathBuf>,

    /// Background image whose dimensions define the raster.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    raster: Option<PathBuf>,

    /// Raster width in pixels.
    #[arg(long, default_value_t = 2048)]
    width: u32,

    /// Raster height in pixels.
    #[arg(long, default_value_t = 1024)]
    height: u32,

    /// Scene config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the largest marker radius.
    #[arg(long)]
    max_radius: Option<f64>,

    /// Override the flow declutter threshold (fraction of the heaviest edge).
    #[arg(long)]
    flow_threshold: Option<f64>,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Date index (0-based, days since the epoch).
    #[arg(long, default_value_t = 0)]
    date: usize,

    /// Category to hide (repeatable).
    #[arg(long)]
    hide: Vec<Category>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    input: InputArgs,

    /// First date index.
    #[arg(long, default_value_t = 0)]
    from: usize,

    /// Date index one past the last (defaults to the end of the series).
    #[arg(long)]
    to: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Summary(args) => cmd_summary(args),
    }
}

fn read_config(input: &InputArgs) -> anyhow::Result<SceneConfig> {
    let mut config = match &input.config {
        Some(path) => SceneConfig::from_path(path)
            .with_context(|| format!("load scene config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(r) = input.max_radius {
        config.radius.max_radius = r;
    }
    if let Some(t) = input.flow_threshold {
        config.flow.threshold_fraction = t;
    }
    config.validate()?;
    Ok(config)
}

fn read_raster(input: &InputArgs) -> anyhow::Result<Raster> {
    let (width, height) = match &input.raster {
        Some(path) => image::image_dimensions(path)
            .with_context(|| format!("read raster dimensions from '{}'", path.display()))?,
        None => (input.width, input.height),
    };
    Ok(Raster::new(width, height)?)
}

fn open_scene(input: &InputArgs) -> anyhow::Result<SceneState> {
    let config = read_config(input)?;
    let raster = read_raster(input)?;
    let loaded = episcene::load(&SourcePaths {
        infections: input.infections.clone(),
        recovered: input.recovered.clone(),
        deaths: input.deaths.clone(),
        centroids: input.centroids.clone(),
        flows: input.flows.clone(),
    })
    .context("load input tables")?;

    Ok(SceneState::new(
        Arc::new(loaded.dataset),
        Arc::new(loaded.flows),
        raster,
        config,
    )?)
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let mut scene = open_scene(&args.input)?;
    for category in &args.hide {
        scene.set_visibility(*category, false);
    }
    scene.set_date(DateIndex(args.date))?;
    let snap = scene.snapshot();

    let mut w: Box<dyn std::io::Write> = match &args.out {
        Some(path) => Box::new(create_output(path)?),
        None => Box::new(std::io::stdout().lock()),
    };
    let written = if args.pretty {
        serde_json::to_writer_pretty(&mut w, &snap)
    } else {
        serde_json::to_writer(&mut w, &snap)
    };
    written.context("write scene JSON")?;
    writeln!(w)?;
    w.flush()?;

    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let mut scene = open_scene(&args.input)?;
    let to = args.to.unwrap_or(scene.num_dates()).min(scene.num_dates());
    if args.from >= to {
        anyhow::bail!("empty date range {}..{}", args.from, to);
    }

    let mut out = std::io::stdout().lock();
    writeln!(out, "date\tlabel\tmax\tinfections\trecovered\tdeaths\tedges")?;
    for d in args.from..to {
        let change = scene.set_date(DateIndex(d))?;
        let snap = scene.snapshot();
        let counts = Category::ALL.map(|c| snap.markers(c).map_or(0, <[_]>::len));
        writeln!(
            out,
            "{d}\t{}{}\t{}\t{}\t{}\t{}\t{}",
            snap.date_label,
            if change.month_changed { "*" } else { "" },
            snap.max_count,
            counts[0],
            counts[1],
            counts[2],
            snap.edges.len()
        )?;
    }
    Ok(())
}
