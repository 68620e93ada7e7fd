use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framescrub::{
    CpuSurface, FrameIndex, FrameRGBA, FrameScrubber, PreloadOpts, RenderLoop, RoutingFrameFetcher,
    ScrollMetrics, ScrubConfig, Viewport, preload, target_frame_for_fraction,
};

#[derive(Parser, Debug)]
#[command(name = "framescrub", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preload every frame and report which ones are missing.
    Probe(ProbeArgs),
    /// Render the frame shown at a scroll fraction as a PNG.
    Frame(FrameArgs),
    /// Scroll from top to bottom over a number of ticks, writing one PNG per tick.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Scrub config JSON. Relative frame locations resolve against its directory; `http(s)://`
    /// bases are downloaded.
    #[arg(long)]
    config: PathBuf,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Exit with an error when any frame is missing.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Parser, Debug, Clone, Copy)]
struct ViewportArgs {
    /// Logical surface width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Logical surface height.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

impl ViewportArgs {
    fn viewport(self) -> Viewport {
        Viewport::new(self.width, self.height, self.dpr)
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scrub config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Scroll fraction in `[0, 1]`.
    #[arg(long)]
    fraction: f64,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Scrub config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output directory for `tick_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of render ticks.
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Extra ticks at the end with the scroll held at the bottom.
    #[arg(long, default_value_t = 0)]
    settle: u64,

    #[command(flatten)]
    viewport: ViewportArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<(ScrubConfig, RoutingFrameFetcher)> {
    let config = ScrubConfig::from_path(path)?;
    let assets_root = path.parent().unwrap_or_else(|| Path::new("."));
    Ok((config, RoutingFrameFetcher::fs_and_http(assets_root)?))
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let (config, fetcher) = load_config(&args.config)?;
    let sequence = config.sequence()?;
    let opts = PreloadOpts {
        threads: args.threads,
    };
    let (_cache, report) = preload(&sequence, &fetcher, &opts)?;

    let json = serde_json::to_string_pretty(&report).context("serialize preload report")?;
    println!("{json}");

    if args.strict && !report.is_complete() {
        anyhow::bail!(
            "{} of {} frames missing",
            report.failed.len(),
            report.total
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (config, fetcher) = load_config(&args.config)?;
    let total = config.total_frames;
    let (mut scrubber, _report) = FrameScrubber::mount(
        CpuSurface::new(),
        config,
        &fetcher,
        args.viewport.viewport(),
        &PreloadOpts::default(),
    )?;

    let index = FrameIndex::from_position(target_frame_for_fraction(args.fraction, total));
    if !scrubber.draw_frame(index)? {
        tracing::warn!(frame = index.0, "frame missing; output keeps frame 0");
    }

    write_png(&args.out, &scrubber.surface().snapshot())?;
    eprintln!("wrote {} (frame {index})", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let (config, fetcher) = load_config(&args.config)?;
    let viewport = args.viewport.viewport();
    let (mut scrubber, _report) = FrameScrubber::mount(
        CpuSurface::new(),
        config,
        &fetcher,
        viewport,
        &PreloadOpts::default(),
    )?;

    let ended_at = Arc::new(AtomicU64::new(u64::MAX));
    let tick_counter = Arc::new(AtomicU64::new(0));
    {
        let ended_at = Arc::clone(&ended_at);
        let tick_counter = Arc::clone(&tick_counter);
        scrubber.set_sequence_end_hook(Box::new(move || {
            ended_at.store(tick_counter.load(Ordering::Relaxed), Ordering::Relaxed);
        }));
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    // Document three viewports tall, scrolled linearly over `ticks`.
    let document_height = viewport.height * 3.0;
    let mut render_loop = RenderLoop::new(scrubber);
    let input = render_loop.sender();
    let total_ticks = args.ticks + args.settle;
    for t in 0..total_ticks {
        let fraction = if args.ticks <= 1 {
            1.0
        } else {
            (t as f64 / (args.ticks - 1) as f64).min(1.0)
        };
        input.scroll(ScrollMetrics::at_fraction(
            fraction,
            document_height,
            viewport.height,
        ))?;
        tick_counter.store(t, Ordering::Relaxed);
        let outcome = render_loop.run_tick()?;

        let out = args.out_dir.join(format!("tick_{t:05}.png"));
        write_png(&out, &render_loop.scrubber().surface().snapshot())?;
        tracing::debug!(tick = t, frame = outcome.frame.0, drawn = outcome.drawn, "tick");
    }

    let stats = render_loop.scrubber().stats();
    eprintln!(
        "wrote {total_ticks} frames to {} ({} draws, {} skipped)",
        args.out_dir.display(),
        stats.draws,
        stats.skipped_draws
    );
    match ended_at.load(Ordering::Relaxed) {
        u64::MAX => eprintln!("sequence end not reached"),
        t => eprintln!("sequence end reached at tick {t}"),
    }
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let straight = frame.to_unpremultiplied();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
