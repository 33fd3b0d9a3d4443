use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use strokeorder::StrokeSource as _;

#[derive(Parser, Debug)]
#[command(name = "strokeorder", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed strokes of a character as JSON.
    Parse(ParseArgs),
    /// Render the frame reached after a number of ticks as a PNG.
    Frame(FrameArgs),
    /// Render one full animation cycle to PNG files or an animated GIF.
    Render(RenderArgs),
    /// Play the animation in real time, then save the latest frame as a PNG.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Raw stroke description.
    #[arg(long, conflicts_with_all = ["table", "character"])]
    data: Option<String>,

    /// JSON stroke table mapping characters to descriptions.
    #[arg(long, requires = "character")]
    table: Option<PathBuf>,

    /// Character to look up in `--table`.
    #[arg(long = "char", requires = "table")]
    character: Option<char>,

    /// Animation options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Simulated ticks to run before capturing.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory receiving numbered PNG frames.
    #[arg(long, required_unless_present = "gif", conflicts_with = "gif")]
    out_dir: Option<PathBuf>,

    /// Animated GIF output path.
    #[arg(long)]
    gif: Option<PathBuf>,

    /// Keep one frame every N ticks.
    #[arg(long, default_value_t = 1)]
    frame_every: u32,

    /// Rasterize frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: InputArgs,

    /// How long to play.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    /// Output PNG path for the last frame.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_description(input: &InputArgs) -> anyhow::Result<String> {
    if let Some(data) = &input.data {
        return Ok(data.clone());
    }
    match (&input.table, input.character) {
        (Some(table), Some(ch)) => {
            let table = strokeorder::StrokeTable::from_path(table)?;
            Ok(table.lookup(ch)?)
        }
        _ => anyhow::bail!("pass --data, or --table together with --char"),
    }
}

fn load_character(input: &InputArgs) -> anyhow::Result<strokeorder::Character> {
    let description = read_description(input)?;
    strokeorder::Character::from_description(&description).context("parse stroke description")
}

fn load_opts(input: &InputArgs) -> anyhow::Result<strokeorder::AnimationOpts> {
    let opts = match &input.config {
        Some(path) => strokeorder::AnimationOpts::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => strokeorder::AnimationOpts::default(),
    };
    Ok(opts.with_env_overrides()?)
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let description = read_description(&args.input)?;
    let report = strokeorder::parse_strokes_with_report(&description)?;
    for dropped in &report.dropped {
        eprintln!("dropped segment {}: {:?}", dropped.index, dropped.reason);
    }
    let json = serde_json::to_string_pretty(&report.strokes).context("serialize strokes")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let character = load_character(&args.input)?;
    let opts = load_opts(&args.input)?;

    let snap = strokeorder::snapshot_after(&character, &opts, args.ticks)?;
    let frame = strokeorder::rasterize_snapshot(&snap, &opts)?;
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} (stroke {}, progress {})",
        args.out.display(),
        snap.current_stroke,
        snap.progress
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let character = load_character(&args.input)?;
    let opts = load_opts(&args.input)?;
    let offline = strokeorder::OfflineOpts {
        frame_every: args.frame_every,
        parallel: args.parallel,
        threads: args.threads,
        ..strokeorder::OfflineOpts::default()
    };

    let stats = match (&args.out_dir, &args.gif) {
        (Some(dir), _) => {
            let mut sink = strokeorder::PngSequenceSink::new(dir, "frame");
            strokeorder::render_cycle(&character, &opts, &offline, &mut sink)?
        }
        (None, Some(gif)) => {
            let mut sink = strokeorder::GifSink::new(gif);
            strokeorder::render_cycle(&character, &opts, &offline, &mut sink)?
        }
        (None, None) => anyhow::bail!("pass --out-dir or --gif"),
    };

    eprintln!(
        "rendered {} frames over {} ticks ({} paused)",
        stats.frames, stats.ticks, stats.paused_ticks
    );
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    let character = load_character(&args.input)?;
    let opts = load_opts(&args.input)?;

    let player =
        strokeorder::AnimationPlayer::start(character, opts.clone(), strokeorder::ThreadTicker::new())?;
    std::thread::sleep(Duration::from_secs_f64(args.seconds));
    let snap = player.latest_frame();
    drop(player.stop());

    let snap = snap.context("player published no frame")?;
    let frame = strokeorder::rasterize_snapshot(&snap, &opts)?;
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} after {} ticks ({} cycles)",
        args.out.display(),
        snap.tick,
        snap.cycle
    );
    Ok(())
}

fn write_png(path: &Path, frame: &strokeorder::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
