use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "garland", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the opaque bounds of an image as JSON.
    Bounds(BoundsArgs),
    /// Simulate the overlay headlessly and write a PNG sequence.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct BoundsArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Directory holding the scene images.
    #[arg(long)]
    assets: PathBuf,

    /// Optional scene config JSON; built-in scene when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of frames to write.
    #[arg(long, default_value_t = 60)]
    count: u32,

    /// Seed for every randomized parameter.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Background color (`#rrggbb` or `#rrggbbaa`); transparent when omitted.
    #[arg(long)]
    background: Option<String>,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Bounds(args) => cmd_bounds(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn cmd_bounds(args: BoundsArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let img = garland::decode_image(&bytes)?;
    let bounds = garland::compute_opaque_bounds(&img);
    let out = serde_json::json!({
        "width": img.width,
        "height": img.height,
        "bounds": bounds,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }

    let cfg = match &args.config {
        Some(p) => garland::SceneConfig::from_path(p)
            .with_context(|| format!("load scene config '{}'", p.display()))?,
        None => garland::SceneConfig::default(),
    };
    let background = args
        .background
        .as_deref()
        .map(garland::Rgba8::from_hex)
        .transpose()?;

    let source = garland::DirAssetSource::new(&args.assets).with_overrides(&cfg.assets)?;
    let assets = garland::PreparedAssets::load(&source)
        .with_context(|| format!("load assets from '{}'", args.assets.display()))?;

    let viewport = garland::Viewport::new(f64::from(args.width), f64::from(args.height));
    let mut overlay = garland::Overlay::new(
        cfg,
        &assets,
        viewport,
        0.0,
        Box::new(garland::Rng64::new(args.seed)),
    )?;
    let mut sink = garland::CpuSink::new(
        assets,
        garland::CpuSinkSettings { clear: background },
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let frame_ms = 1000.0 / f64::from(args.fps);
    for i in 0..args.count {
        overlay.tick(f64::from(i) * frame_ms);
        overlay.render(&mut sink)?;
        let frame = sink
            .take_frame()
            .context("cpu sink produced no frame")?;

        let mut data = frame.data;
        if frame.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        let path = args.out.join(format!("frame_{i:05}.png"));
        image::save_buffer_with_format(
            &path,
            &data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} frames to {}", args.count, args.out.display());
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
