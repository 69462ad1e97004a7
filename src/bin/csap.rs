use std::{
    fs::File,
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "csap", version, about = "Blur and blend CSAP RAW images")]
struct Cli {
    /// Log engine and codec diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Box-blur one image.
    Blur(BlurArgs),
    /// Alpha-blend a foreground image onto a background image of the same size.
    Blend(BlendArgs),
    /// Convert RAW to PNG, or any PNG/JPEG/BMP to RAW.
    Convert(ConvertArgs),
    /// Print the header of a RAW image.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input image (RAW, PNG, JPEG or BMP).
    image: PathBuf,

    /// Numeric variant.
    #[arg(short = 't', long = "type", value_enum, default_value_t = BlurType::Float)]
    kind: BlurType,

    /// Kernel size.
    #[arg(short, long, value_enum, default_value_t = KernelChoice::K3)]
    kernel: KernelChoice,

    /// Output file; `.raw` is appended when missing.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BlendArgs {
    /// Background image.
    image1: PathBuf,

    /// Foreground image.
    image2: PathBuf,

    /// Numeric variant. `vector` only supports overlay.
    #[arg(short = 't', long = "type", value_enum, default_value_t = BlendType::Float)]
    kind: BlendType,

    /// Blending mode.
    #[arg(short, long, value_enum, default_value_t = ModeChoice::Overlay)]
    mode: ModeChoice,

    /// Blend factor between 0.0 (background) and 1.0 (foreground).
    #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
    alpha: f64,

    /// Output file; `.raw` is appended when missing.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input file. RAW inputs become PNG, everything else becomes RAW.
    input: PathBuf,

    /// Output file; the extension selects the encoder for non-RAW targets.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// RAW image.
    image: PathBuf,

    /// Print the header as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlurType {
    Float,
    Int,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlendType {
    Float,
    Int,
    Vector,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KernelChoice {
    #[value(name = "3x3")]
    K3,
    #[value(name = "5x5")]
    K5,
    #[value(name = "7x7")]
    K7,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Overlay,
    Merge,
}

#[derive(serde::Serialize)]
struct InfoReport<'a> {
    path: &'a Path,
    #[serde(flatten)]
    header: csapimg::RawHeader,
    channels: u8,
    payload_bytes: usize,
    file_bytes: u64,
    complete: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Blur(args) => cmd_blur(args),
        Command::Blend(args) => cmd_blend(args),
        Command::Convert(args) => cmd_convert(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_logging(verbose: bool) {
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

fn precision_of_blur(kind: BlurType) -> csapimg::Precision {
    match kind {
        BlurType::Float => csapimg::Precision::Float,
        BlurType::Int => csapimg::Precision::Int,
    }
}

fn precision_of_blend(kind: BlendType) -> csapimg::Precision {
    match kind {
        BlendType::Float => csapimg::Precision::Float,
        BlendType::Int => csapimg::Precision::Int,
        BlendType::Vector => csapimg::Precision::Vector,
    }
}

fn kernel_of(choice: KernelChoice) -> csapimg::KernelSize {
    match choice {
        KernelChoice::K3 => csapimg::KernelSize::K3,
        KernelChoice::K5 => csapimg::KernelSize::K5,
        KernelChoice::K7 => csapimg::KernelSize::K7,
    }
}

fn mode_of(choice: ModeChoice) -> csapimg::BlendMode {
    match choice {
        ModeChoice::Overlay => csapimg::BlendMode::Overlay,
        ModeChoice::Merge => csapimg::BlendMode::Merge,
    }
}

/// RAW files are read directly, anything else goes through the `image` decoders.
fn read_input(path: &Path) -> anyhow::Result<csapimg::Image> {
    tracing::info!(path = %path.display(), "loading image");
    let img = if csapimg::is_raw_file(path)
        .with_context(|| format!("open input '{}'", path.display()))?
    {
        csapimg::read_raw_image(path)
    } else {
        csapimg::load_image(path)
    };
    img.with_context(|| format!("read image '{}'", path.display()))
}

fn write_output(path: &Path, img: &csapimg::Image) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    csapimg::write_raw_image(path, img)
        .with_context(|| format!("write raw '{}'", path.display()))?;
    eprintln!(
        "wrote {} ({} x {} x {})",
        path.display(),
        img.height(),
        img.width(),
        img.channels()
    );
    Ok(())
}

fn cmd_blur(args: BlurArgs) -> anyhow::Result<()> {
    let precision = precision_of_blur(args.kind);
    let kernel = kernel_of(args.kernel);
    let src = read_input(&args.image)?;

    let engine = csapimg::create_blur_engine(precision)?;
    tracing::info!(engine = engine.name(), %kernel, "blurring");
    let out = engine.blur(src.view(), kernel)?;

    let path = match &args.output {
        Some(o) => csapimg::explicit_raw_output(o),
        None => csapimg::blur_output_path(&args.image, kernel, precision),
    };
    write_output(&path, &out)
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let precision = precision_of_blend(args.kind);
    let mode = mode_of(args.mode);
    let alpha = csapimg::BlendAlpha::new(args.alpha)?;
    let bg = read_input(&args.image1)?;
    let fg = read_input(&args.image2)?;

    let engine = csapimg::create_blend_engine(precision);
    tracing::info!(engine = engine.name(), %mode, alpha = alpha.get(), "blending");
    let out = engine.blend(bg.view(), fg.view(), mode, alpha)?;

    let path = match &args.output {
        Some(o) => csapimg::explicit_raw_output(o),
        None => csapimg::blend_output_path(
            &args.image1,
            &args.image2,
            mode,
            alpha.get(),
            precision,
        ),
    };
    write_output(&path, &out)
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let from_raw = csapimg::is_raw_file(&args.input)
        .with_context(|| format!("open input '{}'", args.input.display()))?;
    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| csapimg::convert_output_path(&args.input, !from_raw));

    let img = read_input(&args.input)?;
    if from_raw {
        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        csapimg::save_image(&out_path, &img)
            .with_context(|| format!("write image '{}'", out_path.display()))?;
        eprintln!("wrote {}", out_path.display());
        Ok(())
    } else {
        write_output(&out_path, &img)
    }
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let path = args.image.as_path();
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let file_bytes = f
        .metadata()
        .with_context(|| format!("stat '{}'", path.display()))?
        .len();
    let mut head = Vec::with_capacity(csapimg::HEADER_LEN);
    f.take(csapimg::HEADER_LEN as u64)
        .read_to_end(&mut head)
        .with_context(|| format!("read header of '{}'", path.display()))?;
    let header = csapimg::RawHeader::parse(&head)
        .with_context(|| format!("parse header of '{}'", path.display()))?;
    let payload_bytes = header.payload_len()?;

    let report = InfoReport {
        path,
        header,
        channels: header.channels(),
        payload_bytes,
        file_bytes,
        complete: file_bytes >= (csapimg::HEADER_LEN + payload_bytes) as u64,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.path.display());
        println!("  format:   {}", String::from_utf8_lossy(&header.format.tag()));
        println!("  size:     {} x {} x {}", header.height, header.width, report.channels);
        println!("  payload:  {} bytes", report.payload_bytes);
        if !report.complete {
            println!("  warning:  file holds only {} bytes", report.file_bytes);
        }
    }
    Ok(())
}
