use std::{
    io::IsTerminal as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum, error::ErrorKind};

const USAGE: &str = "Usage:\n\
    \t./resample [-f scalefactor] [-s schedule] [-t box|linear|cubic] in.png out.png\n\
    \t\tSchedules: 0=default 1=vectorized 2=parallel 3=vectorized+parallel";

#[derive(Parser, Debug)]
#[command(
    name = "resample",
    version,
    about = "Resize an image by an arbitrary scale factor",
    override_usage = "resample [-f scalefactor] [-s schedule] [-t box|linear|cubic] in.png out.png"
)]
struct Cli {
    /// Scale factor (< 1 downscales, > 1 upscales).
    #[arg(
        short = 'f',
        value_name = "scalefactor",
        default_value_t = 1.0,
        allow_negative_numbers = true
    )]
    scale_factor: f64,

    /// Schedule: 0=default 1=vectorized 2=parallel 3=vectorized+parallel.
    #[arg(
        short = 's',
        value_name = "schedule",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    schedule: u8,

    /// Interpolation kernel.
    #[arg(short = 't', value_name = "type", value_enum, default_value_t = KernelChoice::Linear)]
    kernel: KernelChoice,

    /// Input image.
    infile: PathBuf,

    /// Output image; the format follows the extension.
    outfile: PathBuf,

    /// Ignored extra arguments, including ones that look like flags.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KernelChoice {
    Box,
    Linear,
    Cubic,
}

impl From<KernelChoice> for resample::InterpolationType {
    fn from(value: KernelChoice) -> Self {
        match value {
            KernelChoice::Box => Self::Box,
            KernelChoice::Linear => Self::Linear,
            KernelChoice::Cubic => Self::Cubic,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    for arg in &cli.extra {
        tracing::warn!("Unexpected command line option '{arg}'.");
    }

    let config = resample::ResampleConfig::new(cli.scale_factor, cli.kernel.into())?
        .with_strategy(resample::ExecutionStrategy::from_index(cli.schedule)?);

    tracing::info!("Loading '{}'", cli.infile.display());
    let bytes = std::fs::read(&cli.infile)
        .with_context(|| format!("read input '{}'", cli.infile.display()))?;
    let src = resample::decode_image(&bytes)
        .with_context(|| format!("decode input '{}'", cli.infile.display()))?;

    let resampler = resample::Resampler::new(src.width(), src.height(), &config)?;
    let (out_w, out_h) = resampler.output_size();
    tracing::info!(
        schedule = config.strategy().name(),
        "Resampling '{}' from {}x{} to {out_w}x{out_h} using {} interpolation",
        cli.infile.display(),
        src.width(),
        src.height(),
        config.interpolation(),
    );
    let out = resampler.run(&src)?;

    write_output(&cli.outfile, &out)?;
    tracing::info!("wrote {}", cli.outfile.display());
    Ok(())
}

fn write_output(path: &Path, img: &resample::Image) -> anyhow::Result<()> {
    let format = resample::ImageFormat::from_path(path)
        .with_context(|| format!("pick output format for '{}'", path.display()))?;
    let bytes = resample::encode_image(img, format)
        .with_context(|| format!("encode output '{}'", path.display()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write output '{}'", path.display()))?;
    Ok(())
}
