use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    in_path: Option<PathBuf>,
    width: u32,
    height: u32,
    scale: f64,
    kernel: resample::InterpolationType,
    schedule: Option<resample::ExecutionStrategy>,
    warmup: u32,
    repeats: u32,
    threads: Option<usize>,
    json: bool,
}

#[derive(Clone, Debug)]
struct StrategyRun {
    strategy: resample::ExecutionStrategy,
    samples: Vec<Duration>,
    output_sha256: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }
    if let Some(n) = args.threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    let src = match &args.in_path {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
            resample::decode_image(&bytes)
                .with_context(|| format!("decode '{}'", path.display()))?
        }
        None => synthetic_source(args.width, args.height)?,
    };

    let strategies = match args.schedule {
        Some(s) => vec![s],
        None => resample::ExecutionStrategy::ALL.to_vec(),
    };

    let scale = resample::ScaleFactor::new(args.scale)?;
    let (out_w, out_h) = resample::output_dimensions(src.width(), src.height(), scale)?;
    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {sw}x{sh} -> {out_w}x{out_h}, kernel={kernel}, scale={scale}, threads={threads}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        sw = src.width(),
        sh = src.height(),
        kernel = args.kernel,
        scale = args.scale,
        threads = args
            .threads
            .map(|n| n.to_string())
            .unwrap_or_else(|| "auto".to_string()),
    );

    let mut runs = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        runs.push(run_strategy(&args, &src, strategy)?);
    }

    report(&runs);

    if args.json {
        let report = json!({
            "source": { "width": src.width(), "height": src.height() },
            "output": { "width": out_w, "height": out_h },
            "kernel": args.kernel,
            "scale": args.scale,
            "repeats": args.repeats,
            "runs": runs.iter().map(|r| json!({
                "strategy": r.strategy,
                "min_ms": ms(min(&r.samples)),
                "p50_ms": ms(percentile(&r.samples, 0.50)),
                "p90_ms": ms(percentile(&r.samples, 0.90)),
                "output_sha256": r.output_sha256,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn run_strategy(
    args: &BenchArgs,
    src: &resample::Image,
    strategy: resample::ExecutionStrategy,
) -> anyhow::Result<StrategyRun> {
    let config = resample::ResampleConfig::new(args.scale, args.kernel)?
        .with_strategy(strategy)
        .with_threads(args.threads)?;
    let resampler = resample::Resampler::new(src.width(), src.height(), &config)?;
    let (w, h) = resampler.output_size();
    let mut out = resample::Image::new(w, h)?;

    for _ in 0..args.warmup {
        resampler.run_into(src, &mut out)?;
    }

    let mut samples = Vec::with_capacity(args.repeats as usize);
    for _ in 0..args.repeats {
        let before = Instant::now();
        resampler.run_into(src, &mut out)?;
        samples.push(before.elapsed());
    }

    Ok(StrategyRun {
        strategy,
        samples,
        output_sha256: sha256_hex(out.data()),
    })
}

/// Deterministic RGB pattern with smooth gradients and hard edges.
fn synthetic_source(width: u32, height: u32) -> anyhow::Result<resample::Image> {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Ok(resample::Image::from_fn(width, height, |x, y, c| {
        let (fx, fy) = (x as f32 / w, y as f32 / h);
        match c {
            0 => fx,
            1 => fy,
            _ => {
                if (x / 8 + y / 8) % 2 == 0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    })?)
}

fn sha256_hex(samples: &[f32]) -> String {
    let mut hasher = sha2::Sha256::new();
    for v in samples {
        hasher.update(v.to_le_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        in_path: None,
        width: 1024,
        height: 768,
        scale: 0.5,
        kernel: resample::InterpolationType::Linear,
        schedule: None,
        warmup: 1,
        repeats: 20,
        threads: None,
        json: false,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--in" => {
                out.in_path = Some(PathBuf::from(args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --in (expected a path)")
                })?))
            }
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--scale" => out.scale = parse_f64(args.next(), "--scale")?,
            "--kernel" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --kernel (box|linear|cubic)")
                })?;
                out.kernel = v.parse()?;
            }
            "--schedule" => {
                let v = parse_u32(args.next(), "--schedule")?;
                let idx = u8::try_from(v).with_context(|| format!("--schedule {v}"))?;
                out.schedule = Some(resample::ExecutionStrategy::from_index(idx)?);
            }
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--threads" => out.threads = Some(parse_usize(args.next(), "--threads")?),
            "--json" => out.json = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"resample-bench

Resamples one image repeatedly per execution strategy and reports min/p50/p90.

Usage:
  cargo run -q --release -p resample-bench
  cargo run -q --release -p resample-bench -- --scale 2 --kernel cubic
  cargo run -q --release -p resample-bench -- --in photo.png --schedule 3 --threads 4

Args:
  --in PATH        source image (default: synthetic pattern)
  --width N        synthetic source width (default 1024)
  --height N       synthetic source height (default 768)
  --scale F        scale factor (default 0.5)
  --kernel K       box|linear|cubic (default linear)
  --schedule N     0=default 1=vectorized 2=parallel 3=vectorized+parallel (default: all)
  --warmup N       untimed runs per strategy (default 1)
  --repeats N      timed runs per strategy (default 20)
  --threads N      worker threads for parallel strategies (default auto)
  --json           print a JSON report to stdout
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_f64(v: Option<String>, flag: &str) -> anyhow::Result<f64> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<f64>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn min(v: &[Duration]) -> Duration {
    v.iter().copied().min().unwrap_or(Duration::ZERO)
}

fn percentile(v: &[Duration], p: f64) -> Duration {
    if v.is_empty() {
        return Duration::ZERO;
    }
    let mut sorted = v.to_vec();
    sorted.sort();
    let n = sorted.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    sorted[rank - 1]
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn report(runs: &[StrategyRun]) {
    eprintln!("\ntimings per strategy (min/p50/p90):");
    for r in runs {
        eprintln!(
            "  {name:20} min={min:>10.3}ms  p50={p50:>10.3}ms  p90={p90:>10.3}ms  sha256={sha}",
            name = r.strategy.name(),
            min = ms(min(&r.samples)),
            p50 = ms(percentile(&r.samples, 0.50)),
            p90 = ms(percentile(&r.samples, 0.90)),
            sha = &r.output_sha256[..16],
        );
    }

    let mut digests = runs.iter().map(|r| r.output_sha256.as_str()).collect::<Vec<_>>();
    digests.dedup();
    if digests.len() > 1 {
        eprintln!("warning: strategies produced different outputs");
    }
}
