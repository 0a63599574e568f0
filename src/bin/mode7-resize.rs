use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use mode7_table::{
    CommandRunner, DitherPattern, DryRunRunner, ImageMagick, ResizeConfig, SizeRange,
    SystemRunner, TableError, ToolPaths,
};

/// Build a rotation table from existing images (requires ImageMagick's `magick`).
///
/// Pass one image, or a folder whose `.png` filenames contain a number (e.g. `image1.png`);
/// folder images are processed in numeric order.
#[derive(Parser, Debug)]
#[command(name = "mode7-resize", version)]
struct Cli {
    /// Input image or folder.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Max width.
    #[arg(long = "max")]
    max: u32,

    /// Min width.
    #[arg(long = "min")]
    min: u32,

    /// Step used to decrement the width.
    #[arg(long = "step")]
    step: u32,

    /// ImageMagick ordered-dither map.
    #[arg(long = "dither", default_value = DitherPattern::DEFAULT)]
    dither: DitherPattern,

    /// ImageMagick executable.
    #[arg(long)]
    magick: Option<String>,

    /// Print the commands instead of running them; nothing is written.
    #[arg(long)]
    dry_run: bool,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

/// Single-dash long flags still accepted alongside their `--` forms.
const LEGACY_FLAGS: [&str; 4] = ["-max", "-min", "-step", "-dither"];

fn normalize_legacy_flags(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|a| {
            let (flag, value) = match a.split_once('=') {
                Some((f, v)) => (f, Some(v)),
                None => (a.as_str(), None),
            };
            if !LEGACY_FLAGS.contains(&flag) {
                return a;
            }
            match value {
                Some(v) => format!("-{flag}={v}"),
                None => format!("-{flag}"),
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args()));
    mode7_table::init_logging(cli.verbose);

    let cfg = ResizeConfig {
        input: cli.input.clone(),
        sizes: SizeRange::new(cli.max, cli.min, cli.step)?,
        dither_pattern: cli.dither.clone(),
    };
    let cwd = std::env::current_dir().context("resolve working directory")?;

    let tool = ImageMagick::new(cli.magick.clone().unwrap_or(ToolPaths::default().magick));

    if cli.dry_run {
        let mut runner = DryRunRunner::default();
        let report = run(&cfg, &cwd, &tool, &mut runner, true)?;
        for inv in &runner.recorded {
            println!("{}", inv.to_command_line());
        }
        eprintln!(
            "dry run: {} images would be written to {}",
            report.requested(),
            report.destination.display()
        );
        return Ok(());
    }

    anyhow::ensure!(
        tool.is_available(),
        "'{}' was not found on PATH (ImageMagick 7 is required)",
        tool.program
    );
    let mut runner = SystemRunner;
    let report = run(&cfg, &cwd, &tool, &mut runner, false)?;

    eprintln!(
        "wrote {} of {} images to {}",
        report.produced.len(),
        report.requested(),
        report.destination.display()
    );
    for failed in &report.failures {
        eprintln!("  missing #{}: {}", failed.image.index, failed.error);
    }
    anyhow::ensure!(
        report.is_complete(),
        "{} image(s) failed; the table has gaps",
        report.failures.len()
    );
    Ok(())
}

fn run(
    cfg: &ResizeConfig,
    cwd: &std::path::Path,
    tool: &ImageMagick,
    runner: &mut dyn CommandRunner,
    dry_run: bool,
) -> anyhow::Result<mode7_table::RunReport> {
    match mode7_table::run_resize(cfg, cwd, tool, runner, dry_run) {
        Err(TableError::InputNotFound(path)) => {
            anyhow::bail!("Input path does not exist: {}", path.display())
        }
        other => Ok(other?),
    }
}
