use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use mode7_table::{
    BlenderRenderer, DitherPattern, ImageMagick, RunReport, SystemRunner, TableConfig,
    TableError, ToolPaths,
};

/// Render a sprite rotation table from a Blender scene (requires `blender` and `magick`).
#[derive(Parser, Debug)]
#[command(name = "mode7-table", version)]
struct Cli {
    /// Blender scene to render. The output folder is created next to it.
    #[arg(long)]
    blend: PathBuf,

    /// JSON table config. Flags below override individual fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Table name used in output filenames.
    #[arg(long)]
    name: Option<String>,

    /// Largest output width.
    #[arg(long)]
    scale_max: Option<u32>,

    /// Smallest output width.
    #[arg(long)]
    scale_min: Option<u32>,

    /// Width decrement between sizes.
    #[arg(long)]
    scale_step: Option<u32>,

    /// Number of yaw samples around the subject.
    #[arg(long)]
    yaw_rotations: Option<u32>,

    /// Number of pitch samples.
    #[arg(long)]
    pitch_rotations: Option<u32>,

    /// Scene object rotated to orbit the camera.
    #[arg(long)]
    parent: Option<String>,

    /// Output folder name, relative to the scene file.
    #[arg(long)]
    output_folder: Option<String>,

    /// ImageMagick ordered-dither map.
    #[arg(long)]
    dither: Option<DitherPattern>,

    /// ImageMagick executable.
    #[arg(long)]
    magick: Option<String>,

    /// Blender executable.
    #[arg(long)]
    blender: Option<String>,

    /// Also write a JSON manifest describing the table to this path.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mode7_table::init_logging(cli.verbose);

    let cfg = load_config(&cli)?;
    cfg.validate()?;

    if !cli.blend.is_file() {
        return Err(TableError::InputNotFound(cli.blend.clone()).into());
    }

    let defaults = ToolPaths::default();
    let tools = ToolPaths {
        magick: cli.magick.clone().unwrap_or(defaults.magick),
        blender: cli.blender.clone().unwrap_or(defaults.blender),
    };

    let tool = ImageMagick::new(tools.magick.as_str());
    anyhow::ensure!(
        tool.is_available(),
        "'{}' was not found on PATH (ImageMagick 7 is required)",
        tools.magick
    );
    let mut renderer = BlenderRenderer::new(tools.blender.as_str(), &cli.blend, SystemRunner);
    anyhow::ensure!(
        renderer.is_available(),
        "'{}' was not found on PATH",
        tools.blender
    );

    let scene_dir = cli.blend.parent().unwrap_or_else(|| Path::new("."));
    let mut runner = SystemRunner;
    let report = mode7_table::run_table(&cfg, scene_dir, &mut renderer, &tool, &mut runner)
        .with_context(|| format!("generate table '{}'", cfg.name))?;

    finish(&report, cli.manifest.as_deref())
}

fn load_config(cli: &Cli) -> anyhow::Result<TableConfig> {
    let mut cfg = match &cli.config {
        Some(path) => TableConfig::from_json_file(path)?,
        None => TableConfig::default(),
    };

    if let Some(v) = &cli.name {
        cfg.name = v.clone();
    }
    if let Some(v) = cli.scale_max {
        cfg.scale_max = v;
    }
    if let Some(v) = cli.scale_min {
        cfg.scale_min = v;
    }
    if let Some(v) = cli.scale_step {
        cfg.scale_step = v;
    }
    if let Some(v) = cli.yaw_rotations {
        cfg.yaw_rotations = v;
    }
    if let Some(v) = cli.pitch_rotations {
        cfg.pitch_rotations = v;
    }
    if let Some(v) = &cli.parent {
        cfg.parent_object_name = v.clone();
    }
    if let Some(v) = &cli.output_folder {
        cfg.output_folder_name = v.clone();
    }
    if let Some(v) = &cli.dither {
        cfg.dither_pattern = v.clone();
    }
    Ok(cfg)
}

fn finish(report: &RunReport, manifest: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = manifest {
        report.manifest().write_json(path)?;
        eprintln!("wrote {}", path.display());
    }

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
