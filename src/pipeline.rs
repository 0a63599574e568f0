use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    cascade::{
        destination::recreate_dir,
        discovery::discover_inputs,
        driver::{CascadeOutcome, CascadePlan, FailedImage, OutputImage, run_cascade},
        source::SourceImage,
    },
    foundation::{
        config::{DitherPattern, ResizeConfig, TableConfig},
        error::{TableError, TableResult},
    },
    process::{
        invocation::CommandRunner,
        magick::{GeometryMode, ImageMagick},
    },
    render::{orchestrator::render_orbit, renderer::SceneRenderer},
    table::{
        angles::{AngleSample, sample_angles},
        indexer::{FrameCounter, OutputIndex, output_path, table_dir_name},
        layout::TableLayout,
        sizes::{cascade_len, cascade_widths},
    },
};

/// A produced image plus the orbit angle it was rendered from (table mode only).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TableEntry {
    #[serde(flatten)]
    pub image: OutputImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<AngleSample>,
}

/// What a run produced, and which indices are missing because the image tool failed.
#[derive(Debug)]
pub struct RunReport {
    pub table_name: String,
    pub destination: PathBuf,
    pub dither: DitherPattern,
    pub widths: Vec<u32>,
    pub layout: TableLayout,
    pub produced: Vec<TableEntry>,
    pub failures: Vec<FailedImage>,
}

impl RunReport {
    fn new(
        table_name: String,
        destination: PathBuf,
        dither: DitherPattern,
        widths: Vec<u32>,
        layout: TableLayout,
    ) -> Self {
        Self {
            table_name,
            destination,
            dither,
            widths,
            layout,
            produced: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn absorb(&mut self, outcome: CascadeOutcome, angle: Option<AngleSample>) {
        self.produced.extend(
            outcome
                .produced
                .into_iter()
                .map(|image| TableEntry { image, angle }),
        );
        self.failures.extend(outcome.failed);
    }

    /// Indices that were requested but not produced, ascending.
    pub fn gaps(&self) -> Vec<OutputIndex> {
        let mut gaps: Vec<_> = self.failures.iter().map(|f| f.image.index).collect();
        gaps.sort();
        gaps
    }

    pub fn requested(&self) -> usize {
        self.produced.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serializable description of the table for the runtime that loads it.
    pub fn manifest(&self) -> TableManifest {
        TableManifest {
            table_name: self.table_name.clone(),
            dither: self.dither.clone(),
            layout: self.layout,
            widths: self.widths.clone(),
            images: self
                .produced
                .iter()
                .map(|e| ManifestImage {
                    index: e.image.index,
                    file: e
                        .image
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    width: e.image.width,
                    height: e.image.height,
                    yaw: e.angle.map(|a| a.yaw),
                    pitch: e.angle.map(|a| a.pitch),
                })
                .collect(),
            missing: self.gaps(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TableManifest {
    pub table_name: String,
    pub dither: DitherPattern,
    pub layout: TableLayout,
    pub widths: Vec<u32>,
    pub images: Vec<ManifestImage>,
    pub missing: Vec<OutputIndex>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ManifestImage {
    pub index: OutputIndex,
    pub file: String,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaw: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<i32>,
}

impl TableManifest {
    pub fn write_json(&self, path: &Path) -> TableResult<()> {
        let f = std::fs::File::create(path)
            .with_context(|| format!("create manifest '{}'", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(f), self)
            .with_context(|| format!("write manifest '{}'", path.display()))?;
        Ok(())
    }
}

/// Table mode: orbit the camera pivot, render each angle, and cascade every render.
///
/// The destination is `<scene_dir>/<output_folder_name>`, recreated empty before the first
/// render. A renderer failure aborts the run; resize failures are recorded in the report.
///
/// Each angle gets one image per width in [`cascade_widths`], which never goes below
/// `scale_min`. When `scale_step` does not divide `scale_max - scale_min` that can be one
/// fewer than [`cascade_len`]; size runtime tables from `layout.scale_count`, not the formula.
#[tracing::instrument(skip_all, fields(table = %cfg.name))]
pub fn run_table(
    cfg: &TableConfig,
    scene_dir: &Path,
    renderer: &mut dyn SceneRenderer,
    tool: &ImageMagick,
    runner: &mut dyn CommandRunner,
) -> TableResult<RunReport> {
    cfg.validate()?;
    let widths = cascade_widths(cfg.size_range())?;
    let angles = sample_angles(cfg.yaw_rotations, cfg.pitch_rotations)?;

    let destination = scene_dir.join(&cfg.output_folder_name);
    recreate_dir(&destination)?;

    let layout = TableLayout {
        yaw_count: cfg.yaw_rotations,
        pitch_count: cfg.pitch_rotations,
        scale_count: widths.len() as u32,
    };
    tracing::info!(
        angles = angles.len(),
        sizes = widths.len(),
        planned = angles.len() as u64 * u64::from(cascade_len(cfg.size_range())),
        destination = %destination.display(),
        "generating rotation table"
    );

    let mut report = RunReport::new(
        cfg.name.clone(),
        destination.clone(),
        cfg.dither_pattern.clone(),
        widths.clone(),
        layout,
    );
    let plan = CascadePlan {
        table_name: &cfg.name,
        destination: &destination,
        widths: &widths,
        dither: &cfg.dither_pattern,
        geometry: GeometryMode::Exact,
    };

    let mut counter = FrameCounter::new();
    render_orbit(renderer, &cfg.parent_object_name, &angles, |angle, source| {
        let (outcome, next) = run_cascade(source, &plan, tool, &mut *runner, counter);
        counter = next;
        report.absorb(outcome, Some(angle));
        Ok(())
    })?;

    Ok(report)
}

/// Standalone mode: cascade one existing image, or every numbered `.png` in a folder.
///
/// Nothing on disk is touched until the input has been validated and discovered. With
/// `dry_run` the destination folder is not created either. Sources whose header cannot be
/// decoded here are still handed to the image tool, which only needs the target width.
#[tracing::instrument(skip_all, fields(input = %cfg.input.display()))]
pub fn run_resize(
    cfg: &ResizeConfig,
    cwd: &Path,
    tool: &ImageMagick,
    runner: &mut dyn CommandRunner,
    dry_run: bool,
) -> TableResult<RunReport> {
    cfg.validate()?;
    let discovered = discover_inputs(&cfg.input, cwd)?;
    let widths = cascade_widths(cfg.sizes)?;

    let destination = discovered
        .parent_dir
        .join(table_dir_name(&discovered.table_name));
    if !dry_run {
        recreate_dir(&destination)?;
    }

    let layout = TableLayout {
        yaw_count: discovered.sources.len() as u32,
        pitch_count: 1,
        scale_count: widths.len() as u32,
    };
    tracing::info!(
        sources = discovered.sources.len(),
        sizes = widths.len(),
        destination = %destination.display(),
        "resizing images"
    );

    let mut report = RunReport::new(
        discovered.table_name.clone(),
        destination.clone(),
        cfg.dither_pattern.clone(),
        widths.clone(),
        layout,
    );
    let plan = CascadePlan {
        table_name: &discovered.table_name,
        destination: &destination,
        widths: &widths,
        dither: &cfg.dither_pattern,
        geometry: GeometryMode::WidthOnly,
    };

    let mut counter = FrameCounter::new();
    for path in &discovered.sources {
        match SourceImage::probe(path) {
            Ok(source) => {
                let (outcome, next) = run_cascade(&source, &plan, tool, runner, counter);
                counter = next;
                report.absorb(outcome, None);
            }
            Err(err) => {
                tracing::warn!(source = %path.display(), %err, "skipping unavailable source");
                let (outcome, next) = unavailable_source(&plan, &err, counter);
                counter = next;
                report.absorb(outcome, None);
            }
        }
    }

    Ok(report)
}

/// Reserve this source's indices as failures so later sources keep their numbering.
fn unavailable_source(
    plan: &CascadePlan<'_>,
    err: &TableError,
    mut counter: FrameCounter,
) -> (CascadeOutcome, FrameCounter) {
    let mut outcome = CascadeOutcome::default();
    for &width in plan.widths {
        let (index, next) = counter.allocate();
        counter = next;
        outcome.failed.push(FailedImage {
            image: OutputImage {
                index,
                path: output_path(plan.destination, plan.table_name, index),
                width,
                height: None,
            },
            error: TableError::Other(anyhow::anyhow!("source skipped: {err}")),
        });
    }
    (outcome, counter)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
