use std::path::{Path, PathBuf};

use crate::{
    cascade::source::SourceImage,
    foundation::{config::DitherPattern, error::TableError},
    process::{
        invocation::CommandRunner,
        magick::{GeometryMode, ImageMagick},
    },
    table::{
        indexer::{FrameCounter, OutputIndex, output_path},
        sizes::derived_height,
    },
};

/// Everything that stays fixed across the sources of one run.
#[derive(Clone, Copy, Debug)]
pub struct CascadePlan<'a> {
    pub table_name: &'a str,
    pub destination: &'a Path,
    pub widths: &'a [u32],
    pub dither: &'a DitherPattern,
    pub geometry: GeometryMode,
}

/// One requested table image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OutputImage {
    pub index: OutputIndex,
    pub path: PathBuf,
    pub width: u32,
    /// Height derived from the source aspect ratio; `None` when the source dimensions are
    /// unknown and the image tool picks it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// An image whose resize command failed. Its index is left as a gap in the table.
#[derive(Debug)]
pub struct FailedImage {
    pub image: OutputImage,
    pub error: TableError,
}

#[derive(Debug, Default)]
pub struct CascadeOutcome {
    pub produced: Vec<OutputImage>,
    pub failed: Vec<FailedImage>,
}

impl CascadeOutcome {
    pub fn extend(&mut self, other: CascadeOutcome) {
        self.produced.extend(other.produced);
        self.failed.extend(other.failed);
    }
}

/// Resize `source` once per cascade width, allocating one table index per width.
///
/// Image-tool failures never stop the cascade: each one is logged, recorded in the
/// outcome, and the next width still runs with the next index.
#[tracing::instrument(skip_all, fields(source = %source.path.display(), first_index = counter.issued() + 1))]
pub fn run_cascade(
    source: &SourceImage,
    plan: &CascadePlan<'_>,
    tool: &ImageMagick,
    runner: &mut dyn CommandRunner,
    mut counter: FrameCounter,
) -> (CascadeOutcome, FrameCounter) {
    let mut outcome = CascadeOutcome::default();

    for &width in plan.widths {
        let height = source
            .dimensions
            .map(|(w, h)| derived_height(width, w, h));
        let (index, next) = counter.allocate();
        counter = next;

        let image = OutputImage {
            index,
            path: output_path(plan.destination, plan.table_name, index),
            width,
            height,
        };
        let invocation = tool.resize_dither(
            &source.path,
            plan.geometry.geometry(width, height),
            plan.dither,
            &image.path,
        );

        match runner
            .run(&invocation)
            .and_then(|out| out.into_result(&invocation.program))
        {
            Ok(_) => outcome.produced.push(image),
            Err(error) => {
                tracing::warn!(%index, width, ?height, %error, "resize failed, index left empty");
                outcome.failed.push(FailedImage { image, error });
            }
        }
    }

    (outcome, counter)
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/driver.rs"]
mod tests;
