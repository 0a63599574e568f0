//! Rotation-table generator for Mode7-style billboard sprites.
//!
//! A rotation table is a flat, 1-based sequence of dithered grayscale images covering every
//! viewing angle of an object at several sizes. Engines that cannot rasterize 3D at runtime
//! pick the nearest angle and size and draw the matching image.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: split the orbit into `(yaw, pitch)` pairs, yaw-major.
//! 2. **Render** (table mode): rotate the camera pivot and render one still per angle.
//! 3. **Cascade**: resize each still (or each existing image, in standalone mode) to every
//!    width from `max` down to `min`, grayscale + ordered dither, via the system `magick`.
//! 4. **Index**: every requested image takes the next index, angle/source-major and
//!    size-minor, and is written as `{name}-table-{index}.png`.
//!
//! Rendering and dithering are external processes; this crate owns the ordering, naming,
//! and size math, and reports which indices failed instead of silently leaving gaps.
#![forbid(unsafe_code)]

mod cascade;
mod foundation;
mod logging;
mod pipeline;
mod process;
mod render;
mod table;

pub use cascade::destination::recreate_dir;
pub use cascade::discovery::{DiscoveredInput, cmp_numeric, discover_inputs, first_digit_run};
pub use cascade::driver::{CascadeOutcome, CascadePlan, FailedImage, OutputImage, run_cascade};
pub use cascade::source::SourceImage;
pub use foundation::config::{DitherPattern, ResizeConfig, SizeRange, TableConfig, ToolPaths};
pub use foundation::error::{TableError, TableResult};
pub use logging::init_logging;
pub use pipeline::{
    ManifestImage, RunReport, TableEntry, TableManifest, run_resize, run_table,
};
pub use process::invocation::{
    CommandRunner, DryRunRunner, Invocation, ProcessOutput, QuoteStyle, SystemRunner,
    is_program_available, quote_arg,
};
pub use process::magick::{GeometryMode, ImageMagick, ResizeGeometry};
pub use render::blender::BlenderRenderer;
pub use render::orchestrator::render_orbit;
pub use render::renderer::{PivotHandle, SceneRenderer, ScopedRender};
pub use table::angles::{AngleSample, Euler, angle_step, sample_angles};
pub use table::indexer::{
    FrameCounter, OutputIndex, output_file_name, output_path, table_dir_name,
};
pub use table::layout::{TableCoords, TableLayout};
pub use table::sizes::{cascade_len, cascade_widths, derived_height};
