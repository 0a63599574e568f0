use crate::{
    cascade::source::SourceImage,
    foundation::error::TableResult,
    render::renderer::{SceneRenderer, ScopedRender},
    table::angles::AngleSample,
};

/// Render one still per angle and hand each to `on_frame` before the next render starts.
///
/// Stops at the first failure, whether from the renderer or from `on_frame`. The pivot's
/// original rotation (and the renderer's previous output path) are restored on every
/// exit path, and each frame's temporary file is gone once `on_frame` returns.
#[tracing::instrument(skip(renderer, angles, on_frame), fields(angles = angles.len()))]
pub fn render_orbit(
    renderer: &mut dyn SceneRenderer,
    pivot_name: &str,
    angles: &[AngleSample],
    mut on_frame: impl FnMut(AngleSample, &SourceImage) -> TableResult<()>,
) -> TableResult<()> {
    let pivot = renderer.lookup_pivot(pivot_name)?;
    let original = renderer.rotation(&pivot)?;
    let previous_output = renderer.output_path().map(|p| p.to_path_buf());

    let mut orbit = || -> TableResult<()> {
        for &angle in angles {
            let frame = ScopedRender::acquire()?;
            renderer.set_rotation(&pivot, angle.to_euler())?;
            renderer.set_output_path(frame.path());
            tracing::info!(yaw = angle.yaw, pitch = angle.pitch, "rendering");
            renderer.render_still()?;

            let source = SourceImage::open(frame.path())?;
            on_frame(angle, &source)?;
        }
        Ok(())
    };
    let result = orbit();

    let restored = renderer.set_rotation(&pivot, original);
    if let Some(prev) = previous_output {
        renderer.set_output_path(&prev);
    }
    result.and(restored)
}

#[cfg(test)]
#[path = "../../tests/unit/render/orchestrator.rs"]
mod tests;
