use std::path::{Path, PathBuf};

use crate::{foundation::error::TableResult, table::angles::Euler};

/// Named scene object the renderer rotates to orbit the camera around the subject.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PivotHandle {
    pub name: String,
}

/// The 3D renderer, treated as an opaque collaborator.
///
/// Implementations own the scene; this crate only rotates one object and asks for stills.
pub trait SceneRenderer {
    /// Resolve a scene object by name. Fails if the object does not exist.
    fn lookup_pivot(&mut self, name: &str) -> TableResult<PivotHandle>;

    /// Current rotation of `pivot`, in radians.
    fn rotation(&self, pivot: &PivotHandle) -> TableResult<Euler>;

    fn set_rotation(&mut self, pivot: &PivotHandle, rotation: Euler) -> TableResult<()>;

    /// Where the next [`SceneRenderer::render_still`] writes its image.
    fn set_output_path(&mut self, path: &Path);

    fn output_path(&self) -> Option<&Path>;

    /// Render the current frame to [`SceneRenderer::output_path`], blocking until done.
    fn render_still(&mut self) -> TableResult<()>;
}

/// Temporary location for one rendered frame. The directory and everything in it is
/// removed when this value is dropped, on success and on early return alike.
#[derive(Debug)]
pub struct ScopedRender {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl ScopedRender {
    pub fn acquire() -> TableResult<Self> {
        let dir = tempfile::Builder::new().prefix("mode7-render-").tempdir()?;
        let path = dir.path().join("render.png");
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
