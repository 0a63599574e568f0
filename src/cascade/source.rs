use std::path::{Path, PathBuf};

use crate::foundation::error::{TableError, TableResult};

/// An image the cascade resizes: a fresh render (table mode) or an existing file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// Native `(width, height)`. `None` when the header could not be decoded here; the
    /// image tool may still be able to read the file.
    pub dimensions: Option<(u32, u32)>,
}

impl SourceImage {
    /// Read only the header to get the native dimensions. Fails if they cannot be read.
    pub fn open(path: &Path) -> TableResult<Self> {
        if !path.exists() {
            return Err(TableError::InputNotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            dimensions: Some(read_dimensions(path)?),
        })
    }

    /// Like [`SourceImage::open`], but an undecodable header leaves the dimensions unknown
    /// instead of failing. Only a missing file is an error.
    pub fn probe(path: &Path) -> TableResult<Self> {
        if !path.exists() {
            return Err(TableError::InputNotFound(path.to_path_buf()));
        }
        let dimensions = match read_dimensions(path) {
            Ok(dims) => Some(dims),
            Err(err) => {
                tracing::debug!(source = %path.display(), %err, "dimensions unknown");
                None
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            dimensions,
        })
    }
}

fn read_dimensions(path: &Path) -> TableResult<(u32, u32)> {
    let (width, height) = image::image_dimensions(path).map_err(|e| {
        TableError::image(format!("read dimensions of '{}': {e}", path.display()))
    })?;
    if width == 0 || height == 0 {
        return Err(TableError::image(format!(
            "'{}' has zero width or height",
            path.display()
        )));
    }
    Ok((width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/source.rs"]
mod tests;
