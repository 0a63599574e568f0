use std::path::Path;

use crate::{
    foundation::config::DitherPattern,
    process::invocation::{Invocation, is_program_available},
};

/// How the target size is handed to ImageMagick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeGeometry {
    /// `-resize WxH`, both dimensions computed by us (table mode).
    Exact { width: u32, height: u32 },
    /// `-resize W`, ImageMagick derives the height (standalone mode).
    WidthOnly { width: u32 },
}

impl ResizeGeometry {
    pub fn to_arg(self) -> String {
        match self {
            Self::Exact { width, height } => format!("{width}x{height}"),
            Self::WidthOnly { width } => width.to_string(),
        }
    }
}

/// Which [`ResizeGeometry`] variant a run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryMode {
    Exact,
    WidthOnly,
}

impl GeometryMode {
    /// Falls back to width-only when the height is unknown.
    pub fn geometry(self, width: u32, height: Option<u32>) -> ResizeGeometry {
        match (self, height) {
            (Self::Exact, Some(height)) => ResizeGeometry::Exact { width, height },
            _ => ResizeGeometry::WidthOnly { width },
        }
    }
}

/// Builds resize + grayscale + ordered-dither commands for the `magick` binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageMagick {
    pub program: String,
}

impl Default for ImageMagick {
    fn default() -> Self {
        Self {
            program: "magick".to_string(),
        }
    }
}

impl ImageMagick {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        is_program_available(&self.program, "-version")
    }

    /// `<input> -resize <geometry> -colorspace gray -ordered-dither <pattern> <output>`
    pub fn resize_dither(
        &self,
        input: &Path,
        geometry: ResizeGeometry,
        dither: &DitherPattern,
        output: &Path,
    ) -> Invocation {
        Invocation::new(self.program.as_str())
            .arg(input)
            .args(["-resize".to_string(), geometry.to_arg()])
            .args(["-colorspace", "gray"])
            .args(["-ordered-dither", dither.as_str()])
            .arg(output)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/process/magick.rs"]
mod tests;
