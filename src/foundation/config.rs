use std::{fmt, path::PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TableError, TableResult};

/// ImageMagick `-ordered-dither` threshold map name (for example `o4x4`, `o8x8`, `h4x4a`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DitherPattern(String);

impl DitherPattern {
    /// The 4x4 ordered-dither map used when nothing else is configured.
    pub const DEFAULT: &'static str = "o4x4";

    /// Build a pattern, rejecting empty values and values containing whitespace.
    pub fn new(pattern: impl Into<String>) -> TableResult<Self> {
        let p = Self(pattern.into());
        p.validate()?;
        Ok(p)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn validate(&self) -> TableResult<()> {
        if self.0.is_empty() {
            return Err(TableError::configuration("dither pattern must not be empty"));
        }
        if self.0.chars().any(char::is_whitespace) {
            return Err(TableError::configuration(format!(
                "dither pattern '{}' must not contain whitespace",
                self.0
            )));
        }
        Ok(())
    }
}

impl Default for DitherPattern {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for DitherPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DitherPattern {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Width cascade bounds shared by both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SizeRange {
    pub max_width: u32,
    pub min_width: u32,
    pub step: u32,
}

impl SizeRange {
    pub fn new(max_width: u32, min_width: u32, step: u32) -> TableResult<Self> {
        let r = Self {
            max_width,
            min_width,
            step,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn validate(&self) -> TableResult<()> {
        if self.step == 0 {
            return Err(TableError::configuration("size step must be > 0"));
        }
        if self.max_width < self.min_width {
            return Err(TableError::configuration(format!(
                "max width ({}) must be >= min width ({})",
                self.max_width, self.min_width
            )));
        }
        if self.min_width == 0 {
            return Err(TableError::configuration("min width must be > 0"));
        }
        Ok(())
    }
}

/// Table-mode settings. Immutable once loaded; passed by reference into [`crate::run_table`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Table name used for output filenames (`{name}-table-{index}.png`).
    pub name: String,
    pub scale_max: u32,
    pub scale_min: u32,
    pub scale_step: u32,
    pub yaw_rotations: u32,
    pub pitch_rotations: u32,
    /// Scene object rotated to orbit the camera around the subject.
    pub parent_object_name: String,
    /// Destination folder, resolved next to the scene file.
    pub output_folder_name: String,
    pub dither_pattern: DitherPattern,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "suzanne".to_string(),
            scale_max: 120,
            scale_min: 20,
            scale_step: 10,
            yaw_rotations: 18,
            pitch_rotations: 1,
            parent_object_name: "Camera Parent".to_string(),
            output_folder_name: "output".to_string(),
            dither_pattern: DitherPattern::default(),
        }
    }
}

impl TableConfig {
    /// Read a JSON config file. Missing fields fall back to [`TableConfig::default`].
    pub fn from_json_file(path: &std::path::Path) -> TableResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    pub fn size_range(&self) -> SizeRange {
        SizeRange {
            max_width: self.scale_max,
            min_width: self.scale_min,
            step: self.scale_step,
        }
    }

    pub fn validate(&self) -> TableResult<()> {
        if self.name.trim().is_empty() {
            return Err(TableError::configuration("table name must not be empty"));
        }
        if self.yaw_rotations == 0 || self.pitch_rotations == 0 {
            return Err(TableError::configuration(
                "yaw and pitch rotation counts must be >= 1",
            ));
        }
        if self.parent_object_name.is_empty() {
            return Err(TableError::configuration(
                "parent object name must not be empty",
            ));
        }
        if self.output_folder_name.trim().is_empty() {
            return Err(TableError::configuration(
                "output folder name must not be empty",
            ));
        }
        self.size_range().validate()?;
        self.dither_pattern.validate()
    }
}

/// Standalone-mode settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeConfig {
    /// A single image, or a folder of numerically named `.png` files.
    pub input: PathBuf,
    pub sizes: SizeRange,
    pub dither_pattern: DitherPattern,
}

impl ResizeConfig {
    pub fn validate(&self) -> TableResult<()> {
        self.sizes.validate()?;
        self.dither_pattern.validate()
    }
}

/// Names or paths of the external programs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolPaths {
    pub magick: String,
    pub blender: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            magick: "magick".to_string(),
            blender: "blender".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
