use std::path::{Path, PathBuf};

/// 1-based position of an image in the generated table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct OutputIndex(pub u32);

impl std::fmt::Display for OutputIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential index allocator for a whole run.
///
/// Allocation consumes the counter and hands back the next one, so the index state is always
/// threaded explicitly through the caller instead of living in shared mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCounter {
    next: u32,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns `(assigned_index, next_counter)`.
    #[must_use]
    pub fn allocate(self) -> (OutputIndex, FrameCounter) {
        (
            OutputIndex(self.next),
            FrameCounter {
                next: self.next + 1,
            },
        )
    }

    /// Number of indices handed out so far.
    pub fn issued(self) -> u32 {
        self.next - 1
    }
}

/// `{table_name}-table-{index}.png`, plain decimal index.
pub fn output_file_name(table_name: &str, index: OutputIndex) -> String {
    format!("{table_name}-table-{index}.png")
}

pub fn output_path(dir: &Path, table_name: &str, index: OutputIndex) -> PathBuf {
    dir.join(output_file_name(table_name, index))
}

/// Destination directory name used by standalone mode: `{table_name}-table`.
pub fn table_dir_name(table_name: &str) -> String {
    format!("{table_name}-table")
}

#[cfg(test)]
#[path = "../../tests/unit/table/indexer.rs"]
mod tests;
