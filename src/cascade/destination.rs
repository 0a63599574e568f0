use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::TableResult;

/// Remove `dir` if it exists (contents included) and create it again, empty.
///
/// Tables are always regenerated from scratch; nothing from a previous run survives.
pub fn recreate_dir(dir: &Path) -> TableResult<()> {
    if dir.is_dir() {
        tracing::info!(dir = %dir.display(), "removing previous table");
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("remove directory '{}'", dir.display()))?;
    } else if dir.exists() {
        std::fs::remove_file(dir).with_context(|| format!("remove file '{}'", dir.display()))?;
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/destination.rs"]
mod tests;
