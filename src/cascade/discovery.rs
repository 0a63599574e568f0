use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{TableError, TableResult};

/// Resolved standalone input: the table name and the ordered source files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredInput {
    pub table_name: String,
    pub sources: Vec<PathBuf>,
    /// Directory the `{table_name}-table` folder is created in.
    pub parent_dir: PathBuf,
}

/// Resolve `input` (relative paths against `cwd`) into a table name and source list.
///
/// A file yields itself. A folder yields its `.png` files whose stem contains a digit run,
/// ordered by the numeric value of the first such run.
pub fn discover_inputs(input: &Path, cwd: &Path) -> TableResult<DiscoveredInput> {
    let resolved = if input.is_absolute() {
        input.to_path_buf()
    } else {
        cwd.join(input)
    };
    if !resolved.exists() {
        return Err(TableError::InputNotFound(resolved));
    }

    let parent_dir = resolved
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());

    if resolved.is_dir() {
        let table_name = base_name(&resolved, Path::file_name)?;
        let sources = numbered_pngs(&resolved)?;
        tracing::debug!(dir = %resolved.display(), count = sources.len(), "discovered sources");
        return Ok(DiscoveredInput {
            table_name,
            sources,
            parent_dir,
        });
    }

    Ok(DiscoveredInput {
        table_name: base_name(&resolved, Path::file_stem)?,
        sources: vec![resolved],
        parent_dir,
    })
}

fn base_name(
    path: &Path,
    part: impl Fn(&Path) -> Option<&std::ffi::OsStr>,
) -> TableResult<String> {
    part(path)
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            TableError::configuration(format!(
                "cannot derive a table name from '{}'",
                path.display()
            ))
        })
}

fn numbered_pngs(dir: &Path) -> TableResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    // Directory listing order is platform-defined; fix it so equal keys keep a stable order.
    entries.sort();

    let mut keyed: Vec<(String, PathBuf)> = entries
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "png"))
        .filter_map(|p| {
            let stem = p.file_stem()?.to_string_lossy().into_owned();
            first_digit_run(&stem).map(|digits| (digits.to_string(), p))
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| cmp_numeric(a, b));
    Ok(keyed.into_iter().map(|(_, p)| p).collect())
}

/// First maximal run of ASCII digits in `s`.
pub fn first_digit_run(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Compare two digit strings by numeric value, without parsing (no overflow on long runs).
pub fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/discovery.rs"]
mod tests;
