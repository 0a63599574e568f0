use std::path::PathBuf;

/// Convenience result type used throughout the crate.
pub type TableResult<T> = Result<T, TableError>;

/// Top-level error type for table generation.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    /// Invalid size range, rotation counts, or other configuration values.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The source file or folder does not exist.
    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// An external process (renderer or image tool) reported failure.
    #[error("external tool '{program}' failed ({}): {stderr}", describe_status(.status))]
    ExternalTool {
        /// Program that was invoked.
        program: String,
        /// Exit code, or `None` when the process was terminated by a signal.
        status: Option<i32>,
        /// Trimmed stderr captured from the process.
        stderr: String,
    },

    /// A source image could not be inspected.
    #[error("image error: {0}")]
    Image(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error, with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TableError {
    /// Build a [`TableError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`TableError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`TableError::ExternalTool`] value.
    pub fn external_tool(
        program: impl Into<String>,
        status: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ExternalTool {
            program: program.into(),
            status,
            stderr: stderr.into(),
        }
    }

    /// True for failures that came from an external process rather than from this crate.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExternalTool { .. })
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match *status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
