use std::{
    ffi::OsString,
    process::{Command, Stdio},
};

use crate::foundation::error::{TableError, TableResult};

/// A single external command: program plus arguments, passed without a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Lossy UTF-8 view of the arguments, for inspection and logging.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Copy-pasteable command line for the host shell.
    pub fn to_command_line(&self) -> String {
        self.to_command_line_with(QuoteStyle::host())
    }

    pub fn to_command_line_with(&self, style: QuoteStyle) -> String {
        let mut line = quote_arg(&self.program, style);
        for a in &self.args {
            line.push(' ');
            line.push_str(&quote_arg(&a.to_string_lossy(), style));
        }
        line
    }
}

/// Shell quoting convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Wrap every argument in double quotes (cmd.exe).
    Windows,
    /// POSIX shell single quoting; safe strings are left bare.
    Posix,
}

impl QuoteStyle {
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

pub fn quote_arg(arg: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Windows => format!("\"{arg}\""),
        QuoteStyle::Posix => {
            if arg.is_empty() {
                return "''".to_string();
            }
            let safe = arg
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
            if safe {
                arg.to_string()
            } else {
                format!("'{}'", arg.replace('\'', "'\"'\"'"))
            }
        }
    }
}

/// Captured result of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn ok() -> Self {
        Self {
            status: Some(0),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero exit into [`TableError::ExternalTool`].
    pub fn into_result(self, program: &str) -> TableResult<ProcessOutput> {
        if self.success() {
            return Ok(self);
        }
        Err(TableError::external_tool(
            program,
            self.status,
            self.stderr.trim(),
        ))
    }
}

/// Runs external commands synchronously. Implementations block until the process exits.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> TableResult<ProcessOutput>;
}

/// Spawns real processes and waits for them. There is no timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> TableResult<ProcessOutput> {
        tracing::debug!(command = %invocation.to_command_line(), "run");

        let out = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                TableError::external_tool(
                    invocation.program.as_str(),
                    None,
                    format!("failed to spawn (is it installed and on PATH?): {e}"),
                )
            })?;

        Ok(ProcessOutput {
            status: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

/// Records invocations without running anything; every command "succeeds".
#[derive(Clone, Debug, Default)]
pub struct DryRunRunner {
    pub recorded: Vec<Invocation>,
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &Invocation) -> TableResult<ProcessOutput> {
        tracing::debug!(command = %invocation.to_command_line(), "dry run");
        self.recorded.push(invocation.clone());
        Ok(ProcessOutput::ok())
    }
}

/// True if `program <probe_arg>` runs and exits successfully.
pub fn is_program_available(program: &str, probe_arg: &str) -> bool {
    Command::new(program)
        .arg(probe_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/process/invocation.rs"]
mod tests;
