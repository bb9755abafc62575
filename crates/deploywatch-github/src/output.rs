//! GitHub Actions step outputs
//!
//! Outputs are appended to the file named by `GITHUB_OUTPUT`. Runners that
//! predate that file get the legacy `::set-output` workflow command on stdout.

use deploywatch_core::OutputEmitter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";
const MULTILINE_DELIMITER: &str = "DEPLOYWATCH_EOF";

/// Where step outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionsOutput {
    /// `$GITHUB_OUTPUT` file
    File(PathBuf),
    /// `::set-output` commands on stdout
    Stdout,
}

impl ActionsOutput {
    pub fn from_env() -> Self {
        match std::env::var_os(GITHUB_OUTPUT_ENV) {
            Some(path) if !path.is_empty() => ActionsOutput::File(PathBuf::from(path)),
            _ => ActionsOutput::Stdout,
        }
    }

    /// One `$GITHUB_OUTPUT` entry, using the heredoc form for multi-line values
    pub fn file_entry(name: &str, value: &str) -> String {
        if value.contains('\n') {
            format!(
                "{name}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n"
            )
        } else {
            format!("{name}={value}\n")
        }
    }

    /// Legacy workflow command, with the value escaped the way the runner expects
    pub fn set_output_command(name: &str, value: &str) -> String {
        let escaped = value
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");
        format!("::set-output name={name}::{escaped}")
    }
}

impl OutputEmitter for ActionsOutput {
    fn emit(&mut self, name: &str, value: &str) -> deploywatch_core::Result<()> {
        match self {
            ActionsOutput::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(&*path)?;
                file.write_all(Self::file_entry(name, value).as_bytes())?;
                tracing::debug!("Wrote output {} to {}", name, path.display());
            }
            ActionsOutput::Stdout => {
                println!("{}", Self::set_output_command(name, value));
            }
        }
        Ok(())
    }
}
