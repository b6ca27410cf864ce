//! External report-script runner.
//!
//! The report generator is a Python script owned by another team; we
//! only launch it. Interpreter discovery tries a configured candidate
//! list in order (venv name first, then system pythons) — the first
//! one that spawns wins. Output is captured whole; there is no
//! sandboxing and no streaming.

use std::path::Path;
use std::process::Command;

use crate::errors::{CredKeepError, Result};

/// Captured result of a script run.
#[derive(Debug)]
pub struct ScriptOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ScriptOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `script` with `args`, trying each interpreter candidate in order.
///
/// A candidate that fails to spawn (not installed) is skipped; a
/// candidate that spawns decides the outcome, whatever its exit code.
/// If no candidate spawns, the last spawn error propagates.
pub fn run_script(script: &Path, args: &[String], interpreters: &[String]) -> Result<ScriptOutput> {
    if interpreters.is_empty() {
        return Err(CredKeepError::CommandFailed(
            "no interpreter candidates configured".into(),
        ));
    }

    let mut last_err: Option<std::io::Error> = None;

    for candidate in interpreters {
        match Command::new(candidate).arg(script).args(args).output() {
            Ok(output) => {
                tracing::debug!(interpreter = %candidate, script = %script.display(), "launched report script");

                let exit_code = match output.status.code() {
                    Some(code) => code,
                    None => {
                        return Err(CredKeepError::CommandFailed(
                            "report script terminated by signal".into(),
                        ));
                    }
                };

                return Ok(ScriptOutput {
                    exit_code,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
            Err(e) => last_err = Some(e),
        }
    }

    let tried = interpreters.join(", ");
    match last_err {
        Some(e) => Err(CredKeepError::CommandFailed(format!(
            "no interpreter could be launched (tried: {tried}): {e}"
        ))),
        None => Err(CredKeepError::CommandFailed(format!(
            "no interpreter could be launched (tried: {tried})"
        ))),
    }
}
