//! External skills-ref validator integration.
//!
//! The validator is an independently installed Python tool. Discovery
//! tries the project venv first, then `pipx run`, then a `skills-ref`
//! binary on PATH; whichever answers first is cached for the run.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Result, SfError};

pub const INSTALL_HINT: &str = "\
To run validation, create the project venv (recommended):

  sf validate --install

Then re-run: sf validate

Alternatively install globally: pip install skills-ref
Or use pipx: pipx run skills-ref validate path/to/skill";

/// Diagnostics from a failed validation.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub exit_code: i32,
    pub stderr: String,
}

/// A discovered validator invocation strategy.
#[derive(Debug, Clone)]
pub enum Validator {
    /// The `agentskills` binary inside the project venv.
    Venv(PathBuf),
    /// `pipx run skills-ref`.
    Pipx,
    /// A `skills-ref` binary on PATH.
    Path(PathBuf),
}

impl Validator {
    /// Probe the discovery chain by validating `probe_skill` with each
    /// candidate. Returns `None` when nothing on this machine can run the
    /// validator.
    pub fn detect(venv_dir: &Path, probe_skill: &Path) -> Result<Option<Self>> {
        let venv_cli = venv_binary(venv_dir);
        if venv_cli.is_file() {
            let candidate = Self::Venv(venv_cli);
            if candidate.validate(probe_skill)?.is_ok() {
                debug!("validator: project venv");
                return Ok(Some(candidate));
            }
        }

        let pipx = Self::Pipx;
        match pipx.try_validate(probe_skill) {
            Ok(Some(Ok(()))) => {
                debug!("validator: pipx");
                return Ok(Some(pipx));
            }
            Ok(_) => {}
            Err(err) => return Err(err),
        }

        if let Ok(found) = which::which("skills-ref") {
            let candidate = Self::Path(found);
            if candidate.validate(probe_skill)?.is_ok() {
                debug!("validator: PATH");
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Venv(_) => "venv",
            Self::Pipx => "pipx",
            Self::Path(_) => "path",
        }
    }

    /// Validate one skill directory. The outer `Result` is an unexpected
    /// failure to launch the validator; the inner one is the validator's
    /// verdict.
    pub fn validate(&self, skill: &Path) -> Result<std::result::Result<(), Diagnostics>> {
        let output = self
            .command(skill)
            .output()
            .map_err(|err| SfError::Config(format!("run validator: {err}")))?;

        if output.status.success() {
            Ok(Ok(()))
        } else {
            Ok(Err(Diagnostics {
                exit_code: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }))
        }
    }

    /// Like [`Self::validate`] but a missing launcher binary yields
    /// `Ok(None)` instead of an error; used during discovery where an
    /// absent `pipx` is expected.
    fn try_validate(&self, skill: &Path) -> Result<Option<std::result::Result<(), Diagnostics>>> {
        match self.command(skill).output() {
            Ok(output) if output.status.success() => Ok(Some(Ok(()))),
            Ok(output) => Ok(Some(Err(Diagnostics {
                exit_code: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SfError::Config(format!("run validator: {err}"))),
        }
    }

    fn command(&self, skill: &Path) -> Command {
        match self {
            Self::Venv(cli) | Self::Path(cli) => {
                let mut cmd = Command::new(cli);
                cmd.arg("validate").arg(skill);
                cmd
            }
            Self::Pipx => {
                let mut cmd = Command::new("pipx");
                cmd.args(["run", "skills-ref", "validate"]).arg(skill);
                cmd
            }
        }
    }
}

// skills-ref installs its CLI as "agentskills"
fn venv_binary(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("agentskills.exe")
    } else {
        venv_dir.join("bin").join("agentskills")
    }
}
