// src/recipe/kitchen/vcs.rs

//! Version-control queries used during version resolution

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Capability to query a source checkout
///
/// Keeps the Kitchen independent of the concrete VCS tool, and lets tests
/// substitute canned answers.
pub trait Vcs: Send + Sync {
    /// Describe the checkout's current state (nearest tag, distance, commit)
    fn describe(&self, checkout: &Path, flags: &[String]) -> Result<String>;

    /// Full identifier of the checked-out commit
    fn head_revision(&self, checkout: &Path) -> Result<String>;
}

/// Git, driven through its command-line interface
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Use the given git executable name or path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, checkout: &Path, args: &[&str]) -> Result<String> {
        if !checkout.is_dir() {
            return Err(Error::VersionResolutionError(format!(
                "checkout {} does not exist",
                checkout.display()
            )));
        }

        let program = which::which(&self.program).map_err(|e| {
            Error::VersionResolutionError(format!("{} not found: {}", self.program, e))
        })?;

        debug!("Running git {} in {}", args.join(" "), checkout.display());
        let output = Command::new(program)
            .args(args)
            .current_dir(checkout)
            .output()
            .map_err(|e| Error::VersionResolutionError(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::VersionResolutionError(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(Error::VersionResolutionError(format!(
                "git {} returned empty output",
                args.first().copied().unwrap_or_default()
            )));
        }

        Ok(stdout)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Vcs for GitCli {
    fn describe(&self, checkout: &Path, flags: &[String]) -> Result<String> {
        let mut args = vec!["describe"];
        args.extend(flags.iter().map(String::as_str));
        self.run(checkout, &args)
    }

    fn head_revision(&self, checkout: &Path) -> Result<String> {
        self.run(checkout, &["rev-parse", "HEAD"])
    }
}
