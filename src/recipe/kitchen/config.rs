// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen

use super::copy::PackageManifest;
use super::version::{ResolvedVersion, ScmSnapshot};
use crate::recipe::info::PackageInfo;
use std::path::PathBuf;

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Source checkout (repository root)
    pub checkout: PathBuf,
    /// Out-of-source build directory; defaults to `<checkout>/build`
    pub build_dir: Option<PathBuf>,
    /// Number of parallel jobs
    pub jobs: u32,
    /// cmake executable name or path
    pub cmake_program: String,
    /// git executable name or path
    pub git_program: String,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            checkout: PathBuf::from("."),
            build_dir: None,
            jobs,
            cmake_program: "cmake".to_string(),
            git_program: "git".to_string(),
        }
    }
}

impl KitchenConfig {
    /// Configuration for a checkout, with everything else defaulted
    pub fn for_checkout(checkout: impl Into<PathBuf>) -> Self {
        Self {
            checkout: checkout.into(),
            ..Self::default()
        }
    }

    /// Effective build directory
    pub fn build_dir(&self) -> PathBuf {
        self.build_dir
            .clone()
            .unwrap_or_else(|| self.checkout.join("build"))
    }
}

/// Result of cooking a recipe
#[derive(Debug)]
pub struct CookResult {
    pub version: ResolvedVersion,
    /// Identifies the binary configuration that was packaged
    pub package_id: String,
    /// Pinned source reference, when the recipe has one
    pub scm: Option<ScmSnapshot>,
    pub manifest: PackageManifest,
    pub package_info: PackageInfo,
    /// Package root the files were copied into
    pub package_dir: PathBuf,
    /// Build log
    pub log: String,
}
