// src/recipe/kitchen/mod.rs

//! Kitchen: the recipe evaluator
//!
//! Evaluation runs three phases in a fixed order:
//! 1. **Version**: take the declared version or describe the checkout
//! 2. **Build**: configure and compile through a [`BuildDriver`]
//! 3. **Package**: collect headers and binaries with the recipe's copy rules
//!
//! Each phase blocks on its external tool and any failure ends the
//! evaluation. Packaging is idempotent, so re-running after fixing the
//! cause is the recovery path.

mod config;
mod cook;
pub mod copy;
pub mod driver;
pub mod vcs;
pub mod version;

pub use config::{CookResult, KitchenConfig};
pub use cook::{Cook, PACKAGE_INFO_FILE};
pub use copy::{MANIFEST_FILE, PackageManifest};
pub use driver::{BuildDescriptor, BuildDriver, BuildHandle, CMakeDriver, StepOutput};
pub use vcs::{GitCli, Vcs};
pub use version::{ResolvedVersion, ScmSnapshot, VersionOrigin};

use crate::error::Result;
use crate::recipe::format::Recipe;
use crate::recipe::settings::BuildProfile;
use std::path::Path;
use tracing::{info, warn};

/// The Kitchen: where recipes are cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    driver: Box<dyn BuildDriver>,
    vcs: Box<dyn Vcs>,
}

impl Kitchen {
    /// Create a Kitchen that drives cmake and git
    pub fn new(config: KitchenConfig) -> Self {
        let driver = CMakeDriver::new(config.cmake_program.clone());
        let vcs = GitCli::new(config.git_program.clone());
        Self::with_tools(config, Box::new(driver), Box::new(vcs))
    }

    /// Create a Kitchen with explicit tools
    pub fn with_tools(
        config: KitchenConfig,
        driver: Box<dyn BuildDriver>,
        vcs: Box<dyn Vcs>,
    ) -> Self {
        Self {
            config,
            driver,
            vcs,
        }
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Version phase
    pub fn resolve_version(&self, recipe: &Recipe) -> Result<ResolvedVersion> {
        version::resolve_version(recipe, self.vcs.as_ref(), &self.config.checkout)
    }

    /// Pin the recipe's scm reference, if it has one
    pub fn snapshot_scm(&self, recipe: &Recipe) -> Result<Option<ScmSnapshot>> {
        recipe
            .scm
            .as_ref()
            .map(|scm| version::snapshot_scm(scm, self.vcs.as_ref(), &self.config.checkout))
            .transpose()
    }

    /// Begin a cook with an already resolved version
    pub fn prepare<'a>(
        &'a self,
        recipe: &'a Recipe,
        profile: BuildProfile,
        version: ResolvedVersion,
    ) -> Cook<'a> {
        Cook::new(self, recipe, profile, version)
    }

    /// Cook a recipe: resolve the version, build, then package into `output_root`
    ///
    /// Writes `manifest.json` and `package-info.json` at `output_root`.
    /// With a declared version the scm pin is best-effort; a checkout that
    /// cannot be queried leaves [`CookResult::scm`] empty.
    pub fn cook(
        &self,
        recipe: &Recipe,
        profile: BuildProfile,
        output_root: &Path,
    ) -> Result<CookResult> {
        info!("Cooking {} ({})", recipe.package.name, profile);

        let version = self.resolve_version(recipe)?;
        let scm = match self.snapshot_scm(recipe) {
            Ok(scm) => scm,
            // A declared version needs no checkout; the pin is informational
            Err(e) if version.origin() == VersionOrigin::Declared => {
                warn!("Could not pin scm revision for {}: {}", recipe.package.name, e);
                None
            }
            Err(e) => return Err(e),
        };

        let mut cook = self.prepare(recipe, profile, version);

        info!("Building {} {}", recipe.package.name, cook.version());
        cook.build()?;

        info!("Packaging into {}", output_root.display());
        let manifest = cook.package(output_root)?;
        cook.write_package_info(output_root)?;

        info!(
            "Cooked {} {} ({} files, package id {})",
            recipe.package.name,
            cook.version(),
            manifest.len(),
            &cook.package_id()[..12]
        );

        Ok(CookResult {
            version: cook.version().clone(),
            package_id: cook.package_id(),
            scm,
            manifest,
            package_info: cook.package_info(),
            package_dir: output_root.to_path_buf(),
            log: cook.log,
        })
    }
}
