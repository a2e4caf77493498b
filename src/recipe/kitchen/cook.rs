// src/recipe/kitchen/cook.rs

//! Cook: one evaluation of a recipe

use super::Kitchen;
use super::copy::{PackageManifest, copy_into};
use super::driver::{BuildDescriptor, StepOutput};
use super::version::ResolvedVersion;
use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::recipe::info::{PackageInfo, describe_package_info};
use crate::recipe::settings::BuildProfile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the package info written next to the manifest
pub const PACKAGE_INFO_FILE: &str = "package-info.json";

/// A single cook operation
///
/// A cook can only be created with an already resolved version, so the
/// build and package phases always see the same, final version.
pub struct Cook<'a> {
    kitchen: &'a Kitchen,
    recipe: &'a Recipe,
    profile: BuildProfile,
    version: ResolvedVersion,
    /// Build log accumulator
    pub(super) log: String,
}

impl<'a> Cook<'a> {
    pub(super) fn new(
        kitchen: &'a Kitchen,
        recipe: &'a Recipe,
        profile: BuildProfile,
        version: ResolvedVersion,
    ) -> Self {
        let mut cook = Self {
            kitchen,
            recipe,
            profile,
            version,
            log: String::new(),
        };
        cook.log_line(&format!(
            "Recipe: {} {} ({})",
            cook.recipe.package.name, cook.version, cook.profile
        ));
        cook
    }

    /// The version every phase of this cook uses
    pub fn version(&self) -> &ResolvedVersion {
        &self.version
    }

    pub fn profile(&self) -> &BuildProfile {
        &self.profile
    }

    /// Package id for this cook's profile
    pub fn package_id(&self) -> String {
        self.recipe.package_id(&self.profile)
    }

    /// Directory holding the build scripts
    pub fn source_dir(&self) -> PathBuf {
        self.kitchen
            .config
            .checkout
            .join(&self.recipe.build.source_folder)
    }

    /// Parameters handed to the build driver
    pub fn descriptor(&self) -> BuildDescriptor {
        BuildDescriptor {
            source_dir: self.source_dir(),
            build_dir: self.kitchen.config.build_dir(),
            profile: self.profile.clone(),
            jobs: self.kitchen.config.jobs,
            definitions: self.recipe.build.definitions.clone(),
        }
    }

    /// Build phase: configure then compile with the kitchen's driver
    ///
    /// Driver errors are returned as they are; nothing is retried.
    pub fn build(&mut self) -> Result<()> {
        let kitchen = self.kitchen;
        let driver = kitchen.driver.as_ref();
        if driver.name() != self.recipe.build.driver {
            return Err(Error::ConfigError(format!(
                "Recipe requires the {} build driver, but {} is configured",
                self.recipe.build.driver,
                driver.name()
            )));
        }

        let descriptor = self.descriptor();
        if !descriptor.source_dir.is_dir() {
            return Err(Error::build(
                "configure",
                format!("Source folder {} does not exist", descriptor.source_dir.display()),
            ));
        }

        info!("Configuring {} with {}", self.recipe.package.name, driver.name());
        let handle = driver.configure(&descriptor)?;
        self.log_build_output("configure", &handle.configure_output);

        info!("Compiling {}", self.recipe.package.name);
        let output = driver.compile(&handle)?;
        self.log_build_output("compile", &output);

        Ok(())
    }

    /// Package phase: apply the recipe's copy rules into `output_root`
    ///
    /// Sources are looked up in the build directory, then the checkout.
    /// Writes `manifest.json` at the package root.
    pub fn package(&mut self, output_root: &Path) -> Result<PackageManifest> {
        let kitchen = self.kitchen;
        let build_dir = kitchen.config.build_dir();
        let roots = [build_dir.as_path(), kitchen.config.checkout.as_path()];

        let manifest = copy_into(&self.recipe.copy, &roots, output_root)?;

        fs::create_dir_all(output_root)?;
        let manifest_path = manifest.write(output_root)?;

        self.log_line(&format!(
            "Packaged {} file(s), manifest at {}",
            manifest.len(),
            manifest_path.display()
        ));
        Ok(manifest)
    }

    /// Link information for this cook's options
    pub fn package_info(&self) -> PackageInfo {
        describe_package_info(self.recipe, &self.profile.options)
    }

    /// Write the package info next to the manifest
    pub fn write_package_info(&mut self, output_root: &Path) -> Result<PathBuf> {
        let path = output_root.join(PACKAGE_INFO_FILE);
        let mut json = serde_json::to_string_pretty(&self.package_info())?;
        json.push('\n');
        fs::write(&path, json).map_err(|e| {
            Error::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        self.log_line(&format!("Wrote {}", path.display()));
        Ok(path)
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    /// Log driver output with a phase header
    fn log_build_output(&mut self, phase: &str, output: &StepOutput) {
        self.log_line(&format!("=== {} ===", phase));
        if !output.stdout.is_empty() {
            self.log.push_str(&output.stdout);
            self.log.push('\n');
        }
        if !output.stderr.is_empty() {
            self.log.push_str(&output.stderr);
            self.log.push('\n');
        }
    }
}
