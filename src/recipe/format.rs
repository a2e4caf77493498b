// src/recipe/format.rs

//! Recipe file format definitions
//!
//! Recipes are TOML files that describe how a native library is built and
//! packaged. A recipe never contains build logic of its own: it declares
//! what the build depends on and which files make up the package.

use crate::error::Result;
use crate::recipe::requirement::Requirement;
use crate::recipe::settings::{BuildProfile, Options, SettingName};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// A complete recipe for packaging a library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Build configuration
    #[serde(default)]
    pub build: BuildSection,

    /// Option defaults
    #[serde(default)]
    pub options: Options,

    /// Source-control reference (optional)
    #[serde(default)]
    pub scm: Option<ScmSection>,

    /// File collection rules for the package phase
    #[serde(default)]
    pub copy: Vec<CopyRule>,

    /// Consumer-facing link information
    #[serde(default)]
    pub package_info: PackageInfoSection,
}

impl Recipe {
    /// Parse all requirement references
    pub fn requirements(&self) -> Result<Vec<Requirement>> {
        self.build.requires.iter().map(|r| r.parse()).collect()
    }

    /// Compute the package id for a profile
    ///
    /// Only the settings the recipe declares take part, so a header-only
    /// recipe that declares none gets one id for every configuration.
    pub fn package_id(&self, profile: &BuildProfile) -> String {
        let mut hasher = Sha256::new();

        let mut declared = self.build.settings.clone();
        declared.sort();
        declared.dedup();

        hasher.update(b"[settings]\n");
        for name in declared {
            hasher.update(format!("{}={}\n", name, profile.settings.value_of(name)).as_bytes());
        }

        hasher.update(b"[options]\n");
        hasher.update(format!("shared={}\n", profile.options.shared).as_bytes());

        let mut requires = self.build.requires.clone();
        requires.sort();
        hasher.update(b"[requires]\n");
        for reference in requires {
            hasher.update(reference.as_bytes());
            hasher.update(b"\n");
        }

        hex::encode(hasher.finalize())
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Explicit version; when absent the version comes from source control
    #[serde(default)]
    pub version: Option<String>,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Maintainer contact
    #[serde(default)]
    pub author: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Topic tags
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Build configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    /// Settings that affect the binary (and therefore the package id)
    #[serde(default)]
    pub settings: Vec<SettingName>,

    /// Directory within the checkout holding the build scripts
    #[serde(default = "default_source_folder")]
    pub source_folder: String,

    /// Build driver name
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Dependency references
    ///
    /// Format: `["name/[range]@user/channel", "name/1.2.3"]`
    #[serde(default)]
    pub requires: Vec<String>,

    /// Extra definitions passed to the build driver
    #[serde(default)]
    pub definitions: BTreeMap<String, String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            settings: Vec::new(),
            source_folder: default_source_folder(),
            driver: default_driver(),
            requires: Vec::new(),
            definitions: BTreeMap::new(),
        }
    }
}

fn default_source_folder() -> String {
    "src".to_string()
}

fn default_driver() -> String {
    "cmake".to_string()
}

/// Source-control section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmSection {
    /// Version-control system; only `git` is supported
    #[serde(rename = "type", default = "default_scm_type")]
    pub kind: String,

    /// Repository URL
    pub url: String,

    /// Revision selector: `auto` for the checkout's current commit, or a literal revision
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Extra flags for `git describe` (e.g. `--tags`, `--always`)
    #[serde(default)]
    pub describe_flags: Vec<String>,
}

impl ScmSection {
    /// Whether the revision should be taken from the checkout
    pub fn is_auto(&self) -> bool {
        self.revision == "auto"
    }
}

fn default_scm_type() -> String {
    "git".to_string()
}

fn default_revision() -> String {
    "auto".to_string()
}

/// A single file collection rule
///
/// Copies files matching `pattern` under `src` into `dst` in the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRule {
    /// Glob matched against the path relative to `src`
    pub pattern: String,

    /// Source subtree (relative to the build directory or the checkout)
    #[serde(default)]
    pub src: String,

    /// Destination category directory (`include`, `lib`, `bin`)
    pub dst: String,

    /// Globs, relative to `src`, that are never copied
    #[serde(default)]
    pub excludes: Vec<String>,

    /// Keep the relative directory structure; `false` flattens to the file name
    #[serde(default = "default_keep_path")]
    pub keep_path: bool,
}

impl CopyRule {
    /// Rule that keeps relative paths
    pub fn new(pattern: &str, src: &str, dst: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
            excludes: Vec::new(),
            keep_path: true,
        }
    }

    /// Add an exclude glob
    pub fn excluding(mut self, pattern: &str) -> Self {
        self.excludes.push(pattern.to_string());
        self
    }

    /// Discard the relative directory structure
    pub fn flattened(mut self) -> Self {
        self.keep_path = false;
        self
    }
}

fn default_keep_path() -> bool {
    true
}

/// Link information reported to consumers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageInfoSection {
    /// Libraries consumers link against
    #[serde(default)]
    pub libs: Vec<String>,

    /// Preprocessor defines consumers need when linking statically
    #[serde(default)]
    pub static_defines: Vec<String>,
}
