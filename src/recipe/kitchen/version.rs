// src/recipe/kitchen/version.rs

//! Package version resolution

use super::vcs::Vcs;
use crate::error::{Error, Result};
use crate::recipe::format::{Recipe, ScmSection};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrigin {
    /// `package.version` in the recipe
    Declared,
    /// Described from source control
    Scm,
}

/// The package version for one evaluation
///
/// Produced once by [`resolve_version`] and handed by value to the cook;
/// there is no way to change it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    value: String,
    origin: VersionOrigin,
}

impl ResolvedVersion {
    /// Version string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> VersionOrigin {
        self.origin
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Resolve the package version
///
/// A version declared in the recipe wins. Otherwise the checkout is
/// described through `vcs`; any failure there is reported as
/// [`Error::VersionResolutionError`] and no fallback is invented.
pub fn resolve_version(recipe: &Recipe, vcs: &dyn Vcs, checkout: &Path) -> Result<ResolvedVersion> {
    if let Some(version) = &recipe.package.version {
        info!("Using declared version {} for {}", version, recipe.package.name);
        return Ok(ResolvedVersion {
            value: version.clone(),
            origin: VersionOrigin::Declared,
        });
    }

    let flags = recipe
        .scm
        .as_ref()
        .map(|scm| scm.describe_flags.as_slice())
        .unwrap_or_default();

    let value = vcs.describe(checkout, flags)?;
    if value.trim().is_empty() {
        return Err(Error::VersionResolutionError(
            "version control returned an empty description".to_string(),
        ));
    }

    info!("Resolved {} version {} from source control", recipe.package.name, value);
    Ok(ResolvedVersion {
        value: value.trim().to_string(),
        origin: VersionOrigin::Scm,
    })
}

/// The scm reference pinned to a concrete revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScmSnapshot {
    pub url: String,
    pub revision: String,
}

/// Pin an scm reference, resolving `auto` to the checkout's current commit
pub fn snapshot_scm(scm: &ScmSection, vcs: &dyn Vcs, checkout: &Path) -> Result<ScmSnapshot> {
    let revision = if scm.is_auto() {
        vcs.head_revision(checkout)?
    } else {
        scm.revision.clone()
    };

    Ok(ScmSnapshot {
        url: scm.url.clone(),
        revision,
    })
}
