// src/recipe/kitchen/copy.rs

//! Copy rules: collecting build outputs into the package layout

use crate::error::{Error, Result};
use crate::hash::sha256_file;
use crate::recipe::format::CopyRule;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File name of the manifest written at the package root
pub const MANIFEST_FILE: &str = "manifest.json";

/// Files placed in a package, by destination category
///
/// Paths are relative to the package root and always use `/`. Each maps to
/// the SHA-256 of the copied file. Ordering is deterministic, so two
/// packagings of the same build output serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    files: BTreeMap<String, BTreeMap<String, String>>,
}

impl PackageManifest {
    fn insert(&mut self, category: &str, path: String, digest: String) {
        self.files
            .entry(category.to_string())
            .or_default()
            .insert(path, digest);
    }

    /// Destination categories that received at least one file
    pub fn categories(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Packaged paths in a category
    pub fn files_in(&self, category: &str) -> Vec<&str> {
        self.files
            .get(category)
            .map(|files| files.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether a package-relative path was packaged
    pub fn contains(&self, path: &str) -> bool {
        self.files.values().any(|files| files.contains_key(path))
    }

    /// Digest of a packaged file
    pub fn digest(&self, path: &str) -> Option<&str> {
        self.files
            .values()
            .find_map(|files| files.get(path))
            .map(String::as_str)
    }

    /// Total number of packaged files
    pub fn len(&self) -> usize {
        self.files.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `<output_root>/manifest.json`
    pub fn write(&self, output_root: &Path) -> Result<PathBuf> {
        let path = output_root.join(MANIFEST_FILE);
        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(&path, json).map_err(|e| {
            Error::IoError(format!("Failed to write manifest {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}

/// A rule with compiled globs and its existing source directories
struct PreparedRule<'a> {
    rule: &'a CopyRule,
    pattern: Pattern,
    match_file_name: bool,
    excludes: Vec<Pattern>,
    sources: Vec<PathBuf>,
}

impl PreparedRule<'_> {
    fn selects(&self, relative: &str, file_name: &str) -> bool {
        let matched = self.pattern.matches(relative)
            || (self.match_file_name && self.pattern.matches(file_name));
        matched && !self.excludes.iter().any(|e| e.matches(relative))
    }
}

fn compile_glob(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern)
        .map_err(|e| Error::PackagingError(format!("Invalid glob pattern '{}': {}", pattern, e)))
}

/// Check every rule before any file is touched
fn prepare<'a>(rules: &'a [CopyRule], roots: &[&Path]) -> Result<Vec<PreparedRule<'a>>> {
    let mut prepared = Vec::with_capacity(rules.len());

    for rule in rules {
        let sources: Vec<PathBuf> = roots
            .iter()
            .map(|root| root.join(&rule.src))
            .filter(|dir| dir.is_dir())
            .map(fs::canonicalize)
            .collect::<std::io::Result<_>>()?;

        if sources.is_empty() {
            let searched: Vec<String> = roots.iter().map(|r| r.display().to_string()).collect();
            return Err(Error::PackagingError(format!(
                "source directory '{}' for pattern '{}' not found in {}",
                rule.src,
                rule.pattern,
                searched.join(", ")
            )));
        }

        prepared.push(PreparedRule {
            rule,
            pattern: compile_glob(&rule.pattern)?,
            match_file_name: !rule.pattern.contains('/'),
            excludes: rule
                .excludes
                .iter()
                .map(|e| compile_glob(e))
                .collect::<Result<_>>()?,
            sources,
        });
    }

    Ok(prepared)
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Copy every file selected by `rules` into `output_root`
///
/// Each rule's `src` is looked up under every root; files are taken from
/// each root where it exists. If any rule's `src` exists under none of the
/// roots, nothing is copied and [`Error::PackagingError`] is returned. A
/// rule matching no files is fine. Existing destination files are
/// overwritten.
///
/// Paths are compared after canonicalization, so an output root that
/// overlaps a source is handled however the paths were spelled: a package
/// nested inside a source is never re-collected, and a file that already
/// sits at its destination is recorded without being copied onto itself.
pub fn copy_into(
    rules: &[CopyRule],
    roots: &[&Path],
    output_root: &Path,
) -> Result<PackageManifest> {
    let prepared = prepare(rules, roots)?;

    fs::create_dir_all(output_root)?;
    let output_root = fs::canonicalize(output_root)?;
    let mut manifest = PackageManifest::default();

    for rule in &prepared {
        let category = rule.rule.dst.trim_matches('/');
        let mut copied = 0usize;

        for source in &rule.sources {
            // Output strictly inside this source holds an earlier packaging
            let skip_output = output_root != *source && output_root.starts_with(source);
            let selected = select_files(rule, source, &output_root, skip_output);

            // Selection is complete before the first write, so files copied
            // into an overlapping tree are never walked
            for (path, packaged) in selected {
                let dest = output_root.join(&packaged);

                if manifest.contains(&packaged) {
                    warn!(
                        "{} is selected more than once; {} replaces the earlier file",
                        packaged,
                        path.display()
                    );
                }

                let digest = if is_same_file(&path, &dest)? {
                    debug!("{} is already in place", packaged);
                    sha256_file(&path)?
                } else {
                    if let Some(parent) = dest.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::copy(&path, &dest).map_err(|e| {
                        Error::IoError(format!(
                            "Failed to copy {} to {}: {}",
                            path.display(),
                            dest.display(),
                            e
                        ))
                    })?;
                    debug!("Packaged {} -> {}", path.display(), packaged);
                    sha256_file(&dest)?
                };

                manifest.insert(category, packaged, digest);
                copied += 1;
            }
        }

        if copied == 0 {
            debug!("Pattern '{}' in '{}' matched no files", rule.rule.pattern, rule.rule.src);
        }
    }

    info!("Packaged {} file(s) into {}", manifest.len(), output_root.display());
    Ok(manifest)
}

/// Files under `source` selected by `rule`, with their package-relative paths
fn select_files(
    rule: &PreparedRule<'_>,
    source: &Path,
    output_root: &Path,
    skip_output: bool,
) -> Vec<(PathBuf, String)> {
    let category = rule.rule.dst.trim_matches('/');
    let mut selected = Vec::new();

    for entry in WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if skip_output && path.starts_with(output_root) {
            continue;
        }

        let relative = match path.strip_prefix(source) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let relative_str = to_slash_path(relative);
        let file_name = entry.file_name().to_string_lossy();

        if !rule.selects(&relative_str, &file_name) {
            continue;
        }

        let packaged = if rule.rule.keep_path {
            format!("{}/{}", category, relative_str)
        } else {
            format!("{}/{}", category, file_name)
        };
        selected.push((path.to_path_buf(), packaged));
    }

    selected
}

fn is_same_file(path: &Path, dest: &Path) -> Result<bool> {
    if !dest.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(path)? == fs::canonicalize(dest)?)
}
