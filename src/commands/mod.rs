// src/commands/mod.rs
//! Command handlers for the Pantry CLI

mod completions;
mod cook;
mod info;
mod inspect;
mod version;

pub use completions::cmd_completions;
pub use cook::{cmd_build, cmd_create, cmd_package};
pub use info::cmd_info;
pub use inspect::cmd_inspect;
pub use version::cmd_version;

use anyhow::{Context, Result};
use pantry::recipe::{BuildProfile, Recipe, parse_recipe_file, validate_recipe};
use std::path::Path;
use tracing::warn;

/// Read, parse and validate a recipe
///
/// Warnings are logged, so they go to stderr and never mix with output
/// meant for other programs (`info --json`, `version`).
pub(crate) fn load_recipe(recipe_path: &str) -> Result<Recipe> {
    let recipe_path = Path::new(recipe_path);
    let recipe = parse_recipe_file(recipe_path)
        .with_context(|| format!("Failed to parse recipe: {}", recipe_path.display()))?;

    let warnings = validate_recipe(&recipe).with_context(|| "Recipe validation failed")?;
    for warning in &warnings {
        warn!("{}: {}", recipe.package.name, warning);
    }

    Ok(recipe)
}

/// Build the evaluation profile
///
/// Later layers win: host settings and the recipe's option defaults, then
/// the profile file, then `-s`/`-o` overrides in command-line order.
pub(crate) fn build_profile(
    recipe: &Recipe,
    profile_path: Option<&str>,
    settings: &[String],
    options: &[String],
) -> Result<BuildProfile> {
    let mut profile =
        BuildProfile::host(recipe.options).with_context(|| "Failed to detect host settings")?;

    if let Some(path) = profile_path {
        profile
            .apply_profile_file(Path::new(path))
            .with_context(|| format!("Failed to apply profile: {}", path))?;
    }

    for assignment in settings {
        profile
            .apply_setting_override(assignment)
            .with_context(|| format!("Invalid setting override: {}", assignment))?;
    }
    for assignment in options {
        profile
            .apply_option_override(assignment)
            .with_context(|| format!("Invalid option override: {}", assignment))?;
    }

    Ok(profile)
}
