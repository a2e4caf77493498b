// src/commands/version.rs

//! Version command - resolve the package version for a checkout

use super::load_recipe;
use anyhow::{Context, Result};
use pantry::recipe::kitchen::VersionOrigin;
use pantry::recipe::{Kitchen, KitchenConfig};

/// Resolve and print the version a cook of this checkout would use
pub fn cmd_version(recipe_path: &str, checkout: &str, git: &str) -> Result<()> {
    let recipe = load_recipe(recipe_path)?;

    let config = KitchenConfig {
        git_program: git.to_string(),
        ..KitchenConfig::for_checkout(checkout)
    };
    let kitchen = Kitchen::new(config);

    let version = kitchen
        .resolve_version(&recipe)
        .with_context(|| format!("Failed to resolve version of {}", recipe.package.name))?;

    println!("{}", version);
    if version.origin() == VersionOrigin::Scm {
        let snapshot = kitchen
            .snapshot_scm(&recipe)
            .with_context(|| "Failed to read source revision")?;
        if let Some(snapshot) = snapshot {
            println!("  Source: {} @ {}", snapshot.url, snapshot.revision);
        }
    }

    Ok(())
}
