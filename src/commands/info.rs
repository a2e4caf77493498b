// src/commands/info.rs

//! Info command - show consumer link information

use super::load_recipe;
use anyhow::{Context, Result};
use pantry::recipe::describe_package_info;

/// Print the libraries, defines and directories consumers use
pub fn cmd_info(recipe_path: &str, options: &[String], json: bool) -> Result<()> {
    let recipe = load_recipe(recipe_path)?;

    let mut opts = recipe.options;
    for assignment in options {
        let (key, value) = pantry::recipe::settings::split_assignment(assignment)
            .with_context(|| format!("Invalid option override: {}", assignment))?;
        opts.set(key, value)
            .with_context(|| format!("Invalid option override: {}", assignment))?;
    }

    let info = describe_package_info(&recipe, &opts);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Package: {} (shared={})", recipe.package.name, opts.shared);
    println!("  Libs: {}", info.libs.join(" "));
    if info.defines.is_empty() {
        println!("  Defines: (none)");
    } else {
        println!("  Defines: {}", info.defines.join(" "));
    }
    println!("  Include dirs: {}", info.include_dirs.join(" "));
    println!("  Lib dirs: {}", info.lib_dirs.join(" "));
    println!("  Bin dirs: {}", info.bin_dirs.join(" "));
    Ok(())
}
