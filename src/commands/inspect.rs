// src/commands/inspect.rs

//! Inspect command - show what a recipe declares

use super::load_recipe;
use anyhow::{Context, Result};

/// Parse and validate a recipe, then print its declarations
pub fn cmd_inspect(recipe_path: &str) -> Result<()> {
    let recipe = load_recipe(recipe_path)?;
    let requirements = recipe
        .requirements()
        .with_context(|| "Invalid requirement reference")?;

    let pkg = &recipe.package;
    println!("Recipe: {}", pkg.name);
    match &pkg.version {
        Some(version) => println!("  Version: {}", version),
        None => println!("  Version: (from source control)"),
    }
    if let Some(license) = &pkg.license {
        println!("  License: {}", license);
    }
    if let Some(author) = &pkg.author {
        println!("  Author: {}", author);
    }
    if let Some(homepage) = &pkg.homepage {
        println!("  Homepage: {}", homepage);
    }
    if let Some(description) = &pkg.description {
        println!("  Description: {}", description);
    }
    if !pkg.topics.is_empty() {
        println!("  Topics: {}", pkg.topics.join(", "));
    }

    let settings: Vec<String> = recipe.build.settings.iter().map(|s| s.to_string()).collect();
    println!("\nBuild:");
    println!("  Driver: {}", recipe.build.driver);
    println!("  Source folder: {}", recipe.build.source_folder);
    println!("  Settings: {}", settings.join(", "));
    println!("  Options: shared={}", recipe.options.shared);

    if !requirements.is_empty() {
        println!("\nRequires:");
        for requirement in &requirements {
            println!("  - {}", requirement);
        }
    }

    if let Some(scm) = &recipe.scm {
        println!("\nSource control:");
        println!("  {} {} @ {}", scm.kind, scm.url, scm.revision);
    }

    println!("\nCopy rules:");
    for rule in &recipe.copy {
        let mut line = format!("  {} from '{}' -> {}", rule.pattern, rule.src, rule.dst);
        if !rule.keep_path {
            line.push_str(" (flattened)");
        }
        if !rule.excludes.is_empty() {
            line.push_str(&format!(" excluding {}", rule.excludes.join(", ")));
        }
        println!("{}", line);
    }

    println!("\n[OK] Recipe is valid");
    Ok(())
}
