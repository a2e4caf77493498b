// src/commands/cook.rs

//! Build, package and create commands

use super::{build_profile, load_recipe};
use crate::cli::CookArgs;
use anyhow::{Context, Result};
use pantry::recipe::{Kitchen, KitchenConfig, Recipe};
use std::path::{Path, PathBuf};
use tracing::info;

fn kitchen_for(args: &CookArgs) -> Kitchen {
    let mut config = KitchenConfig {
        build_dir: args.build_dir.as_ref().map(PathBuf::from),
        cmake_program: args.cmake.clone(),
        git_program: args.git.clone(),
        ..KitchenConfig::for_checkout(&args.checkout)
    };
    if let Some(j) = args.jobs {
        config.jobs = j;
    }
    Kitchen::new(config)
}

fn prepare(args: &CookArgs) -> Result<(Recipe, Kitchen)> {
    println!("Reading recipe: {}", args.recipe);
    let recipe = load_recipe(&args.recipe)?;
    let kitchen = kitchen_for(args);
    Ok((recipe, kitchen))
}

/// Configure and compile a checkout
pub fn cmd_build(args: &CookArgs) -> Result<()> {
    let (recipe, kitchen) = prepare(args)?;
    let profile = build_profile(&recipe, args.profile.as_deref(), &args.settings, &args.options)?;

    let version = kitchen
        .resolve_version(&recipe)
        .with_context(|| format!("Failed to resolve version of {}", recipe.package.name))?;
    println!("Recipe: {} version {}", recipe.package.name, version);
    println!("Profile: {}", profile);
    println!(
        "Building with {} parallel jobs in {}...",
        kitchen.config().jobs,
        kitchen.config().build_dir().display()
    );

    let mut cook = kitchen.prepare(&recipe, profile, version);
    cook.build()
        .with_context(|| format!("Failed to build {}", recipe.package.name))?;

    println!("\n[COMPLETE] Built {} {}", recipe.package.name, cook.version());
    Ok(())
}

/// Package an already built tree
pub fn cmd_package(args: &CookArgs, output: &str) -> Result<()> {
    let (recipe, kitchen) = prepare(args)?;
    let profile = build_profile(&recipe, args.profile.as_deref(), &args.settings, &args.options)?;
    let output = Path::new(output);

    let version = kitchen
        .resolve_version(&recipe)
        .with_context(|| format!("Failed to resolve version of {}", recipe.package.name))?;
    println!("Recipe: {} version {}", recipe.package.name, version);

    let mut cook = kitchen.prepare(&recipe, profile, version);
    let manifest = cook
        .package(output)
        .with_context(|| format!("Failed to package {}", recipe.package.name))?;
    cook.write_package_info(output)
        .with_context(|| "Failed to write package info")?;

    println!("\n[COMPLETE] Packaged {} file(s) into {}", manifest.len(), output.display());
    for category in manifest.categories() {
        println!("  {}/: {} file(s)", category, manifest.files_in(category).len());
    }
    Ok(())
}

/// Resolve the version, build and package
pub fn cmd_create(args: &CookArgs, output: &str) -> Result<()> {
    let (recipe, kitchen) = prepare(args)?;
    let profile = build_profile(&recipe, args.profile.as_deref(), &args.settings, &args.options)?;
    let output = Path::new(output);

    println!("Profile: {}", profile);
    println!("Cooking with {} parallel jobs...", kitchen.config().jobs);

    let result = kitchen
        .cook(&recipe, profile, output)
        .with_context(|| format!("Failed to cook {}", recipe.package.name))?;

    println!(
        "\n[COMPLETE] Cooked: {} {} -> {}",
        recipe.package.name,
        result.version,
        result.package_dir.display()
    );
    println!("  Package id: {}", result.package_id);
    if let Some(scm) = &result.scm {
        println!("  Source: {} @ {}", scm.url, scm.revision);
    }
    println!("  Files: {}", result.manifest.len());
    println!("  Libs: {}", result.package_info.libs.join(" "));
    if !result.package_info.defines.is_empty() {
        println!("  Defines: {}", result.package_info.defines.join(" "));
    }

    info!(
        "Successfully cooked {} to {}",
        recipe.package.name,
        result.package_dir.display()
    );
    Ok(())
}
