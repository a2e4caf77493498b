// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use std::path::Path;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    if !path.is_file() {
        return Err(Error::NotFound(format!("Recipe file {}", path.display())));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// Validate a recipe for completeness and correctness
///
/// Returns warnings for missing optional metadata.
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if recipe.package.version.as_deref().is_some_and(str::is_empty) {
        return Err(Error::ParseError("Recipe package version cannot be empty".to_string()));
    }

    // Requirement references must parse
    recipe.requirements()?;

    if let Some(scm) = &recipe.scm {
        if scm.kind != "git" {
            return Err(Error::ParseError(format!(
                "Unsupported scm type: {}. Only git is supported",
                scm.kind
            )));
        }
        if scm.url.is_empty() {
            warnings.push("scm section has an empty url".to_string());
        }
    } else if recipe.package.version.is_none() {
        return Err(Error::ParseError(
            "Recipe needs either package.version or an [scm] section".to_string(),
        ));
    }

    for rule in &recipe.copy {
        for pattern in std::iter::once(&rule.pattern).chain(rule.excludes.iter()) {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::ParseError(format!("Invalid copy pattern '{}': {}", pattern, e))
            })?;
        }
        if rule.dst.is_empty() {
            return Err(Error::ParseError(format!(
                "Copy rule '{}' has no destination",
                rule.pattern
            )));
        }
    }

    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if recipe.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if recipe.package.homepage.is_none() {
        warnings.push("Missing package homepage".to_string());
    }
    if recipe.copy.is_empty() {
        warnings.push("No copy rules: the package will be empty".to_string());
    }
    if recipe.package_info.libs.is_empty() {
        warnings.push("No libs declared in package_info".to_string());
    }

    Ok(warnings)
}
