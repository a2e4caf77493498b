// src/recipe/info.rs

//! Consumer-facing package information

use crate::recipe::format::Recipe;
use crate::recipe::settings::Options;
use serde::{Deserialize, Serialize};

/// What a consumer needs to compile and link against the package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Libraries to link
    pub libs: Vec<String>,
    /// Preprocessor defines consumers must set
    pub defines: Vec<String>,
    pub include_dirs: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub bin_dirs: Vec<String>,
}

/// Describe how consumers use the package under the given options
///
/// The library list does not depend on linkage. Static builds add each of
/// the recipe's static defines exactly once; shared builds add none.
pub fn describe_package_info(recipe: &Recipe, options: &Options) -> PackageInfo {
    let defines = if options.shared {
        Vec::new()
    } else {
        let mut defines: Vec<String> = Vec::new();
        for define in &recipe.package_info.static_defines {
            if !defines.contains(define) {
                defines.push(define.clone());
            }
        }
        defines
    };

    PackageInfo {
        libs: recipe.package_info.libs.clone(),
        defines,
        include_dirs: vec!["include".to_string()],
        lib_dirs: vec!["lib".to_string()],
        bin_dirs: vec!["bin".to_string()],
    }
}
