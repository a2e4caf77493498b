// src/recipe/mod.rs

//! Recipe system for packaging native libraries
//!
//! Recipes declare how a library is built and packaged, including:
//! - Package metadata (name, license, author, homepage, topics)
//! - The settings and options that change the binary
//! - Dependency references pinned to version ranges
//! - A source-control reference the version is derived from
//! - Copy rules selecting headers and binaries for the package
//! - Link information for consumers
//!
//! # Culinary Terminology
//!
//! - **Recipe**: What to build and what to package
//! - **Kitchen**: The evaluator, holding the build driver and VCS
//! - **Cook**: One evaluation of a recipe for one profile
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "libtcod"
//! license = "BSD-3-Clause"
//! description = "A free, fast, portable and uncomplicated API for roguelike developers."
//!
//! [build]
//! settings = ["os", "compiler", "build_type", "arch"]
//! source_folder = "src"
//! requires = ["sdl2/[~=2.0.5]@bincrafters/stable", "zlib/[~=1.2.11]@conan/stable"]
//!
//! [options]
//! shared = false
//!
//! [scm]
//! type = "git"
//! url = "https://github.com/libtcod/libtcod.git"
//! revision = "auto"
//!
//! [[copy]]
//! pattern = "*.h"
//! src = "src"
//! dst = "include"
//! excludes = ["vendor/*"]
//!
//! [[copy]]
//! pattern = "*.a"
//! src = "lib"
//! dst = "lib"
//! keep_path = false
//!
//! [package_info]
//! libs = ["TCOD"]
//! static_defines = ["LIBTCOD_STATIC"]
//! ```

mod format;
mod info;
pub mod kitchen;
pub mod parser;
pub mod requirement;
pub mod settings;

pub use format::{BuildSection, CopyRule, PackageInfoSection, PackageSection, Recipe, ScmSection};
pub use info::{PackageInfo, describe_package_info};
pub use kitchen::{Cook, CookResult, Kitchen, KitchenConfig};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};
pub use requirement::{Requirement, VersionRange, VersionSpec};
pub use settings::{Arch, BuildProfile, BuildType, Compiler, Options, Os, SettingName, Settings};
