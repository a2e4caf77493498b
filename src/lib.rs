// src/lib.rs

//! Pantry: recipe evaluator for packaging native libraries
//!
//! A recipe describes a pre-existing C/C++ library: its metadata, the
//! settings and options that shape the binary, its dependencies, where its
//! sources live and which build outputs form the package. Pantry evaluates
//! a recipe in three strictly ordered phases:
//!
//! - Version: from the recipe, or `git describe` on the checkout
//! - Build: configure and compile through an external build driver (CMake)
//! - Package: copy headers and binaries into `include/`, `lib/` and `bin/`
//!
//! and reports the link information consumers need.

mod error;
pub mod hash;
pub mod recipe;

pub use error::{Error, Result};
pub use recipe::{
    BuildProfile, Cook, CookResult, Kitchen, KitchenConfig, Options, PackageInfo, Recipe,
    Settings, describe_package_info,
};
