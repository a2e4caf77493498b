// src/recipe/settings.rs

//! Build settings, options and profiles
//!
//! Settings describe the target configuration (operating system, compiler,
//! build type, architecture). Options are the recipe's own switches; the
//! only one recognized is `shared`. A [`BuildProfile`] combines both for a
//! single evaluation and is assembled in layers:
//!
//! 1. Host-detected settings and the recipe's option defaults
//! 2. An optional profile file (`[settings]` and `[options]` tables)
//! 3. `key=value` overrides from the command line

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

/// Serialize a strum-backed setting enum as its display name
macro_rules! setting_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_ref())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$ty>::from_str(&s).map_err(|_| {
                    serde::de::Error::custom(format!(
                        "invalid {} value '{}'",
                        stringify!($ty),
                        s
                    ))
                })
            }
        }
    };
}

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Os {
    Linux,
    Windows,
    Macos,
    #[strum(to_string = "FreeBSD")]
    FreeBsd,
    Android,
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Compiler {
    #[strum(to_string = "gcc")]
    Gcc,
    #[strum(to_string = "clang")]
    Clang,
    #[strum(to_string = "apple-clang")]
    AppleClang,
    #[strum(to_string = "msvc", serialize = "Visual Studio")]
    Msvc,
}

impl Compiler {
    /// C and C++ compiler executables, if the family has conventional names
    pub fn executables(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Compiler::Gcc => Some(("gcc", "g++")),
            Compiler::Clang => Some(("clang", "clang++")),
            Compiler::AppleClang | Compiler::Msvc => None,
        }
    }
}

/// Build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Arch {
    #[strum(to_string = "x86")]
    X86,
    #[strum(to_string = "x86_64")]
    X86_64,
    #[strum(to_string = "armv7")]
    Armv7,
    #[strum(to_string = "armv8")]
    Armv8,
}

setting_serde!(Os);
setting_serde!(Compiler);
setting_serde!(BuildType);
setting_serde!(Arch);

/// Names of the settings a recipe can declare
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum SettingName {
    Os,
    Compiler,
    BuildType,
    Arch,
}

setting_serde!(SettingName);

/// Concrete settings for one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    /// Compiler version, if pinned
    #[serde(default)]
    pub compiler_version: Option<String>,
    #[serde(default)]
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    /// Detect settings for the machine we are running on
    pub fn host() -> Result<Self> {
        let os = match std::env::consts::OS {
            "linux" => Os::Linux,
            "windows" => Os::Windows,
            "macos" => Os::Macos,
            "freebsd" => Os::FreeBsd,
            "android" => Os::Android,
            other => {
                return Err(Error::ConfigError(format!(
                    "Unsupported host operating system: {}",
                    other
                )));
            }
        };

        let arch = match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "x86_64" => Arch::X86_64,
            "arm" => Arch::Armv7,
            "aarch64" => Arch::Armv8,
            other => {
                return Err(Error::ConfigError(format!(
                    "Unsupported host architecture: {}",
                    other
                )));
            }
        };

        Ok(Self {
            os,
            compiler: Self::default_compiler(os),
            compiler_version: None,
            build_type: BuildType::default(),
            arch,
        })
    }

    /// The compiler family conventionally used on an operating system
    pub fn default_compiler(os: Os) -> Compiler {
        match os {
            Os::Windows => Compiler::Msvc,
            Os::Macos => Compiler::AppleClang,
            Os::Linux | Os::FreeBsd | Os::Android => Compiler::Gcc,
        }
    }

    /// Set a single setting by name
    ///
    /// Accepts `os`, `compiler`, `compiler.version`, `build_type` and `arch`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |what: &str| {
            Error::ConfigError(format!("Invalid value '{}' for setting {}", value, what))
        };

        match key {
            "os" => self.os = value.parse().map_err(|_| invalid("os"))?,
            "compiler" => self.compiler = value.parse().map_err(|_| invalid("compiler"))?,
            "compiler.version" | "compiler_version" => {
                self.compiler_version = Some(value.to_string())
            }
            "build_type" => self.build_type = value.parse().map_err(|_| invalid("build_type"))?,
            "arch" => self.arch = value.parse().map_err(|_| invalid("arch"))?,
            _ => return Err(Error::ConfigError(format!("Unknown setting: {}", key))),
        }

        Ok(())
    }

    /// Value of a declared setting, as it appears in package ids
    pub fn value_of(&self, name: SettingName) -> String {
        match name {
            SettingName::Os => self.os.to_string(),
            SettingName::Compiler => match &self.compiler_version {
                Some(v) => format!("{}-{}", self.compiler, v),
                None => self.compiler.to_string(),
            },
            SettingName::BuildType => self.build_type.to_string(),
            SettingName::Arch => self.arch.to_string(),
        }
    }
}

/// Recipe options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Build shared libraries instead of static ones
    pub shared: bool,
}

impl Options {
    /// Set a single option by name
    ///
    /// A `package:` scope prefix is accepted and ignored.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.rsplit(':').next().unwrap_or(key);
        match key {
            "shared" => {
                self.shared = parse_bool(value).ok_or_else(|| {
                    Error::ConfigError(format!("Invalid value '{}' for option shared", value))
                })?
            }
            _ => return Err(Error::ConfigError(format!("Unknown option: {}", key))),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Split a `key=value` override
pub fn split_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| {
            Error::ConfigError(format!("Expected key=value, got '{}'", assignment))
        })
}

/// On-disk profile layout
#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    settings: BTreeMap<String, toml::Value>,
    #[serde(default)]
    options: BTreeMap<String, toml::Value>,
}

fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Settings and options for a single evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProfile {
    pub settings: Settings,
    pub options: Options,
}

impl BuildProfile {
    /// Create a profile from explicit settings and options
    pub fn new(settings: Settings, options: Options) -> Self {
        Self { settings, options }
    }

    /// Host settings combined with the given option defaults
    pub fn host(options: Options) -> Result<Self> {
        Ok(Self::new(Settings::host()?, options))
    }

    /// Layer a profile file on top of this profile
    pub fn apply_profile_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read profile {}: {}", path.display(), e))
        })?;
        self.apply_profile_str(&content)
    }

    /// Layer profile TOML content on top of this profile
    pub fn apply_profile_str(&mut self, content: &str) -> Result<()> {
        let file: ProfileFile = toml::from_str(content)
            .map_err(|e| Error::ParseError(format!("Invalid profile: {}", e)))?;

        for (key, value) in &file.settings {
            self.settings.set(key, &value_to_string(value))?;
        }
        for (key, value) in &file.options {
            self.options.set(key, &value_to_string(value))?;
        }
        Ok(())
    }

    /// Apply a `key=value` setting override
    pub fn apply_setting_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = split_assignment(assignment)?;
        self.settings.set(key, value)
    }

    /// Apply a `key=value` option override
    pub fn apply_option_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = split_assignment(assignment)?;
        self.options.set(key, value)
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "os={} compiler={} build_type={} arch={} shared={}",
            self.settings.os,
            self.settings.value_of(SettingName::Compiler),
            self.settings.build_type,
            self.settings.arch,
            self.options.shared
        )
    }
}
