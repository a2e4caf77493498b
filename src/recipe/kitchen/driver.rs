// src/recipe/kitchen/driver.rs

//! Build drivers: the external tools that actually compile sources

use crate::error::{Error, Result};
use crate::recipe::settings::{Arch, BuildProfile, BuildType, Compiler, Os};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Parameters for one external build
#[derive(Debug, Clone)]
pub struct BuildDescriptor {
    /// Directory holding the build scripts
    pub source_dir: PathBuf,
    /// Out-of-source build directory
    pub build_dir: PathBuf,
    pub profile: BuildProfile,
    /// Parallel jobs
    pub jobs: u32,
    /// Recipe-supplied definitions, applied after the profile's
    pub definitions: BTreeMap<String, String>,
}

/// Captured output of one driver invocation
#[derive(Debug, Clone, Default)]
pub struct StepOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A configured build, ready to compile
#[derive(Debug, Clone)]
pub struct BuildHandle {
    pub build_dir: PathBuf,
    pub build_type: BuildType,
    pub jobs: u32,
    /// Output of the configure step
    pub configure_output: StepOutput,
}

/// Capability to configure and compile a source tree
///
/// The Kitchen only talks to this trait, so the concrete tool can be
/// swapped without touching evaluation.
pub trait BuildDriver: Send + Sync {
    /// Driver name as used in recipes
    fn name(&self) -> &str;

    /// Configure the source tree for the descriptor's profile
    fn configure(&self, descriptor: &BuildDescriptor) -> Result<BuildHandle>;

    /// Compile a configured build
    fn compile(&self, handle: &BuildHandle) -> Result<StepOutput>;
}

/// CMake driver
#[derive(Debug, Clone)]
pub struct CMakeDriver {
    program: String,
}

impl Default for CMakeDriver {
    fn default() -> Self {
        Self::new("cmake")
    }
}

impl CMakeDriver {
    /// Use the given cmake executable name or path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Cache definitions derived from the profile and recipe
    pub fn definitions(descriptor: &BuildDescriptor) -> BTreeMap<String, String> {
        let settings = &descriptor.profile.settings;
        let mut defs = BTreeMap::new();

        let shared = if descriptor.profile.options.shared { "ON" } else { "OFF" };
        defs.insert("BUILD_SHARED_LIBS".to_string(), shared.to_string());

        // Visual Studio generators are multi-config; the type goes to --config
        if settings.compiler != Compiler::Msvc {
            defs.insert("CMAKE_BUILD_TYPE".to_string(), settings.build_type.to_string());
        }

        if let Some((cc, cxx)) = settings.compiler.executables() {
            defs.insert("CMAKE_C_COMPILER".to_string(), cc.to_string());
            defs.insert("CMAKE_CXX_COMPILER".to_string(), cxx.to_string());
        }

        if settings.os == Os::Macos {
            let arch = match settings.arch {
                Arch::X86 => "i386",
                Arch::X86_64 => "x86_64",
                Arch::Armv7 => "armv7",
                Arch::Armv8 => "arm64",
            };
            defs.insert("CMAKE_OSX_ARCHITECTURES".to_string(), arch.to_string());
        }

        for (key, value) in &descriptor.definitions {
            defs.insert(key.clone(), value.clone());
        }

        defs
    }

    /// Generator platform for Visual Studio builds
    fn generator_platform(descriptor: &BuildDescriptor) -> Option<&'static str> {
        let settings = &descriptor.profile.settings;
        if settings.compiler != Compiler::Msvc {
            return None;
        }
        Some(match settings.arch {
            Arch::X86 => "Win32",
            Arch::X86_64 => "x64",
            Arch::Armv7 => "ARM",
            Arch::Armv8 => "ARM64",
        })
    }

    /// Arguments for the configure step
    pub fn configure_args(descriptor: &BuildDescriptor) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            descriptor.source_dir.display().to_string(),
            "-B".to_string(),
            descriptor.build_dir.display().to_string(),
        ];

        if let Some(platform) = Self::generator_platform(descriptor) {
            args.push("-A".to_string());
            args.push(platform.to_string());
        }

        for (key, value) in Self::definitions(descriptor) {
            args.push(format!("-D{}={}", key, value));
        }

        args
    }

    /// Arguments for the compile step
    pub fn build_args(handle: &BuildHandle) -> Vec<String> {
        vec![
            "--build".to_string(),
            handle.build_dir.display().to_string(),
            "--config".to_string(),
            handle.build_type.to_string(),
            "--parallel".to_string(),
            handle.jobs.to_string(),
        ]
    }

    fn run_step(&self, phase: &str, args: &[String]) -> Result<StepOutput> {
        let program = which::which(&self.program)
            .map_err(|e| Error::build(phase, format!("{} not found: {}", self.program, e)))?;

        info!("Running {} phase", phase);
        debug!("Command: {} {}", program.display(), args.join(" "));

        let output = Command::new(&program)
            .args(args)
            .output()
            .map_err(|e| Error::build(phase, format!("Failed to run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(Error::BuildError {
                phase: phase.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(StepOutput { stdout, stderr })
    }
}

impl BuildDriver for CMakeDriver {
    fn name(&self) -> &str {
        "cmake"
    }

    fn configure(&self, descriptor: &BuildDescriptor) -> Result<BuildHandle> {
        fs::create_dir_all(&descriptor.build_dir).map_err(|e| {
            Error::build(
                "configure",
                format!(
                    "Failed to create build directory {}: {}",
                    descriptor.build_dir.display(),
                    e
                ),
            )
        })?;

        let output = self.run_step("configure", &Self::configure_args(descriptor))?;

        Ok(BuildHandle {
            build_dir: descriptor.build_dir.clone(),
            build_type: descriptor.profile.settings.build_type,
            jobs: descriptor.jobs,
            configure_output: output,
        })
    }

    fn compile(&self, handle: &BuildHandle) -> Result<StepOutput> {
        self.run_step("compile", &Self::build_args(handle))
    }
}
