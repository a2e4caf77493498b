// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use pantry::recipe::kitchen::{BuildDescriptor, BuildDriver, BuildHandle, StepOutput, Vcs};
use pantry::recipe::{
    Arch, BuildProfile, BuildType, Compiler, Options, Os, Recipe, Settings, parse_recipe_file,
};
use pantry::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// The libtcod recipe shipped in `recipes/`
pub fn libtcod_recipe() -> Recipe {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("recipes/libtcod.toml");
    parse_recipe_file(&path).unwrap()
}

/// A fixed Linux/gcc profile so tests do not depend on the host
pub fn linux_profile(shared: bool) -> BuildProfile {
    BuildProfile::new(
        Settings {
            os: Os::Linux,
            compiler: Compiler::Gcc,
            compiler_version: Some("13".to_string()),
            build_type: BuildType::Release,
            arch: Arch::X86_64,
        },
        Options { shared },
    )
}

/// Write a file, creating parent directories
pub fn touch(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A libtcod-shaped checkout with sources and a finished build.
///
/// Layout:
/// - `src/` headers, including a vendored `src/vendor/` subtree
/// - `build/lib/` static and shared libraries, one nested
/// - `build/bin/TCOD.dll` when `with_dll` is set
///
/// Returns (TempDir, checkout) - keep the TempDir alive to prevent cleanup.
pub fn libtcod_checkout(with_dll: bool) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let checkout = temp_dir.path().join("libtcod");

    touch(&checkout, "src/CMakeLists.txt", "project(libtcod)\n");
    touch(&checkout, "src/libtcod.h", "#pragma once\n");
    touch(&checkout, "src/libtcod.hpp", "#pragma once\n");
    touch(&checkout, "src/libtcod/console.h", "struct TCOD_Console;\n");
    touch(&checkout, "src/libtcod/console.hpp", "class Console;\n");
    touch(&checkout, "src/libtcod/console.c", "int x;\n");
    touch(&checkout, "src/vendor/zlib/zlib.h", "/* zlib */\n");
    touch(&checkout, "src/vendor/stb_truetype.h", "/* stb */\n");
    touch(&checkout, "src/vendor/utf8proc/utf8proc.hpp", "/* utf8proc */\n");

    touch(&checkout, "build/lib/libTCOD.so", "ELF shared");
    touch(&checkout, "build/lib/sub/dir/foo.a", "static archive");
    touch(&checkout, "build/lib/CMakeFiles/notes.txt", "not a library");
    fs::create_dir_all(checkout.join("build/bin")).unwrap();
    if with_dll {
        touch(&checkout, "build/bin/TCOD.dll", "MZ");
        touch(&checkout, "build/bin/other.dll", "MZ");
    }

    (temp_dir, checkout)
}

/// Every regular file under `root`, as sorted `/`-separated relative paths
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// Vcs stub with canned answers
pub struct StubVcs {
    pub describe: String,
    pub head: String,
    pub describe_calls: Arc<Mutex<usize>>,
}

impl StubVcs {
    pub fn new(describe: &str) -> Self {
        Self {
            describe: describe.to_string(),
            head: "4e1f0c3a9b2d7e6f5a4b3c2d1e0f9a8b7c6d5e4f".to_string(),
            describe_calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl Vcs for StubVcs {
    fn describe(&self, _checkout: &Path, _flags: &[String]) -> Result<String> {
        *self.describe_calls.lock().unwrap() += 1;
        Ok(self.describe.clone())
    }

    fn head_revision(&self, _checkout: &Path) -> Result<String> {
        Ok(self.head.clone())
    }
}

/// Build driver that records what it was asked to do
///
/// `compile` produces nothing; tests lay out build output themselves.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    pub configured: Arc<Mutex<Vec<BuildDescriptor>>>,
    pub compiled: Arc<Mutex<Vec<PathBuf>>>,
}

impl BuildDriver for RecordingDriver {
    fn name(&self) -> &str {
        "cmake"
    }

    fn configure(&self, descriptor: &BuildDescriptor) -> Result<BuildHandle> {
        self.configured.lock().unwrap().push(descriptor.clone());
        Ok(BuildHandle {
            build_dir: descriptor.build_dir.clone(),
            build_type: descriptor.profile.settings.build_type,
            jobs: descriptor.jobs,
            configure_output: StepOutput {
                stdout: "-- Configuring done".to_string(),
                stderr: String::new(),
            },
        })
    }

    fn compile(&self, handle: &BuildHandle) -> Result<StepOutput> {
        self.compiled.lock().unwrap().push(handle.build_dir.clone());
        Ok(StepOutput {
            stdout: "[100%] Built target TCOD".to_string(),
            stderr: String::new(),
        })
    }
}

/// Build driver whose compile step fails like a broken toolchain
pub struct FailingDriver;

impl BuildDriver for FailingDriver {
    fn name(&self) -> &str {
        "cmake"
    }

    fn configure(&self, descriptor: &BuildDescriptor) -> Result<BuildHandle> {
        Ok(BuildHandle {
            build_dir: descriptor.build_dir.clone(),
            build_type: descriptor.profile.settings.build_type,
            jobs: descriptor.jobs,
            configure_output: StepOutput::default(),
        })
    }

    fn compile(&self, _handle: &BuildHandle) -> Result<StepOutput> {
        Err(Error::BuildError {
            phase: "compile".to_string(),
            code: Some(2),
            stderr: "console.c:12: error: unknown type name 'TCOD_Console'".to_string(),
        })
    }
}
