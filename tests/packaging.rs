// tests/packaging.rs

//! Packaging behavior of the libtcod recipe against a laid-out build tree.

mod common;

use common::{
    RecordingDriver, StubVcs, libtcod_checkout, libtcod_recipe, linux_profile, list_files, touch,
};
use pantry::recipe::kitchen::{MANIFEST_FILE, PACKAGE_INFO_FILE, PackageManifest};
use pantry::recipe::{Kitchen, KitchenConfig, Options, describe_package_info};
use pantry::{Error, PackageInfo};
use std::fs;
use std::path::Path;

fn kitchen_for(checkout: &Path) -> Kitchen {
    Kitchen::with_tools(
        KitchenConfig::for_checkout(checkout),
        Box::new(RecordingDriver::default()),
        Box::new(StubVcs::new("1.15.0")),
    )
}

fn package(checkout: &Path, output: &Path) -> pantry::Result<PackageManifest> {
    let recipe = libtcod_recipe();
    let kitchen = kitchen_for(checkout);
    let version = kitchen.resolve_version(&recipe)?;
    let mut cook = kitchen.prepare(&recipe, linux_profile(false), version);
    cook.package(output)
}

#[test]
fn test_static_build_defines_static_macro_once() {
    let recipe = libtcod_recipe();

    let info = describe_package_info(&recipe, &Options { shared: false });
    assert_eq!(info.libs, vec!["TCOD"]);
    assert_eq!(info.defines, vec!["LIBTCOD_STATIC"]);

    let info = describe_package_info(&recipe, &Options { shared: true });
    assert_eq!(info.libs, vec!["TCOD"]);
    assert!(info.defines.is_empty());
}

#[test]
fn test_headers_keep_layout_and_skip_vendor() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();

    let manifest = package(&checkout, out.path()).unwrap();

    assert_eq!(
        manifest.files_in("include"),
        vec![
            "include/libtcod.h",
            "include/libtcod.hpp",
            "include/libtcod/console.h",
            "include/libtcod/console.hpp",
        ]
    );
    for file in list_files(out.path()) {
        assert!(!file.contains("vendor"), "vendored file packaged: {}", file);
        assert!(!file.ends_with(".c"), "source file packaged: {}", file);
    }
}

#[test]
fn test_libraries_are_flattened() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();

    let manifest = package(&checkout, out.path()).unwrap();

    assert_eq!(manifest.files_in("lib"), vec!["lib/foo.a", "lib/libTCOD.so"]);
    assert!(out.path().join("lib/foo.a").is_file());
    assert!(!out.path().join("lib/sub").exists());
    assert_eq!(
        fs::read_to_string(out.path().join("lib/foo.a")).unwrap(),
        "static archive"
    );
}

#[test]
fn test_only_named_dll_is_packaged() {
    let (_tmp, checkout) = libtcod_checkout(true);
    let out = tempfile::tempdir().unwrap();

    let manifest = package(&checkout, out.path()).unwrap();

    assert_eq!(manifest.files_in("bin"), vec!["bin/TCOD.dll"]);
    assert!(!out.path().join("bin/other.dll").exists());
}

#[test]
fn test_missing_dll_is_not_an_error() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();

    let manifest = package(&checkout, out.path()).unwrap();

    assert!(manifest.files_in("bin").is_empty());
    assert!(!manifest.categories().contains(&"bin"));
    assert!(!out.path().join("bin/TCOD.dll").exists());
    assert!(out.path().join(MANIFEST_FILE).is_file());
}

#[test]
fn test_missing_bin_subtree_fails_without_writing() {
    let (_tmp, checkout) = libtcod_checkout(false);
    fs::remove_dir_all(checkout.join("build/bin")).unwrap();

    let out = tempfile::tempdir().unwrap();
    touch(out.path(), "lib/previous.a", "from an earlier run");

    let result = package(&checkout, out.path());
    match result {
        Err(Error::PackagingError(msg)) => assert!(msg.contains("bin"), "message: {}", msg),
        other => panic!("expected PackagingError, got {:?}", other),
    }

    assert_eq!(list_files(out.path()), vec!["lib/previous.a"]);
    assert_eq!(
        fs::read_to_string(out.path().join("lib/previous.a")).unwrap(),
        "from an earlier run"
    );
}

#[test]
fn test_packaging_is_idempotent() {
    let (_tmp, checkout) = libtcod_checkout(true);
    let out = tempfile::tempdir().unwrap();

    let first = package(&checkout, out.path()).unwrap();
    let first_files = list_files(out.path());
    let first_json = fs::read(out.path().join(MANIFEST_FILE)).unwrap();

    let second = package(&checkout, out.path()).unwrap();
    let second_json = fs::read(out.path().join(MANIFEST_FILE)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_files, list_files(out.path()));
    assert_eq!(first_json, second_json);

    // A fresh package root gets the same manifest, byte for byte
    let other = tempfile::tempdir().unwrap();
    package(&checkout, other.path()).unwrap();
    assert_eq!(first_json, fs::read(other.path().join(MANIFEST_FILE)).unwrap());
}

#[test]
fn test_manifest_digests_match_copied_files() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();

    let manifest = package(&checkout, out.path()).unwrap();

    let expected = pantry::hash::sha256_file(&out.path().join("include/libtcod.h")).unwrap();
    assert_eq!(manifest.digest("include/libtcod.h"), Some(expected.as_str()));
    assert!(manifest.contains("lib/libTCOD.so"));
    assert_eq!(manifest.len(), 6);
}

#[test]
fn test_package_info_file_matches_options() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();
    let recipe = libtcod_recipe();
    let kitchen = kitchen_for(&checkout);
    let version = kitchen.resolve_version(&recipe).unwrap();

    let mut cook = kitchen.prepare(&recipe, linux_profile(true), version);
    cook.package(out.path()).unwrap();
    cook.write_package_info(out.path()).unwrap();

    let json = fs::read_to_string(out.path().join(PACKAGE_INFO_FILE)).unwrap();
    let info: PackageInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(info.libs, vec!["TCOD"]);
    assert!(info.defines.is_empty());
    assert_eq!(info.include_dirs, vec!["include"]);
}
