// tests/kitchen.rs

//! End-to-end evaluation through the Kitchen with stand-in tools.

mod common;

use common::{
    FailingDriver, RecordingDriver, StubVcs, libtcod_checkout, libtcod_recipe, linux_profile,
    list_files,
};
use pantry::recipe::kitchen::{MANIFEST_FILE, PACKAGE_INFO_FILE, Vcs, VersionOrigin};
use pantry::recipe::{Kitchen, KitchenConfig, parse_recipe};
use pantry::Error;
use std::fs;
use std::path::Path;

#[test]
fn test_cook_runs_all_phases() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();
    let recipe = libtcod_recipe();
    let driver = RecordingDriver::default();

    let config = KitchenConfig {
        jobs: 3,
        ..KitchenConfig::for_checkout(&checkout)
    };
    let kitchen = Kitchen::with_tools(
        config,
        Box::new(driver.clone()),
        Box::new(StubVcs::new("1.15.1-12-g4e1f0c3")),
    );

    let result = kitchen.cook(&recipe, linux_profile(false), out.path()).unwrap();

    assert_eq!(result.version.as_str(), "1.15.1-12-g4e1f0c3");
    assert_eq!(result.version.origin(), VersionOrigin::Scm);
    assert_eq!(result.package_id, recipe.package_id(&linux_profile(false)));
    assert_eq!(result.package_info.defines, vec!["LIBTCOD_STATIC"]);

    let scm = result.scm.unwrap();
    assert_eq!(scm.url, "https://github.com/libtcod/libtcod.git");
    assert_eq!(scm.revision, "4e1f0c3a9b2d7e6f5a4b3c2d1e0f9a8b7c6d5e4f");

    let configured = driver.configured.lock().unwrap();
    assert_eq!(configured.len(), 1);
    assert_eq!(configured[0].source_dir, checkout.join("src"));
    assert_eq!(configured[0].build_dir, checkout.join("build"));
    assert_eq!(configured[0].jobs, 3);
    assert_eq!(driver.compiled.lock().unwrap().len(), 1);

    let files = list_files(out.path());
    assert!(files.contains(&MANIFEST_FILE.to_string()));
    assert!(files.contains(&PACKAGE_INFO_FILE.to_string()));
    assert!(files.contains(&"lib/foo.a".to_string()));
    assert!(result.log.contains("[100%] Built target TCOD"));
}

#[test]
fn test_build_failure_stops_before_packaging() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();
    let recipe = libtcod_recipe();

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout(&checkout),
        Box::new(FailingDriver),
        Box::new(StubVcs::new("1.15.0")),
    );

    let err = kitchen.cook(&recipe, linux_profile(false), out.path()).unwrap_err();
    match err {
        Error::BuildError {
            phase,
            code,
            stderr,
        } => {
            assert_eq!(phase, "compile");
            assert_eq!(code, Some(2));
            assert_eq!(stderr, "console.c:12: error: unknown type name 'TCOD_Console'");
        }
        other => panic!("expected BuildError, got {:?}", other),
    }
    assert!(list_files(out.path()).is_empty());
}

#[test]
fn test_missing_source_folder_is_a_build_error() {
    let (_tmp, checkout) = libtcod_checkout(false);
    fs::remove_dir_all(checkout.join("src")).unwrap();
    let recipe = libtcod_recipe();
    let driver = RecordingDriver::default();

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout(&checkout),
        Box::new(driver.clone()),
        Box::new(StubVcs::new("1.15.0")),
    );
    let version = kitchen.resolve_version(&recipe).unwrap();
    let mut cook = kitchen.prepare(&recipe, linux_profile(false), version);

    assert!(matches!(cook.build(), Err(Error::BuildError { .. })));
    assert!(driver.configured.lock().unwrap().is_empty());
}

#[test]
fn test_declared_version_skips_source_control() {
    let recipe = parse_recipe(
        r#"
[package]
name = "libtcod"
version = "1.15.0"
"#,
    )
    .unwrap();
    let vcs = StubVcs::new("ignored");
    let calls = vcs.describe_calls.clone();

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout("/nonexistent"),
        Box::new(RecordingDriver::default()),
        Box::new(vcs),
    );

    let version = kitchen.resolve_version(&recipe).unwrap();
    assert_eq!(version.as_str(), "1.15.0");
    assert_eq!(version.origin(), VersionOrigin::Declared);
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn test_version_is_resolved_once_per_cook() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();
    let vcs = StubVcs::new("1.15.0");
    let calls = vcs.describe_calls.clone();

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout(&checkout),
        Box::new(RecordingDriver::default()),
        Box::new(vcs),
    );
    kitchen
        .cook(&libtcod_recipe(), linux_profile(false), out.path())
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_driver_mismatch_is_rejected() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let mut recipe = libtcod_recipe();
    recipe.build.driver = "meson".to_string();

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout(&checkout),
        Box::new(RecordingDriver::default()),
        Box::new(StubVcs::new("1.15.0")),
    );
    let out = tempfile::tempdir().unwrap();

    let err = kitchen.cook(&recipe, linux_profile(false), out.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

/// Vcs for a directory that is not a repository
struct NoRepository;

impl Vcs for NoRepository {
    fn describe(&self, checkout: &Path, _flags: &[String]) -> pantry::Result<String> {
        Err(Error::VersionResolutionError(format!(
            "{} is not a git repository",
            checkout.display()
        )))
    }

    fn head_revision(&self, checkout: &Path) -> pantry::Result<String> {
        self.describe(checkout, &[])
    }
}

#[test]
fn test_declared_version_cooks_outside_a_repository() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();
    let mut recipe = libtcod_recipe();
    recipe.package.version = Some("1.15.0".to_string());

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout(&checkout),
        Box::new(RecordingDriver::default()),
        Box::new(NoRepository),
    );

    let result = kitchen.cook(&recipe, linux_profile(false), out.path()).unwrap();
    assert_eq!(result.version.as_str(), "1.15.0");
    assert!(result.scm.is_none());
}

#[test]
fn test_scm_version_outside_a_repository_fails() {
    let (_tmp, checkout) = libtcod_checkout(false);
    let out = tempfile::tempdir().unwrap();

    let kitchen = Kitchen::with_tools(
        KitchenConfig::for_checkout(&checkout),
        Box::new(RecordingDriver::default()),
        Box::new(NoRepository),
    );

    let err = kitchen
        .cook(&libtcod_recipe(), linux_profile(false), out.path())
        .unwrap_err();
    assert!(matches!(err, Error::VersionResolutionError(_)));
    assert!(list_files(out.path()).is_empty());
}
