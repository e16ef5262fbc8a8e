//! Integration tests for autoload generation

mod common;

use common::TestProject;
use predicates::prelude::*;

#[test]
fn test_dump_root_package() {
    let project = TestProject::new();
    project.write_file(
        "composer.json",
        r#"{
            "name": "acme/app",
            "autoload": {
                "psr-0": {"Main": "src/", "Lala": ["src/", "lib/"]},
                "classmap": ["classes/"]
            }
        }"#,
    );
    project.write_file("classes/Legacy.php", "<?php\nclass Legacy_Thing {}\n");

    project
        .cmd()
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating autoload files"));

    assert_eq!(
        project.read_file("vendor/.composer/autoload_namespaces.php"),
        "<?php

// autoload_namespaces.php generated by autoload

$vendorDir = dirname(__DIR__);
$baseDir = dirname($vendorDir);

return array(
    'Main' => $baseDir . '/src/',
    'Lala' => array($baseDir . '/src/', $baseDir . '/lib/'),
);
"
    );
    assert!(
        project
            .read_file("vendor/.composer/autoload_classmap.php")
            .contains("'Legacy_Thing' => $baseDir . '/classes/Legacy.php',")
    );
    assert!(project.file_exists("vendor/.composer/autoload.php"));
    assert!(project.file_exists("vendor/.composer/ClassLoader.php"));
    assert!(!project.file_exists("vendor/.composer/include_paths.php"));
}

#[test]
fn test_dump_without_manifest() {
    let project = TestProject::new();

    project.cmd().arg("dump-autoload").assert().success();

    let namespaces = project.read_file("vendor/.composer/autoload_namespaces.php");
    assert!(namespaces.ends_with("return array(\n);\n"));
}

#[test]
fn test_dump_installed_packages() {
    let project = TestProject::new();
    project.write_file(
        "vendor/.composer/installed.json",
        r#"[
            {"name": "a/a", "version": "1.0", "autoload": {"psr-0": {"A": "src/"}}, "include-path": ["lib/"]},
            {"name": "b/b", "version": "1.0", "type": "metapackage"}
        ]"#,
    );

    project.cmd().arg("dump").assert().success();

    assert!(
        project
            .read_file("vendor/.composer/autoload_namespaces.php")
            .contains("'A' => $vendorDir . '/a/a/src/',")
    );
    assert!(
        project
            .read_file("vendor/.composer/include_paths.php")
            .contains("$vendorDir . '/a/a/lib/',")
    );
    assert!(
        project
            .read_file("vendor/.composer/autoload.php")
            .contains("include_paths.php")
    );
}

#[test]
fn test_dump_duplicate_class() {
    let project = TestProject::new();
    project.write_file(
        "composer.json",
        r#"{"autoload": {"classmap": ["one/", "two/"]}}"#,
    );
    project.write_file("one/a.php", "<?php class Foo {}");
    project.write_file("two/b.php", "<?php class Foo {}");

    project
        .cmd()
        .arg("dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Class 'Foo' is declared in both"));

    assert!(!project.file_exists("vendor/.composer/autoload_classmap.php"));
}

#[test]
fn test_dump_custom_output() {
    let project = TestProject::new();
    project.write_file("composer.json", r#"{"autoload": {"psr-0": {"App": "src/"}}}"#);

    project
        .cmd()
        .args(["dump", "--output", "build/autoload"])
        .assert()
        .success();

    let namespaces = project.read_file("build/autoload/autoload_namespaces.php");
    assert!(namespaces.contains("$vendorDir = dirname(dirname(__DIR__)) . '/vendor';"));
    assert!(namespaces.contains("'App' => $baseDir . '/src/',"));
}

#[test]
fn test_dump_unknown_package_type() {
    let project = TestProject::new();
    project.write_file(
        "vendor/.composer/installed.json",
        r#"[{"name": "a/a", "version": "1.0", "type": "custom-plugin"}]"#,
    );

    project
        .cmd()
        .arg("dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown installer type: custom-plugin"));
}
