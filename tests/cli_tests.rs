//! CLI integration tests using the REAL autoload binary

mod common;

use common::{TestProject, autoload_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    autoload_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generates the namespace"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("vendor-path"));
}

#[test]
fn test_version_output() {
    autoload_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("autoload"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_vendor_path_default() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("vendor-path")
        .assert()
        .success()
        .stdout("vendor\n");
    assert!(project.file_exists("vendor"));
}

#[test]
fn test_vendor_path_from_manifest_and_override() {
    let project = TestProject::new();
    project.write_file("composer.json", r#"{"config": {"vendor-dir": "lib/deps"}}"#);

    project
        .cmd()
        .arg("vendor-path")
        .assert()
        .success()
        .stdout("lib/deps\n");

    project
        .cmd()
        .args(["--vendor-dir", "other", "vendor-path"])
        .assert()
        .success()
        .stdout("other\n");

    project
        .cmd()
        .env("AUTOLOAD_VENDOR_DIR", "from-env")
        .arg("vendor-path")
        .assert()
        .success()
        .stdout("from-env\n");
}

#[test]
fn test_vendor_path_absolute() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["vendor-path", "--absolute"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/").and(predicate::str::ends_with("/vendor\n")));
}

#[test]
fn test_vendor_path_is_a_file() {
    let project = TestProject::new();
    project.write_file("vendor", "not a directory");

    project
        .cmd()
        .arg("vendor-path")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid vendor directory"));
}

#[test]
fn test_working_dir_option() {
    let project = TestProject::new();
    project.write_file(
        "app/composer.json",
        r#"{"autoload": {"psr-0": {"App": "src/"}}}"#,
    );

    autoload_cmd()
        .env_remove("AUTOLOAD_VENDOR_DIR")
        .arg("-d")
        .arg(project.path.join("app"))
        .arg("dump")
        .assert()
        .success();

    assert!(project.file_exists("app/vendor/.composer/autoload_namespaces.php"));
}

#[test]
fn test_invalid_manifest() {
    let project = TestProject::new();
    project.write_file("composer.json", "{ broken");

    project
        .cmd()
        .arg("dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("composer.json"));
}
