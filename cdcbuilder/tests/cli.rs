//! CLI tests for the `cdcbuilder` binary.
//!
//! Spawns the binary against a temporary configuration whose library
//! directory holds no configurator, so only the paths that never reach the
//! library (or fail to load it) are exercised here.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use cdcbuilder::exit_codes;
use cdcbuilder::io::config::{CONFIG_ENV, CONFIG_FILE_NAME};
use cdcbuilder::test_support::BuildFixture;

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, body).expect("write config");
    path
}

fn run(config: &Path, args: &[OsString]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cdcbuilder"))
        .env(CONFIG_ENV, config)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run cdcbuilder")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn setup() -> (BuildFixture, std::path::PathBuf) {
    let fixture = BuildFixture::new();
    let config = write_config(fixture.temp.path(), "library_name = \"openCONFIGURATOR\"\n");
    (fixture, config)
}

#[test]
fn no_arguments_prints_usage() {
    let (_fixture, config) = setup();

    let output = run(&config, &[]);

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    let text = stdout(&output);
    assert!(
        text.starts_with("error 9001: Wrong number of arguments: expected 3, got 0.\n"),
        "{text}"
    );
    assert!(text.contains("Bernecker + Rainer cdcbuilder"));
    assert!(text.contains(" -o <OutputPath>\tSet the output path for the generated files."));
}

#[test]
fn wrong_argument_counts_print_usage() {
    let (fixture, config) = setup();
    let full = fixture.args();
    let mut extra = full.clone();
    extra.push(OsString::from("extra"));

    for args in [&full[..1], &full[..2], &extra[..]] {
        let output = run(&config, args);

        assert_eq!(output.status.code(), Some(exit_codes::FATAL));
        let text = stdout(&output);
        let expected = format!(
            "error 9001: Wrong number of arguments: expected 3, got {}.\n",
            args.len()
        );
        assert!(text.starts_with(&expected), "{text}");
        assert!(text.contains("Usage: cdcbuilder"));
    }
}

#[test]
fn leading_escape_counts_as_an_argument() {
    let (fixture, config) = setup();
    fixture.write_output("mnobd.cdc", "previous");
    let mut args = vec![OsString::from("--")];
    args.extend(fixture.args());

    let output = run(&config, &args);

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    let text = stdout(&output);
    assert!(
        text.starts_with("error 9001: Wrong number of arguments: expected 3, got 4.\n"),
        "{text}"
    );
    assert!(text.contains("Usage: cdcbuilder"));
    assert!(!stderr(&output).contains("connect to configurator library"));
    assert_eq!(fixture.output_names(), vec!["mnobd.cdc"]);
}

#[test]
fn invalid_option_prints_usage() {
    let (fixture, config) = setup();

    let output = run(&config, &fixture.args_with_option("-x"));

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    let text = stdout(&output);
    assert!(text.starts_with("error 9002: Wrong parameter '-x' given, expected '-o'."));
    assert!(text.contains("Usage: cdcbuilder"));
}

#[test]
fn missing_project_file_is_reported() {
    let (fixture, config) = setup();
    fs::remove_file(&fixture.project_file).expect("remove project");

    let output = run(&config, &fixture.args());

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    let text = stdout(&output);
    assert!(text.starts_with("error 9003: Project file '"), "{text}");
    assert!(!text.contains("Usage:"));
}

#[test]
fn missing_output_path_is_reported() {
    let (fixture, config) = setup();
    fs::remove_dir(&fixture.output_dir).expect("remove output");

    let output = run(&config, &fixture.args());

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    assert!(stdout(&output).starts_with("error 9004: Output path '"));
}

#[test]
fn missing_library_is_fatal_and_keeps_outputs() {
    let (fixture, config) = setup();
    fixture.write_output("mnobd.cdc", "previous");

    let output = run(&config, &fixture.args());

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("connect to configurator library"));
    assert_eq!(fixture.output_names(), vec!["mnobd.cdc"]);
}

#[test]
fn invalid_configuration_aborts_before_usage() {
    let (fixture, _) = setup();
    let config = write_config(fixture.temp.path(), "resource_path = \"missing\"\n");

    let output = run(&config, &[]);

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("resource path"));
}
