//! End-to-end build scenarios against a scripted configurator.

use cdcbuilder::build::{BuildOutcome, run_build};
use cdcbuilder::configurator::{ErrorCode, OutputLanguage, Step};
use cdcbuilder::exit_codes;
use cdcbuilder::test_support::{BuildFixture, Call, CallKind, ScriptedConfigurator};

fn build(fixture: &BuildFixture, configurator: &mut ScriptedConfigurator) -> BuildOutcome {
    run_build(&fixture.args(), move || Ok(configurator)).expect("build")
}

fn report_text(outcome: &BuildOutcome) -> String {
    let mut buf = Vec::new();
    outcome.write_report(&mut buf).expect("write report");
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn rebuild_replaces_previous_outputs_and_keeps_makefiles() {
    let fixture = BuildFixture::new();
    fixture.write_output("mnobd.cdc", "previous");
    fixture.write_output("leftover.txt", "old");
    fixture.write_output("cdc.mak", "rules");
    fixture.write_output(".mak", "hidden rules");
    fixture.write_output("upper.MAK", "not reserved");
    std::fs::create_dir(fixture.output_dir.join("keep")).expect("mkdir");

    let mut configurator = ScriptedConfigurator::new();
    let outcome = build(&fixture, &mut configurator);

    assert_eq!(outcome.exit_code(), exit_codes::OK);
    assert_eq!(
        fixture.output_names(),
        vec![".mak", "PI.cs", "XAP.xml", "cdc.mak", "keep", "mnobd.cdc"]
    );
    assert_eq!(
        std::fs::read_to_string(fixture.output_dir.join("mnobd.cdc")).expect("read"),
        "mnobd.cdc"
    );
}

#[test]
fn library_receives_the_validated_paths() {
    let fixture = BuildFixture::new();
    let mut configurator = ScriptedConfigurator::new();
    build(&fixture, &mut configurator);

    assert_eq!(
        configurator.calls()[..2],
        [
            Call::OpenProject(fixture.project_file.clone()),
            Call::GenerateStackConfiguration {
                output_dir: fixture.output_dir.clone(),
                file_name: "mnobd.cdc".to_string(),
            },
        ]
    );
}

#[test]
fn open_failure_skips_close() {
    let fixture = BuildFixture::new();
    let mut configurator = ScriptedConfigurator::new().fail(
        CallKind::OpenProject,
        ErrorCode::InvalidPjtXml,
        "Project file is not valid.",
    );

    let outcome = build(&fixture, &mut configurator);

    assert_eq!(outcome.exit_code(), exit_codes::FATAL);
    assert_eq!(
        report_text(&outcome),
        "error 9139: Open project failed: Project file is not valid.\n"
    );
    assert_eq!(configurator.kinds(), vec![CallKind::OpenProject]);
}

#[test]
fn csharp_failure_still_attempts_xml_and_reports_csharp() {
    let fixture = BuildFixture::new();
    let mut configurator = ScriptedConfigurator::new().fail(
        CallKind::GenerateProcessImageDescription(OutputLanguage::CSharp),
        ErrorCode::InvalidDataTypeForPdo,
        "",
    );

    let outcome = build(&fixture, &mut configurator);

    assert_eq!(
        report_text(&outcome),
        "error 9141: Generate C# process image failed: OCFM_ERR_INVALID_DATATYPE_FOR_PDO\n"
    );
    let report = outcome.report().expect("report");
    assert!(report.attempted(Step::GenerateProcessImage(OutputLanguage::Xml)));
    assert!(report.attempted(Step::CloseProject));
    assert_eq!(fixture.output_names(), vec!["XAP.xml", "mnobd.cdc"]);
}

#[test]
fn close_failure_fails_an_otherwise_good_build() {
    let fixture = BuildFixture::new();
    let mut configurator = ScriptedConfigurator::new().fail(
        CallKind::CloseProject,
        ErrorCode::NoProjectLoaded,
        "No project loaded.",
    );

    let outcome = build(&fixture, &mut configurator);

    assert!(matches!(outcome, BuildOutcome::Failed { .. }));
    assert_eq!(
        report_text(&outcome),
        "error 9167: Close project failed: No project loaded.\n"
    );
}
