//! Build orchestration: validate, connect, clean, generate.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::configurator::{
    Configurator, GenerationPlan, OutputLanguage, ProcessImageTarget, SessionReport, StepRecord,
    run_session,
};
use crate::diagnostics::{Diagnostic, write_usage};
use crate::exit_codes;
use crate::invocation::{Invocation, parse_invocation};
use crate::io::output_dir::clean_output_dir;

/// Fixed names of the generated files.
pub struct Artifacts;

impl Artifacts {
    /// Binary stack configuration for the managing node.
    pub const STACK_CONFIGURATION: &'static str = "mnobd.cdc";
    pub const CSHARP_PROCESS_IMAGE: &'static str = "PI.cs";
    pub const XML_PROCESS_IMAGE: &'static str = "XAP.xml";
}

/// The call sequence for a validated invocation.
pub fn generation_plan(invocation: &Invocation) -> GenerationPlan {
    GenerationPlan {
        project_file: invocation.project_file.clone(),
        output_dir: invocation.output_dir.clone(),
        stack_configuration_file: Artifacts::STACK_CONFIGURATION.to_string(),
        process_images: vec![
            ProcessImageTarget {
                language: OutputLanguage::CSharp,
                file_name: Artifacts::CSHARP_PROCESS_IMAGE.to_string(),
            },
            ProcessImageTarget {
                language: OutputLanguage::Xml,
                file_name: Artifacts::XML_PROCESS_IMAGE.to_string(),
            },
        ],
    }
}

/// Result of one builder run.
#[derive(Debug)]
pub enum BuildOutcome {
    /// Malformed command line; the usage block follows the diagnostic.
    Usage(Diagnostic),
    /// Well-formed command line naming a missing file or directory.
    Rejected(Diagnostic),
    /// The configurator reported a failure.
    Failed {
        diagnostic: Diagnostic,
        report: SessionReport,
    },
    Succeeded {
        output_dir: PathBuf,
        report: SessionReport,
    },
}

impl BuildOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildOutcome::Succeeded { .. } => exit_codes::OK,
            BuildOutcome::Usage(_) | BuildOutcome::Rejected(_) | BuildOutcome::Failed { .. } => {
                exit_codes::FATAL
            }
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            BuildOutcome::Usage(diagnostic)
            | BuildOutcome::Rejected(diagnostic)
            | BuildOutcome::Failed { diagnostic, .. } => Some(diagnostic),
            BuildOutcome::Succeeded { .. } => None,
        }
    }

    pub fn report(&self) -> Option<&SessionReport> {
        match self {
            BuildOutcome::Failed { report, .. } | BuildOutcome::Succeeded { report, .. } => {
                Some(report)
            }
            BuildOutcome::Usage(_) | BuildOutcome::Rejected(_) => None,
        }
    }

    /// Write the user-facing report.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            BuildOutcome::Usage(diagnostic) => {
                writeln!(out, "{}", diagnostic)?;
                write_usage(out)
            }
            BuildOutcome::Rejected(diagnostic) | BuildOutcome::Failed { diagnostic, .. } => {
                writeln!(out, "{}", diagnostic)
            }
            BuildOutcome::Succeeded { output_dir, .. } => writeln!(
                out,
                "Generated stack configuration and process image in {}.",
                output_dir.display()
            ),
        }
    }
}

/// Run one build for raw positional `args`.
///
/// `connect` is only invoked once the arguments are valid, and the output
/// directory is only cleaned once a configurator is available. Errors are
/// reserved for cleanup and connection failures.
#[instrument(skip_all, fields(args = args.len()))]
pub fn run_build<C, F>(args: &[OsString], connect: F) -> Result<BuildOutcome>
where
    C: Configurator,
    F: FnOnce() -> Result<C>,
{
    let invocation = match parse_invocation(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            info!(error = %err, "invocation rejected");
            let diagnostic = err.diagnostic();
            return Ok(if err.is_usage_error() {
                BuildOutcome::Usage(diagnostic)
            } else {
                BuildOutcome::Rejected(diagnostic)
            });
        }
    };

    let configurator = connect().context("connect to configurator library")?;

    let removed = clean_output_dir(&invocation.output_dir).with_context(|| {
        format!(
            "clean output directory {}",
            invocation.output_dir.display()
        )
    })?;
    info!(removed = removed.len(), "output directory cleaned");

    let plan = generation_plan(&invocation);
    let report = run_session(configurator, &plan);

    let failure = report.first_failure().map(StepRecord::diagnostic);
    Ok(match failure {
        Some(diagnostic) => BuildOutcome::Failed { diagnostic, report },
        None => BuildOutcome::Succeeded {
            output_dir: invocation.output_dir,
            report,
        },
    })
}
