//! Session protocol around the configurator library.
//!
//! The library keeps one project in memory at a time. [`Session`] tracks the
//! `Closed -> Open -> Configured -> Closed` lifecycle, rejects out-of-order
//! calls locally, and closes a project that is still open when dropped.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{Configurator, ErrorCode, LibraryResult, OutputLanguage};
use crate::diagnostics::Diagnostic;

/// Lifecycle state of a configurator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No project loaded.
    Closed,
    /// Project loaded, stack configuration not generated yet.
    Open,
    /// Stack configuration generated; process images may be generated.
    Configured,
}

/// Stateful wrapper enforcing the library's call order.
pub struct Session<C: Configurator> {
    configurator: C,
    state: SessionState,
}

impl<C: Configurator> Session<C> {
    pub fn new(configurator: C) -> Self {
        Self {
            configurator,
            state: SessionState::Closed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn open_project(&mut self, project_file: &Path) -> LibraryResult {
        if self.state != SessionState::Closed {
            return LibraryResult::failure(
                ErrorCode::Unknown,
                "A project is already open in this session.",
            );
        }
        let result = self.configurator.open_project(project_file);
        if result.is_success() {
            self.state = SessionState::Open;
        }
        result
    }

    pub fn generate_stack_configuration(
        &mut self,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        if self.state == SessionState::Closed {
            return no_project_loaded();
        }
        let result = self
            .configurator
            .generate_stack_configuration(output_dir, file_name);
        if result.is_success() {
            self.state = SessionState::Configured;
        }
        result
    }

    pub fn generate_process_image_description(
        &mut self,
        language: OutputLanguage,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        match self.state {
            SessionState::Closed => no_project_loaded(),
            SessionState::Open => LibraryResult::failure(
                ErrorCode::Unknown,
                "Stack configuration has not been generated.",
            ),
            SessionState::Configured => self
                .configurator
                .generate_process_image_description(language, output_dir, file_name),
        }
    }

    /// Close the project. The session counts as closed even if the library
    /// reports a failure; closing is never retried.
    pub fn close_project(&mut self) -> LibraryResult {
        if self.state == SessionState::Closed {
            return no_project_loaded();
        }
        self.state = SessionState::Closed;
        self.configurator.close_project()
    }
}

impl<C: Configurator> Drop for Session<C> {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            let result = self.close_project();
            if !result.is_success() {
                warn!(result = %result, "closing abandoned project failed");
            }
        }
    }
}

fn no_project_loaded() -> LibraryResult {
    LibraryResult::failure(
        ErrorCode::NoProjectLoaded,
        "No openCONFIGURATOR project loaded in the library.",
    )
}

/// One process-image description to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessImageTarget {
    pub language: OutputLanguage,
    pub file_name: String,
}

/// Inputs for one full generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub project_file: PathBuf,
    pub output_dir: PathBuf,
    pub stack_configuration_file: String,
    pub process_images: Vec<ProcessImageTarget>,
}

/// A call made during [`run_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    OpenProject,
    GenerateStackConfiguration,
    GenerateProcessImage(OutputLanguage),
    CloseProject,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::OpenProject => f.write_str("Open project"),
            Step::GenerateStackConfiguration => f.write_str("Generate stack configuration"),
            Step::GenerateProcessImage(language) => {
                write!(f, "Generate {} process image", language)
            }
            Step::CloseProject => f.write_str("Close project"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub result: LibraryResult,
}

impl StepRecord {
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::library_failure(self.step, &self.result)
    }
}

/// Ordered record of every call attempted during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    records: Vec<StepRecord>,
}

impl SessionReport {
    pub fn steps(&self) -> Vec<Step> {
        self.records.iter().map(|record| record.step).collect()
    }

    pub fn attempted(&self, step: Step) -> bool {
        self.records.iter().any(|record| record.step == step)
    }

    /// The earliest failing call; this is what the run reports.
    pub fn first_failure(&self) -> Option<&StepRecord> {
        self.records.iter().find(|record| !record.result.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.first_failure().is_none()
    }

    fn record(&mut self, step: Step, result: LibraryResult) -> bool {
        let ok = result.is_success();
        if ok {
            debug!(step = %step, "configurator call succeeded");
        } else if self.is_success() {
            info!(step = %step, code = %result.code, "configurator call failed");
        } else {
            // Only the first failure is reported to the user.
            warn!(step = %step, result = %result, "configurator call failed after earlier failure");
        }
        self.records.push(StepRecord { step, result });
        ok
    }
}

/// Run the fixed call sequence for `plan`.
///
/// Generation stops at the first failure of open or stack configuration;
/// process images are independent of each other. The project is closed
/// exactly when it was opened.
#[instrument(skip_all, fields(project = %plan.project_file.display(), output = %plan.output_dir.display()))]
pub fn run_session<C: Configurator>(configurator: C, plan: &GenerationPlan) -> SessionReport {
    let mut session = Session::new(configurator);
    let mut report = SessionReport::default();

    if !report.record(Step::OpenProject, session.open_project(&plan.project_file)) {
        return report;
    }

    let configured = report.record(
        Step::GenerateStackConfiguration,
        session.generate_stack_configuration(&plan.output_dir, &plan.stack_configuration_file),
    );
    if configured {
        for target in &plan.process_images {
            report.record(
                Step::GenerateProcessImage(target.language),
                session.generate_process_image_description(
                    target.language,
                    &plan.output_dir,
                    &target.file_name,
                ),
            );
        }
    } else {
        debug!("skipping process image generation");
    }

    report.record(Step::CloseProject, session.close_project());
    report
}
