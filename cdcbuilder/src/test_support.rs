//! Test-only helpers: a scripted configurator and filesystem fixtures.

use std::collections::{HashMap, VecDeque};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::configurator::{Configurator, ErrorCode, LibraryResult, OutputLanguage};
use crate::invocation::OUTPUT_OPTION;

/// Which configurator entry point was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    OpenProject,
    GenerateStackConfiguration,
    GenerateProcessImageDescription(OutputLanguage),
    CloseProject,
}

/// A recorded configurator call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenProject(PathBuf),
    GenerateStackConfiguration {
        output_dir: PathBuf,
        file_name: String,
    },
    GenerateProcessImageDescription {
        language: OutputLanguage,
        output_dir: PathBuf,
        file_name: String,
    },
    CloseProject,
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::OpenProject(_) => CallKind::OpenProject,
            Call::GenerateStackConfiguration { .. } => CallKind::GenerateStackConfiguration,
            Call::GenerateProcessImageDescription { language, .. } => {
                CallKind::GenerateProcessImageDescription(*language)
            }
            Call::CloseProject => CallKind::CloseProject,
        }
    }
}

/// Configurator returning queued results per entry point.
///
/// Calls without a queued result succeed. Successful generation calls write a
/// placeholder file when the output directory exists, so builds can be
/// checked on disk.
#[derive(Debug, Default)]
pub struct ScriptedConfigurator {
    queued: HashMap<CallKind, VecDeque<LibraryResult>>,
    calls: Vec<Call>,
}

impl ScriptedConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next call of `kind`.
    pub fn fail(mut self, kind: CallKind, code: ErrorCode, message: &str) -> Self {
        self.queued
            .entry(kind)
            .or_default()
            .push_back(LibraryResult::failure(code, message));
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn kinds(&self) -> Vec<CallKind> {
        self.calls.iter().map(Call::kind).collect()
    }

    fn answer(&mut self, call: Call) -> LibraryResult {
        let kind = call.kind();
        self.calls.push(call);
        self.queued
            .get_mut(&kind)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(LibraryResult::success)
    }
}

fn write_placeholder(output_dir: &Path, file_name: &str) {
    if output_dir.is_dir() {
        fs::write(output_dir.join(file_name), file_name).expect("write placeholder artifact");
    }
}

impl Configurator for ScriptedConfigurator {
    fn open_project(&mut self, project_file: &Path) -> LibraryResult {
        self.answer(Call::OpenProject(project_file.to_path_buf()))
    }

    fn generate_stack_configuration(
        &mut self,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        let result = self.answer(Call::GenerateStackConfiguration {
            output_dir: output_dir.to_path_buf(),
            file_name: file_name.to_string(),
        });
        if result.is_success() {
            write_placeholder(output_dir, file_name);
        }
        result
    }

    fn generate_process_image_description(
        &mut self,
        language: OutputLanguage,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        let result = self.answer(Call::GenerateProcessImageDescription {
            language,
            output_dir: output_dir.to_path_buf(),
            file_name: file_name.to_string(),
        });
        if result.is_success() {
            write_placeholder(output_dir, file_name);
        }
        result
    }

    fn close_project(&mut self) -> LibraryResult {
        self.answer(Call::CloseProject)
    }
}

/// Temporary project file plus an empty output directory.
pub struct BuildFixture {
    pub temp: TempDir,
    pub project_file: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for BuildFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildFixture {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let project_file = temp.path().join("project.xml");
        fs::write(&project_file, "<openCONFIGURATORProject/>").expect("write project");
        let output_dir = temp.path().join("out");
        fs::create_dir(&output_dir).expect("create output dir");
        Self {
            temp,
            project_file,
            output_dir,
        }
    }

    /// `<project> -o <output>`
    pub fn args(&self) -> Vec<OsString> {
        self.args_with_option(OUTPUT_OPTION)
    }

    pub fn args_with_option(&self, option: &str) -> Vec<OsString> {
        vec![
            self.project_file.clone().into_os_string(),
            OsString::from(option),
            self.output_dir.clone().into_os_string(),
        ]
    }

    pub fn write_output(&self, name: &str, contents: &str) {
        fs::write(self.output_dir.join(name), contents).expect("write output file");
    }

    /// Sorted names of files and directories in the output directory.
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output_dir)
            .expect("read output dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
