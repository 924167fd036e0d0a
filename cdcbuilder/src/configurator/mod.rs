//! Configurator abstraction for stack configuration generation.
//!
//! The [`Configurator`] trait decouples build orchestration from the native
//! configurator library. All domain work (parsing the project, building the
//! object dictionaries, writing the CDC and process-image files) happens
//! behind this seam. Tests use scripted configurators that return
//! predetermined results without loading any library.

mod error_code;
pub mod native;
pub mod session;

use std::fmt;
use std::path::Path;

pub use error_code::ErrorCode;
pub use session::{
    GenerationPlan, ProcessImageTarget, Session, SessionReport, SessionState, Step, StepRecord,
    run_session,
};

/// Outcome of a single call into the configurator library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryResult {
    pub code: ErrorCode,
    pub message: String,
}

impl LibraryResult {
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: String::new(),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success
    }

    /// Library message, or the classification name when the library sent none.
    pub fn describe(&self) -> &str {
        if self.message.trim().is_empty() {
            self.code.name()
        } else {
            &self.message
        }
    }
}

impl fmt::Display for LibraryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.describe(), self.code)
    }
}

/// Process-image languages understood by the library.
///
/// Discriminants match the library's enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OutputLanguage {
    C = 0,
    CSharp = 1,
    Xml = 2,
}

impl OutputLanguage {
    pub fn label(self) -> &'static str {
        match self {
            OutputLanguage::C => "C",
            OutputLanguage::CSharp => "C#",
            OutputLanguage::Xml => "XML",
        }
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Abstraction over configurator library backends.
///
/// Implementations are stateful: the library holds at most one open project.
/// Callers should drive them through [`Session`], which enforces call order.
pub trait Configurator {
    /// Load a project file into the library.
    fn open_project(&mut self, project_file: &Path) -> LibraryResult;

    /// Write the binary stack configuration `file_name` into `output_dir`.
    fn generate_stack_configuration(&mut self, output_dir: &Path, file_name: &str)
    -> LibraryResult;

    /// Write a process-image description in `language` into `output_dir`.
    fn generate_process_image_description(
        &mut self,
        language: OutputLanguage,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult;

    /// Release the open project.
    fn close_project(&mut self) -> LibraryResult;
}

impl<C: Configurator + ?Sized> Configurator for &mut C {
    fn open_project(&mut self, project_file: &Path) -> LibraryResult {
        (**self).open_project(project_file)
    }

    fn generate_stack_configuration(
        &mut self,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        (**self).generate_stack_configuration(output_dir, file_name)
    }

    fn generate_process_image_description(
        &mut self,
        language: OutputLanguage,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        (**self).generate_process_image_description(language, output_dir, file_name)
    }

    fn close_project(&mut self) -> LibraryResult {
        (**self).close_project()
    }
}
