//! Validation of the positional command line `<project> -o <output>`.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::{Diagnostic, codes, render_template, templates};

/// The only accepted option token.
pub const OUTPUT_OPTION: &str = "-o";

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub project_file: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected 3 arguments, got {0}")]
    WrongArgumentCount(usize),
    #[error("project file {} does not exist", .0.display())]
    ProjectFileNotFound(PathBuf),
    #[error("output path {} does not exist", .0.display())]
    OutputPathNotFound(PathBuf),
    #[error("invalid option {0:?}")]
    InvalidOption(String),
}

impl ValidationError {
    /// Usage errors are followed by the usage block.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ValidationError::WrongArgumentCount(_) | ValidationError::InvalidOption(_)
        )
    }

    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            ValidationError::WrongArgumentCount(count) => Diagnostic::error(
                codes::WRONG_ARGUMENT_COUNT,
                render_template(templates::WRONG_ARGUMENT_COUNT, &[count]),
            ),
            ValidationError::ProjectFileNotFound(path) => Diagnostic::error(
                codes::PROJECT_FILE_NOT_FOUND,
                render_template(templates::PROJECT_FILE_NOT_FOUND, &[&path.display()]),
            ),
            ValidationError::OutputPathNotFound(path) => Diagnostic::error(
                codes::OUTPUT_PATH_NOT_FOUND,
                render_template(templates::OUTPUT_PATH_NOT_FOUND, &[&path.display()]),
            ),
            ValidationError::InvalidOption(token) => Diagnostic::error(
                codes::INVALID_OPTION,
                render_template(templates::INVALID_OPTION, &[token, &OUTPUT_OPTION]),
            ),
        }
    }
}

/// Validate raw positional arguments (program name excluded).
///
/// Checks run in order and stop at the first failure: argument count,
/// project file, output directory, option token. Nothing is touched on disk.
pub fn parse_invocation(args: &[OsString]) -> Result<Invocation, ValidationError> {
    let [project, option, output] = args else {
        return Err(ValidationError::WrongArgumentCount(args.len()));
    };

    let project_file = PathBuf::from(project);
    if !project_file.is_file() {
        return Err(ValidationError::ProjectFileNotFound(project_file));
    }

    let output_dir = PathBuf::from(output);
    if !output_dir.is_dir() {
        return Err(ValidationError::OutputPathNotFound(output_dir));
    }

    if option.to_str() != Some(OUTPUT_OPTION) {
        return Err(ValidationError::InvalidOption(
            option.to_string_lossy().into_owned(),
        ));
    }

    Ok(Invocation {
        project_file,
        output_dir,
    })
}
