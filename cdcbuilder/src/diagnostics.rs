//! Diagnostic lines and the usage block printed on stdout.
//!
//! Every reported failure is one line `<severity> <code>: <message>`.
//! Codes live in two reserved ranges:
//!
//! - `9000..=9099`: the builder's own usage and validation errors.
//! - `9100..=9199`: configurator library classifications, see [`library_code`].

use std::fmt;
use std::io::{self, Write};

use crate::configurator::{ErrorCode, LibraryResult, Step};
use crate::invocation::OUTPUT_OPTION;

pub mod codes {
    //! Builder-owned diagnostic codes.

    pub const WRONG_ARGUMENT_COUNT: u32 = 9001;
    pub const INVALID_OPTION: u32 = 9002;
    pub const PROJECT_FILE_NOT_FOUND: u32 = 9003;
    pub const OUTPUT_PATH_NOT_FOUND: u32 = 9004;

    /// First code of the configurator library range.
    pub const LIBRARY_BASE: u32 = 9100;
}

pub mod templates {
    //! Message templates with positional `{N}` placeholders.

    pub const WRONG_ARGUMENT_COUNT: &str = "Wrong number of arguments: expected 3, got {0}.";
    pub const INVALID_OPTION: &str = "Wrong parameter '{0}' given, expected '{1}'.";
    pub const PROJECT_FILE_NOT_FOUND: &str = "Project file '{0}' does not exist.";
    pub const OUTPUT_PATH_NOT_FOUND: &str = "Output path '{0}' does not exist.";
    pub const LIBRARY_FAILURE: &str = "{0} failed: {1}";
}

/// Vendor shown in the usage banner.
pub const VENDOR: &str = "Bernecker + Rainer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: u32, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Diagnostic for a failed configurator call.
    pub fn library_failure(step: Step, result: &LibraryResult) -> Self {
        Self::error(
            library_code(result.code),
            render_template(
                templates::LIBRARY_FAILURE,
                &[&step as &dyn fmt::Display, &result.describe()],
            ),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.code, self.message)
    }
}

/// Substitute `{0}`, `{1}`, ... in `template` with `args`.
///
/// Placeholders without a matching argument are kept verbatim.
pub fn render_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let substituted = after.find('}').and_then(|end| {
            let index: usize = after[..end].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg.to_string(), end))
        });
        match substituted {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Diagnostic code for a configurator classification.
pub const fn library_code(code: ErrorCode) -> u32 {
    match code {
        ErrorCode::Success => 9100,
        ErrorCode::FileNotPresent => 9101,
        ErrorCode::FileCannotOpen => 9102,
        ErrorCode::InvalidNodeId => 9103,
        ErrorCode::InvalidNodePos => 9104,
        ErrorCode::InvalidNodeType => 9105,
        ErrorCode::InvalidIndexId => 9106,
        ErrorCode::InvalidIndexPos => 9107,
        ErrorCode::InvalidSubIndexId => 9108,
        ErrorCode::InvalidSubIndexPos => 9109,
        ErrorCode::InvalidAttributeType => 9110,
        ErrorCode::NoNodesFound => 9111,
        ErrorCode::NoIndexFound => 9112,
        ErrorCode::NoSubIndexesFound => 9113,
        ErrorCode::NodeIdNotFound => 9114,
        ErrorCode::IndexIdNotFound => 9115,
        ErrorCode::SubIndexIdNotFound => 9116,
        ErrorCode::NodeAlreadyExists => 9117,
        ErrorCode::IndexAlreadyExists => 9118,
        ErrorCode::SubIndexAlreadyExists => 9119,
        ErrorCode::InvalidValue => 9120,
        ErrorCode::InvalidName => 9121,
        ErrorCode::XmlFileCorrupted => 9122,
        ErrorCode::CannotOpenFile => 9123,
        ErrorCode::ParseXml => 9124,
        ErrorCode::ModuleIndexNotFound => 9125,
        ErrorCode::ModuleSubIndexNotFound => 9126,
        ErrorCode::UniqueIdRefNotFound => 9127,
        ErrorCode::StructDataTypeNotFound => 9128,
        ErrorCode::NoCnNodesFound => 9129,
        ErrorCode::DataTypeNotFound => 9130,
        ErrorCode::ValueNotWithinRange => 9131,
        ErrorCode::MnNodeDoesntExist => 9132,
        ErrorCode::CreateXmlWriterFailed => 9133,
        ErrorCode::XmlWriterStartEltFailed => 9134,
        ErrorCode::XmlWriterEndEltFailed => 9135,
        ErrorCode::XmlStartDocFailed => 9136,
        ErrorCode::XmlEndDocFailed => 9137,
        ErrorCode::CannotOpenProjectVerMismatch => 9138,
        ErrorCode::InvalidPjtXml => 9139,
        ErrorCode::ProjectSettings => 9140,
        ErrorCode::InvalidDataTypeForPdo => 9141,
        ErrorCode::XapFileNotWritten => 9142,
        ErrorCode::MaxPiSize => 9143,
        ErrorCode::Unknown => 9144,
        ErrorCode::MultiplexAssignError => 9145,
        ErrorCode::InvalidUpperLowerLimits => 9146,
        ErrorCode::LowCnPresTimeout => 9147,
        ErrorCode::CnExceedsCrossTrafficStn => 9148,
        ErrorCode::ExcessChannel => 9149,
        ErrorCode::InvalidTxtForCdc => 9150,
        ErrorCode::MemoryAllocationError => 9151,
        ErrorCode::ExceedsMaxTpdoChannels => 9152,
        ErrorCode::NumberOfEntriesSubIndexNotFound => 9153,
        ErrorCode::InvalidParameter => 9154,
        ErrorCode::InvalidSizeMapped => 9155,
        ErrorCode::InvalidMappingTypeForPdo => 9156,
        ErrorCode::InvalidAccessTypeForPdo => 9157,
        ErrorCode::InvalidPdoOffset => 9158,
        ErrorCode::CompatibilityInfoPre130PdoMapping => 9159,
        ErrorCode::SchemaValidationFailed => 9160,
        ErrorCode::XddSchemaNotFound => 9161,
        ErrorCode::XddSchemaNotValid => 9162,
        ErrorCode::XddSchemaParserContextError => 9163,
        ErrorCode::XddSchemaValidationContextError => 9164,
        ErrorCode::XmlParsingError => 9165,
        ErrorCode::CannotCreateDir => 9166,
        ErrorCode::NoProjectLoaded => 9167,
        ErrorCode::ChainedAndMultiplexed => 9168,
        ErrorCode::InsufficientMappingObjects => 9169,
        ErrorCode::ChannelPayloadLimitExceeded => 9170,
        ErrorCode::ChannelObjectLimitExceeded => 9171,
        ErrorCode::MultiplexingNotSupported => 9172,
        ErrorCode::InvalidAccessTypeForParameter => 9173,
    }
}

/// Write the version banner and usage block.
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    let program = env!("CARGO_PKG_NAME");
    writeln!(out)?;
    writeln!(out, "{} {} {}", VENDOR, program, env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Usage: {} <ProjectFilePath> ... [options]", program)?;
    writeln!(out, "Options:")?;
    writeln!(
        out,
        " {} <OutputPath>\tSet the output path for the generated files.",
        OUTPUT_OPTION
    )?;
    writeln!(out)
}
