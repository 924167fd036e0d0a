//! Command-line surface.
//!
//! The builder keeps the legacy positional form `<project> -o <output>`, so
//! clap only collects raw arguments. Validation lives in
//! [`crate::invocation`], which owns the diagnostics for bad input.

use std::ffi::OsString;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "cdcbuilder",
    about = "Generate POWERLINK stack configuration and process image files",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// `<ProjectFilePath> -o <OutputPath>`
    #[arg(
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true,
        value_parser = clap::value_parser!(OsString)
    )]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Positional arguments exactly as typed, program name excluded.
    ///
    /// clap swallows a leading `--` escape, which would hide a fourth
    /// argument from validation. When clap's view differs from the raw
    /// vector in length, the raw vector wins.
    pub fn positional_args<I, T>(raw: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
        let parsed = Cli::try_parse_from(&raw)
            .map(|cli| cli.args)
            .unwrap_or_default();
        if parsed.len() + 1 == raw.len() {
            parsed
        } else {
            raw.into_iter().skip(1).collect()
        }
    }
}
