//! POWERLINK stack configuration builder.
//!
//! `cdcbuilder <ProjectFilePath> -o <OutputPath>` generates `mnobd.cdc`,
//! `PI.cs` and `XAP.xml` in the output directory. Files there are deleted
//! first, except `*.mak`.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cdcbuilder::build::run_build;
use cdcbuilder::cli::Cli;
use cdcbuilder::configurator::native::NativeConfigurator;
use cdcbuilder::exit_codes;
use cdcbuilder::io::config::{config_path, load_config};
use cdcbuilder::logging;

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code(exit_codes::FATAL)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn run() -> Result<i32> {
    let path = config_path()?;
    let config = load_config(&path)?;
    let args = Cli::positional_args(env::args_os());

    let outcome = run_build(&args, || {
        NativeConfigurator::load(&config).map_err(anyhow::Error::from)
    })?;

    let mut stdout = io::stdout().lock();
    outcome.write_report(&mut stdout).context("write report")?;
    stdout.flush().context("flush stdout")?;
    Ok(outcome.exit_code())
}
