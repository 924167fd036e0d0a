//! POWERLINK stack configuration builder.
//!
//! Turns an openCONFIGURATOR project into the managing node's binary stack
//! configuration (`mnobd.cdc`) and the C# and XML process-image descriptions.
//! All domain work happens inside the configurator library; this crate only
//! validates the invocation, prepares the output directory and drives the
//! library session.
//!
//! - **[`invocation`]**: pure argument validation.
//! - **[`configurator`]**: the library seam, its session protocol and the
//!   native backend.
//! - **[`io`]**: configuration loading and output directory cleanup.
//! - **[`build`]**: orchestration tying the above together for `main`.

pub mod build;
pub mod cli;
pub mod configurator;
pub mod diagnostics;
pub mod exit_codes;
pub mod invocation;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
