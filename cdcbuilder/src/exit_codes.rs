//! Stable exit codes for the `cdcbuilder` process.

/// All generation steps succeeded.
pub const OK: i32 = 0;
/// Completed with warnings. Reserved; the build flow never emits it.
pub const WARNING: i32 = 1;
/// Completed with errors. Reserved; the build flow never emits it.
pub const ERROR: i32 = 2;
/// Configuration, usage, validation or configurator failure.
pub const FATAL: i32 = 3;
