//! Filesystem-facing helpers: configuration loading and output preparation.

pub mod config;
pub mod output_dir;
