//! Fatal errors of a generation run.

use handlegen_build::ConfigError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DriverError {
    #[error(transparent)]
    #[diagnostic(code(handlegen::config))]
    Config(#[from] ConfigError),

    #[error("Failed to read header {path}")]
    #[diagnostic(code(handlegen::read_header), help("check input.headers in the config"))]
    ReadHeader {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}")]
    #[diagnostic(code(handlegen::output_dir))]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    #[diagnostic(code(handlegen::write))]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
