//! Generation driver: config → headers → Go artifacts on disk.
//!
//! Every fatal condition (unreadable input, header syntax error, unwritable
//! output) aborts the run with a `miette` report. Everything else is logged
//! and the run continues.

mod error;

pub use error::DriverError;
pub use handlegen_frontend_c::HeaderOptions;

use handlegen_build::GenConfig;
use handlegen_codegen::Generator;
use handlegen_common::SourceMap;
use handlegen_decl::TranslationUnit;
use miette::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Parse one header outside of a configured run.
pub fn parse_header(path: &Path, options: &HeaderOptions) -> Result<TranslationUnit> {
    read_and_parse(&mut SourceMap::new(), path, options)
}

fn read_and_parse(source_map: &mut SourceMap, path: &Path, options: &HeaderOptions) -> Result<TranslationUnit> {
    let content = std::fs::read_to_string(path).map_err(|source| DriverError::ReadHeader {
        path: path.to_path_buf(),
        source,
    })?;
    let id = source_map.add_file(path, content);
    let Some(source) = source_map.get(id) else {
        return Err(miette::miette!("Source file not found: {}", path.display()));
    };

    let unit = handlegen_frontend_c::parse_file(source, options)?;
    debug!(header = %path.display(), decls = unit.len(), "parsed header");
    Ok(unit)
}

/// Which artifacts a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Enums,
    Handles,
    Methods,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Enums, Section::Handles, Section::Methods];
}

/// One generated file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub code: String,
}

/// Runs one generation pass for a loaded configuration.
pub struct Driver {
    config: GenConfig,
    source_map: SourceMap,
}

impl Driver {
    pub fn new(config: GenConfig) -> Self {
        Self {
            config,
            source_map: SourceMap::new(),
        }
    }

    /// Load `handlegen.toml` and create a driver for it.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = GenConfig::from_file(path.as_ref()).map_err(DriverError::from)?;
        Ok(Self::new(config))
    }

    /// Write artifacts to `dir` instead of the configured directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output.dir = dir.into();
        self
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Read and parse every configured header, merged in order.
    pub fn load(&mut self) -> Result<TranslationUnit> {
        let options = HeaderOptions {
            strip_tokens: self.config.input.strip_tokens.clone(),
        };
        let headers = self.config.input.headers.clone();

        let mut unit = TranslationUnit::new();
        for path in &headers {
            unit.extend(self.parse_header(path, &options)?);
        }
        info!(headers = headers.len(), decls = unit.len(), "parsed headers");
        Ok(unit)
    }

    /// Read and parse a single header.
    pub fn parse_header(&mut self, path: &Path, options: &HeaderOptions) -> Result<TranslationUnit> {
        read_and_parse(&mut self.source_map, path, options)
    }

    /// Generate the requested sections in memory.
    pub fn render(&self, unit: &TranslationUnit, sections: &[Section]) -> Vec<Artifact> {
        let package = &self.config.package;
        let output = &self.config.output;
        let generator = Generator::new(&self.config.tables, package.name.as_str(), package.include.as_str());
        let preamble = generator.preamble();
        let artifact = |name: &str, body: &str| Artifact {
            path: output.dir.join(name),
            code: format!("{preamble}\n{body}"),
        };

        let mut artifacts = Vec::new();
        for section in sections {
            match section {
                Section::Enums => artifacts.push(artifact("enums.go", &generator.enums(unit))),
                Section::Handles => {
                    let handles = generator.handles(unit);
                    if output.split {
                        for handle in &handles {
                            artifacts.push(artifact(&format!("{}_gen.go", handle.go_type), &handle.code));
                        }
                    } else {
                        let body = handles
                            .iter()
                            .map(|h| h.code.as_str())
                            .collect::<Vec<_>>()
                            .join("\n");
                        artifacts.push(artifact("handles_gen.go", &body));
                    }
                }
                Section::Methods => artifacts.push(artifact("methods_gen.go", &generator.methods(unit))),
            }
        }
        artifacts
    }

    /// Write artifacts, overwriting existing files, then run the formatter on each.
    pub fn write(&self, artifacts: &[Artifact]) -> Result<()> {
        let dir = &self.config.output.dir;
        std::fs::create_dir_all(dir).map_err(|source| DriverError::CreateOutputDir {
            path: dir.clone(),
            source,
        })?;

        for artifact in artifacts {
            std::fs::write(&artifact.path, &artifact.code).map_err(|source| DriverError::WriteArtifact {
                path: artifact.path.clone(),
                source,
            })?;
            info!(path = %artifact.path.display(), bytes = artifact.code.len(), "wrote artifact");
            self.format(&artifact.path);
        }
        Ok(())
    }

    /// Full run: load, render, write. Returns the written paths.
    pub fn generate(&mut self, sections: &[Section]) -> Result<Vec<PathBuf>> {
        let unit = self.load()?;
        let artifacts = self.render(&unit, sections);
        self.write(&artifacts)?;
        Ok(artifacts.into_iter().map(|a| a.path).collect())
    }

    /// Run the configured formatter on one file. Failure is only logged.
    fn format(&self, path: &Path) {
        let Some((program, args)) = self.config.output.formatter.split_first() else {
            return;
        };
        match Command::new(program).args(args).arg(path).status() {
            Ok(status) if status.success() => debug!(path = %path.display(), "formatted"),
            Ok(status) => warn!(path = %path.display(), formatter = %program, %status, "formatter failed"),
            Err(err) => warn!(path = %path.display(), formatter = %program, error = %err, "formatter failed"),
        }
    }
}
