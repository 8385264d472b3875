//! Drives render → resample × N → write → manifest

use crate::contents_json::{build_manifest, write_contents_json, DEFAULT_MANIFEST_NAME};
use crate::error::{IconError, Result};
use crate::output_spec::{validate_specs, OutputSpec, OUTPUT_SPECS};
use crate::pixel_buffer::{new_buffer, PixelBuffer};
use crate::renderer::render_icon;
use crate::resample::resample;
use anyhow::Context;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Where and what to generate
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// The `.appiconset` directory; created if missing
    pub output_dir: PathBuf,

    /// File name of the manifest inside `output_dir`
    pub manifest_name: String,

    /// Variants to write, in manifest order
    pub specs: Vec<OutputSpec>,
}

impl GeneratorConfig {
    /// Config for the full iOS table written into `output_dir`.
    ///
    /// # Arguments
    /// * `output_dir` - The directory that receives the PNGs and the manifest
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            specs: OUTPUT_SPECS.to_vec(),
        }
    }
}

/// A generator whose configuration and environment have been checked.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
}

/// A PNG that was successfully written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenAsset {
    /// Label of the spec it was generated from (e.g. `60x60@3x`)
    pub label: &'static str,
    pub filename: String,
    pub pixel_size: u32,
    /// Full path of the written file
    pub path: PathBuf,
}

/// Overall result of a generation run, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every image and the manifest were written.
    Complete,
    /// Some outputs were written, some failed.
    Partial,
    /// Nothing was written.
    Failed,
}

/// What a run wrote and what it failed to write
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Successfully written PNGs, in table order
    pub written: Vec<WrittenAsset>,

    /// Path of the manifest, if it was written
    pub manifest: Option<PathBuf>,

    /// Per-file write failures, in the order they happened
    pub failures: Vec<IconError>,
}

impl GenerationReport {
    /// Classifies the run
    ///
    /// # Returns
    /// `Complete` when nothing failed, `Failed` when nothing at all was written,
    /// `Partial` otherwise
    pub fn outcome(&self) -> Outcome {
        if self.failures.is_empty() {
            Outcome::Complete
        } else if self.written.is_empty() && self.manifest.is_none() {
            Outcome::Failed
        } else {
            Outcome::Partial
        }
    }

    /// True when every image and the manifest were written
    pub fn is_success(&self) -> bool {
        self.outcome() == Outcome::Complete
    }
}

/// Checks everything that must hold before rendering starts.
///
/// Spec errors surface as [`IconError::InvalidSpec`]; a missing PNG encoder or an
/// unusable output directory as [`IconError::Initialization`].
///
/// # Arguments
/// * `config` - The configuration to check; moved into the returned generator
pub fn initialize(config: GeneratorConfig) -> Result<Generator> {
    validate_specs(&config.specs)?;
    if config.manifest_name.trim().is_empty() {
        return Err(IconError::invalid_spec("manifest name must not be empty"));
    }

    new_buffer(1)?.to_png_bytes().map_err(|e| {
        IconError::initialization(format!("PNG encoding is unavailable: {e}"))
    })?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        IconError::initialization(format!(
            "Can't create output directory {}: {e}",
            config.output_dir.display()
        ))
    })?;

    Ok(Generator { config })
}

/// Initializes and runs in one step. Only fatal errors are returned as `Err`.
pub fn generate(config: GeneratorConfig) -> Result<GenerationReport> {
    initialize(config)?.run()
}

impl Generator {
    /// The validated configuration this generator runs with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Renders the canonical icon once, then writes every spec and the manifest.
    ///
    /// A failed write is recorded and the remaining outputs are still attempted.
    #[tracing::instrument(skip(self), fields(dir = %self.config.output_dir.display()))]
    pub fn run(&self) -> Result<GenerationReport> {
        let canonical = render_icon()?;
        info!(size = canonical.size(), "Rendered canonical icon");
        Ok(self.write_all(&canonical))
    }

    /// Writes every spec derived from `canonical`, then the manifest.
    ///
    /// # Arguments
    /// * `canonical` - The full-size render every variant is resampled from
    ///
    /// # Returns
    /// A report of written files and per-file failures; never fails as a whole
    pub fn write_all(&self, canonical: &PixelBuffer) -> GenerationReport {
        let dir = &self.config.output_dir;
        let mut report = GenerationReport::default();

        for spec in &self.config.specs {
            let filename = spec.filename();
            let path = dir.join(&filename);
            match write_variant(canonical, spec, &path) {
                Ok(()) => {
                    info!(file = %filename, px = spec.pixel_size, "Generated");
                    report.written.push(WrittenAsset {
                        label: spec.label,
                        filename,
                        pixel_size: spec.pixel_size,
                        path,
                    });
                }
                Err(source) => {
                    warn!(file = %filename, error = %source, "Failed to write icon");
                    report.failures.push(IconError::OutputWrite {
                        filename,
                        path,
                        source,
                    });
                }
            }
        }

        let manifest = build_manifest(&self.config.specs);
        match write_contents_json(dir, &self.config.manifest_name, &manifest) {
            Ok(path) => {
                info!(
                    file = %path.display(),
                    entries = manifest.images.len(),
                    "Generated manifest"
                );
                report.manifest = Some(path);
            }
            Err(source) => {
                warn!(error = %source, "Failed to write manifest");
                report.failures.push(IconError::OutputWrite {
                    filename: self.config.manifest_name.clone(),
                    path: dir.join(&self.config.manifest_name),
                    source,
                });
            }
        }

        report
    }
}

fn write_variant(canonical: &PixelBuffer, spec: &OutputSpec, path: &Path) -> anyhow::Result<()> {
    let resized = resample(canonical, spec.pixel_size)?;
    let file = File::create(path).context("Failed to create PNG file")?;
    let mut out = BufWriter::new(file);
    resized.write_png(&mut out).context("Failed to encode PNG")?;
    out.flush().context("Failed to write PNG")?;
    Ok(())
}
