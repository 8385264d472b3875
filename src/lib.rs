//! Procedural renderer for the receipt scanner app icon and its iOS asset catalog.
//!
//! The pipeline renders one canonical 1024×1024 icon ([`renderer::render_icon`]),
//! derives every size in [`output_spec::OUTPUT_SPECS`] from it with a Lanczos3
//! filter ([`resample::resample`]), and writes the matching `Contents.json`
//! ([`contents_json::build_manifest`]).

pub mod compositor;
pub mod contents_json;
pub mod error;
pub mod mask;
pub mod output_spec;
pub mod pipeline;
pub mod pixel_buffer;
pub mod renderer;
pub mod resample;

pub use error::{IconError, Result};
pub use pipeline::{generate, initialize, GenerationReport, GeneratorConfig, Outcome};
pub use pixel_buffer::{new_buffer, Color, PixelBuffer};
