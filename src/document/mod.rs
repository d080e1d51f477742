//! Document generation: validation, layout assembly and PDF rendering.
//!
//! - `assembler` maps a [`Quotation`](crate::quotation::Quotation) to layout blocks
//! - `engine` renders blocks to PDF through the Typst CLI
//! - `generator` ties validation, assembly, rendering and the output file together

pub mod assembler;
pub mod common;
pub mod engine;
pub mod generator;
pub mod layout;
pub mod traits;
pub mod validation;

pub use assembler::DocumentRenderer;
pub use engine::TypstRenderEngine;
pub use generator::QuotationGenerator;
pub use traits::{LayoutBackend, Validator};
pub use validation::{Checklist, ValidationError, ValidationErrors};

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the layout backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("failed to copy asset {path}: {source}")]
    CopyAsset {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    TypstExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("layout rejected: {0}")]
    Layout(String),
}

/// Errors surfaced by a generate action.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("rendering failed: {0}")]
    Rendering(#[from] RenderError),
    #[error("failed to write output file: {0}")]
    Output(#[source] std::io::Error),
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    /// Download name, e.g. `orcamento_acme_20241030.pdf`
    pub filename: String,
    pub pdf: Vec<u8>,
    /// Long-form issue date printed on the document
    pub issued_on: String,
    pub total: Decimal,
    pub output_path: PathBuf,
}
