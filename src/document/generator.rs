//! Generation boundary: validate, assemble, render, write the output file.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use super::assembler::DocumentRenderer;
use super::common::{format_long_date, quotation_filename};
use super::layout::PageSetup;
use super::traits::{LayoutBackend, Validator};
use super::{GeneratedDocument, GenerationError};
use crate::quotation::Quotation;

/// Produces quotation PDFs. Generations are serialized because they share a
/// single output file.
pub struct QuotationGenerator {
    renderer: DocumentRenderer,
    backend: Box<dyn LayoutBackend + Send + Sync>,
    output_path: PathBuf,
    lock: Mutex<()>,
}

impl QuotationGenerator {
    pub fn new(
        renderer: DocumentRenderer,
        backend: impl LayoutBackend + Send + Sync + 'static,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            backend: Box::new(backend),
            output_path: output_path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Generate the document for `quotation`.
    ///
    /// Validation runs first; an invalid quotation never reaches the backend.
    pub fn generate(&self, quotation: &Quotation) -> Result<GeneratedDocument, GenerationError> {
        if let Err(errors) = quotation.validate() {
            log::warn!(
                "quotation rejected with {} validation error(s)",
                errors.len()
            );
            return Err(GenerationError::Validation(errors));
        }

        let _guard = self.lock.lock();

        let blocks = self.renderer.assemble(quotation);
        let pdf = self
            .backend
            .render(&PageSetup::quotation(), &blocks)
            .map_err(|e| {
                log::error!("layout backend failed: {}", e);
                GenerationError::Rendering(e)
            })?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(GenerationError::Output)?;
            }
        }
        fs::write(&self.output_path, &pdf).map_err(GenerationError::Output)?;

        let document = GeneratedDocument {
            filename: quotation_filename(&quotation.client.name, quotation.issue_date),
            pdf,
            issued_on: format_long_date(quotation.issue_date),
            total: quotation.grand_total(),
            output_path: self.output_path.clone(),
        };

        log::info!(
            "generated {} ({} bytes, {} service(s))",
            document.filename,
            document.pdf.len(),
            quotation.valid_item_count()
        );

        Ok(document)
    }
}
