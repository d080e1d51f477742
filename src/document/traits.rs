//! Seams of the generation pipeline.

use super::layout::{Block, PageSetup};
use super::validation::{validate_quotation, ValidationErrors};
use super::RenderError;
use crate::quotation::Quotation;

/// Trait for validating request objects.
pub trait Validator {
    /// Validate the state of the object, reporting every failure.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validator for Quotation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_quotation(self).into_result()
    }
}

/// Typesetting backend turning layout blocks into a paginated document.
pub trait LayoutBackend {
    fn render(&self, page: &PageSetup, blocks: &[Block]) -> Result<Vec<u8>, RenderError>;
}
