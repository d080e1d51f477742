//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quotation_server::document::layout::{Block, PageSetup};
use quotation_server::document::{
    DocumentRenderer, LayoutBackend, QuotationGenerator, RenderError,
};
use quotation_server::quotation::{
    ClientInfo, ContractorInfo, MeasurementKind, Quotation, ServiceLineItem,
};

pub const FAKE_PDF: &[u8] = b"%PDF-1.7 fake";

/// Backend that counts invocations, keeps the last blocks it was given and
/// returns a fixed payload.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub calls: Arc<AtomicUsize>,
    pub last_blocks: Arc<Mutex<Vec<Block>>>,
}

impl RecordingBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Plain text of every paragraph in the last rendered document.
    pub fn last_paragraphs(&self) -> Vec<String> {
        self.last_blocks
            .lock()
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph { text, .. } => Some(text.to_plain_string()),
                _ => None,
            })
            .collect()
    }
}

impl LayoutBackend for RecordingBackend {
    fn render(&self, _page: &PageSetup, blocks: &[Block]) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_blocks.lock() = blocks.to_vec();
        Ok(FAKE_PDF.to_vec())
    }
}

/// Backend that always fails.
pub struct FailingBackend;

impl LayoutBackend for FailingBackend {
    fn render(&self, _page: &PageSetup, _blocks: &[Block]) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Layout("page overflow".to_string()))
    }
}

pub fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 30).unwrap()
}

pub fn sample_client() -> ClientInfo {
    ClientInfo {
        name: "CAPITAL INDUSTRIA E COM DE PRODUTOS RECICLAVEIS LTDA".to_string(),
        tax_id: "06.096.335/0001-31".to_string(),
        address: "QS 05 Rua 300 Lote 02 - Areal, Águas Claras".to_string(),
        postal_code: "71250-810".to_string(),
    }
}

/// Line items whose total is R$ 400,00.
pub fn sample_items() -> Vec<ServiceLineItem> {
    vec![
        ServiceLineItem::new(
            "Desentupimento de rede de esgoto",
            MeasurementKind::LengthLumpSum,
            Decimal::new(260, 0),
            Decimal::new(5000, 2),
        ),
        ServiceLineItem::new(
            "Hidrojateamento de rede pluvial",
            MeasurementKind::LengthLumpSum,
            Decimal::new(120, 0),
            Decimal::new(5000, 2),
        ),
        ServiceLineItem::new(
            "Limpeza de caixa de gordura",
            MeasurementKind::PerUnit,
            Decimal::new(2, 0),
            Decimal::new(15000, 2),
        ),
    ]
}

pub fn sample_quotation() -> Quotation {
    let mut quotation = Quotation::new_on(ContractorInfo::builtin(), issue_date());
    quotation.client = sample_client();
    quotation.line_items = sample_items();
    quotation
}

pub fn generator_with(
    backend: impl LayoutBackend + Send + Sync + 'static,
    logo: &Path,
    output_dir: &Path,
) -> QuotationGenerator {
    QuotationGenerator::new(
        DocumentRenderer::new(logo),
        backend,
        output_dir.join("proposta.pdf"),
    )
}
