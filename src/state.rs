use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::document::{DocumentRenderer, QuotationGenerator, TypstRenderEngine};
use crate::quotation::{ContractorInfo, Quotation};

/// Shared server state: the single editing session and the generator.
pub struct AppState {
    quotation: Mutex<Quotation>,
    default_contractor: ContractorInfo,
    pub generator: Arc<QuotationGenerator>,
}

impl AppState {
    pub fn new(default_contractor: ContractorInfo, generator: QuotationGenerator) -> Self {
        Self {
            quotation: Mutex::new(Quotation::new(default_contractor.clone())),
            default_contractor,
            generator: Arc::new(generator),
        }
    }

    /// State wired to the Typst backend as described by `config`.
    pub fn from_config(config: &AppConfig, default_contractor: ContractorInfo) -> Self {
        let generator = QuotationGenerator::new(
            DocumentRenderer::new(config.logo_path()),
            TypstRenderEngine::new(config.typst_bin.clone()),
            config.output_path(),
        );
        Self::new(default_contractor, generator)
    }

    /// Copy of the current quotation.
    pub fn snapshot(&self) -> Quotation {
        self.quotation.lock().clone()
    }

    /// Apply an edit to the session quotation.
    pub fn update<R>(&self, edit: impl FnOnce(&mut Quotation) -> R) -> R {
        let mut quotation = self.quotation.lock();
        edit(&mut quotation)
    }

    /// Start over from a fresh quotation.
    pub fn reset(&self) -> Quotation {
        let fresh = Quotation::new(self.default_contractor.clone());
        *self.quotation.lock() = fresh.clone();
        log::info!("editing session reset");
        fresh
    }
}
