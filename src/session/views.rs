//! Read-only projections of the session quotation shown next to the form.

use serde::Serialize;
use utoipa::ToSchema;

use crate::quotation::{format_currency, Quotation};

const SUMMARY_CLIENT_CHARS: usize = 30;
const SUMMARY_DESCRIPTION_CHARS: usize = 25;
const SUMMARY_PREVIEW_ITEMS: usize = 3;

/// Cut `text` to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SummaryItem {
    /// 1-based position among the valid services
    pub position: usize,
    pub description: String,
    pub total: String,
}

/// Compact overview: service count, total and the first few services.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QuotationSummary {
    pub client: String,
    pub service_count: usize,
    pub total: String,
    pub preview: Vec<SummaryItem>,
    /// Valid services beyond those in `preview`
    pub remaining: usize,
}

impl QuotationSummary {
    pub fn of(quotation: &Quotation) -> Self {
        let service_count = quotation.valid_item_count();
        let preview = quotation
            .valid_items()
            .take(SUMMARY_PREVIEW_ITEMS)
            .enumerate()
            .map(|(i, item)| SummaryItem {
                position: i + 1,
                description: truncate(&item.description, SUMMARY_DESCRIPTION_CHARS),
                total: format_currency(item.total()),
            })
            .collect();

        Self {
            client: truncate(&quotation.client.name, SUMMARY_CLIENT_CHARS),
            service_count,
            total: format_currency(quotation.grand_total()),
            preview,
            remaining: service_count.saturating_sub(SUMMARY_PREVIEW_ITEMS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PreviewLine {
    pub position: usize,
    pub description: String,
    /// e.g. "2 un × R$ 150,00" or "260m = R$ 50,00"
    pub calculation: String,
    pub total: String,
}

/// Every valid service with its calculation, as it will be billed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QuotationPreview {
    pub client: String,
    pub issue_date: String,
    pub issue_location: String,
    pub lines: Vec<PreviewLine>,
    pub total: String,
}

impl QuotationPreview {
    pub fn of(quotation: &Quotation) -> Self {
        let lines = quotation
            .valid_items()
            .enumerate()
            .map(|(i, item)| PreviewLine {
                position: i + 1,
                description: item.description.clone(),
                calculation: item.calculation_label(),
                total: format_currency(item.total()),
            })
            .collect();

        Self {
            client: quotation.client.name.clone(),
            issue_date: quotation.issue_date.format("%d/%m/%Y").to_string(),
            issue_location: quotation.issue_location.clone(),
            lines,
            total: format_currency(quotation.grand_total()),
        }
    }
}
