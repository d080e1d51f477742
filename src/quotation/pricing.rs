//! Line and grand totals.
//!
//! A `LengthLumpSum` line is billed at its unit price no matter the length:
//! the price is the amount agreed for the whole run of pipe and the meters are
//! printed for reference only. Do not multiply the quantity in.

use rust_decimal::Decimal;

use super::currency::format_currency;
use super::model::{MeasurementKind, Quotation, ServiceLineItem};

/// Total of a single line. Saturates at `Decimal::MAX`.
pub fn line_total(item: &ServiceLineItem) -> Decimal {
    match item.measurement_kind {
        MeasurementKind::PerUnit => item.quantity.saturating_mul(item.unit_price),
        MeasurementKind::LengthLumpSum => item.unit_price,
    }
}

/// Sum of the line totals of every item with a description.
pub fn grand_total<'a, I>(items: I) -> Decimal
where
    I: IntoIterator<Item = &'a ServiceLineItem>,
{
    items
        .into_iter()
        .filter(|item| item.is_valid())
        .map(line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

impl ServiceLineItem {
    pub fn total(&self) -> Decimal {
        line_total(self)
    }

    /// `"2 un"` for unit pricing, `"260m"` for length pricing.
    pub fn quantity_label(&self) -> String {
        let quantity = self.quantity.normalize();
        match self.measurement_kind {
            MeasurementKind::PerUnit => format!("{quantity} un"),
            MeasurementKind::LengthLumpSum => format!("{quantity}m"),
        }
    }

    /// Unit price column: the formatted price, or "Valor total" when the price
    /// already is the line total.
    pub fn unit_price_label(&self) -> String {
        match self.measurement_kind {
            MeasurementKind::PerUnit => format_currency(self.unit_price),
            MeasurementKind::LengthLumpSum => "Valor total".to_string(),
        }
    }

    /// Calculation shown in previews, e.g. `"2 un × R$ 150,00"` or
    /// `"260m = R$ 50,00"`.
    pub fn calculation_label(&self) -> String {
        let price = format_currency(self.unit_price);
        match self.measurement_kind {
            MeasurementKind::PerUnit => format!("{} × {price}", self.quantity_label()),
            MeasurementKind::LengthLumpSum => format!("{} = {price}", self.quantity_label()),
        }
    }
}

impl Quotation {
    pub fn grand_total(&self) -> Decimal {
        grand_total(&self.line_items)
    }
}
