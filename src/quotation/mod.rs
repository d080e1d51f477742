//! Quotation domain: the aggregate edited during a session, its pricing rules,
//! the Brazilian-Real currency formatter and the term presets offered to users.

pub mod currency;
pub mod model;
pub mod presets;
pub mod pricing;

pub use currency::{format_currency, CurrencyFormat, BRL};
pub use model::{
    ClientInfo, ContractorInfo, EditError, MeasurementKind, Quotation, ServiceLineItem, Terms,
};
pub use pricing::{grand_total, line_total};
