//! Preset term choices offered by the editing form. Free text is equally valid.

use serde::Serialize;
use utoipa::ToSchema;

pub const PAYMENT_TERMS: &[&str] = &[
    "À vista com desconto de 5%",
    "À vista",
    "Entrada + 2x no cartão",
    "Entrada + 3x no cartão",
    "Entrada + 5x no boleto (a cada 15 dias)",
    "50% entrada + 50% na conclusão",
    "30% entrada + 70% na conclusão",
    "Parcelado em 6x no boleto",
];

pub const VALIDITY_PERIODS: &[&str] = &[
    "15 (quinze) dias consecutivos",
    "30 (trinta) dias consecutivos",
    "45 (quarenta e cinco) dias consecutivos",
    "60 (sessenta) dias consecutivos",
    "90 (noventa) dias consecutivos",
];

pub const DELIVERY_TERMS: &[&str] = &[
    "Imediato (até 24h)",
    "Até 2 dias úteis",
    "Até 5 dias úteis",
    "Conforme cronograma acordado",
    "A definir com o cliente",
];

pub const DEFAULT_PAYMENT_TERMS: &str = "Entrada + 5x no boleto (a cada 15 dias)";
pub const DEFAULT_VALIDITY_PERIOD: &str = "30 (trinta) dias consecutivos";
pub const DEFAULT_DELIVERY_TERMS: &str = "Conforme cronograma acordado";

#[derive(Debug, Serialize, ToSchema)]
pub struct TermPresets {
    pub payment_terms: Vec<String>,
    pub validity_periods: Vec<String>,
    pub delivery_terms: Vec<String>,
}

impl TermPresets {
    pub fn all() -> Self {
        Self {
            payment_terms: PAYMENT_TERMS.iter().map(|s| s.to_string()).collect(),
            validity_periods: VALIDITY_PERIODS.iter().map(|s| s.to_string()).collect(),
            delivery_terms: DELIVERY_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
