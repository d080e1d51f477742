use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::presets;

pub const DEFAULT_ISSUE_LOCATION: &str = "Brasília - DF";

/// Errors raised by the explicit editing operations on a [`Quotation`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("service {0} does not exist")]
    NoSuchService(usize),
    #[error("at least one service must remain in the quotation")]
    LastService,
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),
}

/// How a line item is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MeasurementKind {
    /// Total is quantity × unit price.
    #[serde(rename = "unit")]
    PerUnit,
    /// Total is the unit price alone; the quantity is the length in meters
    /// and is only displayed.
    #[serde(rename = "length")]
    LengthLumpSum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceLineItem {
    #[schema(example = "Limpeza de caixa de gordura")]
    pub description: String,
    pub measurement_kind: MeasurementKind,
    #[schema(example = "2")]
    pub quantity: Decimal,
    #[schema(example = "150.00")]
    pub unit_price: Decimal,
}

impl ServiceLineItem {
    pub fn new(
        description: impl Into<String>,
        measurement_kind: MeasurementKind,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            measurement_kind,
            quantity,
            unit_price,
        }
    }

    /// The empty row added by "add service" and left behind by "clear all".
    pub fn blank() -> Self {
        Self::new(
            "",
            MeasurementKind::LengthLumpSum,
            Decimal::ZERO,
            Decimal::new(5000, 2),
        )
    }

    /// A line only counts once it has a description.
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Client ("contratante") data shown in the "À Administração" block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ClientInfo {
    #[schema(example = "CAPITAL INDUSTRIA E COM DE PRODUTOS RECICLAVEIS LTDA")]
    pub name: String,
    /// CNPJ or CPF
    #[schema(example = "06.096.335/0001-31")]
    pub tax_id: String,
    pub address: String,
    /// CEP
    #[schema(example = "71250-810")]
    pub postal_code: String,
}

/// Contractor ("contratada") data: letterhead, contractor block and signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContractorInfo {
    /// Razão social
    pub name: String,
    /// Nome fantasia, used as the heading when no logo is available
    pub trade_name: String,
    /// CNPJ
    pub tax_id: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub website: String,
    pub phones: String,
    /// Inscrição estadual
    pub state_registration: String,
    pub email: String,
}

impl ContractorInfo {
    /// Profile used when no contractor profile file is configured.
    pub fn builtin() -> Self {
        Self {
            name: "GPM COMÉRCIO, TRANSPORTE E LIMPEZA LTDA".to_string(),
            trade_name: "GPM DESENTUPIDORA".to_string(),
            tax_id: "17.908.156/0001-78".to_string(),
            address: "Setor de Oficinas, quadra 1 conjunto 02 lote 17 - loja 1".to_string(),
            city: "Brasília - DF".to_string(),
            postal_code: "71262-110".to_string(),
            website: "www.gpmdesentupidora.com.br".to_string(),
            phones: "(61) 4104-4143 / (61) 99242-3009".to_string(),
            state_registration: "0763965500104".to_string(),
            email: "contato@gpmdesentupidora.com.br".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Terms {
    pub payment_terms: String,
    pub validity_period: String,
    pub delivery_terms: String,
}

impl Default for Terms {
    fn default() -> Self {
        Self {
            payment_terms: presets::DEFAULT_PAYMENT_TERMS.to_string(),
            validity_period: presets::DEFAULT_VALIDITY_PERIOD.to_string(),
            delivery_terms: presets::DEFAULT_DELIVERY_TERMS.to_string(),
        }
    }
}

/// The aggregate edited during a session and consumed by each generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Quotation {
    pub contractor: ContractorInfo,
    pub client: ClientInfo,
    /// Rendering order
    pub line_items: Vec<ServiceLineItem>,
    pub terms: Terms,
    pub issue_date: NaiveDate,
    #[schema(example = "Brasília - DF")]
    pub issue_location: String,
}

impl Quotation {
    /// Fresh quotation for `contractor`, dated today, with one blank service.
    pub fn new(contractor: ContractorInfo) -> Self {
        Self::new_on(contractor, Local::now().date_naive())
    }

    pub fn new_on(contractor: ContractorInfo, issue_date: NaiveDate) -> Self {
        Self {
            contractor,
            client: ClientInfo::default(),
            line_items: vec![ServiceLineItem::blank()],
            terms: Terms::default(),
            issue_date,
            issue_location: DEFAULT_ISSUE_LOCATION.to_string(),
        }
    }

    /// Line items with a description, in rendering order.
    pub fn valid_items(&self) -> impl Iterator<Item = &ServiceLineItem> + '_ {
        self.line_items.iter().filter(|item| item.is_valid())
    }

    pub fn valid_item_count(&self) -> usize {
        self.valid_items().count()
    }

    /// Append a blank service and return its index.
    pub fn add_service(&mut self) -> usize {
        self.line_items.push(ServiceLineItem::blank());
        self.line_items.len() - 1
    }

    /// Replace the service at `index`. Quantity and unit price must be >= 0.
    pub fn update_service(&mut self, index: usize, item: ServiceLineItem) -> Result<(), EditError> {
        if item.quantity < Decimal::ZERO {
            return Err(EditError::NegativeAmount("quantity"));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(EditError::NegativeAmount("unit_price"));
        }
        let slot = self
            .line_items
            .get_mut(index)
            .ok_or(EditError::NoSuchService(index))?;
        *slot = item;
        Ok(())
    }

    pub fn remove_service(&mut self, index: usize) -> Result<ServiceLineItem, EditError> {
        if index >= self.line_items.len() {
            return Err(EditError::NoSuchService(index));
        }
        if self.line_items.len() <= 1 {
            return Err(EditError::LastService);
        }
        Ok(self.line_items.remove(index))
    }

    pub fn remove_last_service(&mut self) -> Result<ServiceLineItem, EditError> {
        match self.line_items.len() {
            0 => Err(EditError::NoSuchService(0)),
            len => self.remove_service(len - 1),
        }
    }

    /// Append a copy of the last service and return its index.
    pub fn duplicate_last_service(&mut self) -> Result<usize, EditError> {
        let last = self
            .line_items
            .last()
            .cloned()
            .ok_or(EditError::NoSuchService(0))?;
        self.line_items.push(last);
        Ok(self.line_items.len() - 1)
    }

    /// Drop every service, leaving a single blank one.
    pub fn clear_services(&mut self) {
        self.line_items = vec![ServiceLineItem::blank()];
    }
}

impl Default for Quotation {
    fn default() -> Self {
        Self::new(ContractorInfo::builtin())
    }
}
