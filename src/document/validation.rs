//! Pre-generation validation.
//!
//! Each condition is checked independently so the user sees every unmet
//! requirement at once, as a checklist rather than a single message.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::quotation::{format_currency, Quotation};

pub const FIELD_CLIENT_NAME: &str = "client.name";
pub const FIELD_LINE_ITEMS: &str = "line_items";
pub const FIELD_TOTAL: &str = "total";

/// Validation error with a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Portuguese
    pub message: String,
    /// Suggestion for how to fix the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} é obrigatório", label))
            .with_suggestion(format!("Preencha o campo {}", label.to_lowercase()))
    }

    pub fn no_services(field: &str) -> Self {
        Self::new(field, "Adicione pelo menos um serviço")
            .with_suggestion("Informe a descrição de ao menos um serviço")
    }

    pub fn non_positive_total(field: &str) -> Self {
        Self::new(field, "O valor total deve ser maior que zero")
            .with_suggestion("Revise as quantidades e os preços dos serviços")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Numbered message listing every failure.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Não é possível gerar o orçamento: {} pendência(s)",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.join("\n")
    }

    /// Ok if no errors were collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_has_services(valid_items: usize, field: &str, errors: &mut ValidationErrors) {
    if valid_items == 0 {
        errors.add(ValidationError::no_services(field));
    }
}

pub fn validate_positive_total(total: Decimal, field: &str, errors: &mut ValidationErrors) {
    if total <= Decimal::ZERO {
        errors.add(ValidationError::non_positive_total(field));
    }
}

/// Run every generation precondition against `quotation`.
pub fn validate_quotation(quotation: &Quotation) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    validate_required(
        &quotation.client.name,
        FIELD_CLIENT_NAME,
        "Nome do cliente",
        &mut errors,
    );
    validate_has_services(quotation.valid_item_count(), FIELD_LINE_ITEMS, &mut errors);
    validate_positive_total(quotation.grand_total(), FIELD_TOTAL, &mut errors);
    errors
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChecklistItem {
    pub field: String,
    pub passed: bool,
    pub message: String,
}

/// Status of every generation precondition, passed or not.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Checklist {
    pub ready: bool,
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn for_quotation(quotation: &Quotation) -> Self {
        let errors = validate_quotation(quotation);
        let count = quotation.valid_item_count();

        let outcomes = [
            (FIELD_CLIENT_NAME, "Nome do cliente preenchido".to_string()),
            (
                FIELD_LINE_ITEMS,
                format!("{count} serviço(s) adicionado(s)"),
            ),
            (
                FIELD_TOTAL,
                format!("Valor total: {}", format_currency(quotation.grand_total())),
            ),
        ];

        let items = outcomes
            .into_iter()
            .map(|(field, success)| match errors.get(field) {
                Some(error) => ChecklistItem {
                    field: field.to_string(),
                    passed: false,
                    message: error.message.clone(),
                },
                None => ChecklistItem {
                    field: field.to_string(),
                    passed: true,
                    message: success,
                },
            })
            .collect();

        Self {
            ready: errors.is_empty(),
            items,
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(|item| !item.passed)
    }
}
