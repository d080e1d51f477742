//! Common utilities for document generation.
//!
//! Shared helpers for Typst escaping, date formatting and output file names.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Format a date in long-form Portuguese (e.g., "30 de outubro de 2024").
pub fn format_long_date(date: NaiveDate) -> String {
    let month = MONTHS[(date.month0() as usize).min(MONTHS.len() - 1)];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
        .replace('\t', r"\t")
}

/// Portuguese accented letters mapped to their ASCII base letter.
fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        other => other,
    }
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_sep = false;

    for ch in name.trim().chars().map(fold_accent) {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_sep = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_' || ch == '/')
            && !last_sep
            && !result.is_empty()
        {
            result.push('_');
            last_sep = true;
        }
    }

    let result = result.trim_matches('_');
    if result.is_empty() {
        return fallback.to_string();
    }

    result.to_string()
}

/// Download name for a quotation: `orcamento_<client>_<YYYYMMDD>.pdf`.
pub fn quotation_filename(client_name: &str, issue_date: NaiveDate) -> String {
    format!(
        "orcamento_{}_{}.pdf",
        sanitize_filename(client_name, "cliente"),
        issue_date.format("%Y%m%d")
    )
}
