mod common;

use rust_decimal::Decimal;
use std::fs;

use common::{FailingBackend, RecordingBackend, FAKE_PDF};
use quotation_server::document::layout::{Block, ParagraphStyle};
use quotation_server::document::validation::{FIELD_CLIENT_NAME, FIELD_LINE_ITEMS, FIELD_TOTAL};
use quotation_server::document::{DocumentRenderer, GenerationError};
use quotation_server::quotation::{ContractorInfo, Quotation, ServiceLineItem};

#[test]
fn test_generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::default();
    let generator = common::generator_with(backend.clone(), &dir.path().join("logo.png"), dir.path());

    let document = generator.generate(&common::sample_quotation()).unwrap();

    assert_eq!(backend.calls(), 1);
    assert_eq!(document.pdf, FAKE_PDF);
    assert_eq!(
        document.filename,
        "orcamento_capital_industria_e_com_de_produtos_reciclaveis_ltda_20241030.pdf"
    );
    assert_eq!(document.issued_on, "30 de outubro de 2024");
    assert_eq!(document.total, Decimal::new(400, 0));
    assert_eq!(document.output_path, dir.path().join("proposta.pdf"));
    assert_eq!(fs::read(&document.output_path).unwrap(), FAKE_PDF);
}

#[test]
fn test_empty_quotation_reports_every_failure() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::default();
    let generator = common::generator_with(backend.clone(), &dir.path().join("logo.png"), dir.path());

    let quotation = Quotation::new_on(ContractorInfo::builtin(), common::issue_date());
    let err = generator.generate(&quotation).unwrap_err();

    match err {
        GenerationError::Validation(errors) => {
            assert_eq!(errors.len(), 3);
            assert!(errors.get(FIELD_CLIENT_NAME).is_some());
            assert!(errors.get(FIELD_LINE_ITEMS).is_some());
            assert!(errors.get(FIELD_TOTAL).is_some());
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert_eq!(backend.calls(), 0);
    assert!(!dir.path().join("proposta.pdf").exists());
}

#[test]
fn test_regenerate_after_fixing_client() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::default();
    let generator = common::generator_with(backend.clone(), &dir.path().join("logo.png"), dir.path());

    let mut quotation = common::sample_quotation();
    quotation.client.name = "   ".to_string();
    let err = generator.generate(&quotation).unwrap_err();
    match err {
        GenerationError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.get(FIELD_CLIENT_NAME).is_some());
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert_eq!(backend.calls(), 0);

    quotation.client.name = "Condomínio Solar".to_string();
    let document = generator.generate(&quotation).unwrap();
    assert_eq!(backend.calls(), 1);
    assert_eq!(document.filename, "orcamento_condominio_solar_20241030.pdf");
    assert!(backend
        .last_paragraphs()
        .contains(&"Empresa: Condomínio Solar".to_string()));
}

#[test]
fn test_zero_priced_services_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::default();
    let generator = common::generator_with(backend.clone(), &dir.path().join("logo.png"), dir.path());

    let mut quotation = common::sample_quotation();
    for item in &mut quotation.line_items {
        item.unit_price = Decimal::ZERO;
    }

    match generator.generate(&quotation).unwrap_err() {
        GenerationError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.get(FIELD_TOTAL).is_some());
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert_eq!(backend.calls(), 0);
}

#[test]
fn test_backend_failure_keeps_quotation() {
    let dir = tempfile::tempdir().unwrap();
    let generator = common::generator_with(FailingBackend, &dir.path().join("logo.png"), dir.path());

    let quotation = common::sample_quotation();
    let before = quotation.clone();
    let err = generator.generate(&quotation).unwrap_err();

    assert!(matches!(err, GenerationError::Rendering(_)));
    assert!(err.to_string().contains("page overflow"));
    assert_eq!(quotation, before);
    assert!(!dir.path().join("proposta.pdf").exists());
}

#[test]
fn test_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("proposta.pdf");
    fs::write(&output, b"old").unwrap();

    let generator = common::generator_with(
        RecordingBackend::default(),
        &dir.path().join("logo.png"),
        dir.path(),
    );
    generator.generate(&common::sample_quotation()).unwrap();

    assert_eq!(fs::read(&output).unwrap(), FAKE_PDF);
}

#[test]
fn test_output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("saida").join("pdf");
    let generator = common::generator_with(
        RecordingBackend::default(),
        &dir.path().join("logo.png"),
        &nested,
    );

    let document = generator.generate(&common::sample_quotation()).unwrap();
    assert!(document.output_path.starts_with(&nested));
    assert!(document.output_path.is_file());
}

#[test]
fn test_letterhead_uses_logo_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("gpm_desentupidora.png");
    fs::write(&logo, b"png").unwrap();

    let blocks = DocumentRenderer::new(&logo).assemble(&common::sample_quotation());
    match &blocks[0] {
        Block::Image { path, .. } => assert_eq!(path, &logo),
        other => panic!("expected logo image, got {other:?}"),
    }
}

#[test]
fn test_letterhead_falls_back_to_trade_name() {
    let dir = tempfile::tempdir().unwrap();
    let blocks = DocumentRenderer::new(dir.path().join("missing.png"))
        .assemble(&common::sample_quotation());
    match &blocks[0] {
        Block::Paragraph { text, style } => {
            assert_eq!(*style, ParagraphStyle::CompanyHeading);
            assert_eq!(text.to_plain_string(), ContractorInfo::builtin().trade_name);
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn test_blank_services_are_left_out_of_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::default();
    let generator = common::generator_with(backend.clone(), &dir.path().join("logo.png"), dir.path());

    let mut quotation = common::sample_quotation();
    let with_valid_only = DocumentRenderer::new(dir.path().join("logo.png")).assemble(&quotation);
    quotation.line_items.push(ServiceLineItem::blank());
    let with_blank = DocumentRenderer::new(dir.path().join("logo.png")).assemble(&quotation);
    assert_eq!(with_valid_only, with_blank);

    let document = generator.generate(&quotation).unwrap();
    assert_eq!(document.total, Decimal::new(400, 0));
}
