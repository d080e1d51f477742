//! Maps a quotation onto the fixed quotation layout.

use std::path::PathBuf;

use super::common::format_long_date;
use super::layout::{
    Align, Block, CellContent, CellStyle, Color, Padding, ParagraphStyle, RichText, Table,
    TableCell, TableRow, VAlign,
};
use crate::quotation::{format_currency, ClientInfo, ContractorInfo, Quotation, Terms};

pub const DOCUMENT_TITLE: &str = "ORÇAMENTO";
pub const SERVICES_COLUMN_RATIOS: [u32; 4] = [55, 14, 14, 17];
pub const SERVICES_HEADER: [&str; 4] = [
    "ESPECIFICAÇÃO DE SERVIÇO",
    "Quantidade",
    "Preço Unitário",
    "Preço Total",
];
pub const TOTAL_LABEL: &str = "TOTAL";
pub const TAX_STATEMENT: &str = "• Os preços apresentados incluem todos os impostos e custos necessários para execução dos serviços.";
pub const CONTRACTOR_SIGNATURE_LABEL: &str = "Assinatura da Empresa";
pub const CLIENT_SIGNATURE_LABEL: &str = "Assinatura do Cliente";

const INTRODUCTION: &str = "Temos a satisfação de apresentar nossa proposta comercial para os serviços de desentupimento, conforme solicitação. Nossa empresa possui vasta experiência no mercado e está preparada para atender suas necessidades com qualidade e pontualidade.";
const SIGNATURE_LINE_LEN: usize = 35;
const LOGO_WIDTH_CM: f32 = 6.0;
const LOGO_HEIGHT_CM: f32 = 3.0;

/// Builds the block sequence for a quotation.
///
/// The logo is looked up on every call, so a logo added or removed while the
/// server runs is picked up by the next generation.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    logo_path: PathBuf,
}

impl DocumentRenderer {
    pub fn new(logo_path: impl Into<PathBuf>) -> Self {
        Self {
            logo_path: logo_path.into(),
        }
    }

    /// Assemble the full document in its fixed order.
    pub fn assemble(&self, quotation: &Quotation) -> Vec<Block> {
        let mut blocks = Vec::new();

        blocks.extend(self.letterhead(&quotation.contractor));
        blocks.push(Block::paragraph(
            RichText::plain(DOCUMENT_TITLE),
            ParagraphStyle::DocumentTitle,
        ));
        blocks.push(Block::spacer(0.2));

        blocks.extend(client_section(&quotation.client));
        blocks.push(Block::spacer(0.3));
        blocks.extend(contractor_section(&quotation.contractor));
        blocks.push(Block::spacer(0.3));

        blocks.push(Block::paragraph(introduction(), ParagraphStyle::Body));
        blocks.push(Block::spacer(0.3));

        blocks.push(section_title("Serviços e Preços"));
        blocks.push(Block::Table(services_table(quotation)));
        blocks.push(Block::spacer(0.3));

        blocks.extend(terms_section(&quotation.terms));
        blocks.push(Block::spacer(0.8));

        blocks.push(Block::paragraph(
            RichText::plain(closing_line(quotation)),
            ParagraphStyle::BodyCentered,
        ));
        blocks.push(Block::spacer(0.6));
        blocks.push(Block::Table(signature_table(&quotation.contractor)));

        blocks
    }

    /// Logo when the asset exists, otherwise the trade name as a heading.
    fn letterhead(&self, contractor: &ContractorInfo) -> Vec<Block> {
        let head = if self.logo_path.is_file() {
            Block::Image {
                path: self.logo_path.clone(),
                width_cm: LOGO_WIDTH_CM,
                height_cm: LOGO_HEIGHT_CM,
                align: Align::Center,
            }
        } else {
            log::debug!(
                "logo not found at {}, using trade name heading",
                self.logo_path.display()
            );
            Block::paragraph(
                RichText::plain(contractor.trade_name.clone()),
                ParagraphStyle::CompanyHeading,
            )
        };
        vec![head, Block::spacer(0.2)]
    }
}

fn section_title(title: &str) -> Block {
    Block::paragraph(RichText::plain(title), ParagraphStyle::SectionTitle)
}

fn field(label: &str, value: &str) -> Block {
    Block::paragraph(RichText::labeled(label, value), ParagraphStyle::Body)
}

fn client_section(client: &ClientInfo) -> Vec<Block> {
    vec![
        section_title("À Administração"),
        field("Empresa", &client.name),
        field("CNPJ/CPF", &client.tax_id),
        field("Endereço", &client.address),
        field("CEP", &client.postal_code),
    ]
}

fn contractor_section(contractor: &ContractorInfo) -> Vec<Block> {
    vec![
        section_title("Dados da Empresa Contratada"),
        field("Empresa", &contractor.name),
        field(
            "Endereço",
            &format!("{}, {}", contractor.address, contractor.city),
        ),
        field("CEP", &contractor.postal_code),
        field("CNPJ", &contractor.tax_id),
        field("Site", &contractor.website),
        field("Telefones", &contractor.phones),
        field("Inscrição Estadual", &contractor.state_registration),
        field("E-mail", &contractor.email),
    ]
}

fn introduction() -> RichText {
    RichText::plain(format!("Prezados Senhores,\n\n{INTRODUCTION}"))
}

fn header_style() -> CellStyle {
    CellStyle {
        background: Some(Color::DARK_BLUE),
        text_color: Color::WHITE_SMOKE,
        bold: true,
        ..CellStyle::plain()
    }
}

fn body_style() -> CellStyle {
    CellStyle {
        background: Some(Color::BEIGE),
        font_size_pt: 9.0,
        ..CellStyle::plain()
    }
}

fn total_style() -> CellStyle {
    CellStyle {
        background: Some(Color::LIGHT_GREY),
        bold: true,
        ..CellStyle::plain()
    }
}

/// Header, one row per valid line item, then the TOTAL row.
pub fn services_table(quotation: &Quotation) -> Table {
    let mut rows = Vec::with_capacity(quotation.line_items.len() + 2);

    rows.push(TableRow::styled(
        SERVICES_HEADER
            .iter()
            .map(|label| CellContent::Text(label.to_string()))
            .collect(),
        header_style(),
    ));

    for item in quotation.valid_items() {
        let mut row = TableRow::styled(
            vec![
                CellContent::Text(item.quantity_label()),
                CellContent::Text(item.unit_price_label()),
                CellContent::Text(format_currency(item.total())),
            ],
            body_style(),
        );
        row.cells.insert(
            0,
            TableCell {
                content: CellContent::Paragraph(RichText::plain(item.description.clone())),
                style: CellStyle {
                    align: Align::Left,
                    valign: VAlign::Top,
                    ..body_style()
                },
            },
        );
        rows.push(row);
    }

    rows.push(TableRow::styled(
        vec![
            CellContent::Text(TOTAL_LABEL.to_string()),
            CellContent::Text(String::new()),
            CellContent::Text(String::new()),
            CellContent::Text(format_currency(quotation.grand_total())),
        ],
        total_style(),
    ));

    Table {
        column_ratios: SERVICES_COLUMN_RATIOS.to_vec(),
        rows,
        grid: Some(Color::BLACK),
        padding: Padding {
            horizontal_pt: 6.0,
            vertical_pt: 8.0,
        },
    }
}

fn terms_section(terms: &Terms) -> Vec<Block> {
    let bullet = |label: &str, value: &str| {
        Block::paragraph(
            RichText::plain("• ")
                .strong(format!("{label}:"))
                .text(format!(" {value}")),
            ParagraphStyle::Body,
        )
    };

    vec![
        section_title("Termos e Condições"),
        Block::paragraph(RichText::plain(TAX_STATEMENT), ParagraphStyle::Body),
        bullet("Prazo de Entrega", &terms.delivery_terms),
        bullet("Prazo de Pagamento", &terms.payment_terms),
        bullet("Validade da Proposta", &terms.validity_period),
    ]
}

/// `"{location}, {long date}"`
pub fn closing_line(quotation: &Quotation) -> String {
    format!(
        "{}, {}",
        quotation.issue_location,
        format_long_date(quotation.issue_date)
    )
}

/// Borderless two-column block with signature lines for both parties.
pub fn signature_table(contractor: &ContractorInfo) -> Table {
    let line = "_".repeat(SIGNATURE_LINE_LEN);
    let text = |s: String| CellContent::Text(s);
    let valign_top = CellStyle {
        valign: VAlign::Top,
        ..CellStyle::plain()
    };
    let details = CellStyle {
        font_size_pt: 9.0,
        ..valign_top
    };

    let rows = vec![
        TableRow::styled(vec![text(line.clone()), text(line)], valign_top),
        TableRow::styled(
            vec![
                text(CONTRACTOR_SIGNATURE_LABEL.to_string()),
                text(CLIENT_SIGNATURE_LABEL.to_string()),
            ],
            CellStyle {
                bold: true,
                ..valign_top
            },
        ),
        TableRow::styled(
            vec![text(contractor.name.clone()), text(String::new())],
            details,
        ),
        TableRow::styled(
            vec![
                text(format!("CNPJ: {}", contractor.tax_id)),
                text(String::new()),
            ],
            details,
        ),
    ];

    Table {
        column_ratios: vec![50, 50],
        rows,
        grid: None,
        padding: Padding {
            horizontal_pt: 6.0,
            vertical_pt: 6.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotation::{MeasurementKind, ServiceLineItem};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn quotation() -> Quotation {
        let mut q = Quotation::new_on(
            ContractorInfo::builtin(),
            NaiveDate::from_ymd_opt(2024, 10, 30).unwrap(),
        );
        q.client.name = "ACME".to_string();
        q.line_items = vec![
            ServiceLineItem::new(
                "Desentupimento",
                MeasurementKind::LengthLumpSum,
                Decimal::new(260, 0),
                Decimal::new(5000, 2),
            ),
            ServiceLineItem::blank(),
            ServiceLineItem::new(
                "Limpeza de caixa de gordura",
                MeasurementKind::PerUnit,
                Decimal::new(2, 0),
                Decimal::new(15000, 2),
            ),
        ];
        q
    }

    #[test]
    fn test_services_table_rows() {
        let table = services_table(&quotation());
        assert_eq!(table.column_ratios, vec![55, 14, 14, 17]);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].texts(), SERVICES_HEADER.map(String::from).to_vec());
        assert_eq!(
            table.rows[1].texts(),
            vec!["Desentupimento", "260m", "Valor total", "R$ 50,00"]
        );
        assert_eq!(
            table.rows[2].texts(),
            vec!["Limpeza de caixa de gordura", "2 un", "R$ 150,00", "R$ 300,00"]
        );
        assert_eq!(table.rows[3].texts(), vec!["TOTAL", "", "", "R$ 350,00"]);
    }

    #[test]
    fn test_description_is_wrapped_paragraph() {
        let table = services_table(&quotation());
        let cell = &table.rows[1].cells[0];
        assert!(matches!(cell.content, CellContent::Paragraph(_)));
        assert_eq!(cell.style.align, Align::Left);
        assert!(matches!(table.rows[1].cells[1].content, CellContent::Text(_)));
    }

    #[test]
    fn test_table_styling_bands() {
        let table = services_table(&quotation());
        let header = table.rows[0].cells[0].style;
        assert_eq!(header.background, Some(Color::DARK_BLUE));
        assert_eq!(header.text_color, Color::WHITE_SMOKE);
        assert!(header.bold);
        assert_eq!(table.rows[1].cells[2].style.background, Some(Color::BEIGE));
        let total = table.rows[3].cells[3].style;
        assert_eq!(total.background, Some(Color::LIGHT_GREY));
        assert!(total.bold);
        assert_eq!(table.grid, Some(Color::BLACK));
    }

    #[test]
    fn test_closing_line() {
        assert_eq!(
            closing_line(&quotation()),
            "Brasília - DF, 30 de outubro de 2024"
        );
    }

    #[test]
    fn test_signature_table() {
        let table = signature_table(&ContractorInfo::builtin());
        assert_eq!(table.grid, None);
        assert_eq!(table.rows[0].texts()[0], "_".repeat(35));
        assert_eq!(
            table.rows[1].texts(),
            vec!["Assinatura da Empresa", "Assinatura do Cliente"]
        );
        assert_eq!(table.rows[3].texts()[0], "CNPJ: 17.908.156/0001-78");
        assert_eq!(table.rows[3].texts()[1], "");
    }

    /// Non-spacer blocks as (style, text); tables show their first cell.
    fn outline(blocks: &[Block]) -> Vec<(Option<ParagraphStyle>, String)> {
        blocks
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph { text, style } => Some((Some(*style), text.to_plain_string())),
                Block::Table(table) => Some((None, table.rows[0].texts()[0].clone())),
                Block::Image { .. } => Some((None, "<logo>".to_string())),
                Block::Spacer { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_assemble_section_order() {
        use crate::quotation::presets::{
            DEFAULT_DELIVERY_TERMS, DEFAULT_PAYMENT_TERMS, DEFAULT_VALIDITY_PERIOD,
        };
        use ParagraphStyle::*;

        let q = quotation();
        let c = ContractorInfo::builtin();
        let blocks = DocumentRenderer::new("/nonexistent/logo.png").assemble(&q);

        let body = |text: String| (Some(Body), text);
        let expected = vec![
            (Some(CompanyHeading), c.trade_name.clone()),
            (Some(DocumentTitle), "ORÇAMENTO".to_string()),
            (Some(SectionTitle), "À Administração".to_string()),
            body("Empresa: ACME".to_string()),
            body("CNPJ/CPF: ".to_string()),
            body("Endereço: ".to_string()),
            body("CEP: ".to_string()),
            (Some(SectionTitle), "Dados da Empresa Contratada".to_string()),
            body(format!("Empresa: {}", c.name)),
            body(format!("Endereço: {}, {}", c.address, c.city)),
            body(format!("CEP: {}", c.postal_code)),
            body(format!("CNPJ: {}", c.tax_id)),
            body(format!("Site: {}", c.website)),
            body(format!("Telefones: {}", c.phones)),
            body(format!("Inscrição Estadual: {}", c.state_registration)),
            body(format!("E-mail: {}", c.email)),
            body(format!("Prezados Senhores,\n\n{INTRODUCTION}")),
            (Some(SectionTitle), "Serviços e Preços".to_string()),
            (None, SERVICES_HEADER[0].to_string()),
            (Some(SectionTitle), "Termos e Condições".to_string()),
            body(TAX_STATEMENT.to_string()),
            body(format!("• Prazo de Entrega: {DEFAULT_DELIVERY_TERMS}")),
            body(format!("• Prazo de Pagamento: {DEFAULT_PAYMENT_TERMS}")),
            body(format!("• Validade da Proposta: {DEFAULT_VALIDITY_PERIOD}")),
            (
                Some(BodyCentered),
                "Brasília - DF, 30 de outubro de 2024".to_string(),
            ),
            (None, "_".repeat(SIGNATURE_LINE_LEN)),
        ];
        assert_eq!(outline(&blocks), expected);
        assert!(matches!(blocks.last(), Some(Block::Table(t)) if t.grid.is_none()));
    }

    #[test]
    fn test_missing_logo_falls_back_to_trade_name() {
        let renderer = DocumentRenderer::new("/nonexistent/logo.png");
        let blocks = renderer.assemble(&quotation());
        match &blocks[0] {
            Block::Paragraph { text, style } => {
                assert_eq!(*style, ParagraphStyle::CompanyHeading);
                assert_eq!(text.to_plain_string(), "GPM DESENTUPIDORA");
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }
}
