//! Layout instructions handed to a [`LayoutBackend`](super::LayoutBackend).
//!
//! Blocks describe *what* goes on the page in order; pagination and text flow
//! are left to the backend.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width_cm: f32,
    pub height_cm: f32,
    pub margin_left_cm: f32,
    pub margin_right_cm: f32,
    pub margin_top_cm: f32,
    pub margin_bottom_cm: f32,
}

impl PageSetup {
    /// A4 with the quotation margins.
    pub fn quotation() -> Self {
        Self {
            width_cm: 21.0,
            height_cm: 29.7,
            margin_left_cm: 1.5,
            margin_right_cm: 1.5,
            margin_top_cm: 1.0,
            margin_bottom_cm: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const DARK_BLUE: Color = Color(0x00, 0x00, 0x8b);
    pub const WHITE_SMOKE: Color = Color(0xf5, 0xf5, 0xf5);
    pub const BEIGE: Color = Color(0xf5, 0xf5, 0xdc);
    pub const LIGHT_GREY: Color = Color(0xd3, 0xd3, 0xd3);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// Trade name heading used when there is no logo
    CompanyHeading,
    DocumentTitle,
    SectionTitle,
    Body,
    BodyCentered,
}

impl ParagraphStyle {
    pub fn font_size_pt(&self) -> f32 {
        match self {
            Self::CompanyHeading => 18.0,
            Self::DocumentTitle => 16.0,
            Self::SectionTitle => 12.0,
            Self::Body | Self::BodyCentered => 10.0,
        }
    }

    pub fn bold(&self) -> bool {
        matches!(
            self,
            Self::CompanyHeading | Self::DocumentTitle | Self::SectionTitle
        )
    }

    pub fn align(&self) -> Align {
        match self {
            Self::CompanyHeading | Self::DocumentTitle | Self::BodyCentered => Align::Center,
            Self::SectionTitle | Self::Body => Align::Left,
        }
    }

    pub fn space_after_pt(&self) -> f32 {
        match self {
            Self::CompanyHeading => 12.0,
            Self::DocumentTitle => 10.0,
            Self::SectionTitle => 8.0,
            Self::Body | Self::BodyCentered => 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// Text made of plain and bold runs. Line breaks inside a run are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    pub spans: Vec<Span>,
}

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::default().text(text)
    }

    /// `"<b>Label:</b> value"`
    pub fn labeled(label: &str, value: &str) -> Self {
        Self::default()
            .strong(format!("{label}:"))
            .text(format!(" {value}"))
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            bold: false,
        });
        self
    }

    pub fn strong(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            bold: true,
        });
        self
    }

    /// The text without any styling.
    pub fn to_plain_string(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Single-line text.
    Text(String),
    /// Flowing text that wraps inside the column.
    Paragraph(RichText),
}

impl CellContent {
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Paragraph(rich) => rich.to_plain_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub background: Option<Color>,
    pub text_color: Color,
    pub bold: bool,
    pub font_size_pt: f32,
    pub align: Align,
    pub valign: VAlign,
}

impl CellStyle {
    pub fn plain() -> Self {
        Self {
            background: None,
            text_color: Color::BLACK,
            bold: false,
            font_size_pt: 10.0,
            align: Align::Center,
            valign: VAlign::Middle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub content: CellContent,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Row where every cell shares `style`.
    pub fn styled(contents: Vec<CellContent>, style: CellStyle) -> Self {
        Self {
            cells: contents
                .into_iter()
                .map(|content| TableCell { content, style })
                .collect(),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.content.to_plain_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub horizontal_pt: f32,
    pub vertical_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Relative column widths of the full text width.
    pub column_ratios: Vec<u32>,
    pub rows: Vec<TableRow>,
    /// Gridline color; `None` draws no borders.
    pub grid: Option<Color>,
    pub padding: Padding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Image {
        path: PathBuf,
        width_cm: f32,
        height_cm: f32,
        align: Align,
    },
    Paragraph {
        text: RichText,
        style: ParagraphStyle,
    },
    Spacer {
        height_cm: f32,
    },
    Table(Table),
}

impl Block {
    pub fn paragraph(text: RichText, style: ParagraphStyle) -> Self {
        Self::Paragraph { text, style }
    }

    pub fn spacer(height_cm: f32) -> Self {
        Self::Spacer { height_cm }
    }
}
