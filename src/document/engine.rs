//! Typst rendering engine.
//!
//! Turns layout blocks into Typst markup, writes it with any referenced images
//! into a temporary project directory, invokes the compiler and returns the
//! output PDF.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

use super::common::escape_typst_string;
use super::layout::{
    Align, Block, CellContent, CellStyle, Color, PageSetup, ParagraphStyle, RichText, Table,
    VAlign,
};
use super::traits::LayoutBackend;
use super::RenderError;

const SOURCE_FILE: &str = "quotation.typ";
const OUTPUT_FILE: &str = "quotation.pdf";

/// Typst source plus the files it references, as copied into the project dir.
#[derive(Debug, Clone, PartialEq)]
pub struct TypstSource {
    pub markup: String,
    /// (file on disk, name inside the project dir)
    pub assets: Vec<(PathBuf, String)>,
}

/// Renders layout blocks with the `typst` CLI.
#[derive(Debug, Clone)]
pub struct TypstRenderEngine {
    binary: String,
}

impl Default for TypstRenderEngine {
    fn default() -> Self {
        Self::new("typst")
    }
}

impl TypstRenderEngine {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the Typst project for `blocks` without compiling it.
    pub fn source(&self, page: &PageSetup, blocks: &[Block]) -> TypstSource {
        let mut markup = String::new();
        let mut assets = Vec::new();

        let _ = writeln!(
            markup,
            "#set page(width: {}cm, height: {}cm, margin: (left: {}cm, right: {}cm, top: {}cm, bottom: {}cm))",
            page.width_cm,
            page.height_cm,
            page.margin_left_cm,
            page.margin_right_cm,
            page.margin_top_cm,
            page.margin_bottom_cm,
        );
        markup.push_str("#set text(size: 10pt, lang: \"pt\", region: \"br\")\n\n");

        for block in blocks {
            match block {
                Block::Image {
                    path,
                    width_cm,
                    height_cm,
                    align,
                } => {
                    let name = asset_name(assets.len(), path);
                    let _ = writeln!(
                        markup,
                        "#align({}, image(\"{}\", width: {}cm, height: {}cm))",
                        align_keyword(*align),
                        escape_typst_string(&name),
                        width_cm,
                        height_cm,
                    );
                    assets.push((path.clone(), name));
                }
                Block::Paragraph { text, style } => {
                    markup.push_str(&paragraph(text, *style));
                }
                Block::Spacer { height_cm } => {
                    let _ = writeln!(markup, "#v({}cm)", height_cm);
                }
                Block::Table(table) => {
                    markup.push_str(&table_markup(table));
                }
            }
        }

        TypstSource { markup, assets }
    }
}

impl LayoutBackend for TypstRenderEngine {
    fn render(&self, page: &PageSetup, blocks: &[Block]) -> Result<Vec<u8>, RenderError> {
        let source = self.source(page, blocks);

        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        for (path, name) in &source.assets {
            fs::copy(path, temp_dir.path().join(name)).map_err(|source| {
                RenderError::CopyAsset {
                    path: path.display().to_string(),
                    source,
                }
            })?;
        }

        let typ_path = temp_dir.path().join(SOURCE_FILE);
        fs::write(&typ_path, &source.markup).map_err(RenderError::WriteSource)?;

        log::debug!(
            "compiling {} ({} bytes, {} assets)",
            SOURCE_FILE,
            source.markup.len(),
            source.assets.len()
        );
        compile_typst_to_pdf(&self.binary, &temp_dir, SOURCE_FILE, OUTPUT_FILE)
    }
}

/// Compile a Typst source file to PDF.
fn compile_typst_to_pdf(
    binary: &str,
    temp_dir: &TempDir,
    typ_filename: &str,
    output_filename: &str,
) -> Result<Vec<u8>, RenderError> {
    let typ_path = temp_dir.path().join(typ_filename);
    let output_path = temp_dir.path().join(output_filename);

    let status = Command::new(binary)
        .arg("compile")
        .arg(&typ_path)
        .arg(&output_path)
        .current_dir(temp_dir.path())
        .status()
        .map_err(RenderError::TypstIo)?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(RenderError::TypstExit(code));
    }

    fs::read(&output_path).map_err(RenderError::ReadPdf)
}

fn asset_name(index: usize, path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("asset-{index}.{}", ext.to_ascii_lowercase()),
        None => format!("asset-{index}"),
    }
}

fn align_keyword(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn valign_keyword(valign: VAlign) -> &'static str {
    match valign {
        VAlign::Top => "top",
        VAlign::Middle => "horizon",
    }
}

fn color(color: Color) -> String {
    format!("rgb(\"{}\")", color.hex())
}

/// Text as markup. Every run is a string literal so user input can never be
/// read as Typst syntax.
fn rich_text(text: &RichText) -> String {
    let mut out = String::new();
    for span in &text.spans {
        let lines: Vec<String> = span
            .text
            .split('\n')
            .map(|line| format!("#\"{}\"", escape_typst_string(line.trim_end_matches('\r'))))
            .collect();
        let joined = lines.join("#linebreak()");
        if span.bold {
            let _ = write!(out, "#strong[{joined}]");
        } else {
            out.push_str(&joined);
        }
    }
    out
}

fn paragraph(text: &RichText, style: ParagraphStyle) -> String {
    let weight = if style.bold() { "bold" } else { "regular" };
    format!(
        "#block(width: 100%, below: {}pt)[#align({})[#text(size: {}pt, weight: \"{}\")[{}]]]\n",
        style.space_after_pt(),
        align_keyword(style.align()),
        style.font_size_pt(),
        weight,
        rich_text(text),
    )
}

fn cell(content: &CellContent, style: &CellStyle) -> String {
    let body = match content {
        CellContent::Text(text) => rich_text(&RichText::plain(text.clone())),
        CellContent::Paragraph(rich) => format!("#par(justify: false)[{}]", rich_text(rich)),
    };
    let fill = style.background.map(color).unwrap_or_else(|| "none".to_string());
    let weight = if style.bold { "bold" } else { "regular" };
    format!(
        "  table.cell(fill: {}, align: {} + {})[#text(fill: {}, size: {}pt, weight: \"{}\")[{}]],\n",
        fill,
        align_keyword(style.align),
        valign_keyword(style.valign),
        color(style.text_color),
        style.font_size_pt,
        weight,
        body,
    )
}

fn table_markup(table: &Table) -> String {
    let columns: Vec<String> = table
        .column_ratios
        .iter()
        .map(|ratio| format!("{ratio}fr"))
        .collect();
    let stroke = match table.grid {
        Some(grid) => format!("1pt + {}", color(grid)),
        None => "none".to_string(),
    };

    let mut out = String::new();
    out.push_str("#table(\n");
    let _ = writeln!(out, "  columns: ({},),", columns.join(", "));
    let _ = writeln!(out, "  stroke: {},", stroke);
    let _ = writeln!(
        out,
        "  inset: (x: {}pt, y: {}pt),",
        table.padding.horizontal_pt, table.padding.vertical_pt
    );
    for row in &table.rows {
        for table_cell in &row.cells {
            out.push_str(&cell(&table_cell.content, &table_cell.style));
        }
    }
    out.push_str(")\n");
    out
}
