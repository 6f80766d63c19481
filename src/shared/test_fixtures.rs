//! In-memory workbook and document builders for tests.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

enum FixtureValue {
    Text(String),
    Number(f64),
}

/// Builds a single-sheet xlsx workbook, used both for intake sheets and price-sheet templates.
pub struct SheetFixture {
    cells: Vec<(String, FixtureValue)>,
}

impl SheetFixture {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn text(mut self, cell: &str, value: &str) -> Self {
        self.cells
            .push((cell.to_string(), FixtureValue::Text(value.to_string())));
        self
    }

    pub fn number(mut self, cell: &str, value: f64) -> Self {
        self.cells.push((cell.to_string(), FixtureValue::Number(value)));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book
            .get_sheet_by_name_mut("Sheet1")
            .expect("new workbook has Sheet1");
        for (cell, value) in &self.cells {
            match value {
                FixtureValue::Text(text) => {
                    sheet.get_cell_mut(cell.as_str()).set_value_string(text.clone());
                }
                FixtureValue::Number(number) => {
                    sheet.get_cell_mut(cell.as_str()).set_value_number(*number);
                }
            }
        }

        let mut cursor = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor)
            .expect("fixture workbook serialises");
        cursor.into_inner()
    }
}

/// Intake sheet with the given customer in D3 and descriptions in D8/E9.
pub fn intake_for(customer_name: &str, tenant: &str, landlord: &str) -> Vec<u8> {
    SheetFixture::new()
        .text("D3", customer_name)
        .text("D8", tenant)
        .text("E9", landlord)
        .text("D9", "6578123, 1628456")
        .text("E12", "Mast 30 m")
        .build()
}

/// Build a docx where each inner slice is one paragraph and each string one run.
pub fn contract_document(paragraphs: &[&[&str]]) -> Docx {
    let mut docx = Docx::new();
    for runs in paragraphs {
        docx = docx.add_paragraph(paragraph(runs));
    }
    docx
}

/// A docx with one table cell holding the given runs.
pub fn contract_with_table(runs: &[&str]) -> Docx {
    Docx::new().add_table(Table::new(vec![TableRow::new(vec![
        TableCell::new().add_paragraph(paragraph(runs)),
    ])]))
}

fn paragraph(runs: &[&str]) -> Paragraph {
    runs.iter()
        .fold(Paragraph::new(), |p, text| p.add_run(Run::new().add_text(*text)))
}

pub fn pack_docx(docx: Docx) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).expect("fixture docx packs");
    cursor.into_inner()
}

pub fn contract_template(paragraphs: &[&[&str]]) -> Vec<u8> {
    pack_docx(contract_document(paragraphs))
}

/// Run texts per body paragraph of a docx.
pub fn paragraph_runs(docx: &Docx) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            out.push(runs_of(paragraph));
        }
    }
    out
}

pub fn runs_of(paragraph: &Paragraph) -> Vec<String> {
    let mut runs = Vec::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            let mut text = String::new();
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
            runs.push(text);
        }
    }
    runs
}
