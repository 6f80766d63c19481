use std::io::Cursor;

use docx_rs::{Docx, Paragraph, ParagraphChild, Run, RunChild, Table, Text};

use crate::domain::error::{AppError, Result};
use crate::domain::placeholder::PlaceholderValues;

/// Fill a docx template and serialise the result.
pub fn fill_contract(template: &[u8], values: &PlaceholderValues) -> Result<(Vec<u8>, usize)> {
    let mut docx = docx_rs::read_docx(template)
        .map_err(|e| AppError::TemplateError(format!("Failed to parse DOCX template: {}", e)))?;

    let replaced = fill_document(&mut docx, values);
    escape_document(&mut docx);

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::TemplateError(format!("Failed to write DOCX: {}", e)))?;

    Ok((cursor.into_inner(), replaced))
}

/// Replace tokens in every run of the document body. Returns the number of text
/// stretches that changed. Expects decoded text, as `read_docx` produces it.
pub fn fill_document(docx: &mut Docx, values: &PlaceholderValues) -> usize {
    let mut replaced = 0;
    for_each_run(docx, &mut |run| fill_run(run, values, &mut replaced));
    replaced
}

/// `read_docx` stores text decoded but the writer emits `Text.text` verbatim, so
/// every text element is rebuilt through `Text::new`, which escapes it.
fn escape_document(docx: &mut Docx) {
    for_each_run(docx, &mut |run| {
        for child in &mut run.children {
            if let RunChild::Text(text) = child {
                *text = Text::new(std::mem::take(&mut text.text));
            }
        }
    });
}

fn for_each_run(docx: &mut Docx, visit: &mut dyn FnMut(&mut Run)) {
    for child in &mut docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => visit_paragraph(paragraph, visit),
            docx_rs::DocumentChild::Table(table) => visit_table(table, visit),
            _ => {}
        }
    }
}

fn visit_paragraph(paragraph: &mut Paragraph, visit: &mut dyn FnMut(&mut Run)) {
    for child in &mut paragraph.children {
        visit_paragraph_child(child, visit);
    }
}

fn visit_paragraph_child(child: &mut ParagraphChild, visit: &mut dyn FnMut(&mut Run)) {
    match child {
        ParagraphChild::Run(run) => visit(run),
        ParagraphChild::Hyperlink(link) => {
            for link_child in &mut link.children {
                visit_paragraph_child(link_child, visit);
            }
        }
        ParagraphChild::Insert(insert) => {
            for insert_child in &mut insert.children {
                if let docx_rs::InsertChild::Run(run) = insert_child {
                    visit(run);
                }
            }
        }
        _ => {}
    }
}

/// A token counts only when it lies inside one stretch of consecutive text
/// elements of a single run; tabs, breaks and run boundaries split it.
fn fill_run(run: &mut Run, values: &PlaceholderValues, replaced: &mut usize) {
    let mut idx = 0;
    while idx < run.children.len() {
        if !matches!(run.children[idx], RunChild::Text(_)) {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < run.children.len() && matches!(run.children[idx], RunChild::Text(_)) {
            idx += 1;
        }
        if fill_text_stretch(&mut run.children[start..idx], values) {
            *replaced += 1;
        }
    }
}

fn fill_text_stretch(stretch: &mut [RunChild], values: &PlaceholderValues) -> bool {
    let joined: String = stretch
        .iter()
        .filter_map(|child| match child {
            RunChild::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect();

    let Some(filled) = values.substitute(&joined) else {
        return false;
    };

    let mut filled = Some(filled);
    for child in stretch.iter_mut() {
        if let RunChild::Text(text) = child {
            match filled.take() {
                Some(value) => {
                    text.text = value;
                    text.preserve_space = true;
                }
                None => text.text.clear(),
            }
        }
    }
    true
}

fn visit_table(table: &mut Table, visit: &mut dyn FnMut(&mut Run)) {
    for row in &mut table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        for cell in &mut row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            for content in &mut cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(paragraph) => {
                        visit_paragraph(paragraph, visit);
                    }
                    docx_rs::TableCellContent::Table(nested) => visit_table(nested, visit),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::IntakeRecord;
    use crate::shared::test_fixtures::{
        contract_document, contract_template, contract_with_table, paragraph_runs, runs_of,
    };

    fn values() -> PlaceholderValues {
        PlaceholderValues::for_contract(&IntakeRecord {
            landlord_description: "Acme AB".to_string(),
            tenant_description: "Site 42".to_string(),
            x_coordinate: "6578123".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_replaces_token_inside_single_run() {
        let mut docx = contract_document(&[&["Hyra: --::HYRESVARD::--"]]);
        let replaced = fill_document(&mut docx, &values());

        assert_eq!(replaced, 1);
        assert_eq!(paragraph_runs(&docx), vec![vec!["Hyra: Acme AB".to_string()]]);
    }

    #[test]
    fn test_split_token_is_left_alone() {
        let mut docx = contract_document(&[&["Hyra: --::HYRES", "VARD::--"]]);
        let replaced = fill_document(&mut docx, &values());

        assert_eq!(replaced, 0);
        assert_eq!(
            paragraph_runs(&docx),
            vec![vec!["Hyra: --::HYRES".to_string(), "VARD::--".to_string()]]
        );
    }

    #[test]
    fn test_other_runs_keep_their_text() {
        let mut docx = contract_document(&[
            &["Hyresvärd: ", "--::HYRESVARD::--", ", hyresgäst: --::HYRESGAST::--"],
            &["Ingen platshållare här"],
        ]);
        fill_document(&mut docx, &values());

        assert_eq!(
            paragraph_runs(&docx),
            vec![
                vec![
                    "Hyresvärd: ".to_string(),
                    "Acme AB".to_string(),
                    ", hyresgäst: Site 42".to_string()
                ],
                vec!["Ingen platshållare här".to_string()],
            ]
        );
    }

    #[test]
    fn test_missing_values_become_empty() {
        let mut docx = contract_document(&[&["Mast: --::masttyp_hojd::--."]]);
        fill_document(&mut docx, &values());
        assert_eq!(paragraph_runs(&docx), vec![vec!["Mast: .".to_string()]]);
    }

    #[test]
    fn test_tokens_inside_tables_are_filled() {
        let mut docx = contract_with_table(&["X: --::x_coordinate::--"]);
        let replaced = fill_document(&mut docx, &values());
        assert_eq!(replaced, 1);

        let docx_rs::DocumentChild::Table(table) = &docx.document.children[0] else {
            panic!("expected table");
        };
        let docx_rs::TableChild::TableRow(row) = &table.rows[0];
        let docx_rs::TableRowChild::TableCell(cell) = &row.cells[0];
        let docx_rs::TableCellContent::Paragraph(paragraph) = &cell.children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(runs_of(paragraph), vec!["X: 6578123".to_string()]);
    }

    #[test]
    fn test_fill_contract_round_trips_bytes() {
        let template = contract_template(&[&["Avtal mellan --::HYRESVARD::-- och --::HYRESGAST::--"]]);
        let (bytes, replaced) = fill_contract(&template, &values()).unwrap();
        assert_eq!(replaced, 1);

        let filled = docx_rs::read_docx(&bytes).unwrap();
        assert_eq!(
            paragraph_runs(&filled),
            vec![vec!["Avtal mellan Acme AB och Site 42".to_string()]]
        );
    }

    #[test]
    fn test_fill_contract_escapes_markup_characters() {
        let template = contract_template(&[&["Hyresvärd: --::HYRESVARD::--"], &["A & B"]]);
        let values = PlaceholderValues::for_contract(&IntakeRecord {
            landlord_description: "Svensson & Söner <AB>".to_string(),
            ..Default::default()
        });

        let (bytes, replaced) = fill_contract(&template, &values).unwrap();
        assert_eq!(replaced, 1);

        let filled = docx_rs::read_docx(&bytes).unwrap();
        assert_eq!(
            paragraph_runs(&filled),
            vec![
                vec!["Hyresvärd: Svensson & Söner <AB>".to_string()],
                vec!["A & B".to_string()],
            ]
        );
    }

    #[test]
    fn test_fill_contract_rejects_non_docx() {
        let result = fill_contract(b"plain text", &values());
        assert!(matches!(result, Err(AppError::TemplateError(_))));
    }
}
