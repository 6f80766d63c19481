// ============================================================
// INTAKE DOMAIN
// ============================================================
// Cell grid of one intake sheet and the record extracted from it
// No I/O: the grid is filled by the workbook reader

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::{AppError, Result};

/// Zero-based cell position parsed from an `A1`-style reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Const shorthand for single-letter columns: `CellRef::a1(b'D', 3)` is `D3`.
    pub const fn a1(column: u8, row: u32) -> Self {
        Self {
            row: row - 1,
            column: (column - b'A') as u32,
        }
    }

    /// Parse a reference like `D3` or `AA12` (case-insensitive).
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        let split = reference
            .find(|ch: char| ch.is_ascii_digit())
            .ok_or_else(|| AppError::ParseError(format!("Cell reference without row: {reference}")))?;
        let (letters, digits) = reference.split_at(split);

        if letters.is_empty() || !letters.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(AppError::ParseError(format!(
                "Invalid column in cell reference: {reference}"
            )));
        }

        let mut column: u32 = 0;
        for ch in letters.chars() {
            let digit = (ch.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
            column = column
                .checked_mul(26)
                .and_then(|c| c.checked_add(digit))
                .ok_or_else(|| AppError::ParseError(format!("Column out of range: {reference}")))?;
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| AppError::ParseError(format!("Invalid row in cell reference: {reference}")))?;
        if row == 0 {
            return Err(AppError::ParseError(format!("Rows start at 1: {reference}")));
        }

        Ok(Self {
            row: row - 1,
            column: column - 1,
        })
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.column + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.reverse();
        write!(f, "{}{}", letters.into_iter().collect::<String>(), self.row + 1)
    }
}

/// Computed value of one cell. Formulas are never represented; only their cached result.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Date/time already rendered as `YYYY-MM-DD HH:MM:SS`
    DateTime(String),
    /// Excel error code such as `#N/A`
    Error(String),
}

impl CellValue {
    /// The one normalisation used before any comparison or substitution.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Int(value) => value.to_string(),
            CellValue::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{}", value)
                }
            }
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            CellValue::DateTime(text) => text.clone(),
            CellValue::Error(code) => code.clone(),
        }
    }

    /// Whether the cell holds something worth using: empty text, zero and false do not count.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(text) => !text.is_empty(),
            CellValue::Int(value) => *value != 0,
            CellValue::Float(value) => *value != 0.0,
            CellValue::Bool(value) => *value,
            CellValue::DateTime(_) | CellValue::Error(_) => true,
        }
    }

    pub fn is_text_like(&self) -> bool {
        matches!(self, CellValue::Empty | CellValue::Text(_))
    }
}

/// Sparse grid of cell values for one worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    cells: BTreeMap<CellRef, CellValue>,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, cell: CellRef, value: CellValue) {
        if value == CellValue::Empty {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, value);
        }
    }

    /// Builder-style setter used by readers and tests: `grid.with("D3", "Telia AB")`.
    pub fn with(mut self, reference: &str, value: impl Into<CellValue>) -> Result<Self> {
        let cell = CellRef::parse(reference)?;
        self.set(cell, value.into());
        Ok(self)
    }

    pub fn get(&self, cell: CellRef) -> &CellValue {
        self.cells.get(&cell).unwrap_or(&CellValue::Empty)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

/// Logical fields of an intake record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntakeField {
    CustomerName,
    DiscriminatorValue,
    TenantDescription,
    LandlordDescription,
    XCoordinate,
    YCoordinate,
    MastInfo,
}

impl IntakeField {
    pub const ALL: [IntakeField; 7] = [
        IntakeField::CustomerName,
        IntakeField::DiscriminatorValue,
        IntakeField::TenantDescription,
        IntakeField::LandlordDescription,
        IntakeField::XCoordinate,
        IntakeField::YCoordinate,
        IntakeField::MastInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IntakeField::CustomerName => "customer_name",
            IntakeField::DiscriminatorValue => "discriminator_value",
            IntakeField::TenantDescription => "tenant_description",
            IntakeField::LandlordDescription => "landlord_description",
            IntakeField::XCoordinate => "x_coordinate",
            IntakeField::YCoordinate => "y_coordinate",
            IntakeField::MastInfo => "mast_info",
        }
    }

    /// Name the field had in older price-sheet templates, when it differs.
    pub fn legacy_name(&self) -> Option<&'static str> {
        match self {
            IntakeField::DiscriminatorValue => Some("cell_d4_value"),
            IntakeField::TenantDescription => Some("tenant_desc"),
            IntakeField::LandlordDescription => Some("landlord_desc"),
            IntakeField::XCoordinate => Some("x_coord"),
            IntakeField::YCoordinate => Some("y_coord"),
            IntakeField::CustomerName | IntakeField::MastInfo => None,
        }
    }
}

/// Normalised result of extracting one intake sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub customer_name: String,
    pub discriminator_value: String,
    pub tenant_description: String,
    pub landlord_description: String,
    pub x_coordinate: String,
    pub y_coordinate: String,
    pub mast_info: String,
}

impl IntakeRecord {
    pub fn get(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::CustomerName => &self.customer_name,
            IntakeField::DiscriminatorValue => &self.discriminator_value,
            IntakeField::TenantDescription => &self.tenant_description,
            IntakeField::LandlordDescription => &self.landlord_description,
            IntakeField::XCoordinate => &self.x_coordinate,
            IntakeField::YCoordinate => &self.y_coordinate,
            IntakeField::MastInfo => &self.mast_info,
        }
    }

    pub(crate) fn set(&mut self, field: IntakeField, value: String) {
        let slot = match field {
            IntakeField::CustomerName => &mut self.customer_name,
            IntakeField::DiscriminatorValue => &mut self.discriminator_value,
            IntakeField::TenantDescription => &mut self.tenant_description,
            IntakeField::LandlordDescription => &mut self.landlord_description,
            IntakeField::XCoordinate => &mut self.x_coordinate,
            IntakeField::YCoordinate => &mut self.y_coordinate,
            IntakeField::MastInfo => &mut self.mast_info,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(CellRef::parse("A1").unwrap(), CellRef::new(0, 0));
        assert_eq!(CellRef::parse("D3").unwrap(), CellRef::new(2, 3));
        assert_eq!(CellRef::parse("e12").unwrap(), CellRef::new(11, 4));
        assert_eq!(CellRef::parse("AA10").unwrap(), CellRef::new(9, 26));
        assert_eq!(CellRef::parse("D3").unwrap(), CellRef::a1(b'D', 3));
    }

    #[test]
    fn test_parse_cell_ref_rejects_garbage() {
        assert!(CellRef::parse("").is_err());
        assert!(CellRef::parse("D").is_err());
        assert!(CellRef::parse("12").is_err());
        assert!(CellRef::parse("D0").is_err());
        assert!(CellRef::parse("D-3").is_err());
    }

    #[test]
    fn test_cell_ref_display_round_trips() {
        for reference in ["A1", "D3", "E12", "Z9", "AA10", "AZ7"] {
            assert_eq!(CellRef::parse(reference).unwrap().to_string(), reference);
        }
    }

    #[test]
    fn test_as_text_coerces_every_type() {
        assert_eq!(CellValue::Empty.as_text(), "");
        assert_eq!(CellValue::Text("Acme".into()).as_text(), "Acme");
        assert_eq!(CellValue::Int(42).as_text(), "42");
        assert_eq!(CellValue::Float(6578123.0).as_text(), "6578123");
        assert_eq!(CellValue::Float(59.3).as_text(), "59.3");
        assert_eq!(CellValue::Bool(true).as_text(), "True");
        assert_eq!(CellValue::Error("#N/A".into()).as_text(), "#N/A");
    }

    #[test]
    fn test_presence_follows_truthiness() {
        assert!(!CellValue::Empty.is_present());
        assert!(!CellValue::Text(String::new()).is_present());
        assert!(!CellValue::Float(0.0).is_present());
        assert!(!CellValue::Int(0).is_present());
        assert!(!CellValue::Bool(false).is_present());
        assert!(CellValue::Text(" ".into()).is_present());
        assert!(CellValue::Float(1.5).is_present());
    }

    #[test]
    fn test_grid_defaults_to_empty() {
        let grid = CellGrid::new().with("D3", "Telia AB").unwrap();
        assert_eq!(grid.get(CellRef::parse("D3").unwrap()).as_text(), "Telia AB");
        assert_eq!(grid.get(CellRef::parse("D4").unwrap()), &CellValue::Empty);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_record_get_and_set_by_field() {
        let mut record = IntakeRecord::default();
        for (idx, field) in IntakeField::ALL.iter().enumerate() {
            record.set(*field, format!("v{idx}"));
        }
        assert_eq!(record.get(IntakeField::MastInfo), "v6");
        assert_eq!(record.landlord_description, "v3");
    }
}
