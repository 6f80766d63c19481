// ============================================================
// FIELD EXTRACTION USE CASE
// ============================================================
// Intake workbook -> IntakeRecord via the declarative rule table

use tracing::debug;

use crate::domain::error::Result;
use crate::domain::intake::{CellGrid, IntakeRecord};

mod rules;
mod workbook;

pub use rules::{
    Acceptance, CellCandidate, FieldRule, Resolution, RuleCondition, RuleContext, INTAKE_RULES,
    LANDLORD_SENTINEL,
};

pub struct FieldExtractor {
    rules: &'static [FieldRule],
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            rules: INTAKE_RULES,
        }
    }

    /// Extract a record from an already loaded grid.
    ///
    /// Pure: the same grid always yields the same record.
    pub fn extract(&self, grid: &CellGrid) -> IntakeRecord {
        let mut record = IntakeRecord::default();
        let mut context = RuleContext::default();

        for rule in self.rules {
            let resolution = rule.resolve(grid, &context);
            let source = resolution
                .source
                .map(|cell| cell.to_string())
                .unwrap_or_else(|| "-".to_string());
            debug!(
                field = rule.field.name(),
                source = %source,
                coerced = resolution.coerced,
                value = %resolution.value,
                "Resolved intake field"
            );
            record.set(rule.field, resolution.value);
            context = RuleContext::from_record(&record);
        }

        record
    }

    /// Read an xlsx workbook and extract its record.
    pub fn extract_workbook(&self, content: &[u8]) -> Result<IntakeRecord> {
        let grid = self.read_intake_grid(content)?;
        Ok(self.extract(&grid))
    }
}
