// ============================================================
// PLACEHOLDER SUBSTITUTION
// ============================================================
// Contract templates: docx runs (rich_text)
// Price-sheet templates: xlsx cell values (tabular)

use tracing::debug;

use crate::domain::artifact::TemplateAsset;
use crate::domain::customer::TemplateKind;
use crate::domain::error::Result;
use crate::domain::intake::IntakeRecord;
use crate::domain::placeholder::PlaceholderValues;

pub mod rich_text;
pub mod tabular;

/// Fill a template with the values of one record.
pub fn render(template: &TemplateAsset, record: &IntakeRecord) -> Result<Vec<u8>> {
    let (content, replaced) = match template.kind {
        TemplateKind::Contract => {
            rich_text::fill_contract(&template.content, &PlaceholderValues::for_contract(record))?
        }
        TemplateKind::PriceSheet => tabular::fill_price_sheet(
            &template.content,
            &PlaceholderValues::for_price_sheet(record),
        )?,
    };

    debug!(
        customer = %template.customer,
        template = %template.kind,
        replaced,
        "Filled template"
    );

    Ok(content)
}
