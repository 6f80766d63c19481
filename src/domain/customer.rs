// ============================================================
// CUSTOMER IDENTITY & TEMPLATE KIND
// ============================================================
// Closed sets used to key templates and name output artifacts

use serde::{Deserialize, Serialize};

/// Operator an intake sheet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CustomerIdentity {
    ThreeGis,
    Hi3g,
    Telia,
    Unknown,
}

impl CustomerIdentity {
    /// Every customer that can own templates, in classification order.
    pub const KNOWN: [CustomerIdentity; 3] = [
        CustomerIdentity::ThreeGis,
        CustomerIdentity::Hi3g,
        CustomerIdentity::Telia,
    ];

    /// Label used in template paths, artifact names and result folders.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerIdentity::ThreeGis => "3GIS",
            CustomerIdentity::Hi3g => "Hi3G",
            CustomerIdentity::Telia => "Telia",
            CustomerIdentity::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CustomerIdentity::Unknown)
    }
}

impl std::fmt::Display for CustomerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The two documents produced for every classified intake sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Rich-text agreement (`Avtalsmall`, docx)
    Contract,

    /// Price calculation workbook (`Prisberakningsmall`, xlsx)
    PriceSheet,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::Contract, TemplateKind::PriceSheet];

    /// File name prefix shared by templates and artifacts of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            TemplateKind::Contract => "Avtalsmall",
            TemplateKind::PriceSheet => "Prisberakningsmall",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TemplateKind::Contract => "docx",
            TemplateKind::PriceSheet => "xlsx",
        }
    }

    /// Template file name for a customer, e.g. `Avtalsmall_Telia.docx`.
    pub fn template_file_name(&self, customer: CustomerIdentity) -> String {
        format!("{}_{}.{}", self.prefix(), customer.label(), self.extension())
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Contract => write!(f, "Contract"),
            TemplateKind::PriceSheet => write!(f, "PriceSheet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_file_names_follow_customer_layout() {
        assert_eq!(
            TemplateKind::Contract.template_file_name(CustomerIdentity::ThreeGis),
            "Avtalsmall_3GIS.docx"
        );
        assert_eq!(
            TemplateKind::PriceSheet.template_file_name(CustomerIdentity::Hi3g),
            "Prisberakningsmall_Hi3G.xlsx"
        );
    }

    #[test]
    fn test_unknown_is_not_known() {
        assert!(!CustomerIdentity::Unknown.is_known());
        assert!(CustomerIdentity::KNOWN.iter().all(|c| c.is_known()));
    }
}
