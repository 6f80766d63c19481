//! Placeholder vocabulary shared with template authors.
//!
//! Tokens are written `--::NAME::--`, literal and case-sensitive. Contracts use the
//! five canonical names; price sheets additionally accept the upper-cased record
//! field names and their historical aliases.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

use crate::domain::intake::{IntakeField, IntakeRecord};

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--::([A-Za-z0-9_]+)::--").expect("token pattern is valid"));

pub const TOKEN_OPEN: &str = "--::";

/// Canonical contract tokens and the field each one carries.
pub const CONTRACT_TOKENS: [(&str, IntakeField); 5] = [
    ("HYRESVARD", IntakeField::LandlordDescription),
    ("HYRESGAST", IntakeField::TenantDescription),
    ("x_coordinate", IntakeField::XCoordinate),
    ("y_coordinate", IntakeField::YCoordinate),
    ("masttyp_hojd", IntakeField::MastInfo),
];

/// Token name to replacement value for one record.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderValues {
    values: HashMap<String, String>,
}

impl PlaceholderValues {
    /// Vocabulary for rich-text contracts: the five canonical tokens only.
    pub fn for_contract(record: &IntakeRecord) -> Self {
        let mut values = HashMap::new();
        for (name, field) in CONTRACT_TOKENS {
            values.insert(name.to_string(), record.get(field).to_string());
        }
        Self { values }
    }

    /// Vocabulary for price sheets: every record field upper-cased, legacy aliases,
    /// and the canonical contract tokens.
    pub fn for_price_sheet(record: &IntakeRecord) -> Self {
        let mut values = Self::for_contract(record).values;
        for field in IntakeField::ALL {
            let value = record.get(field).to_string();
            values.insert(field.name().to_uppercase(), value.clone());
            if let Some(legacy) = field.legacy_name() {
                values.insert(legacy.to_uppercase(), value);
            }
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Replace every known token in `text` in a single pass.
    ///
    /// Returns `None` when nothing was replaced. Unknown tokens stay in place and
    /// substituted values are never scanned again.
    pub fn substitute(&self, text: &str) -> Option<String> {
        if !text.contains(TOKEN_OPEN) {
            return None;
        }

        let mut replaced = false;
        let result = TOKEN_PATTERN.replace_all(text, |caps: &Captures<'_>| {
            match self.values.get(&caps[1]) {
                Some(value) => {
                    replaced = true;
                    value.clone()
                }
                None => caps[0].to_string(),
            }
        });

        if replaced {
            Some(result.into_owned())
        } else {
            None
        }
    }
}
