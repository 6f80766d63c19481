// ============================================================
// INTAKE RULE TABLE
// ============================================================
// field -> ordered (condition, cell, acceptance) candidates
// Evaluated top-down; the first satisfied candidate wins

use crate::application::use_cases::customer_classifier::mentions_telia;
use crate::domain::intake::{CellGrid, CellRef, CellValue, IntakeField, IntakeRecord};

/// Header text that badly filled sheets leave in the landlord cells.
pub const LANDLORD_SENTINEL: &str = "Hyresvärds uppgifter";

/// What is known about the sheet while later fields are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleContext {
    pub mentions_telia: bool,
}

impl RuleContext {
    pub fn from_record(record: &IntakeRecord) -> Self {
        Self {
            mentions_telia: mentions_telia(&record.customer_name, &record.discriminator_value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCondition {
    Always,
    MentionsTelia,
}

impl RuleCondition {
    fn holds(&self, context: &RuleContext) -> bool {
        match self {
            RuleCondition::Always => true,
            RuleCondition::MentionsTelia => context.mentions_telia,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Take whatever the cell holds, empty included
    AnyValue,
    /// Non-empty, non-zero
    Present,
    /// Present and not equal to the given text
    PresentExcept(&'static str),
}

impl Acceptance {
    fn accepts(&self, value: &CellValue) -> bool {
        match self {
            Acceptance::AnyValue => true,
            Acceptance::Present => value.is_present(),
            Acceptance::PresentExcept(excluded) => {
                value.is_present() && value.as_text() != *excluded
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CellCandidate {
    pub condition: RuleCondition,
    pub cell: CellRef,
    pub acceptance: Acceptance,
}

const fn any(column: u8, row: u32) -> CellCandidate {
    CellCandidate {
        condition: RuleCondition::Always,
        cell: CellRef::a1(column, row),
        acceptance: Acceptance::AnyValue,
    }
}

const fn present(column: u8, row: u32) -> CellCandidate {
    CellCandidate {
        condition: RuleCondition::Always,
        cell: CellRef::a1(column, row),
        acceptance: Acceptance::Present,
    }
}

const fn not_sentinel(column: u8, row: u32) -> CellCandidate {
    CellCandidate {
        condition: RuleCondition::Always,
        cell: CellRef::a1(column, row),
        acceptance: Acceptance::PresentExcept(LANDLORD_SENTINEL),
    }
}

const fn telia_present(column: u8, row: u32) -> CellCandidate {
    CellCandidate {
        condition: RuleCondition::MentionsTelia,
        cell: CellRef::a1(column, row),
        acceptance: Acceptance::Present,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: IntakeField,
    pub candidates: &'static [CellCandidate],
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: String,
    /// Cell the value came from; `None` when no candidate was satisfied
    pub source: Option<CellRef>,
    pub coerced: bool,
}

impl FieldRule {
    pub fn resolve(&self, grid: &CellGrid, context: &RuleContext) -> Resolution {
        for candidate in self.candidates {
            if !candidate.condition.holds(context) {
                continue;
            }
            let value = grid.get(candidate.cell);
            if candidate.acceptance.accepts(value) {
                return Resolution {
                    value: value.as_text(),
                    source: Some(candidate.cell),
                    coerced: !value.is_text_like(),
                };
            }
        }

        Resolution {
            value: String::new(),
            source: None,
            coerced: false,
        }
    }
}

/// The intake layout. Classification fields come first so later conditions can see them.
///
/// Landlord uses the generic sentinel chain for every customer, Telia included.
pub const INTAKE_RULES: &[FieldRule] = &[
    FieldRule {
        field: IntakeField::CustomerName,
        candidates: &[any(b'D', 3)],
    },
    FieldRule {
        field: IntakeField::DiscriminatorValue,
        candidates: &[any(b'D', 4)],
    },
    FieldRule {
        field: IntakeField::TenantDescription,
        candidates: &[telia_present(b'D', 6), any(b'D', 8)],
    },
    FieldRule {
        field: IntakeField::LandlordDescription,
        candidates: &[not_sentinel(b'E', 9), not_sentinel(b'E', 7), any(b'E', 9)],
    },
    FieldRule {
        field: IntakeField::XCoordinate,
        candidates: &[present(b'D', 10), any(b'D', 9)],
    },
    FieldRule {
        field: IntakeField::YCoordinate,
        candidates: &[present(b'D', 11), any(b'D', 9)],
    },
    FieldRule {
        field: IntakeField::MastInfo,
        candidates: &[any(b'E', 12)],
    },
];
