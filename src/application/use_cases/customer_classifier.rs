//! Customer classification for intake sheets.
//!
//! Matches lower-cased substrings of the customer name (D3) and the
//! discriminator cell (D4) against an ordered rule list. The first rule that
//! matches wins, so `3GIS` beats `Hi3G`, which beats `Telia`.

use crate::domain::customer::CustomerIdentity;

struct CustomerRule {
    customer: CustomerIdentity,
    /// Needles searched in the lower-cased customer name
    name_needles: &'static [&'static str],
    /// Needles searched in the lower-cased discriminator value
    discriminator_needles: &'static [&'static str],
}

impl CustomerRule {
    fn matches(&self, name_lower: &str, discriminator_lower: &str) -> bool {
        self.name_needles.iter().any(|n| name_lower.contains(n))
            || self
                .discriminator_needles
                .iter()
                .any(|n| discriminator_lower.contains(n))
    }
}

const TELIA_NAME_NEEDLES: &[&str] = &["telia"];
const TELIA_DISCRIMINATOR_NEEDLES: &[&str] = &["telia sverige ab"];

const CUSTOMER_RULES: &[CustomerRule] = &[
    CustomerRule {
        customer: CustomerIdentity::ThreeGis,
        name_needles: &["3gis"],
        discriminator_needles: &[],
    },
    CustomerRule {
        customer: CustomerIdentity::Hi3g,
        // "hi3g access ab" is a superstring of "hi3g"
        name_needles: &["hi3g"],
        discriminator_needles: &[],
    },
    CustomerRule {
        customer: CustomerIdentity::Telia,
        name_needles: TELIA_NAME_NEEDLES,
        discriminator_needles: TELIA_DISCRIMINATOR_NEEDLES,
    },
];

/// Identify the customer an intake sheet belongs to.
pub fn classify(customer_name: &str, discriminator_value: &str) -> CustomerIdentity {
    let name_lower = customer_name.to_lowercase();
    let discriminator_lower = discriminator_value.to_lowercase();

    CUSTOMER_RULES
        .iter()
        .find(|rule| rule.matches(&name_lower, &discriminator_lower))
        .map(|rule| rule.customer)
        .unwrap_or(CustomerIdentity::Unknown)
}

/// Whether either classification field points at Telia, regardless of precedence.
///
/// Field extraction uses this on its own: a sheet naming both 3GIS and Telia is
/// classified as 3GIS but still reads the Telia tenant cell.
pub fn mentions_telia(customer_name: &str, discriminator_value: &str) -> bool {
    let name_lower = customer_name.to_lowercase();
    let discriminator_lower = discriminator_value.to_lowercase();

    TELIA_NAME_NEEDLES.iter().any(|n| name_lower.contains(n))
        || TELIA_DISCRIMINATOR_NEEDLES
            .iter()
            .any(|n| discriminator_lower.contains(n))
}
