use std::collections::HashMap;

use crate::domain::artifact::TemplateAsset;
use crate::domain::customer::{CustomerIdentity, TemplateKind};

/// Templates available for a run, keyed by `(customer, kind)`.
///
/// Populated by the caller before a batch starts and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<(CustomerIdentity, TemplateKind), TemplateAsset>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any earlier one for the same key.
    pub fn insert(&mut self, asset: TemplateAsset) -> Option<TemplateAsset> {
        self.templates.insert((asset.customer, asset.kind), asset)
    }

    pub fn with(mut self, asset: TemplateAsset) -> Self {
        self.insert(asset);
        self
    }

    pub fn lookup(&self, customer: CustomerIdentity, kind: TemplateKind) -> Option<&TemplateAsset> {
        self.templates.get(&(customer, kind))
    }

    /// Every `(customer, kind)` pair without a template, in a stable order.
    pub fn missing_templates(&self) -> Vec<(CustomerIdentity, TemplateKind)> {
        let mut missing = Vec::new();
        for customer in CustomerIdentity::KNOWN {
            for kind in TemplateKind::ALL {
                if self.lookup(customer, kind).is_none() {
                    missing.push((customer, kind));
                }
            }
        }
        missing
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(customer: CustomerIdentity, kind: TemplateKind) -> TemplateAsset {
        TemplateAsset::new(customer, kind, vec![1, 2, 3])
    }

    #[test]
    fn test_lookup_by_customer_and_kind() {
        let registry = TemplateRegistry::new()
            .with(asset(CustomerIdentity::Telia, TemplateKind::Contract));

        assert!(registry
            .lookup(CustomerIdentity::Telia, TemplateKind::Contract)
            .is_some());
        assert!(registry
            .lookup(CustomerIdentity::Telia, TemplateKind::PriceSheet)
            .is_none());
        assert!(registry
            .lookup(CustomerIdentity::Hi3g, TemplateKind::Contract)
            .is_none());
    }

    #[test]
    fn test_missing_templates_lists_gaps_in_order() {
        let mut registry = TemplateRegistry::new();
        for customer in CustomerIdentity::KNOWN {
            registry.insert(asset(customer, TemplateKind::Contract));
        }
        registry.insert(asset(CustomerIdentity::Hi3g, TemplateKind::PriceSheet));

        assert_eq!(
            registry.missing_templates(),
            vec![
                (CustomerIdentity::ThreeGis, TemplateKind::PriceSheet),
                (CustomerIdentity::Telia, TemplateKind::PriceSheet),
            ]
        );
    }

    #[test]
    fn test_insert_replaces_previous() {
        let mut registry = TemplateRegistry::new();
        assert!(registry
            .insert(asset(CustomerIdentity::Telia, TemplateKind::Contract))
            .is_none());
        assert!(registry
            .insert(asset(CustomerIdentity::Telia, TemplateKind::Contract))
            .is_some());
        assert_eq!(registry.len(), 1);
    }
}
