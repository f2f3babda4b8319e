//! Catalog filtering.

use serde::{Deserialize, Serialize};

use crate::catalog::{AgeGroup, Product, ProductKind};

/// Shop filter. `None` on a criterion means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub age_group: Option<AgeGroup>,
    pub kind: Option<ProductKind>,
}

impl CatalogFilter {
    /// A filter that matches every product.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = Some(age_group);
        self
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// A product matches when it satisfies every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        let age_match = self.age_group.map_or(true, |age| product.age_group == age);
        let kind_match = self.kind.map_or(true, |kind| product.kind == kind);
        age_match && kind_match
    }
}
