//! Materials and product categories.
//!
//! A [`Material`] is the unit of traceability: a registered batch of goods
//! carrying a reference to its [`ProductCategory`]. Materials are immutable
//! once registered on-chain; this crate only models them, registration
//! happens through the external contracts.

use serde::{Deserialize, Serialize};

use crate::id::{CategoryId, MaterialId};

/// A product category (e.g. "Arabica green beans, grade 1").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Quality score assigned at registration.
    pub quality: u8,
    /// Free-form description.
    pub description: String,
}

impl ProductCategory {
    /// Creates a category with the given identity and attributes.
    pub fn new(id: CategoryId, name: impl Into<String>, quality: u8, description: impl Into<String>) -> Self {
        ProductCategory {
            id,
            name: name.into(),
            quality,
            description: description.into(),
        }
    }
}

/// A registered material batch.
///
/// Identity is the platform-unique [`MaterialId`]; the only attribute is the
/// product category reference. Never mutated by the graph layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Platform-unique material identifier.
    pub id: MaterialId,
    /// The category this batch belongs to.
    pub category: ProductCategory,
}

impl Material {
    /// Creates a material with the given id and category.
    pub fn new(id: MaterialId, category: ProductCategory) -> Self {
        Material { id, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_construction() {
        let cat = ProductCategory::new(CategoryId(3), "Arabica", 87, "washed process");
        assert_eq!(cat.id, CategoryId(3));
        assert_eq!(cat.name, "Arabica");
        assert_eq!(cat.quality, 87);
    }

    #[test]
    fn material_carries_category() {
        let cat = ProductCategory::new(CategoryId(1), "Robusta", 60, "");
        let material = Material::new(MaterialId(9), cat.clone());
        assert_eq!(material.id, MaterialId(9));
        assert_eq!(material.category, cat);
    }
}
