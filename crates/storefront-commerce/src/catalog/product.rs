//! Products and the shop catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cart::ProductDescriptor;
use crate::catalog::CatalogFilter;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Child age bracket a product is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-3")]
    Infant,
    #[serde(rename = "3-6")]
    Preschool,
    #[serde(rename = "6-9")]
    EarlyPrimary,
    #[serde(rename = "9-12")]
    UpperPrimary,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Infant,
        AgeGroup::Preschool,
        AgeGroup::EarlyPrimary,
        AgeGroup::UpperPrimary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Infant => "0-3",
            AgeGroup::Preschool => "3-6",
            AgeGroup::EarlyPrimary => "6-9",
            AgeGroup::UpperPrimary => "9-12",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|age| age.as_str() == s.trim())
            .ok_or_else(|| CommerceError::unknown("age group", s))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format of a shop product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Downloadable printable sheets.
    Printable,
    /// Interactive digital book.
    Book,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Printable => "printable",
            ProductKind::Book => "book",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductKind::Printable => "Printable",
            ProductKind::Book => "Interactive Book",
        }
    }
}

impl FromStr for ProductKind {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "printable" => Ok(ProductKind::Printable),
            "book" => Ok(ProductKind::Book),
            _ => Err(CommerceError::unknown("product kind", s)),
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Money,
    pub image: String,
    pub age_group: AgeGroup,
    pub kind: ProductKind,
    /// Average rating out of 5.
    pub rating: f32,
    pub downloads: u32,
}

impl Product {
    /// The subset of fields the cart keeps. The price goes in as minor
    /// units and is read in the cart's currency.
    pub fn descriptor(&self) -> ProductDescriptor {
        ProductDescriptor::new(
            self.id.clone(),
            self.title.clone(),
            self.price.amount_minor,
            self.image.clone(),
        )
    }
}

/// The list of products offered in the shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The standard shop assortment, priced in `currency`.
    pub fn builtin(currency: Currency) -> Self {
        let product = |id: &str,
                       title: &str,
                       description: &str,
                       price: i64,
                       image: &str,
                       age_group: AgeGroup,
                       kind: ProductKind,
                       rating: f32,
                       downloads: u32| Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            price: Money::from_major(price, currency),
            image: format!("https://images.unsplash.com/{}?w=300&h=200&fit=crop", image),
            age_group,
            kind,
            rating,
            downloads,
        };

        Self::new(vec![
            product(
                "1",
                "Arabic Numbers Collection",
                "Comprehensive collection for teaching Arabic numbers to children",
                45,
                "photo-1503454537195-1dcabb73ffb9",
                AgeGroup::Preschool,
                ProductKind::Printable,
                4.8,
                1250,
            ),
            product(
                "2",
                "Interactive Letters Book",
                "Interactive digital book for teaching Arabic letters",
                65,
                "photo-1516627145497-ae4c8c73b1da",
                AgeGroup::Infant,
                ProductKind::Book,
                4.9,
                890,
            ),
            product(
                "3",
                "Practical Life Activities",
                "Practical life activities according to Montessori method",
                55,
                "photo-1509062522246-3755977927d7",
                AgeGroup::EarlyPrimary,
                ProductKind::Printable,
                4.7,
                654,
            ),
            product(
                "4",
                "Interactive Children Stories",
                "Collection of interactive educational stories for children",
                75,
                "photo-1481627834876-b7833e8f5570",
                AgeGroup::Preschool,
                ProductKind::Book,
                4.8,
                1100,
            ),
            product(
                "5",
                "Memory and Focus Games",
                "Educational games for developing memory and focus",
                40,
                "photo-1606092195730-5d7b9af1efc5",
                AgeGroup::EarlyPrimary,
                ProductKind::Printable,
                4.6,
                780,
            ),
            product(
                "6",
                "Science Activities Guide",
                "Comprehensive guide for science activities for children",
                85,
                "photo-1532094349884-543bc11b234d",
                AgeGroup::UpperPrimary,
                ProductKind::Book,
                4.9,
                420,
            ),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Like [`Catalog::get`] but reports a missing product as an error.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products matching `filter`, in catalog order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }
}
