//! Shop catalog module.
//!
//! Contains the product type, its classification enums, filtering, and the
//! course list.

mod course;
mod filter;
mod product;

pub use course::{Course, CourseLevel, Lesson};
pub use filter::CatalogFilter;
pub use product::{AgeGroup, Catalog, Product, ProductKind};
