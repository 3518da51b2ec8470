//! Question catalog implementations.

mod builtin;
pub mod static_catalog;

pub use static_catalog::{CatalogError, DEFAULT_CATEGORY, StaticQuestionCatalog};
