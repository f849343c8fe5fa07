//! Category module
//!
//! Categories are a reference table; tasks point at them by id.

mod model;
mod repository;
mod sqlite_store;

pub use model::Category;
pub use repository::CategoryRepository;
pub use sqlite_store::SqliteCategoryStore;
