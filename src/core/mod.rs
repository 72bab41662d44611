//! Catalog core: loading, indexing, paging and file resolution

pub mod catalog;
pub mod error;
pub mod index;
pub mod kind;
pub mod loader;
pub mod pagination;
pub mod query;
pub mod record;
pub mod resolver;
