//! Service layer for the storefront API.
//! - `query`: allow-listed filter/sort/pagination over any entity.
//! - `crud`: the generic [`CrudService`] and the [`Resource`] trait entities implement.
//! - `services`: one resource per storefront entity with its validation hooks.

pub mod errors;
pub mod pagination;
pub mod query;
pub mod crud;
pub mod services;
#[cfg(test)]
mod test_support;

pub use crud::{CrudService, Resource};
pub use errors::ServiceError;
pub use pagination::{PageResult, Pagination};
pub use query::{Filter, FilterOp, SortDirection, SortSpec};
