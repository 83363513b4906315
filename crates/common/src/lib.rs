//! Shared building blocks for the storefront crates.
//! - Logging bootstrap (`utils::logging`).
//! - The `{ code, message, data }` JSON envelope every endpoint returns.

pub mod types;
pub mod utils;

pub use types::ApiResponse;
