//! SeaORM entities for the storefront schema plus the field validators shared by
//! the service layer. Table layouts live in the `migration` crate.

pub mod errors;
pub mod db;
pub mod validate;
pub mod category;
pub mod product;
pub mod user;
pub mod order;
pub mod advertisement;
pub mod partner;
pub mod site_config;
