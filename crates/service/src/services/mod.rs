//! Entity resources plugged into [`CrudService`](crate::crud::CrudService).
//!
//! Each module declares the entity's create/update inputs, its query
//! allow-list and its validation hooks.

pub mod category;
pub mod product;
pub mod user;
pub mod order;
pub mod advertisement;
pub mod partner;
pub mod site_config;

pub use advertisement::{AdvertisementService, Advertisements};
pub use category::{Categories, CategoryService};
pub use order::{OrderService, Orders};
pub use partner::{PartnerService, Partners};
pub use product::{ProductService, Products};
pub use site_config::{SiteConfigService, SiteConfigs};
pub use user::{UserService, Users};
