//! Domain models for the admin panel.
//!
//! Records exchanged with the REST backend plus the session user.

pub mod brand;
pub mod ebay;
pub mod product;
pub mod quote;
pub mod session;
pub mod stats;
pub mod user;

pub use brand::{Brand, BrandInput, FaqList};
pub use ebay::{EbayConnection, SyncPage, SyncProgress, SyncReport};
pub use product::{Product, ProductInput, ProductPage, ProductQuery};
pub use quote::Quote;
pub use session::{BearerToken, Credentials, CurrentAdmin, keys as session_keys};
pub use stats::DashboardStats;
pub use user::{NewUser, User, UserUpdate};
