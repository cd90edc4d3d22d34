//! Reusable view components.
//!
//! - `filter_bar` - GET filter forms above listings

pub mod filter_bar;

pub use filter_bar::{FilterBar, FilterField, FilterKind, FilterOption, product_filter_bar};
