//! Core types for Bluewater.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod pagination;
pub mod serde_helpers;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use pagination::{PageRequest, Pagination};
pub use status::*;
