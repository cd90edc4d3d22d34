//! Bluewater Core - Shared types library.
//!
//! This crate provides common types used across the Bluewater components:
//! - `admin` - Back-office panel (products, brands, RFQs, users, eBay)
//! - `cli` - Operator command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! Everything here describes records as the REST backend exchanges them, so
//! the types are deliberately lenient when reading (numeric or string ids,
//! `null` collections) and strict when validating operator input.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, emails, statuses, pagination and serde helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
