//! ChartedArt Core - Shared types library.
//!
//! This crate provides common types used across all ChartedArt components:
//! - `storefront` - Public-facing e-commerce and community site
//! - `admin` - Internal administration service (elevated database role)
//! - `cli` - Command-line tools for migrations and admin management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, the print-kit
//!   catalog, and status enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
