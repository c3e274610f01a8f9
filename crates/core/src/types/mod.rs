//! Value types for the Loam storefront.
//!
//! This module provides type-safe wrappers for identifiers, money, and weight.

pub mod id;
pub mod price;
pub mod weight;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use weight::Pounds;
