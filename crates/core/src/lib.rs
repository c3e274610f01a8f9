//! Loam Core - storefront domain library.
//!
//! This crate holds everything the storefront knows about products, carts,
//! and page state:
//! - [`catalog`] - The read-only product list
//! - [`cart`] - The visitor's cart and its derived totals
//! - [`presenter`] - View models and the UI event table
//! - [`tabs`] - Tab groups with a single active tab each
//! - [`contact`] - Contact form acknowledgment
//! - [`gate`] - The session password gate
//! - [`types`] - Newtype wrappers for IDs, prices, and weights
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no sessions,
//! no HTTP. The storefront binary loads state from the session, hands it to
//! these types, and writes it back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod gate;
pub mod presenter;
pub mod tabs;
pub mod types;

pub use cart::{CartLine, CartOutcome, CartStore};
pub use catalog::{Catalog, CatalogError, Product};
pub use contact::{ContactAck, ContactError};
pub use gate::{ACCESS_FLAG_KEY, ACCESS_FLAG_VALUE, AccessGate, GateAttempt, GateState};
pub use presenter::{
    CartLineView, CartView, CheckoutSummary, Effect, Presenter, ProductCardView, TabGroupView,
    TabView, UiEvent,
};
pub use tabs::{Selection, Tab, TabError, TabGroup, TabSet};
pub use types::*;
