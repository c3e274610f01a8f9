//! The shopping cart.
//!
//! A [`CartStore`] is an ordered list of [`CartLine`]s, one per product, in
//! the order products were first added. Totals are computed on demand from
//! the lines and the catalog and are never stored.
//!
//! Mutating operations return a [`CartOutcome`] rather than failing: a stale
//! button referencing a product that is no longer in the cart or catalog must
//! never take the page down, but callers still get to log it.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Pounds, Price, ProductId};

/// Result of a cart mutation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// The referenced line was found and the operation applied.
    Updated,
    /// The referenced product is not in the catalog (for adds) or not in the
    /// cart (for everything else). Nothing changed.
    NotFound,
}

impl CartOutcome {
    #[must_use]
    pub const fn is_updated(self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Short label for structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::NotFound => "not_found",
        }
    }
}

/// One product-plus-quantity entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product_id: ProductId,
    /// Always at least 1.
    quantity: u32,
}

impl CartLine {
    fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// The visitor's cart.
///
/// Serializable so it can be kept in session storage between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a catalog product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    /// Unknown products leave the cart untouched.
    pub fn add_item(&mut self, catalog: &Catalog, product_id: &str) -> CartOutcome {
        let Some(product) = catalog.find(product_id) else {
            return CartOutcome::NotFound;
        };

        match self.line_mut(product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(product.id.clone())),
        }
        CartOutcome::Updated
    }

    /// Delete the line for a product regardless of its quantity.
    pub fn remove_item(&mut self, product_id: &str) -> CartOutcome {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.product_id.as_str() != product_id);

        if self.lines.len() == before {
            CartOutcome::NotFound
        } else {
            CartOutcome::Updated
        }
    }

    /// Adjust a line's quantity by `delta`, flooring at 1.
    ///
    /// Decrementing never deletes a line; use [`Self::remove_item`] for that.
    pub fn change_quantity(&mut self, product_id: &str, delta: i64) -> CartOutcome {
        let Some(line) = self.line_mut(product_id) else {
            return CartOutcome::NotFound;
        };

        let next = i64::from(line.quantity).saturating_add(delta).max(1);
        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        CartOutcome::Updated
    }

    /// Sum of unit price × quantity over every line.
    ///
    /// Lines whose product is missing from `catalog` contribute nothing.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Price {
        self.priced_lines(catalog)
            .fold(Price::zero(catalog.currency()), |sum, (product, qty)| {
                sum + product.price * qty
            })
    }

    /// Sum of unit weight × quantity over every line.
    #[must_use]
    pub fn total_weight(&self, catalog: &Catalog) -> Pounds {
        self.priced_lines(catalog)
            .map(|(product, qty)| product.weight.times(qty))
            .sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity for a product, if it is in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.line(product_id).map(CartLine::quantity)
    }

    /// Drop lines whose product no longer exists in `catalog`.
    ///
    /// Returns the number of lines removed.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| catalog.contains(line.product_id.as_str()));
        before - self.lines.len()
    }

    fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id.as_str() == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id.as_str() == product_id)
    }

    fn priced_lines<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a Product, u32)> + 'a {
        self.lines.iter().filter_map(move |line| {
            catalog
                .find(line.product_id.as_str())
                .map(|product| (product, line.quantity))
        })
    }
}
