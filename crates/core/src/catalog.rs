//! The product catalog.
//!
//! The catalog is read-only after construction. The storefront ships with a
//! built-in set of four products and can replace it with a JSON file at start-up.
//!
//! # File format
//!
//! ```json
//! [
//!   {
//!     "id": "starter",
//!     "name": "Kitchen Garden Starter",
//!     "description": "5 lb bag ideal for raised beds.",
//!     "price": "24.00",
//!     "pounds": 5,
//!     "tag": "Best for beginners",
//!     "image": "https://images.example.com/starter.jpg"
//!   }
//! ]
//! ```
//!
//! `currency` may be given per product and defaults to `USD`.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Pounds, Price, ProductId};

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file is not valid catalog JSON.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog has no products.
    #[error("catalog must contain at least one product")]
    Empty,
    /// Two products share an identifier.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// A product record failed validation.
    #[error("product {id}: {reason}")]
    InvalidProduct {
        /// Offending product identifier (may be empty).
        id: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// A product offered in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Unit shipping weight.
    pub weight: Pounds,
    /// Category tag shown on the product card.
    pub tag: String,
    /// Image URL.
    pub image: String,
}

/// Product record as it appears in a catalog file.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    currency: CurrencyCode,
    pounds: u64,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    image: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CatalogError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let invalid = |reason| CatalogError::InvalidProduct {
            id: record.id.clone(),
            reason,
        };

        if record.id.trim().is_empty() {
            return Err(invalid("id cannot be empty"));
        }
        if record.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if record.price <= Decimal::ZERO {
            return Err(invalid("price must be positive"));
        }
        if record.pounds == 0 {
            return Err(invalid("weight must be positive"));
        }

        Ok(Self {
            id: ProductId::new(record.id),
            name: record.name,
            description: record.description,
            price: Price::new(record.price, record.currency),
            weight: Pounds::new(record.pounds),
            tag: record.tag,
            image: record.image,
        })
    }
}

/// An ordered, immutable list of products with unique identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] or [`CatalogError::DuplicateId`].
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Self { products })
    }

    /// Parse and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any record is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let products = records
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(products)
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id.as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency the catalog is priced in (that of its first product).
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.products
            .first()
            .map(|product| product.price.currency_code)
            .unwrap_or_default()
    }
}

impl Default for Catalog {
    /// The built-in soil amendment line.
    fn default() -> Self {
        let product = |id: &str, name: &str, description: &str, price: i64, pounds: u64, tag: &str, image: &str| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            price: Price::usd(price),
            weight: Pounds::new(pounds),
            tag: tag.to_owned(),
            image: image.to_owned(),
        };

        Self {
            products: vec![
                product(
                    "starter",
                    "Kitchen Garden Starter",
                    "5 lb bag ideal for raised beds, herbs, and container veg.",
                    24,
                    5,
                    "Best for beginners",
                    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&w=600&q=80",
                ),
                product(
                    "grower",
                    "Market Grower Blend",
                    "20 lb sack with extra calcium for heavy-feeding crops.",
                    69,
                    20,
                    "Market gardens",
                    "https://images.unsplash.com/photo-1498654896293-37aacf113fd9?auto=format&fit=crop&w=600&q=80",
                ),
                product(
                    "compost",
                    "Compost Catalyst",
                    "10 lb frass + biochar blend to accelerate thermal compost.",
                    52,
                    10,
                    "Soil biology",
                    "https://images.unsplash.com/photo-1457530378978-8bac673b8062?auto=format&fit=crop&w=600&q=80",
                ),
                product(
                    "bulk",
                    "Landscape Tote (1000 lb)",
                    "Delivered in a breathable tote with moisture monitoring.",
                    480,
                    1000,
                    "Wholesale",
                    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?auto=format&fit=crop&w=600&q=80",
                ),
            ],
        }
    }
}
