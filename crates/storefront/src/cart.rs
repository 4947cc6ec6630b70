//! Session cart.
//!
//! Lines are keyed by `(product, size)`. Each line keeps the name, image and
//! unit price captured when it was first added; later catalog edits do not
//! reach lines already in the cart.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use rootsnjuices_core::{Price, Product, ProductId};

use crate::error::CartError;

/// One product/size pairing in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Size label; part of the line identity.
    pub size: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Unit price at the time the line was created.
    pub unit_price: Decimal,
    /// Product name at the time the line was created.
    pub name: String,
    /// Product image at the time the line was created.
    pub image: String,
}

impl CartLine {
    /// `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn is(&self, product_id: ProductId, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }
}

/// In-memory cart for the active session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a product/size pair.
    #[must_use]
    pub fn line(&self, product_id: ProductId, size: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.is(product_id, size))
    }

    /// Add one unit. An existing line for the same product and size is
    /// incremented; its captured price, name and image are left untouched.
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        size: &str,
        unit_price: Decimal,
        name: &str,
        image: &str,
    ) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.is(product_id, size)) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(%product_id, size, quantity = line.quantity, "cart line incremented");
            return;
        }

        self.lines.push(CartLine {
            product_id,
            size: size.to_owned(),
            quantity: 1,
            unit_price,
            name: name.to_owned(),
            image: image.to_owned(),
        });
        debug!(%product_id, size, "cart line added");
    }

    /// Add one unit of `product` in `size`, or in its default size.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not offer the requested size.
    pub fn add_product(&mut self, product: &Product, size: Option<&str>) -> Result<(), CartError> {
        let option = match size {
            Some(label) => product.size(label).ok_or_else(|| CartError::UnknownSize {
                product_id: product.id,
                size: label.to_owned(),
            })?,
            None => product
                .default_size()
                .ok_or(CartError::NoSizes(product.id))?,
        };

        self.add_to_cart(
            product.id,
            &option.label,
            option.price,
            &product.name,
            &product.image,
        );
        Ok(())
    }

    /// Set the quantity of a line. Zero or less removes it.
    ///
    /// Missing lines are left alone.
    pub fn update_quantity(&mut self, product_id: ProductId, size: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id, size);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|line| line.is(product_id, size)) {
            line.quantity = quantity;
            debug!(%product_id, size, quantity, "cart quantity set");
        }
    }

    /// Remove a line if present.
    pub fn remove_from_cart(&mut self, product_id: ProductId, size: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| !line.is(product_id, size));
        if self.lines.len() != before {
            debug!(%product_id, size, "cart line removed");
        }
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of `quantity × unit_price` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Display data for the cart panel.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.lines.iter().map(CartItemView::from).collect(),
            subtotal: Price::usd(self.total_price()).display(),
            item_count: self.total_items(),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub title: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartSummary {
    /// Create an empty cart summary.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            title: line.name.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            price: Price::usd(line.unit_price).display(),
            line_price: Price::usd(line.line_total()).display(),
            image: line.image.clone(),
        }
    }
}
