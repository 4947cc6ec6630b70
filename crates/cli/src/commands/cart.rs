//! Cart quote command.
//!
//! # Usage
//!
//! ```bash
//! # Two small orange juices and a large acai bowl
//! rnj-cli cart quote 1 1 6:Large
//! ```

use tracing::info;

use rootsnjuices_core::ProductId;
use rootsnjuices_storefront::{CartSummary, Session, Storage};

use super::CliError;

/// One `id` or `id:size` item argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub product_id: ProductId,
    pub size: Option<String>,
}

impl std::str::FromStr for QuoteItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, size) = match s.split_once(':') {
            Some((id, size)) => (id, Some(size.trim())),
            None => (s, None),
        };
        let product_id = id
            .trim()
            .parse::<i32>()
            .map(ProductId::new)
            .map_err(|_| format!("invalid product id: {id:?}"))?;
        let size = size.filter(|s| !s.is_empty()).map(str::to_owned);
        Ok(Self { product_id, size })
    }
}

/// Fill the session cart with `items` and log the resulting quote.
///
/// # Errors
///
/// Returns an error if an item names an unknown product or size.
pub fn quote<S: Storage>(
    session: &mut Session<S>,
    items: &[QuoteItem],
) -> Result<CartSummary, CliError> {
    for item in items {
        session.add_to_cart(item.product_id, item.size.as_deref())?;
    }

    let summary = session.checkout_quote();
    for line in &summary.items {
        info!(
            "{:>3} × {:<34} {:<10} {:>8}",
            line.quantity, line.title, line.size, line.line_price
        );
    }
    info!("Items: {}", summary.item_count);
    info!("Subtotal: {}", summary.subtotal);
    Ok(summary)
}
