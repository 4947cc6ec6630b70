//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;

/// A price in the store's currency (US dollars).
///
/// Catalog records store bare decimals; `Price` is the display-side wrapper
/// used when rendering cart lines and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in dollars, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Wrap a dollar amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.amount.round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
