//! Dashboard figures for the admin view.

use rust_decimal::Decimal;
use serde::Serialize;

use rootsnjuices_core::{Category, Product};

/// Share of reviewers assumed to stand for one purchase each.
const REVENUE_FACTOR: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Aggregate figures over a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_products: usize,
    /// Mean rating; zero for an empty catalog.
    pub average_rating: Decimal,
    pub total_reviews: u64,
    /// `Σ price × reviews × 0.1`.
    pub estimated_revenue: Decimal,
    /// Product count per category, in menu order. Empty categories are kept.
    pub by_category: Vec<(Category, usize)>,
}

impl CatalogStats {
    #[must_use]
    pub fn compute(products: &[Product]) -> Self {
        let total_products = products.len();

        let rating_sum: Decimal = products.iter().map(|p| p.rating).sum();
        let average_rating = if total_products == 0 {
            Decimal::ZERO
        } else {
            rating_sum / Decimal::from(total_products)
        };

        let total_reviews = products.iter().map(|p| u64::from(p.review_count)).sum();

        let estimated_revenue = products
            .iter()
            .map(|p| p.price * Decimal::from(p.review_count) * REVENUE_FACTOR)
            .sum();

        let by_category = Category::ALL
            .iter()
            .map(|&category| {
                let count = products.iter().filter(|p| p.category == category).count();
                (category, count)
            })
            .collect();

        Self {
            total_products,
            average_rating,
            total_reviews,
            estimated_revenue,
            by_category,
        }
    }

    /// Average rating rounded for display, e.g. `4.8`.
    #[must_use]
    pub fn average_rating_display(&self) -> String {
        format!("{:.1}", self.average_rating.round_dp(1))
    }
}

#[cfg(test)]
mod tests {
    use rootsnjuices_core::default_catalog;

    use super::*;

    #[test]
    fn test_empty_catalog() {
        let stats = CatalogStats::compute(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_rating, Decimal::ZERO);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.estimated_revenue, Decimal::ZERO);
        assert!(stats.by_category.iter().all(|&(_, count)| count == 0));
        assert_eq!(stats.average_rating_display(), "0.0");
    }

    #[test]
    fn test_default_catalog_figures() {
        let stats = CatalogStats::compute(&default_catalog());
        assert_eq!(stats.total_products, 15);
        assert_eq!(stats.total_reviews, 2486);
        assert_eq!(stats.average_rating_display(), "4.8");
        assert_eq!(
            stats.by_category,
            vec![
                (Category::Juices, 4),
                (Category::Smoothies, 4),
                (Category::Parfaits, 2),
                (Category::Shawarma, 2),
                (Category::Salads, 3),
            ]
        );
    }

    #[test]
    fn test_estimated_revenue() {
        let catalog = default_catalog();
        // 5.99 × 124 × 0.1 + 7.99 × 203 × 0.1
        let stats = CatalogStats::compute(&catalog[..2]);
        assert_eq!(stats.estimated_revenue, Decimal::new(236_473, 3));
    }
}
