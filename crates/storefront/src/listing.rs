//! Product listing: price/tag filters, sort orders, and the curated product
//! selections shown on the home and detail pages.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rootsnjuices_core::{CategoryFilter, Product};

/// Related products shown under a product's detail view.
pub const RELATED_PRODUCTS_LIMIT: usize = 3;

/// Products featured on the home page.
pub const FEATURED_PRODUCTS_LIMIT: usize = 6;

/// Upper bound of the listing price slider.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most reviewed first.
    #[default]
    Popular,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Highest rated first.
    Rating,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Filters and ordering applied on the products page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Inclusive lower price bound.
    pub min_price: Decimal,
    /// Inclusive upper price bound.
    pub max_price: Decimal,
    /// Selected tags; a product matches if it carries any of them.
    pub tags: Vec<String>,
    pub sort: SortOrder,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            min_price: Decimal::ZERO,
            max_price: DEFAULT_MAX_PRICE,
            tags: Vec::new(),
            sort: SortOrder::default(),
        }
    }
}

impl ListingQuery {
    /// Whether `product` passes the price and tag filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        product.price >= self.min_price
            && product.price <= self.max_price
            && (self.tags.is_empty() || self.tags.iter().any(|tag| product.has_tag(tag)))
    }

    /// Filter and sort `products`. The sort is stable.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut listed: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Popular => listed.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            SortOrder::PriceLow => listed.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => listed.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Rating => listed.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }
        listed
    }
}

/// Distinct tags across `products`, in first-seen order.
#[must_use]
pub fn available_tags(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .flat_map(|p| p.tags.iter())
        .filter(|tag| seen.insert(*tag))
        .cloned()
        .collect()
}

/// Other products in the same category, in catalog order.
#[must_use]
pub fn related_products(catalog: &[Product], product: &Product, limit: usize) -> Vec<Product> {
    catalog
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .cloned()
        .collect()
}

/// Popular or new products, in catalog order.
#[must_use]
pub fn featured_products(catalog: &[Product], limit: usize) -> Vec<Product> {
    catalog
        .iter()
        .filter(|p| p.popular || p.is_new)
        .take(limit)
        .cloned()
        .collect()
}

/// Heading for a listing page.
///
/// A search query takes precedence over the category slug.
#[must_use]
pub fn listing_title(category: Option<&str>, search: Option<&str>) -> String {
    if let Some(query) = search.filter(|q| !q.is_empty()) {
        return format!("Search Results for \"{query}\"");
    }
    match category.and_then(CategoryFilter::parse) {
        Some(CategoryFilter::Only(category)) => category.title().to_string(),
        Some(CategoryFilter::All) | None => "All Products".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rootsnjuices_core::{Category, ProductId, default_catalog};

    use super::*;

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_default_query_keeps_everything_under_twenty() {
        let catalog = default_catalog();
        assert_eq!(ListingQuery::default().apply(&catalog).len(), catalog.len());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = default_catalog();
        let query = ListingQuery {
            min_price: Decimal::new(999, 2),
            max_price: Decimal::new(999, 2),
            sort: SortOrder::PriceLow,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), vec![6, 11, 15]);
    }

    #[test]
    fn test_tag_filter_matches_any_selected_tag() {
        let catalog = default_catalog();
        let query = ListingQuery {
            tags: vec!["Detox".to_string(), "Probiotic".to_string()],
            sort: SortOrder::PriceLow,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), vec![9, 2]);

        let case_sensitive = ListingQuery {
            tags: vec!["detox".to_string()],
            ..ListingQuery::default()
        };
        assert!(case_sensitive.apply(&catalog).is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let catalog = default_catalog();
        let sorted = |sort| {
            ListingQuery {
                sort,
                ..ListingQuery::default()
            }
            .apply(&catalog)
        };

        assert_eq!(sorted(SortOrder::Popular)[0].id, ProductId::new(11));
        assert_eq!(sorted(SortOrder::PriceLow)[0].id, ProductId::new(1));
        assert_eq!(sorted(SortOrder::PriceHigh)[0].id, ProductId::new(14));
        assert_eq!(sorted(SortOrder::Rating)[0].id, ProductId::new(6));

        // ties keep catalog order
        let by_rating = ids(&sorted(SortOrder::Rating));
        let pos = |id| by_rating.iter().position(|&x| x == id).unwrap();
        assert!(pos(2) < pos(5));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-high".parse::<SortOrder>(), Ok(SortOrder::PriceHigh));
        assert!("cheapest".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::PriceLow.to_string(), "price-low");
    }

    #[test]
    fn test_available_tags_first_seen_order() {
        let catalog = default_catalog();
        let juices: Vec<Product> = catalog
            .into_iter()
            .filter(|p| p.category == Category::Juices)
            .collect();
        let tags = available_tags(&juices);
        assert_eq!(&tags[..4], ["Vegan", "Gluten-Free", "Vitamin C Rich", "Organic"]);
        assert_eq!(tags.iter().filter(|t| *t == "Vegan").count(), 1);
    }

    #[test]
    fn test_related_products() {
        let catalog = default_catalog();
        let related = related_products(&catalog, &catalog[0], RELATED_PRODUCTS_LIMIT);
        assert_eq!(ids(&related), vec![2, 3, 4]);

        let shawarma = &catalog[10];
        assert_eq!(ids(&related_products(&catalog, shawarma, 3)), vec![12]);
    }

    #[test]
    fn test_featured_products() {
        let catalog = default_catalog();
        let featured = featured_products(&catalog, FEATURED_PRODUCTS_LIMIT);
        assert_eq!(ids(&featured), vec![1, 2, 3, 5, 6, 8]);
    }

    #[test]
    fn test_listing_title() {
        assert_eq!(listing_title(Some("salads"), None), "Salads");
        assert_eq!(listing_title(None, None), "All Products");
        assert_eq!(listing_title(Some("all"), None), "All Products");
        assert_eq!(
            listing_title(Some("salads"), Some("kale")),
            "Search Results for \"kale\""
        );
    }
}
