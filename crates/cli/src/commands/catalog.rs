//! Catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! # List smoothies, cheapest first
//! rnj-cli catalog list -c smoothies --sort price-low
//!
//! # Add a product from a YAML draft
//! rnj-cli catalog add kale-crunch.yaml
//!
//! # Export a product as an editable draft, then apply the edit
//! rnj-cli catalog draft 3 -o tropical.yaml
//! rnj-cli catalog update 3 tropical.yaml
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use rootsnjuices_core::{CategoryFilter, Price, Product, ProductDraft, ProductId};
use rootsnjuices_storefront::listing::{
    self, ListingQuery, RELATED_PRODUCTS_LIMIT, available_tags, related_products,
};
use rootsnjuices_storefront::{CatalogStats, CatalogStore, Storage};

use super::{CliError, read_draft};

/// Filters for `catalog list`.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub category: String,
    pub search: Option<String>,
    pub query: ListingQuery,
}

fn log_product_row(product: &Product) {
    info!(
        "{:>3}  {:<34} {:<10} {:>7}  {:.1}★ ({} reviews){}",
        product.id.as_i32(),
        product.name,
        product.category.slug(),
        Price::usd(product.price).display(),
        product.rating,
        product.review_count,
        if product.is_new { "  NEW" } else { "" },
    );
}

fn log_issues(draft: &ProductDraft) {
    for issue in draft.validate() {
        warn!("draft: {issue}");
    }
}

/// List products.
///
/// # Errors
///
/// Returns an error if the category slug is unknown.
pub fn list<S: Storage>(store: &CatalogStore<S>, args: &ListArgs) -> Result<(), CliError> {
    let search = args.search.as_deref().filter(|q| !q.trim().is_empty());
    let products = match search {
        Some(query) => store.search(query),
        None => {
            if CategoryFilter::parse(&args.category).is_none() {
                return Err(CliError::InvalidArgument(format!(
                    "unknown category: {}",
                    args.category
                )));
            }
            store.find_by_category(&args.category)
        }
    };

    let listed = args.query.apply(&products);
    info!("{}", listing::listing_title(Some(&args.category), search));
    info!("Showing {} of {} products", listed.len(), products.len());
    for product in &listed {
        log_product_row(product);
    }

    let tags = available_tags(&products);
    if !tags.is_empty() {
        info!("Tags: {}", tags.join(", "));
    }
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns an error if the product does not exist or cannot be rendered.
pub fn show<S: Storage>(store: &CatalogStore<S>, id: ProductId, json: bool) -> Result<(), CliError> {
    let catalog = store.load_catalog();
    let product = catalog
        .iter()
        .find(|p| p.id == id)
        .ok_or(CliError::ProductNotFound(id))?;

    if json {
        info!("{}", serde_json::to_string_pretty(product)?);
        return Ok(());
    }

    info!("{} ({})", product.name, product.category.title());
    info!("{}", product.description);
    for size in &product.sizes {
        info!("  {:<10} {}", size.label, Price::usd(size.price).display());
    }
    info!("Ingredients: {}", product.ingredients.join(", "));
    let nutrition = &product.nutrition_info;
    info!(
        "Nutrition: {} kcal, protein {}, carbs {}, fat {}",
        nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
    );
    info!("Tags: {}", product.tags.join(", "));
    info!("Rating: {:.1} from {} reviews", product.rating, product.review_count);

    let related = related_products(&catalog, product, RELATED_PRODUCTS_LIMIT);
    if !related.is_empty() {
        info!("You may also like:");
        for other in &related {
            log_product_row(other);
        }
    }
    Ok(())
}

/// Create a product from a YAML draft.
///
/// # Errors
///
/// Returns an error if the draft cannot be read or the catalog cannot be saved.
pub async fn add<S: Storage>(store: &CatalogStore<S>, file: &Path) -> Result<(), CliError> {
    let draft = read_draft(file).await?;
    log_issues(&draft);
    let product = store.add_product(&draft)?;
    info!("Created product {}: {}", product.id, product.name);
    Ok(())
}

/// Replace a product with a YAML draft.
///
/// # Errors
///
/// Returns an error if the draft cannot be read, the product does not exist,
/// or the catalog cannot be saved.
pub async fn update<S: Storage>(
    store: &CatalogStore<S>,
    id: ProductId,
    file: &Path,
) -> Result<(), CliError> {
    let draft = read_draft(file).await?;
    log_issues(&draft);
    let product = store.update_product(id, &draft)?;
    info!("Updated product {}: {}", product.id, product.name);
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if the catalog cannot be saved.
pub fn delete<S: Storage>(store: &CatalogStore<S>, id: ProductId) -> Result<(), CliError> {
    match store.delete_product(id)? {
        Some(product) => info!("Deleted product {}: {}", product.id, product.name),
        None => warn!("Product {id} does not exist, nothing deleted"),
    }
    Ok(())
}

/// Restore the built-in catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be saved.
pub fn reset<S: Storage>(store: &CatalogStore<S>) -> Result<(), CliError> {
    let products = store.reset_to_defaults()?;
    info!("Catalog reset to {} default products", products.len());
    Ok(())
}

/// Log dashboard statistics.
pub fn stats<S: Storage>(store: &CatalogStore<S>) {
    let stats = CatalogStats::compute(&store.load_catalog());

    info!("Catalog Statistics");
    info!("==================");
    info!("Total products: {}", stats.total_products);
    info!("Average rating: {}", stats.average_rating_display());
    info!("Total reviews: {}", stats.total_reviews);
    info!(
        "Estimated revenue: {}",
        Price::usd(stats.estimated_revenue).display()
    );
    info!("By category:");
    for (category, count) in &stats.by_category {
        info!("  {}: {count}", category.title());
    }
}

/// Export a product as a YAML draft, to `output` or the log.
///
/// # Errors
///
/// Returns an error if the product does not exist or the file cannot be
/// written.
pub async fn draft<S: Storage>(
    store: &CatalogStore<S>,
    id: ProductId,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let product = store.find_by_id(id).ok_or(CliError::ProductNotFound(id))?;
    let yaml = serde_yaml::to_string(&ProductDraft::from_product(&product)).map_err(|source| {
        CliError::Yaml {
            path: output.map_or_else(|| PathBuf::from("-"), Path::to_path_buf),
            source,
        }
    })?;

    match output {
        Some(path) => {
            tokio::fs::write(path, yaml)
                .await
                .map_err(|source| CliError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!("Wrote draft for product {id} to {}", path.display());
        }
        None => info!("\n{yaml}"),
    }
    Ok(())
}
