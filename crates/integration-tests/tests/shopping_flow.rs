//! End-to-end shopping flows: browse, filter, fill a cart, quote.

use rust_decimal::Decimal;

use rootsnjuices_core::{Category, Product, ProductDraft, ProductId};
use rootsnjuices_storefront::listing::{
    FEATURED_PRODUCTS_LIMIT, ListingQuery, SortOrder, featured_products, listing_title,
};
use rootsnjuices_storefront::{
    CatalogConfig, CatalogStats, ContextId, MemoryStorage, Session, Storage, StorefrontError,
    config::DEFAULT_CATALOG_KEY,
};

fn session() -> Session<MemoryStorage> {
    Session::new(MemoryStorage::new(), CatalogConfig::default())
}

fn ids(products: &[Product]) -> Vec<i32> {
    products.iter().map(|p| p.id.as_i32()).collect()
}

#[test]
fn test_two_orange_juices() {
    let mut session = session();
    let orange = session.catalog().find_by_id(ProductId::new(1)).unwrap();
    assert_eq!(orange.name, "Fresh Orange Burst");

    session.add_to_cart(orange.id, Some("250ml")).unwrap();
    session.add_to_cart(orange.id, Some("250ml")).unwrap();

    let cart = session.cart();
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), Decimal::new(1198, 2));
    assert_eq!(session.checkout_quote().subtotal, "$11.98");
}

#[test]
fn test_cart_edits() {
    let mut session = session();
    session.add_to_cart(ProductId::new(6), Some("Large")).unwrap();
    session.add_to_cart(ProductId::new(11), None).unwrap();
    session.add_to_cart(ProductId::new(2), Some("500ml")).unwrap();

    session
        .cart_mut()
        .update_quantity(ProductId::new(11), "Regular", 3);
    session
        .cart_mut()
        .update_quantity(ProductId::new(2), "500ml", 0);

    let quote = session.checkout_quote();
    assert_eq!(quote.item_count, 4);
    // 13.99 + 3 × 9.99
    assert_eq!(quote.subtotal, "$43.96");
    assert_eq!(
        quote.items.iter().map(|i| i.title.as_str()).collect::<Vec<_>>(),
        vec!["Acai Berry Bowl", "Classic Chicken Shawarma"]
    );
}

#[test]
fn test_unknown_product_or_size_leaves_cart_alone() {
    let mut session = session();
    assert!(matches!(
        session.add_to_cart(ProductId::new(77), None),
        Err(StorefrontError::NotFound(_))
    ));
    assert!(matches!(
        session.add_to_cart(ProductId::new(5), Some("1L")),
        Err(StorefrontError::Cart(_))
    ));
    assert!(session.cart().is_empty());
}

#[test]
fn test_cart_keeps_price_after_admin_edit() {
    let storage = MemoryStorage::new();
    let mut shopper = Session::new(storage.clone(), CatalogConfig::default());
    let admin = Session::new(storage, CatalogConfig::default());

    shopper.add_to_cart(ProductId::new(1), None).unwrap();

    let mut edit =
        ProductDraft::from_product(&admin.catalog().find_by_id(ProductId::new(1)).unwrap());
    edit.sizes = "250ml:6.49, 500ml:10.49".to_string();
    admin.catalog().update_product(ProductId::new(1), &edit).unwrap();

    shopper.add_to_cart(ProductId::new(1), None).unwrap();
    let line = shopper.cart().line(ProductId::new(1), "250ml").unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.unit_price, Decimal::new(599, 2));
}

#[test]
fn test_search_organic() {
    let session = session();
    let hits = session.catalog().search("organic");
    assert_eq!(ids(&hits), vec![2]);
    assert_eq!(
        listing_title(None, Some("organic")),
        "Search Results for \"organic\""
    );
}

#[test]
fn test_browse_category_with_filters() {
    let session = session();
    let smoothies = session.catalog().find_by_category(Category::Smoothies.slug());
    let query = ListingQuery {
        max_price: Decimal::new(900, 2),
        tags: vec!["Vegan".to_string(), "High-Protein".to_string()],
        sort: SortOrder::PriceHigh,
        ..ListingQuery::default()
    };
    assert_eq!(ids(&query.apply(&smoothies)), vec![5, 8, 7]);
    assert_eq!(listing_title(Some("smoothies"), None), "Smoothies");
}

#[test]
fn test_home_page_features_new_additions() {
    let session = session();
    let catalog = session.catalog();
    for id in [1, 2, 3, 5, 6] {
        catalog.delete_product(ProductId::new(id)).unwrap();
    }
    let added = catalog
        .add_product(&ProductDraft {
            name: "Beet Ginger Shot".to_string(),
            price: "3.50".to_string(),
            is_new: true,
            ..ProductDraft::default()
        })
        .unwrap();

    let featured = featured_products(&catalog.load_catalog(), FEATURED_PRODUCTS_LIMIT);
    assert_eq!(ids(&featured), vec![8, 9, 11, 12, 13, added.id.as_i32()]);
}

#[test]
fn test_delete_everything_then_corrupt_restores_defaults() {
    let session = session();
    let catalog = session.catalog();
    for product in catalog.load_catalog() {
        catalog.delete_product(product.id).unwrap();
    }
    assert!(catalog.load_catalog().is_empty());
    assert_eq!(CatalogStats::compute(&catalog.load_catalog()).average_rating, Decimal::ZERO);

    catalog
        .storage()
        .set(ContextId::new(), DEFAULT_CATALOG_KEY, "not json at all")
        .unwrap();
    assert_eq!(catalog.load_catalog().len(), 15);
}

#[test]
fn test_persisted_snapshot_format() {
    let session = session();
    session.catalog().load_catalog();
    let raw = session
        .catalog()
        .storage()
        .get(DEFAULT_CATALOG_KEY)
        .unwrap()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["category"], "juices");
    assert_eq!(first["sizes"][0]["size"], "250ml");
    assert_eq!(first["reviews"], 124);
    assert!(first["nutritionInfo"]["calories"].is_number());
    assert_eq!(first["new"], false);
}

#[test]
fn test_snapshot_with_numeric_prices_is_accepted() {
    let session = session();
    let raw = r#"[{
        "id": 40,
        "name": "Plain Water",
        "category": "juices",
        "price": 1.5,
        "image": "",
        "description": "",
        "ingredients": [],
        "nutritionInfo": {"calories": 0, "protein": "0g", "carbs": "0g", "fat": "0g"},
        "sizes": [{"size": "500ml", "price": 1.5}],
        "tags": [],
        "rating": 4,
        "reviews": 0
    }]"#;
    session
        .catalog()
        .storage()
        .set(ContextId::new(), DEFAULT_CATALOG_KEY, raw)
        .unwrap();

    let catalog = session.catalog().load_catalog();
    assert_eq!(ids(&catalog), vec![40]);
    assert_eq!(catalog[0].price, Decimal::new(15, 1));
    assert!(!catalog[0].popular);
}
